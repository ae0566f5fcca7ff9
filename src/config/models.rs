use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Operator configuration resolved from the settings source.
///
/// Only produced by a successful resolution, so every field already passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub reconcile_requeue_seconds: i64,
    pub cluster_geo_tag: String,
    pub ext_clusters_geo_tags: Vec<String>,
    pub edge_dns_type: EdgeDnsType,
    pub edge_dns_server: String,
    pub edge_dns_server_port: i64,
    pub edge_dns_zone: String,
    pub dns_zone: String,
    pub k8gb_namespace: String,
    pub route53_enabled: bool,
    pub ns1_enabled: bool,
    pub core_dns_exposed: bool,
    pub infoblox: Infoblox,
    #[serde(rename = "override")]
    pub override_: Override,
    pub log: LogConfig,
    pub metrics_address: String,
    pub split_brain_check: bool,
}

/// Infoblox grid connection settings. Fully validated only when `host` is set.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct Infoblox {
    pub host: String,
    pub version: String,
    pub port: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub http_pool_connections: i64,
    pub http_request_timeout: i64,
}

impl fmt::Debug for Infoblox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Infoblox")
            .field("host", &self.host)
            .field("version", &self.version)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("http_pool_connections", &self.http_pool_connections)
            .field("http_request_timeout", &self.http_request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Override {
    pub fake_infoblox_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub no_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Simple,
            no_color: false,
        }
    }
}

/// External DNS backend that manages the edge zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EdgeDnsType {
    NoEdgeDNS,
    Route53,
    NS1,
    Infoblox,
    MultipleProviders,
}

impl fmt::Display for EdgeDnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeDnsType::NoEdgeDNS => write!(f, "NoEdgeDNS"),
            EdgeDnsType::Route53 => write!(f, "Route53"),
            EdgeDnsType::NS1 => write!(f, "NS1"),
            EdgeDnsType::Infoblox => write!(f, "Infoblox"),
            EdgeDnsType::MultipleProviders => write!(f, "MultipleProviders"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
    Disabled,
}

impl LogLevel {
    pub const ALLOWED: [&'static str; 8] = [
        "trace", "debug", "info", "warn", "error", "fatal", "panic", "disabled",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
            LogLevel::Disabled => "disabled",
        }
    }

    /// Closest `log` filter; fatal and panic have no own level in `log`.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => log::LevelFilter::Error,
            LogLevel::Disabled => log::LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            "disabled" => Ok(LogLevel::Disabled),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Simple,
}

impl LogFormat {
    pub const ALLOWED: [&'static str; 2] = ["json", "simple"];
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Simple => write!(f, "simple"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "simple" => Ok(LogFormat::Simple),
            _ => Err(()),
        }
    }
}
