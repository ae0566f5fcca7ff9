//! Assembles the operator [`Config`] from a settings source and validates it.
//!
//! Resolution runs once per [`DependencyResolver`]; the outcome, success or
//! failure, is cached and handed to every caller.

use log::{debug, info};
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;

use super::edgedns::{edge_dns_type, EdgeDnsSignals};
use super::error::ConfigError;
use super::models::{Config, EdgeDnsType, Infoblox, LogConfig, LogFormat, LogLevel, Override};
use super::source::{EnvSource, SettingsSource};
use super::validator::{
    field, GEO_TAG_REGEX, HOST_NAME_REGEX, IP_ADDRESS_REGEX, K8S_NAMESPACE_REGEX,
    VERSION_NUMBER_REGEX,
};

// Environment variable keys
pub const RECONCILE_REQUEUE_SECONDS_KEY: &str = "RECONCILE_REQUEUE_SECONDS";
pub const CLUSTER_GEO_TAG_KEY: &str = "CLUSTER_GEO_TAG";
pub const EXT_CLUSTERS_GEO_TAGS_KEY: &str = "EXT_GSLB_CLUSTERS_GEO_TAGS";
pub const ROUTE53_ENABLED_KEY: &str = "ROUTE53_ENABLED";
pub const NS1_ENABLED_KEY: &str = "NS1_ENABLED";
pub const EDGE_DNS_SERVER_KEY: &str = "EDGE_DNS_SERVER";
pub const EDGE_DNS_SERVER_PORT_KEY: &str = "EDGE_DNS_SERVER_PORT";
pub const EDGE_DNS_ZONE_KEY: &str = "EDGE_DNS_ZONE";
pub const DNS_ZONE_KEY: &str = "DNS_ZONE";
pub const INFOBLOX_GRID_HOST_KEY: &str = "INFOBLOX_GRID_HOST";
pub const INFOBLOX_VERSION_KEY: &str = "INFOBLOX_WAPI_VERSION";
pub const INFOBLOX_PORT_KEY: &str = "INFOBLOX_WAPI_PORT";
pub const INFOBLOX_USERNAME_KEY: &str = "EXTERNAL_DNS_INFOBLOX_WAPI_USERNAME";
pub const INFOBLOX_PASSWORD_KEY: &str = "EXTERNAL_DNS_INFOBLOX_WAPI_PASSWORD";
pub const INFOBLOX_HTTP_REQUEST_TIMEOUT_KEY: &str = "INFOBLOX_HTTP_REQUEST_TIMEOUT";
pub const INFOBLOX_HTTP_POOL_CONNECTIONS_KEY: &str = "INFOBLOX_HTTP_POOL_CONNECTIONS";
pub const OVERRIDE_FAKE_INFOBLOX_KEY: &str = "FAKE_INFOBLOX";
pub const K8GB_NAMESPACE_KEY: &str = "POD_NAMESPACE";
pub const COREDNS_EXPOSED_KEY: &str = "COREDNS_EXPOSED";
pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
pub const LOG_FORMAT_KEY: &str = "LOG_FORMAT";
pub const LOG_NO_COLOR_KEY: &str = "NO_COLOR";
pub const SPLIT_BRAIN_CHECK_KEY: &str = "SPLIT_BRAIN_CHECK";
pub const METRICS_ADDRESS_KEY: &str = "METRICS_ADDRESS";

const DNS_NAME_MAX: usize = 253;
const DNS_LABEL_MAX: usize = 63;

static RESOLVER: Lazy<DependencyResolver> = Lazy::new(|| DependencyResolver::new(EnvSource));

/// Resolves the operator configuration from the process environment.
/// Only the first call does any work.
pub fn resolve() -> Result<Arc<Config>, ConfigError> {
    RESOLVER.resolve_operator_config()
}

pub struct DependencyResolver {
    source: Box<dyn SettingsSource>,
    config: OnceCell<Result<Arc<Config>, ConfigError>>,
}

impl DependencyResolver {
    pub fn new(source: impl SettingsSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            config: OnceCell::new(),
        }
    }

    /// Executes once. Concurrent callers block until the first resolution
    /// finishes and then observe its result.
    pub fn resolve_operator_config(&self) -> Result<Arc<Config>, ConfigError> {
        self.config
            .get_or_init(|| {
                debug!("Resolving operator configuration");
                let resolved = resolve_config(self.source.as_ref()).map(Arc::new);
                if let Ok(config) = &resolved {
                    info!(
                        "Operator configuration resolved, EdgeDNS type: {}",
                        config.edge_dns_type
                    );
                }
                resolved
            })
            .clone()
    }
}

/// Reads every setting and validates the result. No caching.
pub fn resolve_config(source: &dyn SettingsSource) -> Result<Config, ConfigError> {
    let route53_enabled = source.get_bool(ROUTE53_ENABLED_KEY, false)?;
    let ns1_enabled = source.get_bool(NS1_ENABLED_KEY, false)?;
    let infoblox = Infoblox {
        host: source.get_string(INFOBLOX_GRID_HOST_KEY, ""),
        version: source.get_string(INFOBLOX_VERSION_KEY, ""),
        port: source.get_int(INFOBLOX_PORT_KEY, 0)?,
        username: source.get_string(INFOBLOX_USERNAME_KEY, ""),
        password: source.get_string(INFOBLOX_PASSWORD_KEY, ""),
        http_pool_connections: source.get_int(INFOBLOX_HTTP_POOL_CONNECTIONS_KEY, 10)?,
        http_request_timeout: source.get_int(INFOBLOX_HTTP_REQUEST_TIMEOUT_KEY, 20)?,
    };
    let (edge_dns_type, recognized) = edge_dns_type(EdgeDnsSignals {
        route53_enabled,
        ns1_enabled,
        infoblox_host: &infoblox.host,
    });

    let reconcile_requeue_seconds = source.get_int(RECONCILE_REQUEUE_SECONDS_KEY, 30)?;
    let edge_dns_server_port = source.get_int(EDGE_DNS_SERVER_PORT_KEY, 53)?;
    let core_dns_exposed = source.get_bool(COREDNS_EXPOSED_KEY, false)?;
    let fake_infoblox_enabled = source.get_bool(OVERRIDE_FAKE_INFOBLOX_KEY, false)?;
    let no_color = source.get_bool(LOG_NO_COLOR_KEY, false)?;
    let split_brain_check = source.get_bool(SPLIT_BRAIN_CHECK_KEY, false)?;

    let level = source
        .get_string(LOG_LEVEL_KEY, LogLevel::Info.as_str())
        .parse::<LogLevel>()
        .map_err(|_| ConfigError::Enumeration {
            key: LOG_LEVEL_KEY.to_string(),
            allowed: LogLevel::ALLOWED.to_vec(),
        })?;
    let format = source
        .get_string(LOG_FORMAT_KEY, "simple")
        .parse::<LogFormat>()
        .map_err(|_| ConfigError::Enumeration {
            key: LOG_FORMAT_KEY.to_string(),
            allowed: LogFormat::ALLOWED.to_vec(),
        })?;

    let config = Config {
        reconcile_requeue_seconds,
        cluster_geo_tag: source.get_string(CLUSTER_GEO_TAG_KEY, ""),
        ext_clusters_geo_tags: source.get_string_array(EXT_CLUSTERS_GEO_TAGS_KEY, &[]),
        edge_dns_type,
        edge_dns_server: source.get_string(EDGE_DNS_SERVER_KEY, ""),
        edge_dns_server_port,
        edge_dns_zone: source.get_string(EDGE_DNS_ZONE_KEY, ""),
        dns_zone: source.get_string(DNS_ZONE_KEY, ""),
        k8gb_namespace: source.get_string(K8GB_NAMESPACE_KEY, ""),
        route53_enabled,
        ns1_enabled,
        core_dns_exposed,
        infoblox,
        override_: Override {
            fake_infoblox_enabled,
        },
        log: LogConfig {
            level,
            format,
            no_color,
        },
        metrics_address: source.get_string(METRICS_ADDRESS_KEY, "0.0.0.0:8080"),
        split_brain_check,
    };

    validate_config(&config, &recognized)?;
    Ok(config)
}

/// Runs the checks in a fixed order and stops at the first failure.
pub fn validate_config(config: &Config, recognized: &[EdgeDnsType]) -> Result<(), ConfigError> {
    if config.edge_dns_type == EdgeDnsType::MultipleProviders {
        return Err(ConfigError::MultipleEdgeDns(recognized.to_vec()));
    }
    field(K8GB_NAMESPACE_KEY, config.k8gb_namespace.as_str())
        .is_not_empty()
        .match_regexp(&K8S_NAMESPACE_REGEX)
        .result()?;
    field(RECONCILE_REQUEUE_SECONDS_KEY, &config.reconcile_requeue_seconds)
        .is_higher_than_zero()
        .result()?;
    field(CLUSTER_GEO_TAG_KEY, config.cluster_geo_tag.as_str())
        .is_not_empty()
        .match_regexp(&GEO_TAG_REGEX)
        .result()?;
    field(EXT_CLUSTERS_GEO_TAGS_KEY, config.ext_clusters_geo_tags.as_slice())
        .has_items()
        .has_unique_items()
        .result()?;
    for (i, geo_tag) in config.ext_clusters_geo_tags.iter().enumerate() {
        field(format!("{}[{}]", EXT_CLUSTERS_GEO_TAGS_KEY, i), geo_tag.as_str())
            .is_not_empty()
            .match_regexp(&GEO_TAG_REGEX)
            .is_not_equal_to(config.cluster_geo_tag.as_str())
            .result()?;
    }
    field(EDGE_DNS_SERVER_KEY, config.edge_dns_server.as_str())
        .is_not_empty()
        .match_regexps(&[&*HOST_NAME_REGEX, &*IP_ADDRESS_REGEX])
        .result()?;
    field(EDGE_DNS_SERVER_PORT_KEY, &config.edge_dns_server_port)
        .is_higher_than_zero()
        .result()?;
    field(EDGE_DNS_ZONE_KEY, config.edge_dns_zone.as_str())
        .is_not_empty()
        .match_regexp(&HOST_NAME_REGEX)
        .result()?;
    field(DNS_ZONE_KEY, config.dns_zone.as_str())
        .is_not_empty()
        .match_regexp(&HOST_NAME_REGEX)
        .result()?;
    // full Infoblox validation only when the grid host is set
    if !config.infoblox.host.is_empty() {
        validate_infoblox(&config.infoblox)?;
    }
    validate_ns_names(config)?;

    let (host, port) = parse_metrics_addr(&config.metrics_address)?;
    field(METRICS_ADDRESS_KEY, host)
        .match_regexps(&[&*HOST_NAME_REGEX, &*IP_ADDRESS_REGEX])
        .result()?;
    field(METRICS_ADDRESS_KEY, &port)
        .is_less_or_equal_to(65535)
        .is_higher_than(1024)
        .result()
}

fn validate_infoblox(infoblox: &Infoblox) -> Result<(), ConfigError> {
    field(INFOBLOX_GRID_HOST_KEY, infoblox.host.as_str())
        .match_regexps(&[&*HOST_NAME_REGEX, &*IP_ADDRESS_REGEX])
        .result()?;
    field(INFOBLOX_VERSION_KEY, infoblox.version.as_str())
        .is_not_empty()
        .match_regexp(&VERSION_NUMBER_REGEX)
        .result()?;
    field(INFOBLOX_PORT_KEY, &infoblox.port)
        .is_higher_than_zero()
        .is_less_or_equal_to(65535)
        .result()?;
    field(INFOBLOX_USERNAME_KEY, infoblox.username.as_str())
        .is_not_empty()
        .result()?;
    field(INFOBLOX_PASSWORD_KEY, infoblox.password.as_str())
        .is_not_empty()
        .result()?;
    field(INFOBLOX_HTTP_POOL_CONNECTIONS_KEY, &infoblox.http_pool_connections)
        .is_higher_or_equal_to_zero()
        .result()?;
    field(INFOBLOX_HTTP_REQUEST_TIMEOUT_KEY, &infoblox.http_request_timeout)
        .is_higher_than_zero()
        .result()
}

/// Local cluster first, then external clusters in configured order.
fn validate_ns_names(config: &Config) -> Result<(), ConfigError> {
    let external = config.external_cluster_ns_names();
    let local = (config.cluster_geo_tag.as_str(), config.cluster_ns_name());
    let names = std::iter::once(local).chain(
        config
            .ext_clusters_geo_tags
            .iter()
            .filter_map(|tag| external.get(tag).map(|name| (tag.as_str(), name.clone()))),
    );
    for (geo_tag, ns_name) in names {
        if ns_name.len() > DNS_NAME_MAX {
            return Err(ConfigError::NsNameTooLong {
                geo_tag: geo_tag.to_string(),
                name: ns_name,
                limit: DNS_NAME_MAX,
                edge_zone_key: EDGE_DNS_ZONE_KEY,
                edge_zone: config.edge_dns_zone.clone(),
                zone_key: DNS_ZONE_KEY,
                zone: config.dns_zone.clone(),
            });
        }
        if let Some(label) = ns_name.split('.').find(|l| l.len() > DNS_LABEL_MAX) {
            return Err(ConfigError::NsLabelTooLong {
                geo_tag: geo_tag.to_string(),
                label: label.to_string(),
                limit: DNS_LABEL_MAX,
                name: ns_name.clone(),
            });
        }
    }
    Ok(())
}

/// Splits `{host}:port`. IPv6 literals are not supported.
pub fn parse_metrics_addr(metrics_addr: &str) -> Result<(&str, i64), ConfigError> {
    let invalid = |reason: String| ConfigError::MetricsAddress {
        key: METRICS_ADDRESS_KEY,
        reason,
    };
    let parts: Vec<&str> = metrics_addr.split(':').collect();
    let [host, port] = parts.as_slice() else {
        return Err(invalid(format!("invalid format {{host}}:port ({})", metrics_addr)));
    };
    let port = port
        .parse::<i64>()
        .map_err(|e| invalid(format!("invalid port '{}': {}", port, e)))?;
    Ok((*host, port))
}
