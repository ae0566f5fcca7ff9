use thiserror::Error;

use super::models::EdgeDnsType;

/// A single constraint a field value failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("can't be empty")]
    Empty,
    #[error("does not match /{pattern}/ regexp rule")]
    NoMatch { pattern: String },
    #[error("does not match any of /{}/ regexp rules", .patterns.join("/, /"))]
    NoMatchAny { patterns: Vec<String> },
    #[error("is less or equal to zero")]
    NotPositive,
    #[error("is less than zero")]
    Negative,
    #[error("is less or equal to {limit}")]
    NotHigherThan { limit: String },
    #[error("is higher than {limit}")]
    HigherThan { limit: String },
    #[error("can't be equal to \"{other}\"")]
    EqualTo { other: String },
    #[error("must contain unique items, \"{item}\" is duplicated")]
    NotUnique { item: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("can't parse '{key}' value '{value}' as {expected}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid '{key}', allowed values [{}]", .allowed.join(","))]
    Enumeration {
        key: String,
        allowed: Vec<&'static str>,
    },

    #[error("\"{key}\" {violation}")]
    Field { key: String, violation: Violation },

    #[error("several EdgeDNS recognized [{}]", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))]
    MultipleEdgeDns(Vec<EdgeDnsType>),

    #[error(
        "ns name '{name}' exceeds {limit} characters limit for [GeoTag: '{geo_tag}', {edge_zone_key}: '{edge_zone}', {zone_key}: '{zone}']"
    )]
    NsNameTooLong {
        geo_tag: String,
        name: String,
        limit: usize,
        edge_zone_key: &'static str,
        edge_zone: String,
        zone_key: &'static str,
        zone: String,
    },

    #[error("error for geo tag: {geo_tag}. {label} exceeds {limit} characters limit in ns name {name}")]
    NsLabelTooLong {
        geo_tag: String,
        label: String,
        limit: usize,
        name: String,
    },

    #[error("invalid {key}: expecting MetricsAddress in form {{host}}:port ({reason})")]
    MetricsAddress { key: &'static str, reason: String },
}

impl ConfigError {
    /// Environment key the error refers to, if it is tied to a single one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::Parse { key, .. }
            | ConfigError::Enumeration { key, .. }
            | ConfigError::Field { key, .. } => Some(key.as_str()),
            ConfigError::MetricsAddress { key, .. } => Some(*key),
            _ => None,
        }
    }
}
