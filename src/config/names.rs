//! DNS names derived from geo tags and zones.
//!
//! The free functions expect already validated input and never fail.

use std::collections::BTreeMap;

use super::models::Config;

const NS_PREFIX: &str = "gslb-ns";

/// Name of the NS record delegating `dns_zone` for the cluster tagged `geo_tag`.
///
/// ```text
/// DNS_ZONE        k8gb-test.gslb.cloud.example.com
/// EDGE_DNS_ZONE   cloud.example.com
/// CLUSTER_GEO_TAG us
/// => gslb-ns-us-k8gb-test-gslb.cloud.example.com
/// ```
///
/// A loopback edge server is returned as is.
pub fn ns_name(
    geo_tag: &str,
    dns_zone: &str,
    edge_dns_zone: &str,
    edge_dns_server: &str,
) -> String {
    if edge_dns_server == "127.0.0.1" || edge_dns_server == "localhost" {
        return edge_dns_server.to_string();
    }
    let suffix = format!(".{}", edge_dns_zone);
    let remainder = dns_zone.strip_suffix(suffix.as_str()).unwrap_or(dns_zone);
    format!(
        "{}-{}-{}.{}",
        NS_PREFIX,
        geo_tag,
        remainder.replace('.', "-"),
        edge_dns_zone
    )
}

/// Pre-rename NS name, kept for lookups of records created by older releases.
/// Dashes the whole `dns_zone` and puts the geo tag last.
pub fn legacy_ns_name(geo_tag: &str, dns_zone: &str, edge_dns_zone: &str) -> String {
    format!(
        "{}-{}-{}.{}",
        NS_PREFIX,
        dns_zone.replace('.', "-"),
        geo_tag,
        edge_dns_zone
    )
}

/// `test-gslb-1`, `us`, `cloud.example.com` => `test-gslb-1-heartbeat-us.cloud.example.com`
pub fn heartbeat_fqdn(name: &str, geo_tag: &str, edge_dns_zone: &str) -> String {
    format!("{}-heartbeat-{}.{}", name, geo_tag, edge_dns_zone)
}

impl Config {
    pub fn cluster_ns_name(&self) -> String {
        ns_name(
            &self.cluster_geo_tag,
            &self.dns_zone,
            &self.edge_dns_zone,
            &self.edge_dns_server,
        )
    }

    pub fn cluster_old_ns_name(&self) -> String {
        legacy_ns_name(&self.cluster_geo_tag, &self.dns_zone, &self.edge_dns_zone)
    }

    pub fn external_cluster_ns_names(&self) -> BTreeMap<String, String> {
        self.ext_clusters_geo_tags
            .iter()
            .map(|tag| {
                let name = ns_name(
                    tag,
                    &self.dns_zone,
                    &self.edge_dns_zone,
                    &self.edge_dns_server,
                );
                (tag.clone(), name)
            })
            .collect()
    }

    pub fn cluster_heartbeat_fqdn(&self, gslb_name: &str) -> String {
        heartbeat_fqdn(gslb_name, &self.cluster_geo_tag, &self.edge_dns_zone)
    }

    pub fn external_cluster_heartbeat_fqdns(&self, gslb_name: &str) -> BTreeMap<String, String> {
        self.ext_clusters_geo_tags
            .iter()
            .map(|tag| (tag.clone(), heartbeat_fqdn(gslb_name, tag, &self.edge_dns_zone)))
            .collect()
    }
}
