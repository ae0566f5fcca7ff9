use super::models::EdgeDnsType;

/// Signals that can each switch on an external DNS backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDnsSignals<'a> {
    pub route53_enabled: bool,
    pub ns1_enabled: bool,
    pub infoblox_host: &'a str,
}

/// Classifies the active backend and returns every backend found enabled,
/// tested in the order NS1, Route53, Infoblox.
pub fn edge_dns_type(signals: EdgeDnsSignals<'_>) -> (EdgeDnsType, Vec<EdgeDnsType>) {
    let mut recognized = Vec::with_capacity(3);
    if signals.ns1_enabled {
        recognized.push(EdgeDnsType::NS1);
    }
    if signals.route53_enabled {
        recognized.push(EdgeDnsType::Route53);
    }
    if !signals.infoblox_host.is_empty() {
        recognized.push(EdgeDnsType::Infoblox);
    }
    let resolved = match recognized.as_slice() {
        [] => EdgeDnsType::NoEdgeDNS,
        [single] => *single,
        _ => EdgeDnsType::MultipleProviders,
    };
    (resolved, recognized)
}
