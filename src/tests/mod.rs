use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::resolver::RECONCILE_REQUEUE_SECONDS_KEY;
use crate::config::{MapSource, SettingsSource};


/// Minimal settings that resolve without error.
fn valid_settings() -> MapSource {
    [
        ("POD_NAMESPACE", "k8gb"),
        ("CLUSTER_GEO_TAG", "us"),
        ("EXT_GSLB_CLUSTERS_GEO_TAGS", "eu,za"),
        ("EDGE_DNS_SERVER", "dns.cloud.example.com"),
        ("EDGE_DNS_ZONE", "cloud.example.com"),
        ("DNS_ZONE", "k8gb-test.gslb.cloud.example.com"),
    ]
    .into_iter()
    .collect()
}

/// Counts how many times the assembler read its first setting.
struct CountingSource {
    inner: MapSource,
    reads: Arc<AtomicUsize>,
}

impl CountingSource {
    fn new(inner: MapSource) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                reads: reads.clone(),
            },
            reads,
        )
    }
}

impl SettingsSource for CountingSource {
    fn lookup(&self, key: &str) -> Option<String> {
        if key == RECONCILE_REQUEUE_SECONDS_KEY {
            self.reads.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.lookup(key)
    }
}
