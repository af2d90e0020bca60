use serde::{Deserialize, Serialize};

/// Server-side scheduling priority of a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Default,
    Low,
    Medium,
    High,
}

/// How a scan cursor is driven across the cluster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPolicy {
    pub priority: Priority,
    /// Nodes scanned in parallel. `0` means all nodes at once.
    pub max_concurrent_nodes: usize,
    /// Records buffered between the client and the consumer.
    pub record_queue_size: usize,
}

impl ScanPolicy {
    /// Low priority, one node at a time.
    ///
    /// Scans are administrative batch work; this keeps them from competing
    /// with latency-sensitive traffic on the cluster.
    pub fn throttled() -> Self {
        Self {
            priority: Priority::Low,
            max_concurrent_nodes: 1,
            ..Self::default()
        }
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            priority: Priority::Default,
            max_concurrent_nodes: 0,
            record_queue_size: 1024,
        }
    }
}
