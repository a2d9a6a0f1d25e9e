use pagequery_core::{ContextRegistry, DataSnapshot, EnvironmentCapabilities, QueryResult};
use serde_json::Value;
use std::sync::Arc;

/// Snapshot holding one payload per `(id, payload)` pair
#[allow(dead_code)]
pub fn snapshot_of(entries: &[(u64, Value)]) -> Arc<DataSnapshot> {
    let snapshot = entries
        .iter()
        .fold(DataSnapshot::new(), |snapshot, (id, payload)| {
            snapshot.with_entry(*id, QueryResult::new(payload.clone()))
        });
    Arc::new(snapshot)
}

/// Registry with full host support and the given default-channel table
#[allow(dead_code)]
pub fn registry_with_default(entries: &[(u64, Value)]) -> ContextRegistry {
    ContextRegistry::new(EnvironmentCapabilities::default(), snapshot_of(entries))
}

/// Capabilities of a host that cannot isolate per-render context
#[allow(dead_code)]
pub fn without_isolation() -> EnvironmentCapabilities {
    EnvironmentCapabilities {
        isolated_render_context: false,
        subscriptions: true,
    }
}
