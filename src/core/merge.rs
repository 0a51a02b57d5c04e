//! Namespace merger.

use std::collections::BTreeMap;

use crate::core::FlatKey;

/// Concatenate per-namespace key lists in `order`.
///
/// Each list is already sorted by the flattener, so the result is
/// namespace-then-alphabetical. Namespaces absent from `order` are not
/// emitted; the manifest decides what belongs to the schema.
pub fn merge_namespaces(
    order: &[String],
    mut per_namespace: BTreeMap<String, Vec<FlatKey>>,
) -> Vec<FlatKey> {
    let mut merged = Vec::with_capacity(per_namespace.values().map(Vec::len).sum());
    for namespace in order {
        if let Some(keys) = per_namespace.remove(namespace) {
            merged.extend(keys);
        }
    }
    merged
}
