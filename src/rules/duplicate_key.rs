//! Duplicate key detection rule.
//!
//! A dotted key must map to exactly one string. Two namespaces can produce
//! the same key through the ungrouped legacy namespace or through overlapping
//! dotted namespaces (`admin` with `users.title` and `admin.users` with `title`).

use std::collections::HashMap;

use crate::{
    core::{FlatKey, MessageContext},
    issues::DuplicateKeyIssue,
};

/// Report every dotted key produced more than once in the merged list.
///
/// One issue per key, in the order the key first appears, listing every
/// namespace and definition site.
pub fn check_duplicate_keys(merged: &[FlatKey]) -> Vec<DuplicateKeyIssue> {
    let mut groups: HashMap<&str, Vec<&FlatKey>> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for key in merged {
        let group = groups.entry(key.dotted_key.as_str()).or_default();
        if group.is_empty() {
            first_seen.push(key.dotted_key.as_str());
        }
        group.push(key);
    }

    first_seen
        .into_iter()
        .filter_map(|dotted| {
            let group = groups.get(dotted)?;
            if group.len() < 2 {
                return None;
            }
            let first = group[0];
            Some(DuplicateKeyIssue {
                context: MessageContext::new(first.location.clone(), dotted),
                source_namespaces: group.iter().map(|k| k.namespace.clone()).collect(),
                definitions: group.iter().map(|k| k.location.clone()).collect(),
            })
        })
        .collect()
}
