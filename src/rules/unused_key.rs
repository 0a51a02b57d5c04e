//! Unused translation key detection rule.
//!
//! Detects schema keys that no source file references, to support pruning.

use crate::{
    core::{AllKeyUsages, MessageContext, Schema},
    issues::UnusedKeyIssue,
    rules::helpers::used_keys,
};

/// Check for schema keys with zero references.
///
/// Results follow schema order, which is already deterministic.
pub fn check_unused_keys(schema: &Schema, usages: &AllKeyUsages) -> Vec<UnusedKeyIssue> {
    let used = used_keys(usages);
    schema
        .keys()
        .iter()
        .filter(|key| !used.contains(key.dotted_key.as_str()))
        .map(|key| UnusedKeyIssue {
            context: MessageContext::new(key.location.clone(), key.dotted_key.clone()),
        })
        .collect()
}
