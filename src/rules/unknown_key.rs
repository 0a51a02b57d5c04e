//! Unknown key detection rule.
//!
//! A literal key passed to a lookup function must exist in the schema.

use crate::{
    core::{AllKeyUsages, Schema},
    issues::UnknownKeyIssue,
    rules::helpers::all_usages,
};

pub fn check_unknown_keys(schema: &Schema, usages: &AllKeyUsages) -> Vec<UnknownKeyIssue> {
    all_usages(usages)
        .filter(|usage| !schema.contains(&usage.key))
        .map(|usage| UnknownKeyIssue {
            context: usage.context.clone(),
            key: usage.key.clone(),
        })
        .collect()
}
