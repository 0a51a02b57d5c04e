//! Deprecated key usage rule.
//!
//! Deprecated keys still resolve, so using one is a warning unless the caller
//! asks for it to be denied.

use crate::{
    core::{AllKeyUsages, Schema},
    issues::{DeprecatedKeyUsageIssue, Severity},
    rules::helpers::all_usages,
};

pub fn check_deprecated_usages(
    schema: &Schema,
    usages: &AllKeyUsages,
    deny: bool,
) -> Vec<DeprecatedKeyUsageIssue> {
    let severity = if deny {
        Severity::Error
    } else {
        Severity::Warning
    };

    all_usages(usages)
        .filter_map(|usage| {
            let key = schema.get(&usage.key)?;
            key.deprecated.then(|| DeprecatedKeyUsageIssue {
                context: usage.context.clone(),
                key: usage.key.clone(),
                note: key.deprecation_note.clone(),
                severity,
            })
        })
        .collect()
}
