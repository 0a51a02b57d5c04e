//! Shared helpers for the usage rules.

use std::collections::HashSet;

use crate::core::{AllKeyUsages, KeyUsage};

/// Every usage across all files, in file then source order.
pub fn all_usages(usages: &AllKeyUsages) -> impl Iterator<Item = &KeyUsage> {
    usages.values().flatten()
}

/// Set of every key referenced anywhere in the source tree.
pub fn used_keys(usages: &AllKeyUsages) -> HashSet<&str> {
    all_usages(usages).map(|u| u.key.as_str()).collect()
}
