//! Locale parity rule.
//!
//! Detects keys whose presence differs between the base locale and the
//! comparison locales, in either direction.

use std::collections::HashSet;

use crate::{
    config::ParityMode,
    core::{FlatKey, MessageContext},
    issues::{ParityGapIssue, Severity},
};

/// Flattened keys of one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleKeys<'a> {
    pub locale: &'a str,
    pub keys: &'a [FlatKey],
}

/// Report one gap per key not present in every locale.
///
/// `locales` lists the base locale first. Gaps are errors in strict mode and
/// warnings in permissive mode; all of them are collected.
pub fn check_parity(locales: &[LocaleKeys<'_>], mode: ParityMode) -> Vec<ParityGapIssue> {
    if locales.len() < 2 {
        return Vec::new();
    }

    let severity = match mode {
        ParityMode::Strict => Severity::Error,
        ParityMode::Permissive => Severity::Warning,
    };

    let key_sets: Vec<HashSet<&str>> = locales
        .iter()
        .map(|l| l.keys.iter().map(|k| k.dotted_key.as_str()).collect())
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut issues = Vec::new();

    for locale in locales {
        for key in locale.keys {
            if !seen.insert(key.dotted_key.as_str()) {
                continue;
            }

            let (present_in, missing_from): (Vec<_>, Vec<_>) = locales
                .iter()
                .zip(&key_sets)
                .partition(|(_, set)| set.contains(key.dotted_key.as_str()));
            if missing_from.is_empty() {
                continue;
            }

            issues.push(ParityGapIssue {
                context: MessageContext::new(key.location.clone(), key.dotted_key.clone()),
                present_in: present_in.iter().map(|(l, _)| l.locale.to_string()).collect(),
                missing_from: missing_from.iter().map(|(l, _)| l.locale.to_string()).collect(),
                severity,
            });
        }
    }

    issues
}
