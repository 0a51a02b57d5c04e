//! Key usage types produced by the source scan and consumed by the usage rules.

use std::collections::BTreeMap;

use crate::core::SourceContext;

/// A single literal key reference found in application source,
/// e.g. `t("common.ok")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    /// The referenced dotted key, exactly as written in the literal.
    pub key: String,
    pub context: SourceContext,
}

/// All key usages, keyed by source file path.
///
/// A `BTreeMap` keeps files in path order so reports do not depend on the
/// order the parallel scan finished in.
pub type AllKeyUsages = BTreeMap<String, Vec<KeyUsage>>;
