//! Finding types produced by the generator and the usage validator.
//!
//! Each issue is self-contained with all information the reporter needs to
//! point the user at the offending locale file, key, or source line.

use enum_dispatch::enum_dispatch;

use crate::core::{MessageContext, MessageLocation, SourceContext};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue. Any `Error` makes the run fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type. Reports are grouped in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    MalformedSource,
    UnsupportedLeaf,
    InvalidSegment,
    MissingNamespace,
    UnlistedNamespace,
    DuplicateKey,
    ParityGap,
    StaleDeprecation,
    StaleSchema,
    HashMismatch,
    UnknownKey,
    DeprecatedKey,
    UnusedKey,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MalformedSource => write!(f, "malformed-source"),
            Rule::UnsupportedLeaf => write!(f, "unsupported-leaf"),
            Rule::InvalidSegment => write!(f, "invalid-segment"),
            Rule::MissingNamespace => write!(f, "missing-namespace"),
            Rule::UnlistedNamespace => write!(f, "unlisted-namespace"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::ParityGap => write!(f, "parity-gap"),
            Rule::StaleDeprecation => write!(f, "stale-deprecation"),
            Rule::StaleSchema => write!(f, "stale-schema"),
            Rule::HashMismatch => write!(f, "hash-mismatch"),
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::DeprecatedKey => write!(f, "deprecated-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
        }
    }
}

// ============================================================
// Issue Types - Locale Sources
// ============================================================

/// Locale file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSourceIssue {
    pub location: MessageLocation,
    /// Byte offset of the problem, when the parser reported one.
    pub offset: Option<usize>,
    /// Full error text; includes the byte offset when there is one.
    pub error: String,
}

impl MalformedSourceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MalformedSource
    }
}

/// Leaf that is not a string (number, boolean, null, array).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLeafIssue {
    pub context: MessageContext,
    /// JSON type that was found.
    pub found: String,
}

impl UnsupportedLeafIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnsupportedLeaf
    }
}

/// Key segment that is empty or contains a `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSegmentIssue {
    pub context: MessageContext,
    pub segment: String,
}

impl InvalidSegmentIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidSegment
    }
}

/// Namespace has no source file for a locale that must provide it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingNamespaceIssue {
    pub namespace: String,
    pub locale: String,
    /// Where the source file was expected.
    pub expected_path: String,
}

impl MissingNamespaceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingNamespace
    }
}

/// Namespace found on disk but absent from the namespace manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlistedNamespaceIssue {
    pub namespace: String,
    pub manifest_path: String,
}

impl UnlistedNamespaceIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnlistedNamespace
    }
}

// ============================================================
// Issue Types - Detector and Tracker
// ============================================================

/// Dotted key produced by more than one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyIssue {
    /// First definition, in emission order.
    pub context: MessageContext,
    /// Namespaces that produce the key, in emission order.
    pub source_namespaces: Vec<String>,
    /// Every definition site, in emission order.
    pub definitions: Vec<MessageLocation>,
}

impl DuplicateKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::DuplicateKey
    }
}

/// Key whose presence differs between locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityGapIssue {
    /// Definition in the first locale (base first) that has the key.
    pub context: MessageContext,
    pub present_in: Vec<String>,
    pub missing_from: Vec<String>,
    /// Error in strict mode, warning in permissive mode.
    pub severity: Severity,
}

impl ParityGapIssue {
    pub fn rule() -> Rule {
        Rule::ParityGap
    }
}

/// Deprecation entry that matches no live key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleDeprecationIssue {
    pub context: MessageContext,
    pub note: String,
}

impl StaleDeprecationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::StaleDeprecation
    }
}

// ============================================================
// Issue Types - Emitted Artifact
// ============================================================

/// Committed artifact differs from what the sources generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSchemaIssue {
    pub file_path: String,
    pub reason: String,
}

impl StaleSchemaIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::StaleSchema
    }
}

/// Committed artifact does not match its recorded content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashMismatchIssue {
    pub file_path: String,
    pub hash_file: String,
    /// Hash recorded in the sidecar, if the sidecar exists and is readable.
    pub recorded: Option<String>,
    pub actual: String,
}

impl HashMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::HashMismatch
    }
}

// ============================================================
// Issue Types - Usage Validator
// ============================================================

/// Source code references a key absent from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyIssue {
    pub context: SourceContext,
    pub key: String,
}

impl UnknownKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownKey
    }
}

/// Source code references a deprecated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedKeyUsageIssue {
    pub context: SourceContext,
    pub key: String,
    pub note: Option<String>,
    /// Warning by default, error with `--deny-deprecated`.
    pub severity: Severity,
}

impl DeprecatedKeyUsageIssue {
    pub fn rule() -> Rule {
        Rule::DeprecatedKey
    }
}

/// Schema key that no source file references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub context: MessageContext,
}

impl UnusedKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnusedKey
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A finding from a generator or validator run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MalformedSource(MalformedSourceIssue),
    UnsupportedLeaf(UnsupportedLeafIssue),
    InvalidSegment(InvalidSegmentIssue),
    MissingNamespace(MissingNamespaceIssue),
    UnlistedNamespace(UnlistedNamespaceIssue),
    DuplicateKey(DuplicateKeyIssue),
    ParityGap(ParityGapIssue),
    StaleDeprecation(StaleDeprecationIssue),
    StaleSchema(StaleSchemaIssue),
    HashMismatch(HashMismatchIssue),
    UnknownKey(UnknownKeyIssue),
    DeprecatedKeyUsage(DeprecatedKeyUsageIssue),
    UnusedKey(UnusedKeyIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Error
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// Locale file location of a key.
    Message(&'a MessageLocation),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards calls on `Issue`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MalformedSourceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.location)
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for UnsupportedLeafIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("found {}, expected string", self.found))
    }
}

impl Report for InvalidSegmentIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("segment \"{}\"", self.segment))
    }

    fn hint(&self) -> Option<String> {
        Some("nest the key as an object instead of using '.' in its name".to_string())
    }
}

impl Report for MissingNamespaceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.expected_path,
        }
    }

    fn message(&self) -> String {
        self.namespace.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("no source file for locale {}", self.locale))
    }
}

impl Report for UnlistedNamespaceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.manifest_path,
        }
    }

    fn message(&self) -> String {
        self.namespace.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("not listed in the namespace manifest; emitted after listed namespaces".to_string())
    }

    fn hint(&self) -> Option<String> {
        Some("add it to the manifest or run `keyschema manifest`".to_string())
    }
}

impl Report for DuplicateKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let sites: Vec<String> = self
            .definitions
            .iter()
            .map(|loc| format!("{}:{}", loc.file_path, loc.line))
            .collect();
        Some(format!(
            "defined by namespaces: {} ({})",
            self.source_namespaces.join(", "),
            sites.join(", ")
        ))
    }
}

impl Report for ParityGapIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "present in: {}; missing from: {}",
            self.present_in.join(", "),
            self.missing_from.join(", ")
        ))
    }
}

impl Report for StaleDeprecationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("no live key matches (\"{}\")", self.note))
    }

    fn hint(&self) -> Option<String> {
        Some("remove the entry from the deprecation list".to_string())
    }
}

impl Report for StaleSchemaIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.reason.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        Some("run `keyschema generate` and commit the result".to_string())
    }
}

impl Report for HashMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        "artifact does not match its recorded content hash".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} records {}, artifact hashes to {}",
            self.hash_file,
            self.recorded.as_deref().unwrap_or("nothing"),
            self.actual
        ))
    }

    fn hint(&self) -> Option<String> {
        Some("the generated file was edited by hand; regenerate it instead".to_string())
    }
}

impl Report for UnknownKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("key is not defined in the schema".to_string())
    }
}

impl Report for DeprecatedKeyUsageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        self.note.as_ref().map(|note| format!("deprecated: {}", note))
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context.location)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no source file references this key".to_string())
    }
}

// ============================================================
// Ordering for Issue (for grouped, deterministic reports)
// ============================================================

impl Issue {
    fn sort_location(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path(), ctx.line(), ctx.col()),
            ReportLocation::Message(loc) => (loc.file_path.as_str(), loc.line, loc.col),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Grouped by rule, then file, line, col, message.
        self.rule()
            .cmp(&other.rule())
            .then_with(|| self.sort_location().cmp(&other.sort_location()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
