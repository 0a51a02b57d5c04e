use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Validate(ValidateSummary),
    Manifest(ManifestSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub is_check: bool,
    /// Artifact path; set whenever a schema was derived.
    pub output: Option<String>,
    /// Content hash of the written artifact. `None` in check mode.
    pub hash: Option<String>,
    pub key_count: usize,
    pub namespace_count: usize,
    pub deprecated_count: usize,
}

#[derive(Debug, Default)]
pub struct ValidateSummary {
    /// Keys in the derived schema; `None` when the schema could not be derived.
    pub key_count: Option<usize>,
    pub usage_count: usize,
}

#[derive(Debug, Default)]
pub struct ManifestSummary {
    pub path: String,
    /// Written order; empty when nothing was written.
    pub namespaces: Vec<String>,
    pub added: Vec<String>,
    pub dropped: Vec<String>,
    pub written: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a keyschema command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All findings, sorted by rule, file, line and key.
    pub issues: Vec<Issue>,
    /// Number of application source files that were scanned.
    pub source_files_checked: usize,
    /// Number of locale source files that were loaded.
    pub locale_files_checked: usize,
}
