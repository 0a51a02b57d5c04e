use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".keyschemarc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// How locale parity gaps are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParityMode {
    /// Gaps are errors, and comparison locales must provide every namespace.
    #[default]
    Strict,
    /// Gaps are warnings; useful while a locale is translated incrementally.
    Permissive,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root")]
    pub messages_root: String,
    #[serde(default = "default_base_locale")]
    pub base_locale: String,
    /// Comparison locales. Empty means every other locale directory found.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    #[serde(default = "default_deprecations_file")]
    pub deprecations_file: String,
    /// Legacy namespace whose keys are emitted without a namespace prefix.
    #[serde(default)]
    pub ungrouped_namespace: Option<String>,
    #[serde(default = "default_output")]
    pub output: String,
    /// Content-hash sidecar. Defaults to `<output>.sha256`.
    #[serde(default)]
    pub hash_file: Option<String>,
    #[serde(default)]
    pub parity: ParityMode,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_lookup_functions")]
    pub lookup_functions: Vec<String>,
    #[serde(default)]
    pub report_unused: bool,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_messages_root() -> String {
    "./locales".to_string()
}

fn default_base_locale() -> String {
    "en".to_string()
}

fn default_manifest_file() -> String {
    "./locales/namespaces.json".to_string()
}

fn default_deprecations_file() -> String {
    "./locales/deprecations.json".to_string()
}

fn default_output() -> String {
    "./src/i18n/keys.generated.ts".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx"].map(String::from).to_vec()
}

fn default_lookup_functions() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            base_locale: default_base_locale(),
            locales: Vec::new(),
            manifest_file: default_manifest_file(),
            deprecations_file: default_deprecations_file(),
            ungrouped_namespace: None,
            output: default_output(),
            hash_file: None,
            parity: ParityMode::default(),
            source_root: default_source_root(),
            includes: default_includes(),
            ignores: Vec::new(),
            extensions: default_extensions(),
            lookup_functions: default_lookup_functions(),
            report_unused: false,
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, an empty base locale or
    /// lookup function list, and a base locale listed as a comparison locale.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.base_locale.trim().is_empty() {
            bail!("'baseLocale' must not be empty");
        }

        if self.locales.contains(&self.base_locale) {
            bail!(
                "'locales' must not contain the base locale \"{}\"",
                self.base_locale
            );
        }

        if self.lookup_functions.iter().all(|f| f.trim().is_empty()) {
            bail!("'lookupFunctions' must name at least one function");
        }

        if let Some(ns) = &self.ungrouped_namespace
            && ns.trim().is_empty()
        {
            bail!("'ungroupedNamespace' must not be empty when set");
        }

        Ok(())
    }

    /// Sidecar path for the content hash.
    pub fn hash_file(&self) -> String {
        self.hash_file
            .clone()
            .unwrap_or_else(|| format!("{}.sha256", self.output))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load the config for `start_dir`, searching it and then its ancestors.
///
/// When the file sits in `start_dir` itself, `base_dir` keeps the path as
/// given so reported paths stay relative.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let search_dir = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    match find_config_file(&search_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = match path.parent() {
                Some(parent) if parent == search_dir => start_dir.to_path_buf(),
                Some(parent) => parent.to_path_buf(),
                None => start_dir.to_path_buf(),
            };
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
