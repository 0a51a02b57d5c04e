use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, ParityMode, load_config},
    core::{
        AllKeyUsages, FlatKey, Schema,
        deprecation::{apply_deprecations, load_deprecations},
        emit::{EmitTarget, REGENERATE_COMMAND},
        file_scanner::{ScanOptions, scan_files},
        flatten::{KeyPrefix, flatten},
        loader::{LoadedLocales, LocaleSources, load_locales},
        manifest::{derive_order, load_manifest},
        merge::merge_namespaces,
        parsers::source::CallSitePattern,
    },
    issues::{Issue, MissingNamespaceIssue},
    rules::{
        duplicate_key::check_duplicate_keys,
        parity::{LocaleKeys, check_parity},
    },
};

/// Locale files plus the namespace order derived from them.
pub struct LoadedSources {
    pub locales: LoadedLocales,
    /// Namespaces in emission order. Empty when a locale file failed to parse.
    pub namespaces: Vec<String>,
    /// Load, manifest and ordering findings.
    pub issues: Vec<Issue>,
    /// False when a locale file could not be parsed; nothing past loading runs.
    pub complete: bool,
}

/// Result of running loader → flattener → merger → detector → tracker.
pub struct SchemaBuild {
    /// `None` when any fatal finding exists; a partial schema is never built.
    pub schema: Option<Schema>,
    pub issues: Vec<Issue>,
    pub locale_files_checked: usize,
}

/// Key references found in the application sources.
pub struct UsageScan {
    pub usages: AllKeyUsages,
    pub files_checked: usize,
}

/// Resolved configuration for one command run.
///
/// Configuration is merged with the following priority (highest to lowest):
/// 1. CLI arguments (e.g., `--base-locale en`)
/// 2. `.keyschemarc.json` config file
/// 3. Built-in defaults
///
/// Relative paths resolve against the directory holding the config file.
pub struct SchemaContext {
    pub config: Config,
    pub root_dir: PathBuf,
}

impl SchemaContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root)?;
        if !config_result.from_file {
            debug!("no config file found, using defaults");
        }

        let mut config = config_result.config;
        if let Some(ref base_locale) = common_args.base_locale {
            config.base_locale = base_locale.clone();
        }
        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().into_owned();
        }
        config.validate()?;

        Ok(Self {
            config,
            root_dir: config_result.base_dir,
        })
    }

    /// Resolve a config path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        let rel = p.strip_prefix(".").unwrap_or(p);
        self.root_dir.join(rel)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.resolve(&self.config.manifest_file)
    }

    pub fn emit_target(&self) -> EmitTarget {
        EmitTarget {
            output: self.resolve(&self.config.output),
            hash_file: self.resolve(&self.config.hash_file()),
            regenerate: REGENERATE_COMMAND.to_string(),
        }
    }

    /// Load every locale file and derive the namespace order.
    pub fn load_sources(&self) -> Result<LoadedSources> {
        let manifest_path = self.manifest_path();
        let comparisons =
            (!self.config.locales.is_empty()).then_some(self.config.locales.as_slice());

        let mut locales = load_locales(
            &self.resolve(&self.config.messages_root),
            &self.config.base_locale,
            comparisons,
        )?;
        let mut issues = std::mem::take(&mut locales.issues);

        if !issues.is_empty() {
            return Ok(LoadedSources {
                locales,
                namespaces: Vec::new(),
                issues,
                complete: false,
            });
        }

        let manifest = match load_manifest(&manifest_path) {
            Ok(manifest) => manifest,
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        let order = derive_order(
            manifest.as_deref(),
            &locales.base,
            self.config.ungrouped_namespace.as_deref(),
            &manifest_path.to_string_lossy(),
        );
        issues.extend(order.issues);

        Ok(LoadedSources {
            locales,
            namespaces: order.namespaces,
            issues,
            complete: true,
        })
    }

    /// Derive the schema from the locale sources.
    ///
    /// Every detector runs and all findings are collected before deciding
    /// whether a schema can be produced.
    pub fn build_schema(&self) -> Result<SchemaBuild> {
        let LoadedSources {
            locales,
            namespaces,
            mut issues,
            complete,
        } = self.load_sources()?;
        let locale_files_checked = locales.files_loaded;

        if !complete {
            return Ok(SchemaBuild {
                schema: None,
                issues,
                locale_files_checked,
            });
        }

        if self.config.parity == ParityMode::Strict {
            issues.extend(missing_comparison_namespaces(&namespaces, &locales.comparisons));
        }

        let ungrouped = self.config.ungrouped_namespace.as_deref();
        let mut merged = merge_namespaces(&namespaces, flatten_locale(&locales.base, ungrouped));
        issues.extend(check_duplicate_keys(&merged).into_iter().map(Issue::DuplicateKey));

        let comparison_keys: Vec<(&str, Vec<FlatKey>)> = locales
            .comparisons
            .iter()
            .map(|l| {
                let keys = flatten_locale(l, ungrouped).into_values().flatten().collect();
                (l.locale.as_str(), keys)
            })
            .collect();
        let mut parity_input = vec![LocaleKeys {
            locale: &locales.base.locale,
            keys: &merged,
        }];
        parity_input.extend(comparison_keys.iter().map(|(locale, keys)| LocaleKeys {
            locale,
            keys: keys.as_slice(),
        }));
        issues.extend(
            check_parity(&parity_input, self.config.parity)
                .into_iter()
                .map(Issue::ParityGap),
        );

        match load_deprecations(&self.resolve(&self.config.deprecations_file)) {
            Ok(list) => issues.extend(
                apply_deprecations(&mut merged, &list)
                    .into_iter()
                    .map(Issue::StaleDeprecation),
            ),
            Err(issue) => issues.push(issue),
        }

        let fatal = issues.iter().any(Issue::is_fatal);
        info!(
            namespaces = namespaces.len(),
            keys = merged.len(),
            findings = issues.len(),
            fatal,
            "derived schema"
        );
        let schema = (!fatal).then(|| Schema::new(namespaces, merged));

        Ok(SchemaBuild {
            schema,
            issues,
            locale_files_checked,
        })
    }

    /// Scan the application sources for literal key references.
    ///
    /// Files are read and matched in parallel; unreadable files are skipped
    /// with a warning.
    pub fn scan_usages(&self) -> Result<UsageScan> {
        let pattern = CallSitePattern::new(&self.config.lookup_functions)?;
        let scan = scan_files(
            &self.resolve(&self.config.source_root),
            &ScanOptions {
                includes: &self.config.includes,
                ignores: &self.config.ignores,
                extensions: &self.config.extensions,
                ignore_test_files: self.config.ignore_test_files,
            },
        );
        if scan.skipped_count > 0 {
            warn!(
                count = scan.skipped_count,
                "paths skipped due to access errors"
            );
        }

        let results: Vec<_> = scan
            .files
            .par_iter()
            .map(|file_path| (file_path, fs::read_to_string(file_path)))
            .collect();

        let mut usages = AllKeyUsages::new();
        for (file_path, result) in results {
            match result {
                Ok(content) => {
                    let found = pattern.find_usages(&content, file_path);
                    if !found.is_empty() {
                        usages.insert(file_path.clone(), found);
                    }
                }
                Err(e) => warn!(file = %file_path, error = %e, "cannot read source file"),
            }
        }

        Ok(UsageScan {
            usages,
            files_checked: scan.files.len(),
        })
    }
}

/// Flatten every namespace of one locale, keyed by namespace.
fn flatten_locale(
    sources: &LocaleSources,
    ungrouped: Option<&str>,
) -> BTreeMap<String, Vec<FlatKey>> {
    sources
        .namespaces
        .iter()
        .map(|(namespace, source)| {
            let prefix = if Some(namespace.as_str()) == ungrouped {
                KeyPrefix::None
            } else {
                KeyPrefix::Namespace
            };
            let keys = flatten(namespace, prefix, &source.tree, &source.file_path);
            (namespace.clone(), keys)
        })
        .collect()
}

/// In strict mode every comparison locale must provide every base namespace.
fn missing_comparison_namespaces(
    namespaces: &[String],
    comparisons: &[LocaleSources],
) -> Vec<Issue> {
    comparisons
        .iter()
        .flat_map(|locale| {
            namespaces
                .iter()
                .filter(|ns| !locale.namespaces.contains_key(*ns))
                .map(|ns| {
                    Issue::MissingNamespace(MissingNamespaceIssue {
                        namespace: ns.clone(),
                        locale: locale.locale.clone(),
                        expected_path: locale.expected_path(ns),
                    })
                })
        })
        .collect()
}
