//! Locale source loader.
//!
//! Discovers `<messages_root>/<locale>/<namespace path>.json` files and parses
//! them into one `LocaleTree` per (namespace, locale) pair. Files are read in
//! parallel; the loader never writes.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    core::{
        LocaleTree, MessageContext, MessageLocation, SourceError,
        parsers::json::parse_locale_file,
    },
    issues::{InvalidSegmentIssue, Issue, MalformedSourceIssue, UnsupportedLeafIssue},
};

/// One parsed namespace file.
#[derive(Debug, Clone)]
pub struct NamespaceSource {
    pub file_path: String,
    pub tree: LocaleTree,
}

/// All namespaces found for one locale, keyed by namespace id.
#[derive(Debug, Clone, Default)]
pub struct LocaleSources {
    pub locale: String,
    /// Locale directory, for reporting where a missing namespace was expected.
    pub dir: String,
    pub namespaces: BTreeMap<String, NamespaceSource>,
}

impl LocaleSources {
    /// Where the source file of `namespace` lives (or should live).
    pub fn expected_path(&self, namespace: &str) -> String {
        format!("{}/{}.json", self.dir, namespace.replace('.', "/"))
    }
}

/// Output of loading the base locale and its comparison locales.
#[derive(Debug)]
pub struct LoadedLocales {
    pub base: LocaleSources,
    /// Comparison locales in name order.
    pub comparisons: Vec<LocaleSources>,
    /// Malformed files, unsupported leaves and invalid segments, all files included.
    pub issues: Vec<Issue>,
    pub files_loaded: usize,
}

/// Locale directory names under `messages_root`, sorted.
pub fn discover_locales(messages_root: &Path) -> Result<Vec<String>> {
    if !messages_root.is_dir() {
        bail!(
            "Locale directory not found: {}",
            messages_root.display()
        );
    }

    let mut locales = Vec::new();
    for entry in fs::read_dir(messages_root)
        .with_context(|| format!("Failed to read {}", messages_root.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir()
            && let Some(name) = entry.file_name().to_str()
        {
            locales.push(name.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}

/// Namespace files below one locale directory, sorted by namespace id.
///
/// `admin/users.json` becomes the namespace `admin.users`.
pub fn discover_namespaces(locale_dir: &Path) -> Vec<(String, PathBuf)> {
    let mut namespaces: Vec<(String, PathBuf)> = WalkDir::new(locale_dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, "cannot access locale path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(locale_dir).ok()?;
            let namespace = namespace_id(relative)?;
            Some((namespace, entry.path().to_path_buf()))
        })
        .collect();
    namespaces.sort();
    namespaces
}

fn namespace_id(relative: &Path) -> Option<String> {
    let without_ext = relative.with_extension("");
    let parts: Vec<&str> = without_ext
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("."))
}

/// Load the base locale and the comparison locales.
///
/// `comparisons` of `None` means every other locale directory found.
/// A requested comparison locale without a directory loads as empty, so its
/// namespaces surface as missing rather than failing the whole run.
pub fn load_locales(
    messages_root: &Path,
    base_locale: &str,
    comparisons: Option<&[String]>,
) -> Result<LoadedLocales> {
    let found = discover_locales(messages_root)?;
    if !found.iter().any(|l| l == base_locale) {
        bail!(
            "Base locale '{}' not found in '{}'",
            base_locale,
            messages_root.display()
        );
    }

    let mut comparison_locales: Vec<String> = match comparisons {
        Some(requested) => requested.to_vec(),
        None => found.iter().filter(|l| *l != base_locale).cloned().collect(),
    };
    comparison_locales.sort();
    comparison_locales.dedup();

    let locales: Vec<String> = std::iter::once(base_locale.to_string())
        .chain(comparison_locales)
        .collect();

    let jobs: Vec<(usize, String, PathBuf)> = locales
        .iter()
        .enumerate()
        .flat_map(|(i, locale)| {
            discover_namespaces(&messages_root.join(locale))
                .into_iter()
                .map(move |(namespace, path)| (i, namespace, path))
        })
        .collect();
    debug!(
        locales = locales.len(),
        files = jobs.len(),
        "discovered locale files"
    );

    // Parallel read and parse, then sequential assembly in job order.
    let parsed: Vec<_> = jobs
        .par_iter()
        .map(|(i, namespace, path)| (*i, namespace, path, parse_locale_file(path)))
        .collect();

    let mut sources: Vec<LocaleSources> = locales
        .iter()
        .map(|locale| LocaleSources {
            locale: locale.clone(),
            dir: messages_root.join(locale).to_string_lossy().into_owned(),
            namespaces: BTreeMap::new(),
        })
        .collect();
    let mut issues = Vec::new();

    for (i, namespace, path, result) in parsed {
        let file_path = path.to_string_lossy().into_owned();
        match result {
            Ok(tree) => {
                debug!(file = %file_path, keys = tree.leaf_count(), "loaded namespace");
                sources[i].namespaces.insert(
                    namespace.clone(),
                    NamespaceSource { file_path, tree },
                );
            }
            Err(errors) => {
                issues.extend(errors.into_iter().map(|e| source_error_issue(&file_path, e)));
            }
        }
    }

    let files_loaded = jobs.len();
    let mut sources = sources.into_iter();
    let base = sources.next().unwrap_or_default();
    Ok(LoadedLocales {
        base,
        comparisons: sources.collect(),
        issues,
        files_loaded,
    })
}

/// Convert a per-file parse problem into a finding.
pub fn source_error_issue(file_path: &str, error: SourceError) -> Issue {
    let location = MessageLocation::new(file_path, error.line(), error.column());
    match error {
        SourceError::UnsupportedLeaf { key, found, .. } => {
            Issue::UnsupportedLeaf(UnsupportedLeafIssue {
                context: MessageContext::new(location, key),
                found: found.to_string(),
            })
        }
        SourceError::InvalidSegment { key, segment, .. } => {
            Issue::InvalidSegment(InvalidSegmentIssue {
                context: MessageContext::new(location, key),
                segment,
            })
        }
        SourceError::Malformed { offset, .. } => Issue::MalformedSource(MalformedSourceIssue {
            location,
            offset: Some(offset),
            error: error.to_string(),
        }),
        SourceError::Io(_) | SourceError::RootNotObject { .. } => {
            Issue::MalformedSource(MalformedSourceIssue {
                location,
                offset: None,
                error: error.to_string(),
            })
        }
    }
}
