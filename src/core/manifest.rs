//! Namespace manifest: the declared emission order of namespaces.

use std::{collections::HashSet, fs, io, path::Path};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    core::{
        SourceError,
        emit::write_atomic,
        loader::{LocaleSources, source_error_issue},
        parsers::json::parse_json_document,
    },
    issues::{Issue, MissingNamespaceIssue, UnlistedNamespaceIssue},
};

/// Namespaces in emission order plus the findings produced while deriving it.
#[derive(Debug, Default)]
pub struct NamespaceOrder {
    pub namespaces: Vec<String>,
    pub issues: Vec<Issue>,
}

/// Read the manifest, if one exists.
///
/// A missing file is not an error; an unreadable or malformed one is a
/// `MalformedSource` finding.
pub fn load_manifest(path: &Path) -> Result<Option<Vec<String>>, Issue> {
    let file_path = path.to_string_lossy();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %file_path, "no namespace manifest");
            return Ok(None);
        }
        Err(e) => return Err(source_error_issue(&file_path, SourceError::Io(e.to_string()))),
    };

    let entries: Vec<String> =
        parse_json_document(&content).map_err(|e| source_error_issue(&file_path, e))?;
    Ok(Some(entries))
}

/// Derive the emission order of the base locale's namespaces.
///
/// With a manifest, listed namespaces come first in manifest order; listed
/// namespaces without a base-locale file are `MissingNamespace` errors, and
/// namespaces on disk but not listed are appended alphabetically with an
/// `UnlistedNamespace` warning. Without a manifest the order is alphabetical.
/// Either way an unlisted ungrouped namespace goes last.
pub fn derive_order(
    manifest: Option<&[String]>,
    base: &LocaleSources,
    ungrouped: Option<&str>,
    manifest_path: &str,
) -> NamespaceOrder {
    let mut order = NamespaceOrder::default();
    let mut listed: HashSet<&str> = HashSet::new();

    if let Some(entries) = manifest {
        for namespace in entries {
            if namespace.is_empty() || !listed.insert(namespace.as_str()) {
                warn!(namespace = %namespace, "ignoring empty or repeated manifest entry");
                continue;
            }
            if base.namespaces.contains_key(namespace) {
                order.namespaces.push(namespace.clone());
            } else {
                order.issues.push(Issue::MissingNamespace(MissingNamespaceIssue {
                    namespace: namespace.clone(),
                    locale: base.locale.clone(),
                    expected_path: base.expected_path(namespace),
                }));
            }
        }
    }

    // BTreeMap keys are already alphabetical.
    let mut deferred_ungrouped = None;
    for namespace in base.namespaces.keys() {
        if listed.contains(namespace.as_str()) {
            continue;
        }
        if manifest.is_some() {
            order.issues.push(Issue::UnlistedNamespace(UnlistedNamespaceIssue {
                namespace: namespace.clone(),
                manifest_path: manifest_path.to_string(),
            }));
        }
        if Some(namespace.as_str()) == ungrouped {
            deferred_ungrouped = Some(namespace.clone());
        } else {
            order.namespaces.push(namespace.clone());
        }
    }
    order.namespaces.extend(deferred_ungrouped);

    debug!(order = ?order.namespaces, "derived namespace order");
    order
}

/// Freeze `namespaces` as the manifest, one entry per line.
pub fn write_manifest(path: &Path, namespaces: &[String]) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(namespaces).context("Failed to serialize manifest")?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}
