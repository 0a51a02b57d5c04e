//! Deprecation tracker.
//!
//! Deprecation is metadata only: a deprecated key stays in the schema with
//! its note, so code that still references it keeps compiling.

use std::{
    collections::{HashMap, HashSet},
    fs, io,
    path::Path,
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    core::{
        FlatKey, MessageContext, MessageLocation, SourceError,
        loader::source_error_issue,
        parsers::json::parse_json_document,
    },
    issues::{Issue, StaleDeprecationIssue},
    utils::{build_line_index, offset_to_line},
};

/// One entry of the manually maintained deprecation list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeprecationEntry {
    pub key: String,
    /// Replacement hint shown in the generated annotation.
    pub note: String,
    /// Line of the entry in the deprecation file.
    #[serde(skip)]
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DeprecationList {
    pub file_path: String,
    pub entries: Vec<DeprecationEntry>,
}

/// Read the deprecation list. A missing file is an empty list.
pub fn load_deprecations(path: &Path) -> Result<DeprecationList, Issue> {
    let file_path = path.to_string_lossy().into_owned();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %file_path, "no deprecation list");
            return Ok(DeprecationList {
                file_path,
                entries: Vec::new(),
            });
        }
        Err(e) => return Err(source_error_issue(&file_path, SourceError::Io(e.to_string()))),
    };

    let mut entries: Vec<DeprecationEntry> =
        parse_json_document(&content).map_err(|e| source_error_issue(&file_path, e))?;
    locate_entries(&content, &mut entries);

    Ok(DeprecationList { file_path, entries })
}

/// Fill in the line of each entry by finding its key literal, in file order.
fn locate_entries(content: &str, entries: &mut [DeprecationEntry]) {
    let line_index = build_line_index(content);
    let mut cursor = 0;
    for entry in entries {
        let Ok(pattern) = serde_json::to_string(&entry.key) else {
            entry.line = offset_to_line(&line_index, cursor);
            continue;
        };
        if let Some(rel) = content[cursor..].find(&pattern) {
            cursor += rel;
            entry.line = offset_to_line(&line_index, cursor);
            cursor += pattern.len();
        } else {
            entry.line = offset_to_line(&line_index, cursor);
        }
    }
}

/// Mark deprecated keys and report entries that match no live key.
///
/// When the list names a key more than once the first entry wins.
pub fn apply_deprecations(
    keys: &mut [FlatKey],
    list: &DeprecationList,
) -> Vec<StaleDeprecationIssue> {
    let mut by_key: HashMap<&str, &DeprecationEntry> = HashMap::new();
    for entry in &list.entries {
        if by_key.contains_key(entry.key.as_str()) {
            warn!(
                key = %entry.key,
                line = entry.line,
                "duplicate deprecation entry ignored"
            );
            continue;
        }
        by_key.insert(entry.key.as_str(), entry);
    }

    let mut matched: HashSet<&str> = HashSet::new();
    for key in keys.iter_mut() {
        if let Some(entry) = by_key.get(key.dotted_key.as_str()) {
            key.deprecated = true;
            key.deprecation_note = Some(entry.note.clone());
            matched.insert(entry.key.as_str());
        }
    }
    debug!(deprecated = matched.len(), "applied deprecations");

    let mut seen: HashSet<&str> = HashSet::new();
    list.entries
        .iter()
        .filter(|entry| seen.insert(entry.key.as_str()))
        .filter(|entry| !matched.contains(entry.key.as_str()))
        .map(|entry| StaleDeprecationIssue {
            context: MessageContext::new(
                MessageLocation::with_line(&list.file_path, entry.line),
                entry.key.clone(),
            ),
            note: entry.note.clone(),
        })
        .collect()
}
