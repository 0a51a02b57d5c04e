//! Schema emitter: renders the TypeScript declaration and its content hash.
//!
//! Rendering is a pure function of the schema, so identical sources always
//! produce identical bytes and an identical hash.

use std::{
    ffi::OsString,
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    core::Schema,
    issues::{HashMismatchIssue, Issue, StaleSchemaIssue},
};

pub const GENERATED_NOTICE: &str = "This file is generated by keyschema. Do not modify manually.";
pub const REGENERATE_COMMAND: &str = "keyschema generate";

/// Render the schema as a TypeScript declaration module.
///
/// `regenerate` is the command line printed in the header.
pub fn render_schema(schema: &Schema, regenerate: &str) -> String {
    let mut out = String::new();

    let namespaces = if schema.namespaces().is_empty() {
        "(none)".to_string()
    } else {
        schema.namespaces().join(", ")
    };
    let _ = writeln!(out, "// {}", GENERATED_NOTICE);
    let _ = writeln!(out, "// Regenerate with: {}", regenerate);
    let _ = writeln!(out, "// Namespaces: {}", namespaces);
    let _ = writeln!(out, "// Keys: {}", schema.len());
    out.push('\n');

    out.push_str("export interface TranslationKeys {\n");
    let mut current_namespace: Option<&str> = None;
    for key in schema.keys() {
        if current_namespace != Some(key.namespace.as_str()) {
            let _ = writeln!(out, "  // {}", key.namespace);
            current_namespace = Some(key.namespace.as_str());
        }
        if let Some(note) = &key.deprecation_note {
            let _ = writeln!(
                out,
                "  /** @deprecated Migrate this entry: {} */",
                comment_safe(note)
            );
        }
        let _ = writeln!(out, "  {}: {};", quote(&key.dotted_key), key.leaf_type);
    }
    out.push_str("}\n\n");

    out.push_str("export type TranslationKey = keyof TranslationKeys;\n\n");

    out.push_str("export const TRANSLATION_KEYS: readonly TranslationKey[] = [\n");
    for key in schema.keys() {
        let _ = writeln!(out, "  {},", quote(&key.dotted_key));
    }
    out.push_str("] as const;\n");

    out
}

/// JSON string literal, which is also a valid TypeScript string literal.
fn quote(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{}\"", key))
}

/// Keep a note on one line and unable to close the doc comment.
fn comment_safe(note: &str) -> String {
    note.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Sidecar line in `sha256sum` format.
pub fn hash_line(hash: &str, artifact: &Path) -> String {
    let name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}  {}\n", hash, name)
}

/// Extract the recorded hash from sidecar content.
pub fn parse_hash_line(content: &str) -> Option<&str> {
    let hash = content.split_whitespace().next()?;
    (hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit())).then_some(hash)
}

/// Write `contents` to a temporary sibling and rename it over `path`.
///
/// Readers never observe a partially written file, even with concurrent runs.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp_path = temp_path(path);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{}.tmp", std::process::id()));
    PathBuf::from(name)
}

/// Where the artifact and its hash sidecar go, and how to regenerate them.
#[derive(Debug, Clone)]
pub struct EmitTarget {
    pub output: PathBuf,
    pub hash_file: PathBuf,
    /// Invocation recorded in the artifact header.
    pub regenerate: String,
}

/// Write the artifact, then the sidecar. Returns the content hash.
pub fn emit_schema(schema: &Schema, target: &EmitTarget) -> Result<String> {
    let rendered = render_schema(schema, &target.regenerate);
    let hash = content_hash(rendered.as_bytes());

    write_atomic(&target.output, rendered.as_bytes())?;
    write_atomic(&target.hash_file, hash_line(&hash, &target.output).as_bytes())?;
    Ok(hash)
}

/// Compare the committed artifact and sidecar with what `schema` renders to.
///
/// Nothing is written. A missing or different artifact is a `StaleSchema`
/// finding; an artifact whose bytes do not match the recorded hash is a
/// `HashMismatch` finding.
pub fn check_schema(schema: &Schema, target: &EmitTarget) -> Result<Vec<Issue>> {
    let output_display = target.output.to_string_lossy().into_owned();
    let rendered = render_schema(schema, &target.regenerate);

    let committed = match fs::read(&target.output) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(vec![Issue::StaleSchema(StaleSchemaIssue {
                file_path: output_display,
                reason: "generated schema is missing".to_string(),
            })]);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", output_display));
        }
    };

    let mut issues = Vec::new();
    if committed != rendered.as_bytes() {
        issues.push(Issue::StaleSchema(StaleSchemaIssue {
            file_path: output_display.clone(),
            reason: "generated schema is out of date with the locale sources".to_string(),
        }));
    }

    let actual = content_hash(&committed);
    let recorded = match fs::read_to_string(&target.hash_file) {
        Ok(content) => parse_hash_line(&content).map(str::to_string),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read {}", target.hash_file.display()));
        }
    };
    if recorded.as_deref() != Some(actual.as_str()) {
        issues.push(Issue::HashMismatch(HashMismatchIssue {
            file_path: output_display,
            hash_file: target.hash_file.to_string_lossy().into_owned(),
            recorded,
            actual,
        }));
    }

    Ok(issues)
}
