use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    core::{Leaf, LocaleNode, LocaleTree, SourceError},
    utils::{build_line_index, line_col_to_offset, offset_to_line},
};

/// Read and parse one namespace file into a locale tree.
pub fn parse_locale_file(path: &Path) -> Result<LocaleTree, Vec<SourceError>> {
    let content = fs::read_to_string(path).map_err(|e| vec![SourceError::Io(e.to_string())])?;
    parse_locale_source(&content)
}

/// Parse locale JSON content into a locale tree.
///
/// Every unsupported value and invalid segment in the file is collected, so
/// the error list is complete rather than stopping at the first problem.
pub fn parse_locale_source(content: &str) -> Result<LocaleTree, Vec<SourceError>> {
    let line_index = build_line_index(content);

    let json: Value =
        serde_json::from_str(content).map_err(|e| vec![malformed(content, &line_index, &e)])?;

    let Value::Object(map) = json else {
        return Err(vec![SourceError::RootNotObject {
            found: json_type_name(&json),
        }]);
    };

    let mut builder = TreeBuilder {
        content,
        line_index: &line_index,
        cursor: 0,
        errors: Vec::new(),
    };
    let tree = builder.build(&map, &mut Vec::new());

    if builder.errors.is_empty() {
        Ok(tree)
    } else {
        Err(builder.errors)
    }
}

/// Converts a JSON object into a `LocaleTree`, tracking the line of each key.
///
/// With `preserve_order`, object members come back in file order, so key
/// lookup can move a cursor forward through the content instead of searching
/// from the start for every key.
struct TreeBuilder<'a> {
    content: &'a str,
    line_index: &'a [usize],
    cursor: usize,
    errors: Vec<SourceError>,
}

impl TreeBuilder<'_> {
    fn build(&mut self, map: &Map<String, Value>, path: &mut Vec<String>) -> LocaleTree {
        let mut tree = LocaleTree::new();

        for (segment, value) in map {
            let line = self.locate_key(segment);
            path.push(segment.clone());

            if segment.is_empty() || segment.contains('.') {
                self.errors.push(SourceError::InvalidSegment {
                    key: path.join("."),
                    segment: segment.clone(),
                    line,
                });
                path.pop();
                continue;
            }

            match value {
                Value::String(text) => {
                    tree.insert(segment.clone(), LocaleNode::Leaf(Leaf::new(text.clone(), line)));
                }
                Value::Object(child) => {
                    let subtree = self.build(child, path);
                    tree.insert(segment.clone(), LocaleNode::Branch(subtree));
                }
                other => self.errors.push(SourceError::UnsupportedLeaf {
                    key: path.join("."),
                    found: json_type_name(other),
                    line,
                }),
            }

            path.pop();
        }

        tree
    }

    /// Find the line of the next occurrence of `"segment"` used as an object key.
    ///
    /// A match must be followed by `:` and must not be preceded by a backslash
    /// (which would make it part of an escaped string value). When nothing
    /// matches, the cursor stays put and the current line is returned.
    fn locate_key(&mut self, segment: &str) -> usize {
        let pattern = serde_json::to_string(segment).unwrap_or_else(|_| format!("\"{}\"", segment));
        let remaining = &self.content[self.cursor..];

        let mut pos = 0;
        while let Some(rel) = remaining[pos..].find(&pattern) {
            let start = pos + rel;
            let end = start + pattern.len();
            let escaped = start > 0 && remaining.as_bytes()[start - 1] == b'\\';
            if !escaped && remaining[end..].trim_start().starts_with(':') {
                self.cursor += end;
                return offset_to_line(self.line_index, self.cursor - pattern.len());
            }
            pos = start + 1;
        }

        offset_to_line(self.line_index, self.cursor)
    }
}

/// Parse a whole JSON document (manifest, deprecation list) into `T`.
///
/// Syntax errors and shape errors are both reported as `Malformed` with a
/// position, like locale files.
pub fn parse_json_document<T: DeserializeOwned>(content: &str) -> Result<T, SourceError> {
    serde_json::from_str(content).map_err(|e| malformed(content, &build_line_index(content), &e))
}

fn malformed(content: &str, line_index: &[usize], e: &serde_json::Error) -> SourceError {
    let offset = line_col_to_offset(line_index, content.len(), e.line(), e.column());
    SourceError::Malformed {
        line: e.line(),
        column: e.column(),
        offset,
        message: strip_position(&e.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Drop serde_json's " at line X column Y" suffix; positions are reported separately.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}
