//! Common utility functions shared across the codebase.
//!
//! Both the locale parser and the source scanner need to map byte offsets to
//! human-readable positions, so the line index lives here.

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Convert a 1-based line and 1-based byte column into a byte offset.
///
/// `serde_json` reports error columns in bytes; out-of-range positions clamp
/// to the end of the content.
pub fn line_col_to_offset(
    line_index: &[usize],
    content_len: usize,
    line: usize,
    col: usize,
) -> usize {
    line_index
        .get(line.saturating_sub(1))
        .map(|start| start + col.saturating_sub(1))
        .unwrap_or(content_len)
        .min(content_len)
}

/// Return the 1-based (line, column) of a byte offset; the column counts characters.
pub fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = offset_to_line(line_index, offset);
    let line_start = line_index[line - 1];
    let col = content[line_start..offset].chars().count() + 1;
    (line, col)
}

/// Return the text of a 1-based line without its trailing newline.
pub fn line_text<'a>(content: &'a str, line_index: &[usize], line: usize) -> &'a str {
    let Some(&start) = line_index.get(line.saturating_sub(1)) else {
        return "";
    };
    let end = line_index
        .get(line)
        .map(|next| next - 1)
        .unwrap_or(content.len());
    content[start..end].trim_end_matches('\r')
}
