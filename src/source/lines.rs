//! Maps a violation's line number back to the source text.

/// Splits on `\r\n`, `\n`, or a lone `\r`.
///
/// A trailing terminator does not produce an extra empty line, but an empty
/// line in the middle is kept.
#[must_use]
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = source.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&source[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&source[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&source[start..]);
    }
    lines
}

/// Exact text of a 1-based line. Absent, zero, or out-of-range lines
/// resolve to `None`.
#[must_use]
pub fn resolve_line(source: &str, line: Option<u32>) -> Option<&str> {
    let idx = usize::try_from(line?).ok()?.checked_sub(1)?;
    split_lines(source).get(idx).copied()
}
