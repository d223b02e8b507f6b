//! Header and cell normalization applied at load time.
//!
//! # Invariants
//! - Header padding (whitespace, BOM, zero-width characters) is always
//!   stripped.
//! - Null sentinels are recognized here and nowhere else.

use once_cell::sync::Lazy;
use regex::Regex;

/// Text values that stand for a missing cell in the upstream exports.
pub const NULL_SENTINELS: [&str; 10] = [
    "nan", "NaN", "NAN", "NA", "N/A", "n/a", "null", "NULL", "None", "<NA>",
];

static HEADER_PADDING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s\x{FEFF}\x{200B}\x{200C}\x{200D}\x{2060}]+|[\s\x{FEFF}\x{200B}\x{200C}\x{200D}\x{2060}]+$")
        .expect("valid header padding regex")
});

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strips visible and invisible padding around a column header.
pub fn normalize_header(raw: &str) -> String {
    HEADER_PADDING_RE.replace_all(raw, "").into_owned()
}

/// Drops a leading UTF-8 byte-order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

pub fn is_null_sentinel(value: &str) -> bool {
    NULL_SENTINELS.contains(&value)
}

/// Returns the trimmed value when it carries data.
///
/// Empty cells and null sentinels yield `None`. Shared by loading and by
/// graph construction so both agree on what "present" means.
pub fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_null_sentinel(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

/// Normalizes one optional text cell.
///
/// With `trim_values == false` the original padding of a present value is
/// kept; absence is decided on the trimmed text either way.
pub fn normalize_cell(raw: Option<String>, trim_values: bool) -> Option<String> {
    let raw = raw?;
    let value = present(&raw)?;
    if trim_values {
        Some(value.to_string())
    } else {
        Some(raw)
    }
}
