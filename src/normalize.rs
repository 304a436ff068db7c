// Canonical name assembly: `title-paddedNumber.ext`

use crate::types::{Padding, ParsedName};
use once_cell::sync::Lazy;
use regex::Regex;

/// Used when nothing is left of the title after cleanup
pub const FALLBACK_TITLE: &str = "item";

static HYPHEN_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Lowercase the title and turn its separators into single hyphens
pub fn normalize_title(title: &str) -> String {
    let lower = title.to_lowercase().replace([' ', '_', '.'], "-");
    let collapsed = HYPHEN_RUN_REGEX.replace_all(&lower, "-");
    // A trailing `#` would be read back as a number marker
    let trimmed = collapsed.trim_end_matches(['-', '#']).trim_start_matches('-');

    if trimmed.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the canonical filename. Numbers wider than the padding are kept whole.
pub fn normalize(title: &str, number: u64, padding: Padding, extension: &str) -> String {
    format!(
        "{}-{:0width$}{}",
        normalize_title(title),
        number,
        extension,
        width = padding.width()
    )
}

/// Canonical filename for an already parsed name
pub fn canonical_name(parsed: &ParsedName, padding: Padding) -> String {
    normalize(&parsed.title, parsed.number, padding, &parsed.extension)
}
