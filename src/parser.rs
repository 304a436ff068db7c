// Parser module for extracting the title and sequence number from filenames

use crate::types::ParsedName;
use once_cell::sync::Lazy;
use regex::Regex;

/// Title, any mix of separators and `#` markers, then the last digit run of
/// the name. Separators and `#` right before the number are never part of
/// the title.
/// Anything after the digits must be free of digits and is dropped.
static NUMBERED_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<title>.*?)[\s_#-]*(?P<number>[0-9]+)[^0-9]*$").unwrap()
});

/// Split a filename into base and extension (extension keeps its dot)
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Parse a filename into title, number and extension.
///
/// Returns `None` when the name has no digits at all, or when the number
/// does not fit in a `u64`. Both mean "leave this file alone".
pub fn parse(raw_name: &str) -> Option<ParsedName> {
    let (base, extension) = split_extension(raw_name);
    let caps = NUMBERED_NAME_REGEX.captures(base)?;

    let number = caps["number"].parse::<u64>().ok()?;

    Some(ParsedName {
        title: caps["title"].to_string(),
        number,
        extension: extension.to_string(),
    })
}
