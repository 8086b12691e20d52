use ayah_model::{ReferenceError, VerseReference};
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+):([0-9]+)$").expect("valid regex"));

/// Parse and validate a `chapter:verse` reference.
///
/// Surrounding whitespace is ignored. Arabic-Indic, Extended Arabic-Indic and
/// full-width digits (and the full-width colon) are read as their ASCII
/// equivalents. Other look-alikes such as superscripts or circled numbers are
/// format errors.
pub fn validate(input: &str) -> Result<VerseReference, ReferenceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReferenceError::Empty);
    }

    let normalized = normalize_digits(trimmed);
    let caps = REFERENCE_RE
        .captures(&normalized)
        .ok_or_else(|| ReferenceError::Format(trimmed.to_string()))?;

    let chapter = parse_number(&caps[1]);
    let verse = parse_number(&caps[2]);
    tracing::debug!(input = %trimmed, chapter, verse, "Parsed reference");

    VerseReference::new(chapter, verse)
}

/// Map the accepted non-ASCII digit forms to ASCII, leaving everything else
/// untouched for the shape check.
fn normalize_digits(input: &str) -> String {
    input.chars().map(ascii_equivalent).collect()
}

fn ascii_equivalent(c: char) -> char {
    let zero = match c {
        '\u{0660}'..='\u{0669}' => 0x0660,
        '\u{06F0}'..='\u{06F9}' => 0x06F0,
        '\u{FF10}'..='\u{FF19}' => 0xFF10,
        '\u{FF1A}' => return ':',
        other => return other,
    };
    char::from(b'0' + (c as u32 - zero) as u8)
}

/// Digits that overflow `u32` saturate, which the range check then rejects.
fn parse_number(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}
