//! String utilities
//!
//! Casing, anagram tests, reversal, cookie serialization, character sorting,
//! markup stripping and tokenization.

use crate::constants::{DEFAULT_WORD_PATTERN, HTML_TAG_PATTERN};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::Write;
use std::sync::LazyLock;

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_WORD_PATTERN).expect("valid word pattern"));

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HTML_TAG_PATTERN).expect("valid tag pattern"));

// ASCII word boundary followed by a lowercase ASCII letter
static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)[a-z]").expect("valid word start pattern"));

/// Text errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// Operation needs at least one character
    #[error("Input string is empty")]
    Empty,
}

// =============================================================================
// Casing
// =============================================================================

/// Uppercase the first character, leaving the rest untouched
///
/// # Errors
///
/// Returns [`TextError::Empty`] for an empty string.
pub fn capitalize(s: &str) -> Result<String, TextError> {
    map_first_char(s, |c, out| out.extend(c.to_uppercase()))
}

/// Lowercase the first character, leaving the rest untouched
///
/// # Errors
///
/// Returns [`TextError::Empty`] for an empty string.
pub fn decapitalize(s: &str) -> Result<String, TextError> {
    map_first_char(s, |c, out| out.extend(c.to_lowercase()))
}

fn map_first_char<F>(s: &str, f: F) -> Result<String, TextError>
where
    F: FnOnce(char, &mut String),
{
    let mut chars = s.chars();
    let first = chars.next().ok_or(TextError::Empty)?;

    let mut out = String::with_capacity(s.len());
    f(first, &mut out);
    out.push_str(chars.as_str());
    Ok(out)
}

/// Uppercase the first letter of every word
///
/// Only ASCII lowercase letters directly after an ASCII word boundary change.
pub fn capitalize_every_word(s: &str) -> String {
    WORD_START
        .replace_all(s, |caps: &regex::Captures| caps[0].to_ascii_uppercase())
        .into_owned()
}

/// Check whether a string has no uppercase characters
pub fn is_lower_case(s: &str) -> bool {
    s == s.to_lowercase()
}

/// Check whether a string has no lowercase characters
pub fn is_upper_case(s: &str) -> bool {
    s == s.to_uppercase()
}

// =============================================================================
// Comparison and reordering
// =============================================================================

/// Check whether two strings are anagrams of each other
///
/// Both inputs are lowercased and reduced to ASCII alphanumerics before the
/// sorted characters are compared.
pub fn is_anagram(a: &str, b: &str) -> bool {
    fn normalize(s: &str) -> Vec<char> {
        let mut chars: Vec<char> = s
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        chars.sort_unstable();
        chars
    }

    normalize(a) == normalize(b)
}

/// Reverse a string by Unicode scalar value
///
/// Multi-byte characters stay intact. Grapheme clusters spanning several
/// scalars (combining marks, emoji sequences) are reversed scalar by scalar.
pub fn reverse_string(s: &str) -> String {
    s.chars().rev().collect()
}

/// Sort the characters of a string
///
/// Stable sort under a collation key close to the root locale order:
/// whitespace and punctuation first, then digits, then letters compared
/// case-insensitively with lowercase before uppercase.
pub fn sort_characters_in_string(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars.sort_by(|a, b| collate(*a, *b));
    chars.into_iter().collect()
}

fn collate(a: char, b: char) -> Ordering {
    fn class(c: char) -> u8 {
        if c.is_alphabetic() {
            2
        } else if c.is_numeric() {
            1
        } else {
            0
        }
    }

    fn folded(c: char) -> char {
        c.to_lowercase().next().unwrap_or(c)
    }

    class(a)
        .cmp(&class(b))
        .then_with(|| folded(a).cmp(&folded(b)))
        .then_with(|| a.is_uppercase().cmp(&b.is_uppercase()))
        .then_with(|| a.cmp(&b))
}

// =============================================================================
// Encoding and extraction
// =============================================================================

/// Serialize a cookie name-value pair as `name=value`
///
/// Both parts are percent-encoded the way `encodeURIComponent` does.
pub fn serialize_cookie(name: &str, value: &str) -> String {
    format!("{}={}", encode_uri_component(name), encode_uri_component(value))
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(b)),
            _ => {
                // Writing to a String cannot fail
                let _ = write!(out, "%{:02X}", b);
            }
        }
    }
    out
}

/// Remove every `<...>` tag
pub fn strip_html_tags(s: &str) -> String {
    HTML_TAG.replace_all(s, "").into_owned()
}

/// Split a string into words using the default separator
///
/// ```
/// use snipkit::domain::text::words;
///
/// assert_eq!(words("I love javaScript!!"), vec!["I", "love", "javaScript"]);
/// ```
pub fn words(s: &str) -> Vec<&str> {
    words_with(s, &WORD_SEPARATOR)
}

/// Split a string on `separator`, discarding empty tokens
pub fn words_with<'a>(s: &'a str, separator: &Regex) -> Vec<&'a str> {
    separator.split(s).filter(|w| !w.is_empty()).collect()
}
