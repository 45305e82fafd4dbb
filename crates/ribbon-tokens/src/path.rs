//! Token paths and token references.
//!
//! A token is addressed by its dotted path from the tree root
//! (`typography.styles.heading.title-1`). A token *reference* is a string of
//! the form `{a.b.c}` and compiles to the CSS expression `var(--a-b-c)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Dotted path of a token or group inside a token tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    /// Build a path from already-split segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted path. Empty input and empty segments are rejected.
    pub fn parse(input: &str) -> Result<Self, TokenError> {
        let segments: Vec<&str> = input.split('.').collect();
        if input.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(TokenError::InvalidPath {
                input: input.to_string(),
            });
        }
        Ok(Self::new(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment (the token's own name).
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Return a new path with `segment` appended.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Return a new path whose last segment carries `suffix`
    /// (`styles.title1` + `-fontSize` → `styles.title1-fontSize`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        let mut segments = self.segments.clone();
        if let Some(last) = segments.last_mut() {
            last.push_str(suffix);
        }
        Self { segments }
    }

    /// The path relative to `prefix`, if `prefix` is a proper ancestor.
    pub fn strip_prefix(&self, prefix: &TokenPath) -> Option<TokenPath> {
        if prefix.len() >= self.len() || !self.segments.starts_with(&prefix.segments) {
            return None;
        }
        Some(Self::new(self.segments[prefix.len()..].iter().cloned()))
    }

    /// CSS-safe name: segments kebab-cased and joined by `-`.
    ///
    /// `fontSize.t10` → `font-size-t10`
    pub fn css_name(&self) -> String {
        self.segments
            .iter()
            .map(|s| kebab_case(s))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Custom property name, e.g. `--font-size-t10`.
    pub fn css_property(&self) -> String {
        format!("--{}", self.css_name())
    }

    /// `var()` expression referencing this path's custom property.
    pub fn css_var(&self) -> String {
        format!("var(--{})", self.css_name())
    }

    /// Reference literal as it appears in token documents, e.g. `{fontSize.t10}`.
    pub fn to_reference(&self) -> String {
        format!("{{{self}}}")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for TokenPath {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TokenPath {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TokenPath> for String {
    fn from(path: TokenPath) -> Self {
        path.to_string()
    }
}

/// camelCase → kebab-case for a single path segment.
///
/// A hyphen is inserted between a lowercase ASCII letter and a following
/// uppercase ASCII letter, then the whole segment is lowercased. Digits never
/// start a new word: `t10` stays `t10`, `2xs-bold` stays `2xs-bold`.
pub fn kebab_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    let mut prev_lower = false;
    for ch in segment.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = ch.is_ascii_lowercase();
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// Parse a whole-string token reference (`{a.b.c}`).
///
/// Returns `None` for anything else, including strings that merely
/// *contain* a reference.
pub fn parse_reference(value: &str) -> Option<TokenPath> {
    let inner = value.strip_prefix('{')?.strip_suffix('}')?;
    if inner.contains(['{', '}']) {
        return None;
    }
    TokenPath::parse(inner.trim()).ok()
}

// =========================================================================
// Embedded reference scanning
// =========================================================================

/// A piece of a string value: literal text or an embedded reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<'a> {
    Text(&'a str),
    Reference(TokenPath),
}

/// Split a string value into literal text and `{path}` references.
///
/// Braces that do not enclose a valid path are kept as text.
pub fn fragments(value: &str) -> Vec<Fragment<'_>> {
    ReferenceScanner::new(value).scan()
}

struct ReferenceScanner<'a> {
    source: &'a str,
    pos: usize,
    text_start: usize,
    fragments: Vec<Fragment<'a>>,
}

impl<'a> ReferenceScanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            text_start: 0,
            fragments: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Fragment<'a>> {
        while let Some(offset) = self.source[self.pos..].find('{') {
            let open = self.pos + offset;
            let Some(close_offset) = self.source[open + 1..].find(['{', '}']) else {
                break;
            };
            let close = open + 1 + close_offset;

            // `{a{b.c}`: restart from the inner brace
            if self.source.as_bytes()[close] == b'{' {
                self.pos = close;
                continue;
            }

            if let Ok(path) = TokenPath::parse(self.source[open + 1..close].trim()) {
                self.flush_text(open);
                self.fragments.push(Fragment::Reference(path));
                self.text_start = close + 1;
            }
            self.pos = close + 1;
        }

        self.flush_text(self.source.len());
        self.fragments
    }

    fn flush_text(&mut self, end: usize) {
        if end > self.text_start {
            self.fragments
                .push(Fragment::Text(&self.source[self.text_start..end]));
        }
    }
}
