//! Token values.
//!
//! Every `value` field in a token document is classified into [`TokenValue`]
//! when the document is parsed. Composite objects are recognised by a
//! distinguishing key, checked in this order:
//!
//! | key        | variant                         |
//! |------------|---------------------------------|
//! | `fontSize` | [`TokenValue::TypographyStyle`] |
//! | `blur`     | [`TokenValue::Shadow`]          |
//! | `en`       | [`TokenValue::LocaleLineHeight`]|
//!
//! Any other object or array is carried as [`TokenValue::Opaque`].

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::path::{fragments, parse_reference, Fragment, TokenPath};
use crate::TokenError;

/// The locale kept when multi-locale values are flattened.
pub const CANONICAL_LOCALE: &str = "en";

/// A plain JSON scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

/// Format a number the way JavaScript's `String(n)` does.
///
/// Plain decimal notation for magnitudes in `[1e-7, 1e21)`, shortest
/// exponent notation (`1e-7`, `1.5e+21`) outside it. Integral values print
/// without a fractional part and `-0` prints as `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return match n {
            n if n.is_nan() => "NaN".to_string(),
            n if n > 0.0 => "Infinity".to_string(),
            _ => "-Infinity".to_string(),
        };
    }

    let magnitude = n.abs();
    if (1e-7..1e21).contains(&magnitude) {
        return format!("{n}");
    }

    let exponent = format!("{n:e}");
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exponent,
    }
}

/// A flat value: a scalar or a whole-string reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Scalar(Scalar),
    Reference(TokenPath),
}

impl Atom {
    /// Classify a JSON string/number/bool. Strings of the form `{a.b}` become references.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(match parse_reference(s) {
                Some(path) => Atom::Reference(path),
                None => Atom::Scalar(Scalar::String(s.clone())),
            }),
            Value::Number(n) => n.as_f64().map(|n| Atom::Scalar(Scalar::Number(n))),
            Value::Bool(b) => Some(Atom::Scalar(Scalar::Bool(*b))),
            _ => None,
        }
    }

    /// Every token path this atom refers to, including references embedded
    /// in longer strings.
    pub fn references(&self) -> Vec<TokenPath> {
        match self {
            Atom::Reference(path) => vec![path.clone()],
            Atom::Scalar(Scalar::String(s)) => embedded_references(s),
            Atom::Scalar(_) => Vec::new(),
        }
    }

    /// CSS text for this atom: references become `var()`, embedded
    /// references inside strings are substituted in place.
    pub fn to_css(&self) -> String {
        match self {
            Atom::Reference(path) => path.css_var(),
            Atom::Scalar(Scalar::String(s)) => substitute_references(s),
            Atom::Scalar(scalar) => scalar.to_string(),
        }
    }
}

/// Raw form: references print as `{a.b}`.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Scalar(s) => s.fmt(f),
            Atom::Reference(path) => f.write_str(&path.to_reference()),
        }
    }
}

fn embedded_references(s: &str) -> Vec<TokenPath> {
    fragments(s)
        .into_iter()
        .filter_map(|f| match f {
            Fragment::Reference(path) => Some(path),
            Fragment::Text(_) => None,
        })
        .collect()
}

fn substitute_references(s: &str) -> String {
    fragments(s)
        .into_iter()
        .map(|f| match f {
            Fragment::Text(text) => text.to_string(),
            Fragment::Reference(path) => path.css_var(),
        })
        .collect()
}

// =========================================================================
// Composites
// =========================================================================

/// Which composite shape a value was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeKind {
    Shadow,
    LocaleLineHeight,
    TypographyStyle,
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompositeKind::Shadow => "shadow",
            CompositeKind::LocaleLineHeight => "locale line-height",
            CompositeKind::TypographyStyle => "typography style",
        })
    }
}

/// `{x, y, blur, spread, color}` box shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowComposite {
    pub x: Atom,
    pub y: Atom,
    pub blur: Atom,
    pub spread: Atom,
    pub color: Atom,
}

impl ShadowComposite {
    /// CSS shorthand `"{x}px {y}px {blur}px {spread}px {color}"`.
    pub fn shorthand(&self) -> String {
        format!(
            "{}px {}px {}px {}px {}",
            self.x, self.y, self.blur, self.spread, self.color
        )
    }

    fn atoms(&self) -> [&Atom; 5] {
        [&self.x, &self.y, &self.blur, &self.spread, &self.color]
    }
}

/// Locale code → value. Always contains [`CANONICAL_LOCALE`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleLineHeight {
    pub locales: IndexMap<String, Atom>,
}

impl LocaleLineHeight {
    /// The canonical (`en`) value.
    pub fn canonical(&self) -> &Atom {
        // Construction guarantees the key is present.
        &self.locales[CANONICAL_LOCALE]
    }
}

/// `{fontSize, lineHeight, fontWeight}` typography style.
#[derive(Debug, Clone, PartialEq)]
pub struct TypographyStyleComposite {
    pub font_size: Atom,
    pub line_height: Atom,
    pub font_weight: Atom,
}

impl TypographyStyleComposite {
    fn atoms(&self) -> [&Atom; 3] {
        [&self.font_size, &self.line_height, &self.font_weight]
    }
}

// =========================================================================
// TokenValue
// =========================================================================

/// A classified token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Scalar(Scalar),
    Reference(TokenPath),
    Shadow(ShadowComposite),
    LocaleLineHeight(LocaleLineHeight),
    TypographyStyle(TypographyStyleComposite),
    /// Any shape the pipeline has no rule for. Passed through untouched.
    Opaque(Value),
}

impl TokenValue {
    /// Classify the `value` field of the token at `path`.
    pub fn from_json(path: &TokenPath, value: &Value) -> Result<Self, TokenError> {
        let Value::Object(map) = value else {
            return Ok(match Atom::from_json(value) {
                Some(atom) => atom.into(),
                None => TokenValue::Opaque(value.clone()),
            });
        };

        if map.contains_key("fontSize") {
            let field = |name: &str| composite_field(path, CompositeKind::TypographyStyle, map, name);
            return Ok(TokenValue::TypographyStyle(TypographyStyleComposite {
                font_size: field("fontSize")?,
                line_height: field("lineHeight")?,
                font_weight: field("fontWeight")?,
            }));
        }

        if map.contains_key("blur") {
            let field = |name: &str| composite_field(path, CompositeKind::Shadow, map, name);
            return Ok(TokenValue::Shadow(ShadowComposite {
                x: field("x")?,
                y: field("y")?,
                blur: field("blur")?,
                spread: field("spread")?,
                color: field("color")?,
            }));
        }

        if map.contains_key(CANONICAL_LOCALE) {
            let canonical =
                composite_field(path, CompositeKind::LocaleLineHeight, map, CANONICAL_LOCALE)?;
            let mut locales = IndexMap::with_capacity(map.len());
            for (locale, raw) in map {
                if locale == CANONICAL_LOCALE {
                    locales.insert(locale.clone(), canonical.clone());
                    continue;
                }
                match Atom::from_json(raw) {
                    Some(atom) => {
                        locales.insert(locale.clone(), atom);
                    }
                    None => {
                        tracing::debug!(path = %path, locale = %locale, "ignoring non-scalar locale value");
                    }
                }
            }
            return Ok(TokenValue::LocaleLineHeight(LocaleLineHeight { locales }));
        }

        Ok(TokenValue::Opaque(value.clone()))
    }

    /// True for the three composite shapes that flattening rewrites.
    pub fn is_composite(&self) -> bool {
        self.composite_kind().is_some()
    }

    pub fn composite_kind(&self) -> Option<CompositeKind> {
        match self {
            TokenValue::Shadow(_) => Some(CompositeKind::Shadow),
            TokenValue::LocaleLineHeight(_) => Some(CompositeKind::LocaleLineHeight),
            TokenValue::TypographyStyle(_) => Some(CompositeKind::TypographyStyle),
            _ => None,
        }
    }

    /// Every token path referenced anywhere inside this value.
    pub fn references(&self) -> Vec<TokenPath> {
        match self {
            TokenValue::Scalar(Scalar::String(s)) => embedded_references(s),
            TokenValue::Scalar(_) | TokenValue::Opaque(_) => Vec::new(),
            TokenValue::Reference(path) => vec![path.clone()],
            TokenValue::Shadow(shadow) => {
                shadow.atoms().iter().flat_map(|a| a.references()).collect()
            }
            TokenValue::LocaleLineHeight(lh) => {
                lh.locales.values().flat_map(Atom::references).collect()
            }
            TokenValue::TypographyStyle(style) => {
                style.atoms().iter().flat_map(|a| a.references()).collect()
            }
        }
    }
}

impl From<Atom> for TokenValue {
    fn from(atom: Atom) -> Self {
        match atom {
            Atom::Scalar(s) => TokenValue::Scalar(s),
            Atom::Reference(path) => TokenValue::Reference(path),
        }
    }
}

fn composite_field(
    path: &TokenPath,
    kind: CompositeKind,
    map: &serde_json::Map<String, Value>,
    name: &str,
) -> Result<Atom, TokenError> {
    let Some(raw) = map.get(name) else {
        return Err(TokenError::MalformedComposite {
            path: path.clone(),
            kind,
            problem: format!("missing field '{name}'"),
        });
    };
    Atom::from_json(raw).ok_or_else(|| TokenError::MalformedComposite {
        path: path.clone(),
        kind,
        problem: format!("field '{name}' must be a string, number or boolean"),
    })
}
