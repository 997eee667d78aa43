//! Cache Key Module
//!
//! Canonicalizes a call's positional and keyword arguments into an immutable,
//! hashable and totally ordered key.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::cache::{Arg, CallArgs};
use crate::error::{CacheError, Result};

// == Key Value ==
/// Hashable mirror of an [`Arg`].
///
/// Floats with an integral value are stored as `Int`, so `1.0` and `1` name
/// the same call. Other floats are held by their bit pattern. NaN never
/// reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
    None,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<KeyValue>),
}

impl KeyValue {
    fn from_arg(arg: &Arg, path: &str) -> Result<Self> {
        match arg {
            Arg::None => Ok(KeyValue::None),
            Arg::Bool(b) => Ok(KeyValue::Bool(*b)),
            Arg::Int(i) => Ok(KeyValue::Int(*i)),
            Arg::Float(f) if f.is_nan() => Err(CacheError::InvalidKey(format!(
                "{} is NaN and cannot be compared",
                path
            ))),
            // Integral floats key like the equal integer, which also folds -0.0 into 0.
            Arg::Float(f) if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
                Ok(KeyValue::Int(*f as i64))
            }
            Arg::Float(f) => Ok(KeyValue::Float(f.to_bits())),
            Arg::Str(s) => Ok(KeyValue::Str(s.clone())),
            Arg::Bytes(b) => Ok(KeyValue::Bytes(b.clone())),
            Arg::Tuple(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::from_arg(item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(KeyValue::Tuple),
            Arg::List(_) => Err(CacheError::InvalidKey(format!(
                "{} is a mutable list",
                path
            ))),
            Arg::Map(_) => Err(CacheError::InvalidKey(format!(
                "{} is a mutable map",
                path
            ))),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::None => f.write_str("None"),
            KeyValue::Bool(b) => write!(f, "{}", b),
            KeyValue::Int(i) => write!(f, "{}", i),
            KeyValue::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            KeyValue::Str(s) => write!(f, "{:?}", s),
            KeyValue::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            KeyValue::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

// == Cache Key ==
/// Canonical identity of one call.
///
/// Positional values keep call order; keyword pairs are sorted by name, so
/// the order keywords were supplied in never affects equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    positional: Vec<KeyValue>,
    keywords: Vec<(String, KeyValue)>,
}

impl CacheKey {
    // == Build ==
    /// Canonicalizes call arguments into a key.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidKey` when any argument, at any depth, is a
    /// list, a map or NaN, or when a keyword name is not an identifier or is
    /// supplied twice.
    pub fn build(args: &CallArgs) -> Result<Self> {
        let positional = args
            .positionals()
            .iter()
            .enumerate()
            .map(|(i, arg)| KeyValue::from_arg(arg, &format!("positional argument {}", i)))
            .collect::<Result<Vec<_>>>()?;

        let mut keywords = args
            .keywords()
            .iter()
            .map(|(name, arg)| {
                if !is_identifier(name) {
                    return Err(CacheError::InvalidKey(format!(
                        "keyword name {:?} is not an identifier",
                        name
                    )));
                }
                KeyValue::from_arg(arg, &format!("keyword argument `{}`", name))
                    .map(|value| (name.clone(), value))
            })
            .collect::<Result<Vec<_>>>()?;

        keywords.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = keywords.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CacheError::InvalidKey(format!(
                "keyword argument `{}` supplied more than once",
                pair[0].0
            )));
        }

        Ok(Self {
            positional,
            keywords,
        })
    }

    pub fn positional(&self) -> &[KeyValue] {
        &self.positional
    }

    /// Keyword pairs, sorted by name.
    pub fn keywords(&self) -> &[(String, KeyValue)] {
        &self.keywords
    }
}

/// Keyword names follow identifier rules so the rendered key stays unambiguous.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl TryFrom<&CallArgs> for CacheKey {
    type Error = CacheError;

    fn try_from(args: &CallArgs) -> Result<Self> {
        Self::build(args)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}", value)?;
        }
        for (name, value) in &self.keywords {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

// Serialized as the display form so keys can be used as JSON object keys.
impl Serialize for CacheKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
