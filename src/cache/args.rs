//! Call Arguments Module
//!
//! Dynamically-typed argument values and the positional/keyword argument list
//! handed to a memoized computation.

use serde::Serialize;

// == Arg ==
/// A single argument value passed to a memoized computation.
///
/// `List` and `Map` are mutable containers and never produce a cache key;
/// use `Tuple` for an immutable sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Arg>),
    List(Vec<Arg>),
    Map(Vec<(String, Arg)>),
}

impl Arg {
    /// Builds an immutable tuple argument.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        Arg::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mutable list argument.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        Arg::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a mutable mapping argument.
    pub fn map<I, S, T>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<Arg>,
    {
        Arg::Map(
            items
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Arg::Float(f) => Some(*f),
            Arg::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Arg::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Arg]> {
        match self {
            Arg::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Arg::None)
    }
}

// == Conversions ==
impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(i64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Arg::Bytes(value.to_vec())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::None, Into::into)
    }
}

// == Call Args ==
/// Positional and keyword arguments of one call, in call-site order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallArgs {
    positional: Vec<Arg>,
    keywords: Vec<(String, Arg)>,
}

impl CallArgs {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Arg>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    ///
    /// Supplying the same name twice is not rejected here; key construction
    /// refuses it.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }

    /// Returns the positional argument at `index`.
    pub fn positional(&self, index: usize) -> Option<&Arg> {
        self.positional.get(index)
    }

    /// Returns the first keyword argument named `name`.
    pub fn keyword(&self, name: &str) -> Option<&Arg> {
        self.keywords
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn positionals(&self) -> &[Arg] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, Arg)] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_args_builder_keeps_order() {
        let args = CallArgs::new().arg(1).arg("two").kwarg("y", 2).kwarg("x", 1);

        assert_eq!(args.len(), 4);
        assert_eq!(args.positional(0), Some(&Arg::Int(1)));
        assert_eq!(args.positional(1).and_then(Arg::as_str), Some("two"));
        assert_eq!(args.keywords()[0].0, "y");
        assert_eq!(args.keywords()[1].0, "x");
    }

    #[test]
    fn test_keyword_lookup() {
        let args = CallArgs::new().kwarg("first_n", 150);

        assert_eq!(args.keyword("first_n").and_then(Arg::as_int), Some(150));
        assert!(args.keyword("missing").is_none());
        assert!(args.positional(0).is_none());
    }

    #[test]
    fn test_empty_args() {
        let args = CallArgs::new();
        assert!(args.is_empty());
        assert_eq!(args.len(), 0);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Arg::from(true).as_bool(), Some(true));
        assert_eq!(Arg::from(3).as_float(), Some(3.0));
        assert_eq!(Arg::from(2.5).as_float(), Some(2.5));
        assert_eq!(Arg::from(&b"ab"[..]).as_bytes(), Some(&b"ab"[..]));
        assert_eq!(Arg::from(2.5).as_int(), None);
        assert!(Arg::from(None::<i64>).is_none());
        assert_eq!(Arg::from(Some("x")), Arg::Str("x".to_string()));
    }

    #[test]
    fn test_container_builders() {
        let tuple = Arg::tuple([1, 2]);
        assert_eq!(tuple.as_tuple(), Some(&[Arg::Int(1), Arg::Int(2)][..]));

        assert_eq!(Arg::list(["a"]), Arg::List(vec![Arg::Str("a".to_string())]));
        assert_eq!(
            Arg::map([("k", 1)]),
            Arg::Map(vec![("k".to_string(), Arg::Int(1))])
        );
    }
}
