//! Interpolation arguments passed to a lookup

use std::collections::HashMap;
use std::fmt;

/// Key under which a keyed [`Args`] carries the modifier.
pub const MODIFIER_KEY: &str = "@";

/// A single interpolation value.
///
/// Its [`Display`](fmt::Display) rendering is used both for placeholder
/// substitution and for building modifier keys, so `0` and `"0"` select the
/// same `key@0` variant. Floats without a fractional part render without a
/// decimal point, and both zeros render as `0`.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Text, used as-is
    Str(String),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// `true` or `false`
    Bool(bool),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) if value.is_infinite() => {
                f.write_str(if value.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            Self::Float(value) if *value == 0.0 => f.write_str("0"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for ArgValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ArgValue {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

/// Arguments for a lookup: a keyed mapping or an ordered sequence.
///
/// A keyed mapping may carry a modifier under [`MODIFIER_KEY`]; a sequence
/// never does.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    /// `{{name}}`-style arguments
    Named(HashMap<String, ArgValue>),
    /// `{{0}}`-style arguments
    Positional(Vec<ArgValue>),
}

impl Default for Args {
    fn default() -> Self {
        Self::Named(HashMap::new())
    }
}

impl Args {
    /// Empty keyed arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered arguments addressed by index
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ArgValue>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Set a keyed argument. A sequence is first re-keyed by index.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        if let Self::Positional(values) = self {
            let named = std::mem::take(values)
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect();
            *self = Self::Named(named);
        }
        if let Self::Named(map) = self {
            map.insert(key.into(), value.into());
        }
    }

    /// Builder form of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the modifier used to select `key@modifier` variants
    #[must_use]
    pub fn modifier(self, value: impl Into<ArgValue>) -> Self {
        self.with(MODIFIER_KEY, value)
    }

    /// Resolve a placeholder expression against these arguments.
    ///
    /// Sequences only answer canonical indices: `1` does, `01` and `+1` do not.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        match self {
            Self::Named(map) => map.get(key),
            Self::Positional(values) => key
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == key)
                .and_then(|index| values.get(index)),
        }
    }

    /// The modifier value, if any
    pub fn modifier_value(&self) -> Option<&ArgValue> {
        self.get(MODIFIER_KEY)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        match self {
            Self::Named(map) => map.len(),
            Self::Positional(values) => values.len(),
        }
    }

    /// Whether there are no arguments
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Into<ArgValue>> From<Vec<V>> for Args {
    fn from(values: Vec<V>) -> Self {
        Self::positional(values)
    }
}

impl<K, V> FromIterator<(K, V)> for Args
where
    K: Into<String>,
    V: Into<ArgValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Named(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Macro to create [`Args`] more easily
///
/// ```rust
/// use lingo_i18n::t_args;
///
/// let named = t_args!["name" => "CRIMX", "@" => 3];
/// assert_eq!(named.modifier_value().map(ToString::to_string).as_deref(), Some("3"));
///
/// let positional = t_args!["CRIMX", "apple"];
/// assert_eq!(positional.get("1").map(ToString::to_string).as_deref(), Some("apple"));
/// ```
#[macro_export]
macro_rules! t_args {
    () => {
        $crate::Args::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(
            args.set($key, $value);
        )+
        args
    }};
    ($($value:expr),+ $(,)?) => {
        $crate::Args::positional([$($crate::ArgValue::from($value)),+])
    };
}
