use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// A value substituted into a `{{placeholder}}`.
///
/// Non-finite floats have no JSON number form; they serialize as the strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"`, the same text they display as.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl VarValue {
    /// Numeric view used by plural selection; strings are never numbers here.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            VarValue::Int(n) => Some(*n as f64),
            VarValue::Float(n) => Some(*n),
            VarValue::Str(_) => None,
        }
    }
}

fn non_finite_text(n: f64) -> Option<&'static str> {
    if n.is_nan() {
        Some("NaN")
    } else if n.is_infinite() {
        Some(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        None
    }
}

// Plain numeric formatting, no locale-aware grouping or separators.
impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(n) => write!(f, "{}", n),
            VarValue::Float(n) => match non_finite_text(*n) {
                Some(text) => f.write_str(text),
                None => write!(f, "{}", n),
            },
            VarValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for VarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VarValue::Int(n) => serializer.serialize_i64(*n),
            VarValue::Float(n) => match non_finite_text(*n) {
                Some(text) => serializer.serialize_str(text),
                None => serializer.serialize_f64(*n),
            },
            VarValue::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl From<String> for VarValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for VarValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for VarValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<i64> for VarValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for VarValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for VarValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for VarValue {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Self::Float(v as f64), Self::Int)
    }
}

impl From<f64> for VarValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for VarValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

/// Placeholder name → value mapping supplied at resolution time.
///
/// Not validated against the template: unknown names are ignored and
/// unsupplied placeholders stay verbatim in the output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, VarValue>);

impl Variables {
    pub fn new() -> Self {
        Variables(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<VarValue>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<VarValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Variables(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Variables
where
    K: Into<String>,
    V: Into<VarValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<&Variables> for Variables {
    fn from(variables: &Variables) -> Self {
        variables.clone()
    }
}

/// Build [`Variables`] from `name => value` pairs.
///
/// Examples:
/// - `vars! {}`
/// - `vars! { "name" => user_name, "count" => 3 }`
#[macro_export]
macro_rules! vars {
    () => {
        $crate::Variables::new()
    };
    ($($name:literal => $value:expr),+ $(,)?) => {{
        let mut variables = $crate::Variables::new();
        $(
            variables.insert($name, $value);
        )+
        variables
    }};
}
