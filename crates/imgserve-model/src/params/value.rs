use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Params;

/// Single param value.
///
/// Serialized untagged, so a JSON object like `{"w": 100, "fmt": "png"}`
/// maps directly onto [`Params`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Params(Params),
}

impl ParamValue {
    /// Short name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::Params(_) => "params",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are widened, so `1` and `1.0` both read as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_params(&self) -> Option<&Params> {
        match self {
            ParamValue::Params(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Params(p) => write!(f, "{p}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i.into())
    }
}

impl From<f64> for ParamValue {
    fn from(f: f64) -> Self {
        ParamValue::Float(f)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<Params> for ParamValue {
    fn from(p: Params) -> Self {
        ParamValue::Params(p)
    }
}

#[cfg(test)]
mod tests {
    use super::ParamValue;
    use crate::Params;

    #[test]
    fn accessors_match_variant() {
        assert_eq!(ParamValue::from("x").as_str(), Some("x"));
        assert_eq!(ParamValue::from(7).as_int(), Some(7));
        assert_eq!(ParamValue::from(true).as_bool(), Some(true));
        assert_eq!(ParamValue::from(7).as_str(), None);
        assert_eq!(ParamValue::from("7").as_int(), None);
    }

    #[test]
    fn int_widens_to_float() {
        assert_eq!(ParamValue::from(2).as_float(), Some(2.0));
        assert_eq!(ParamValue::from(0.5).as_float(), Some(0.5));
        assert_eq!(ParamValue::from(false).as_float(), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(ParamValue::from(1).kind(), "int");
        assert_eq!(ParamValue::from(Params::new()).kind(), "params");
    }

    #[test]
    fn serde_untagged_picks_narrowest_variant() {
        let v: ParamValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, ParamValue::Int(3));

        let v: ParamValue = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, ParamValue::Float(3.5));

        let v: ParamValue = serde_json::from_str(r#""3""#).unwrap();
        assert_eq!(v, ParamValue::String("3".into()));

        let v: ParamValue = serde_json::from_str(r#"{"a": true}"#).unwrap();
        assert_eq!(v.as_params().and_then(|p| p.get_bool("a").ok()), Some(true));
    }
}
