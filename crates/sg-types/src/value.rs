use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A concrete candidate value for a tunable parameter.
///
/// `Json` covers categorical and structured candidates; `Json(Value::Null)`
/// is the "no override" candidate — the model keeps its built-in default for
/// that parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Json(Value),
}

impl ParamValue {
    /// The "no override" candidate.
    pub fn unset() -> Self {
        Self::Json(Value::Null)
    }

    /// True when this candidate means "use the model's default".
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Json(Value::Null) => write!(f, "default"),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_round_trip() {
        let value = ParamValue::unset();
        assert!(value.is_unset());
        assert!(!ParamValue::Float(0.01).is_unset());

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "null");
        let back: ParamValue = serde_json::from_str(&json).unwrap();
        assert!(back.is_unset());
    }

    #[test]
    fn integers_stay_integers_through_serde() {
        let json = serde_json::to_string(&ParamValue::Int(5000)).unwrap();
        let back: ParamValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParamValue::Int(5000));
    }

    #[test]
    fn display_formats() {
        assert_eq!(ParamValue::Int(50000).to_string(), "50000");
        assert_eq!(ParamValue::Float(0.01).to_string(), "0.01");
        assert_eq!(ParamValue::unset().to_string(), "default");
        assert_eq!(
            ParamValue::Json(serde_json::json!("cubic")).to_string(),
            "\"cubic\""
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(ParamValue::Int(3).as_int(), Some(3));
        assert_eq!(ParamValue::Int(3).as_float(), None);
        assert_eq!(ParamValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(
            ParamValue::Json(serde_json::json!("cubic")).as_str(),
            Some("cubic")
        );
    }
}
