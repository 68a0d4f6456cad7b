//! Conversions applied to raw request strings
//!
//! A [`Coerce`] plays the part of a parameter's type annotation: it turns the
//! raw string found in the request into a typed [`Value`].

use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// User-supplied conversion. The error string is informational only.
pub type CoerceFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// How a raw string parameter is converted before it reaches the handler
#[derive(Clone)]
pub enum Coerce {
    /// Keep the raw string
    Str,
    /// Signed 64-bit integer, surrounding whitespace ignored
    Int,
    /// Finite 64-bit float, surrounding whitespace ignored
    Float,
    /// `true/false`, `1/0`, `yes/no`, `on/off` in any case
    Bool,
    /// The raw text parsed as a JSON document
    Json,
    /// A named custom conversion
    Custom(&'static str, CoerceFn),
}

impl Coerce {
    /// Build a custom conversion from a closure.
    ///
    /// # Example
    /// ```ignore
    /// let upper = Coerce::custom("upper", |raw| Ok(json!(raw.to_uppercase())));
    /// ```
    pub fn custom<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Coerce::Custom(name, Arc::new(f))
    }

    /// Name of the target type, reported in mismatch errors
    pub fn expected(&self) -> &'static str {
        match self {
            Coerce::Str => "str",
            Coerce::Int => "int",
            Coerce::Float => "float",
            Coerce::Bool => "bool",
            Coerce::Json => "json",
            Coerce::Custom(name, _) => name,
        }
    }

    /// Apply the conversion to a raw value
    pub fn apply(&self, raw: &str) -> Result<Value, String> {
        match self {
            Coerce::Str => Ok(Value::String(raw.to_string())),
            Coerce::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| e.to_string()),
            Coerce::Float => {
                let f = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{} is not a finite number", f))
            }
            Coerce::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
                other => Err(format!("{:?} is not a boolean", other)),
            },
            Coerce::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            Coerce::Custom(_, f) => f(raw),
        }
    }
}

impl fmt::Debug for Coerce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coerce::Custom(name, _) => f.debug_tuple("Custom").field(name).finish(),
            other => f.write_str(other.expected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int() {
        assert_eq!(Coerce::Int.apply(" 42 "), Ok(json!(42)));
        assert_eq!(Coerce::Int.apply("-7"), Ok(json!(-7)));
        assert!(Coerce::Int.apply("good").is_err());
        assert!(Coerce::Int.apply("").is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(Coerce::Float.apply("2.5"), Ok(json!(2.5)));
        assert!(Coerce::Float.apply("NaN").is_err());
        assert!(Coerce::Float.apply("abc").is_err());
    }

    #[test]
    fn test_bool() {
        assert_eq!(Coerce::Bool.apply("True"), Ok(json!(true)));
        assert_eq!(Coerce::Bool.apply("off"), Ok(json!(false)));
        assert!(Coerce::Bool.apply("maybe").is_err());
    }

    #[test]
    fn test_json_and_custom() {
        assert_eq!(Coerce::Json.apply("[1,2]"), Ok(json!([1, 2])));
        let upper = Coerce::custom("upper", |raw| Ok(json!(raw.to_uppercase())));
        assert_eq!(upper.apply("abc"), Ok(json!("ABC")));
        assert_eq!(upper.expected(), "upper");
        assert_eq!(format!("{:?}", upper), "Custom(\"upper\")");
    }
}
