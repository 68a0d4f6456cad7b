//! Where raw parameter values are looked up

use crate::request::Request;
use serde_json::Value;

/// Outcome of looking up one parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Value),
    Missing,
}

impl Lookup {
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }
}

/// A source of raw, string-valued request data
pub trait ValueSource: Send + Sync {
    /// Fetch the raw value for `name`, if the request carries one
    fn fetch(&self, request: &Request, name: &str) -> Option<String>;
}

/// Reads the request's query string
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySource;

impl ValueSource for QuerySource {
    fn fetch(&self, request: &Request, name: &str) -> Option<String> {
        request.query_param(name).cloned()
    }
}

/// Reads request headers, matching names case-insensitively
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSource;

impl ValueSource for HeaderSource {
    fn fetch(&self, request: &Request, name: &str) -> Option<String> {
        request.header(name).cloned()
    }
}

impl<F> ValueSource for F
where
    F: Fn(&Request, &str) -> Option<String> + Send + Sync,
{
    fn fetch(&self, request: &Request, name: &str) -> Option<String> {
        self(request, name)
    }
}

/// Whether a value counts as false-like: `null`, `false`, zero, `""` or an
/// empty collection
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sources() {
        let req = Request::from_uri("GET", "/?token=q").with_header("Token", "h");
        assert_eq!(QuerySource.fetch(&req, "token"), Some("q".to_string()));
        assert_eq!(HeaderSource.fetch(&req, "token"), Some("h".to_string()));
        assert_eq!(QuerySource.fetch(&req, "other"), None);

        let fixed = |_: &Request, name: &str| (name == "x").then(|| "fixed".to_string());
        assert_eq!(fixed.fetch(&req, "x"), Some("fixed".to_string()));
    }

    #[test]
    fn test_falsy() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&v), "{} should be falsy", v);
        }
        for v in [json!(true), json!(-1), json!("0"), json!([0])] {
            assert!(!is_falsy(&v), "{} should be truthy", v);
        }
    }
}
