//! Per-handler wrapping configuration
//!
//! Options are usually built in code, but they also deserialize from any
//! serde format so they can live in a route table:
//!
//! ```ignore
//! let opts: WrapOptions = serde_json::from_str(r#"{"exposed_args": "name", "force_match": true}"#)?;
//! ```

use serde::{Deserialize, Deserializer};
use std::collections::HashSet;

/// Names supplied by the caller (route) rather than resolved from the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposedArgs(HashSet<String>);

impl ExposedArgs {
    /// Parse a space-separated list of names
    pub fn parse(names: &str) -> Self {
        Self(names.split_whitespace().map(str::to_string).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ExposedArgs {
    fn from(names: &str) -> Self {
        Self::parse(names)
    }
}

impl From<String> for ExposedArgs {
    fn from(names: String) -> Self {
        Self::parse(&names)
    }
}

impl<S: Into<String>> FromIterator<S> for ExposedArgs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ExposedArgs {
    fn from(names: [S; N]) -> Self {
        names.into_iter().collect()
    }
}

impl From<Vec<String>> for ExposedArgs {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<HashSet<String>> for ExposedArgs {
    fn from(names: HashSet<String>) -> Self {
        Self(names)
    }
}

impl<'de> Deserialize<'de> for ExposedArgs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Joined(s) => Self::parse(&s),
            Raw::List(names) => names.into_iter().collect(),
        })
    }
}

/// Which side wins when a resolved value and a caller-supplied value share a name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Values resolved from the request overwrite caller-supplied ones
    #[default]
    ResolvedWins,
    /// Caller-supplied values are kept
    CallerWins,
}

/// Configuration of one wrapped handler
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WrapOptions {
    /// Parameters excluded from automatic resolution
    pub exposed_args: ExposedArgs,

    /// Fail with `ParameterTypeMismatch` instead of keeping the raw string
    /// when a conversion fails
    pub force_match: bool,

    /// Treat falsy resolved values (`""`, `0`, `false`, `null`, empty
    /// collections) like absent ones, sending them down the default path
    pub falsy_is_missing: bool,

    /// Overwrite direction when merging resolved and caller arguments
    pub merge: MergePolicy,
}

impl WrapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exposed parameters (builder pattern).
    ///
    /// # Example
    /// ```ignore
    /// WrapOptions::new().exposed("name id")
    /// WrapOptions::new().exposed(["name", "id"])
    /// ```
    pub fn exposed(mut self, names: impl Into<ExposedArgs>) -> Self {
        self.exposed_args = names.into();
        self
    }

    pub fn force_match(mut self, force: bool) -> Self {
        self.force_match = force;
        self
    }

    pub fn falsy_is_missing(mut self, enabled: bool) -> Self {
        self.falsy_is_missing = enabled;
        self
    }

    pub fn merge(mut self, policy: MergePolicy) -> Self {
        self.merge = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposed_forms_agree() {
        let joined = ExposedArgs::from("name  id");
        let listed = ExposedArgs::from(["id", "name"]);
        assert_eq!(joined, listed);
        assert!(joined.contains("name"));
        assert!(!joined.contains(""));
    }

    #[test]
    fn test_deserialize_options() {
        let opts: WrapOptions =
            serde_json::from_str(r#"{"exposed_args": "name id", "force_match": true}"#).unwrap();
        assert_eq!(opts.exposed_args, ExposedArgs::from(["name", "id"]));
        assert!(opts.force_match);
        assert!(!opts.falsy_is_missing);
        assert_eq!(opts.merge, MergePolicy::ResolvedWins);

        let opts: WrapOptions =
            serde_json::from_str(r#"{"exposed_args": ["name"], "merge": "caller_wins"}"#).unwrap();
        assert!(opts.exposed_args.contains("name"));
        assert_eq!(opts.merge, MergePolicy::CallerWins);

        let opts: WrapOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, WrapOptions::default());
    }

    #[test]
    fn test_builder() {
        let opts = WrapOptions::new().exposed("name").force_match(true).merge(MergePolicy::CallerWins);
        assert!(opts.exposed_args.contains("name"));
        assert!(opts.force_match);
        assert_eq!(opts.merge, MergePolicy::CallerWins);
    }
}
