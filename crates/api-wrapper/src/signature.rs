//! Parameter descriptors declared alongside a handler
//!
//! A [`Signature`] is the explicit stand-in for a handler's argument list:
//! ordered names, each with an optional [`Coerce`] and an optional default.
//!
//! # Example
//!
//! ```ignore
//! use api_wrapper::prelude::*;
//!
//! let sig = Signature::new()
//!     .param(Param::new("name"))
//!     .param(Param::new("page").coerce(Coerce::Int).default(1));
//!
//! // Same thing, declaratively
//! let sig = signature![name, page: Int = 1];
//! ```

use crate::coerce::Coerce;
use serde_json::Value;

/// One declared handler parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub coerce: Option<Coerce>,
    pub default: Option<Value>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coerce: None,
            default: None,
        }
    }

    /// Attach a conversion (builder pattern).
    pub fn coerce(mut self, coerce: Coerce) -> Self {
        self.coerce = Some(coerce);
        self
    }

    /// Attach a default value (builder pattern).
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered parameter list of a handler
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter. Re-declaring a name replaces the earlier
    /// descriptor in place.
    pub fn param(mut self, param: Param) -> Self {
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        iter.into_iter().fold(Signature::new(), Signature::param)
    }
}

/// Build a [`Signature`] from a compact parameter list.
///
/// Each entry is `name`, optionally followed by `: Variant` naming a
/// [`Coerce`] variant, optionally followed by `= default` (any `json!` input).
///
/// ```ignore
/// let sig = signature![name, arg1];
/// let sig = signature![arg_int: Int, arg_str: Str, arg_bool: Bool = false];
/// ```
#[macro_export]
macro_rules! signature {
    ($($name:ident $(: $coerce:ident)? $(= $default:expr)?),* $(,)?) => {{
        let sig = $crate::Signature::new();
        $(
            let sig = sig.param({
                let param = $crate::Param::new(stringify!($name));
                $( let param = param.coerce($crate::Coerce::$coerce); )?
                $( let param = param.default($crate::serde_json::json!($default)); )?
                param
            });
        )*
        sig
    }};
}
