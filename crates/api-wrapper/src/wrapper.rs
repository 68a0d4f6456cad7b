//! The binding/dispatch wrapper
//!
//! [`ApiWrapper`] binds a handler to its [`Signature`]. On every call it
//! resolves the non-exposed parameters from request data, merges them with
//! the caller-supplied arguments, invokes the handler and encodes whatever it
//! returned.
//!
//! # Example
//!
//! ```ignore
//! use api_wrapper::prelude::*;
//!
//! fn greet(args: Args) -> Result<String, ApiError> {
//!     let name: String = args.get("name")?;
//!     let times: i64 = args.get("times")?;
//!     Ok(name.repeat(times as usize))
//! }
//!
//! let api = wraps_api(signature![name, times: Int = 1], WrapOptions::new().exposed("name"), greet);
//!
//! // /greet/ab?times=2, with `name` taken from the route
//! let req = Request::from_uri("GET", "/greet/ab?times=2").with_param("name", "ab");
//! assert_eq!(api.handle(&req)?.body_text(), "abab");
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::args::Args;
use crate::error::ApiError;
use crate::options::{MergePolicy, WrapOptions};
use crate::request::Request;
use crate::response::Response;
use crate::returns::{self, DefaultEncoder, IntoReturnValue, ReturnEncoder};
use crate::signature::{Param, Signature};
use crate::source::{is_falsy, Lookup, QuerySource, ValueSource};

/// A type-erased wrapped handler that can be stored in collections
pub type BoxedApi = Arc<dyn Fn(&Request, Args) -> Result<Response, ApiError> + Send + Sync>;

/// A handler bound to its parameter descriptors and wrapping options
pub struct ApiWrapper<F> {
    name: String,
    signature: Signature,
    /// Declared minus exposed parameters, in declaration order
    resolution: Vec<Param>,
    options: WrapOptions,
    source: Arc<dyn ValueSource>,
    encoder: Arc<dyn ReturnEncoder>,
    handler: F,
}

/// Wrap a handler, naming it after its type.
pub fn wraps_api<F>(signature: Signature, options: WrapOptions, handler: F) -> ApiWrapper<F> {
    ApiWrapper::new(std::any::type_name::<F>(), signature, options, handler)
}

impl<F> ApiWrapper<F> {
    pub fn new(name: impl Into<String>, signature: Signature, options: WrapOptions, handler: F) -> Self {
        let name = name.into();

        for exposed in options.exposed_args.iter() {
            if !signature.contains(exposed) {
                warn!(handler = %name, param = %exposed, "Exposed parameter is not declared by the handler");
            }
        }

        let resolution = signature
            .iter()
            .filter(|p| !options.exposed_args.contains(&p.name))
            .cloned()
            .collect();

        Self {
            name,
            signature,
            resolution,
            options,
            source: Arc::new(QuerySource),
            encoder: Arc::new(DefaultEncoder),
            handler,
        }
    }

    /// Read raw values from somewhere other than the query string (builder pattern).
    pub fn with_source(mut self, source: impl ValueSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Replace the return-value encoding policy (builder pattern).
    pub fn with_encoder(mut self, encoder: impl ReturnEncoder + 'static) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn options(&self) -> &WrapOptions {
        &self.options
    }

    /// Names this wrapper resolves from request data
    pub fn resolution_set(&self) -> impl Iterator<Item = &str> {
        self.resolution.iter().map(|p| p.name.as_str())
    }

    /// Resolve every non-exposed parameter from the request.
    pub fn resolve(&self, request: &Request) -> Result<Args, ApiError> {
        let mut args = Args::new();
        for param in &self.resolution {
            let value = match self.lookup(param, request)? {
                Lookup::Found(value) => {
                    trace!(handler = %self.name, param = %param.name, "Resolved from request");
                    value
                }
                Lookup::Missing => match &param.default {
                    Some(default) => {
                        trace!(handler = %self.name, param = %param.name, "Using default");
                        default.clone()
                    }
                    None => {
                        debug!(handler = %self.name, param = %param.name, "Parameter not found");
                        return Err(ApiError::not_found(&param.name));
                    }
                },
            };
            args.insert(param.name.clone(), value);
        }
        Ok(args)
    }

    fn lookup(&self, param: &Param, request: &Request) -> Result<Lookup, ApiError> {
        let Some(raw) = self.source.fetch(request, &param.name) else {
            return Ok(Lookup::Missing);
        };
        if self.options.falsy_is_missing && raw.is_empty() {
            return Ok(Lookup::Missing);
        }

        let value = match &param.coerce {
            None => Value::String(raw),
            Some(coerce) => match coerce.apply(&raw) {
                Ok(value) => value,
                Err(reason) if self.options.force_match => {
                    debug!(handler = %self.name, param = %param.name, %reason, "Type mismatch");
                    return Err(ApiError::mismatch(&param.name, coerce.expected(), raw));
                }
                Err(reason) => {
                    trace!(handler = %self.name, param = %param.name, %reason, "Conversion failed, keeping raw value");
                    Value::String(raw)
                }
            },
        };

        if self.options.falsy_is_missing && is_falsy(&value) {
            return Ok(Lookup::Missing);
        }
        Ok(Lookup::Found(value))
    }

    /// Build the complete argument set for one call.
    ///
    /// Resolved and caller-supplied arguments are merged per the configured
    /// [`MergePolicy`]. Exposed parameters the caller left out fall back to
    /// their defaults.
    pub fn assemble(&self, request: &Request, caller: Args) -> Result<Args, ApiError> {
        let resolved = self.resolve(request)?;

        let mut args = match self.options.merge {
            MergePolicy::ResolvedWins => {
                let mut args = caller;
                args.overlay(resolved);
                args
            }
            MergePolicy::CallerWins => {
                let mut args = resolved;
                args.overlay(caller);
                args
            }
        };

        for param in self.signature.iter() {
            if args.contains(&param.name) {
                continue;
            }
            match &param.default {
                Some(default) => {
                    args.insert(param.name.clone(), default.clone());
                }
                None => return Err(ApiError::not_found(&param.name)),
            }
        }

        Ok(args)
    }
}

impl<F, R> ApiWrapper<F>
where
    F: Fn(Args) -> R,
    R: IntoReturnValue,
{
    /// Invoke the handler with `caller` as the caller-supplied arguments.
    ///
    /// Resolution errors are returned before the handler runs.
    pub fn call(&self, request: &Request, caller: Args) -> Result<Response, ApiError> {
        let args = self.assemble(request, caller)?;
        debug!(handler = %self.name, args = args.len(), request_id = %request.request_id, "Invoking handler");

        let output = (self.handler)(args);
        returns::dispatch(self.encoder.as_ref(), output)
    }

    /// Invoke the handler with the request's path parameters as the
    /// caller-supplied arguments.
    pub fn handle(&self, request: &Request) -> Result<Response, ApiError> {
        let caller = request.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        self.call(request, caller)
    }

    /// Erase the handler type
    pub fn into_boxed(self) -> BoxedApi
    where
        F: Send + Sync + 'static,
        R: 'static,
    {
        Arc::new(move |request: &Request, caller: Args| self.call(request, caller))
    }
}
