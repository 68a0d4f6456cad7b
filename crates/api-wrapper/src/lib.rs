//! api-wrapper - parameter binding and return-value dispatch for request handlers
//!
//! A handler is declared together with a [`Signature`] describing its
//! parameters. The [`ApiWrapper`] resolves those parameters from the incoming
//! [`Request`], calls the handler and turns its return value into a
//! [`Response`]. The hosting framework stays in charge of routing and I/O.

pub mod args;
pub mod coerce;
pub mod error;
pub mod options;
pub mod request;
pub mod response;
pub mod returns;
pub mod signature;
pub mod source;
pub mod wrapper;

pub mod prelude {
    //! Common imports for wrapped handlers
    pub use crate::args::Args;
    pub use crate::coerce::Coerce;
    pub use crate::error::{ApiError, ErrorKind};
    pub use crate::options::{ExposedArgs, MergePolicy, WrapOptions};
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::returns::{IntoReturnValue, Json, ReturnEncoder, Stream};
    pub use crate::signature::{Param, Signature};
    pub use crate::source::{HeaderSource, QuerySource, ValueSource};
    pub use crate::wrapper::{wraps_api, ApiWrapper, BoxedApi};
    pub use crate::signature;
    pub use serde_json::{json, Value as JsonValue};
}

// Re-export key types at crate root
pub use args::Args;
pub use coerce::Coerce;
pub use error::{ApiError, ErrorKind};
pub use options::{ExposedArgs, MergePolicy, WrapOptions};
pub use request::Request;
pub use response::Response;
pub use returns::{dispatch, DefaultEncoder, IntoReturnValue, ReturnEncoder, ReturnValue, Stream};
pub use signature::{Param, Signature};
pub use wrapper::{wraps_api, ApiWrapper, BoxedApi};

#[doc(hidden)]
pub use serde_json;
