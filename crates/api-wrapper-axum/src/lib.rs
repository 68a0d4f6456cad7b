//! axum integration for api-wrapper
//!
//! - [`router::wrapped`] serves a wrapped handler as an axum route
//! - [`routes::app`] builds the reference application
//! - [`config::AppConfig`] holds the host's environment-driven settings

pub mod config;
pub mod router;
pub mod routes;

pub use config::AppConfig;
pub use router::wrapped;
pub use routes::app;
