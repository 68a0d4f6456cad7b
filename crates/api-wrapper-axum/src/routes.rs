//! Reference routes served by the host binary

use std::collections::BTreeMap;

use axum::Router;
use serde_json::Value;

use api_wrapper::prelude::*;

use crate::config::AppConfig;
use crate::router::wrapped;

fn normal(_: Args) -> &'static str {
    "ok"
}

fn with_args(args: Args) -> Result<String, ApiError> {
    let name: String = args.get("name")?;
    let arg1: String = args.get("arg1")?;
    Ok(format!("{} and {}", name, arg1))
}

fn typed(args: Args) -> Response {
    let all_typed = args.get::<i64>("arg_int").is_ok()
        && args.get::<String>("arg_str").is_ok()
        && args.get::<bool>("arg_bool").is_ok();

    if all_typed {
        Response::text(200, "ok")
    } else {
        Response::text(400, "wrong")
    }
}

fn listing(args: Args) -> BTreeMap<String, Value> {
    args.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Build the router with every reference route
pub fn app(config: &AppConfig) -> Router {
    let base = config.wrap_options();
    let typed_sig = || signature![arg_int: Int, arg_str: Str, arg_bool: Bool];

    Router::new()
        .route(
            "/test1/normal",
            wrapped(ApiWrapper::new("normal", Signature::new(), base.clone(), normal).into_boxed()),
        )
        .route(
            "/test2/args/{name}",
            wrapped(ApiWrapper::new("with_args", signature![name, arg1], base.clone().exposed("name"), with_args).into_boxed()),
        )
        .route(
            "/test3/type",
            wrapped(ApiWrapper::new("typed", typed_sig(), base.clone(), typed).into_boxed()),
        )
        .route(
            "/test3/type_force",
            wrapped(ApiWrapper::new("typed_force", typed_sig(), base.clone().force_match(true), typed).into_boxed()),
        )
        .route(
            "/test4/listing",
            wrapped(ApiWrapper::new("listing", signature![page: Int = 1, tag = "all"], base, listing).into_boxed()),
        )
}
