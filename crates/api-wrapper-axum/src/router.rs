//! axum adapter - serves wrapped handlers as axum routes
//!
//! Routing stays with axum. Each route hands the matched path parameters and
//! the request's query string to a [`BoxedApi`], then converts the result
//! back into an HTTP response.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
    routing::{any, MethodRouter},
};
use uuid::Uuid;

use api_wrapper::{ApiError, Args, BoxedApi, Request};

/// Serve a wrapped handler for every HTTP method
pub fn wrapped<S>(api: BoxedApi) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    any(
        move |params: Result<Path<HashMap<String, String>>, PathRejection>,
              method: Method,
              uri: Uri,
              headers: HeaderMap| {
            let api = api.clone();
            async move {
                // Routes without captures have no path parameters to extract
                let params = params.map(|Path(p)| p).unwrap_or_default();
                let request = to_request(&method, &uri, &headers, params);
                let caller: Args = request.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

                match api(&request, caller) {
                    Ok(response) => into_http_response(&request.request_id, response),
                    Err(err) => error_response(&request, err),
                }
            }
        },
    )
}

/// Build the wrapper's request from the HTTP request parts
pub fn to_request(method: &Method, uri: &Uri, headers: &HeaderMap, params: HashMap<String, String>) -> Request {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let mut request = Request::from_uri(method.as_str(), path_and_query);
    request.headers = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    request.params = params;
    request.request_id = Uuid::new_v4().to_string();

    tracing::debug!(
        request_id = %request.request_id,
        method = %request.method,
        path = %request.path,
        "Incoming request"
    );

    request
}

/// Convert a wrapper response into an axum response.
///
/// A status outside the HTTP range becomes 500. Headers axum rejects turn the
/// whole response into an `InvalidReturnValue` error body.
pub fn into_http_response(request_id: &str, response: api_wrapper::Response) -> Response {
    let (body, status, headers) = response.into_parts();
    let status = StatusCode::from_u16(status).unwrap_or_else(|_| {
        tracing::error!(request_id = %request_id, status, "Handler returned an invalid status code");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = axum::http::Response::builder().status(status);
    for (key, value) in headers {
        builder = builder.header(&key, &value);
    }

    match builder.body(Body::from(body)) {
        Ok(response) => response,
        Err(e) => {
            let err = ApiError::invalid_return(format!("response headers: {}", e));
            tracing::error!(request_id = %request_id, "Failed to build response: {}", e);
            // JSON error bodies carry only a valid status and content type
            into_http_response(request_id, err.to_response())
        }
    }
}

/// Turn a wrapper error into a JSON error response
fn error_response(request: &Request, err: ApiError) -> Response {
    if err.is_runtime() {
        tracing::warn!(request_id = %request.request_id, "Rejected request: {}", err);
    } else {
        tracing::error!(request_id = %request.request_id, "Handler error: {}", err);
    }
    into_http_response(&request.request_id, err.to_response())
}
