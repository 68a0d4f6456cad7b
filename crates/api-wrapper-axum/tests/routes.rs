use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_wrapper::{ApiWrapper, Args, Signature, WrapOptions};
use api_wrapper_axum::{app, wrapped, AppConfig};

const ALL_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_normal_use() {
    let router = app(&AppConfig::default());
    for method in ALL_METHODS {
        let (status, _, body) = send(&router, method, "/test1/normal").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}

#[tokio::test]
async fn test_with_args() {
    let router = app(&AppConfig::default());
    for method in ALL_METHODS {
        let (status, _, body) = send(&router, method, "/test2/args/42?arg1=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"42 and 7");

        let (status, _, body) = send(&router, method, "/test2/args/42?arg1=7&arg2=hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"42 and 7");

        let (status, _, _) = send(&router, method, "/test2/args/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_missing_query_argument() {
    let router = app(&AppConfig::default());
    let (status, content_type, body) = send(&router, "GET", "/test2/args/42").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Parameter not found: arg1");
}

#[tokio::test]
async fn test_type() {
    let router = app(&AppConfig::default());

    let (status, _, body) = send(&router, "GET", "/test3/type?arg_int=1&arg_str=helloworld&arg_bool=True").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    // Lenient mode keeps the raw string, so the handler sees an untyped value
    let (status, _, body) = send(&router, "GET", "/test3/type?arg_int=good&arg_str=helloworld&arg_bool=True").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"wrong");

    let (status, _, body) = send(&router, "GET", "/test3/type_force?arg_int=1&arg_str=helloworld&arg_bool=True").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, _, body) =
        send(&router, "GET", "/test3/type_force?arg_int=good&arg_str=helloworld&arg_bool=True").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Parameter type mismatch: arg_int"));
}

#[tokio::test]
async fn test_config_force_match_applies_to_all_routes() {
    let config = AppConfig {
        force_match: true,
        ..AppConfig::default()
    };
    let router = app(&config);

    let (status, _, _) = send(&router, "GET", "/test3/type?arg_int=good&arg_str=helloworld&arg_bool=True").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mapping_round_trip() {
    let router = app(&AppConfig::default());

    let (status, content_type, body) = send(&router, "GET", "/test4/listing?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"page": 3, "tag": "all"}));
}

fn raw_route(response: api_wrapper::Response) -> Router {
    let api = ApiWrapper::new("raw", Signature::new(), WrapOptions::new(), move |_: Args| response.clone());
    Router::new().route("/raw", wrapped(api.into_boxed()))
}

#[tokio::test]
async fn test_out_of_range_status_is_server_error() {
    for status in [42, 1000] {
        let router = raw_route(api_wrapper::Response::text(status, "x"));
        let (status, _, _) = send(&router, "GET", "/raw").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    let router = raw_route(api_wrapper::Response::text(201, "made"));
    let (status, _, body) = send(&router, "GET", "/raw").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, b"made");
}

#[tokio::test]
async fn test_unencodable_header_is_json_error() {
    let router = raw_route(api_wrapper::Response::text(200, "x").with_header("X-Bad", "a\nb"));
    let (status, content_type, body) = send(&router, "GET", "/raw").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid return value"));
}
