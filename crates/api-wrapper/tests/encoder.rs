use api_wrapper::prelude::*;
use api_wrapper::{dispatch, ReturnValue};
use std::io::{Cursor, Read};

/// Upper-cases stream bodies and tags them, leaving other shapes alone
struct ShoutingStreams;

impl ReturnEncoder for ShoutingStreams {
    fn stream(&self, stream: Stream) -> Result<Response, ApiError> {
        let (mut reader, content_type, filename) = stream.into_parts();
        let mut body = String::new();
        reader.read_to_string(&mut body).map_err(ApiError::invalid_return)?;

        let mut response = Response::text(200, body.to_uppercase())
            .with_header("X-Source-Type", content_type.unwrap_or_default());
        if let Some(name) = filename {
            response = response.with_header("X-Filename", name);
        }
        Ok(response)
    }
}

#[test]
fn test_downstream_encoder_overrides_stream() {
    let stream = Stream::new(Cursor::new(b"quiet".to_vec()))
        .content_type("text/plain")
        .filename("note.txt");
    assert_eq!(stream.content_type_ref(), Some("text/plain"));
    assert_eq!(stream.filename_ref(), Some("note.txt"));

    let response = dispatch(&ShoutingStreams, ReturnValue::Stream(stream)).unwrap();
    assert_eq!(response.body_text(), "QUIET");
    assert_eq!(response.header("X-Source-Type").map(String::as_str), Some("text/plain"));
    assert_eq!(response.header("X-Filename").map(String::as_str), Some("note.txt"));

    // other shapes keep the default encoding
    let response = dispatch(&ShoutingStreams, "as is").unwrap();
    assert_eq!(response.body_text(), "as is");
}

#[test]
fn test_downstream_encoder_through_wrapper() {
    let api = wraps_api(signature![], WrapOptions::default(), |_args: Args| {
        Stream::new(Cursor::new(b"streamed".to_vec()))
    })
    .with_encoder(ShoutingStreams);

    let response = api.handle(&Request::from_uri("GET", "/file")).unwrap();
    assert_eq!(response.body_text(), "STREAMED");
}
