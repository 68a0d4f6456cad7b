//! Return-value dispatch
//!
//! A handler's output is mapped onto one of four shapes by [`IntoReturnValue`],
//! then encoded into a [`Response`] by a [`ReturnEncoder`]:
//!
//! | Shape | Produced by | Encoding |
//! |-------|-------------|----------|
//! | `Text` | `String`, `&str`, `Cow<str>`, JSON strings | `text/plain`, 200 |
//! | `Json` | maps, `Vec<T>`, JSON objects/arrays, [`Json<T>`] | `application/json`, 200 |
//! | `Stream` | [`Stream`], `std::fs::File` | reader bytes, 200 |
//! | `Raw` | [`Response`] | passed through |
//!
//! Anything else (`()`, JSON scalars, values that fail to serialize) is an
//! `InvalidReturnValue` error.

use crate::error::ApiError;
use crate::response::{Response, OCTET_STREAM};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// The response-producing shape of a handler's output
#[derive(Debug)]
pub enum ReturnValue {
    Text(String),
    Json(Value),
    Stream(Stream),
    Raw(Response),
}

/// A readable body, e.g. an open file
pub struct Stream {
    reader: Box<dyn Read + Send>,
    content_type: Option<String>,
    filename: Option<String>,
}

impl Stream {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            content_type: None,
            filename: None,
        }
    }

    /// Open a file, guessing its content type from the extension
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let filename = path.file_name().map(|n| n.to_string_lossy().into_owned());

        Ok(Self {
            reader: Box::new(file),
            content_type: Some(guess_content_type(&path.to_string_lossy()).to_string()),
            filename,
        })
    }

    /// Set the content type (builder pattern).
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the filename announced in `Content-Disposition` (builder pattern).
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn content_type_ref(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn filename_ref(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Split into `(reader, content_type, filename)` for custom encoders
    pub fn into_parts(self) -> (Box<dyn Read + Send>, Option<String>, Option<String>) {
        (self.reader, self.content_type, self.filename)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

/// Guess content type from file extension
pub fn guess_content_type(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => OCTET_STREAM,
    }
}

/// Inline `Content-Disposition` value. Quotes, backslashes and control
/// characters are dropped from the filename.
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
        .collect();
    format!("inline; filename=\"{}\"", safe)
}

/// Serialize any value as a JSON document
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

/// Types a wrapped handler may return
pub trait IntoReturnValue {
    fn into_return_value(self) -> Result<ReturnValue, ApiError>;
}

impl IntoReturnValue for ReturnValue {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(self)
    }
}

impl IntoReturnValue for String {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Text(self))
    }
}

impl IntoReturnValue for &str {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Text(self.to_string()))
    }
}

impl IntoReturnValue for Cow<'_, str> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Text(self.into_owned()))
    }
}

impl IntoReturnValue for Value {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        match self {
            Value::String(s) => Ok(ReturnValue::Text(s)),
            v @ (Value::Object(_) | Value::Array(_)) => Ok(ReturnValue::Json(v)),
            other => Err(ApiError::InvalidReturnValue(format!("unsupported value {}", other))),
        }
    }
}

impl IntoReturnValue for Map<String, Value> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Json(Value::Object(self)))
    }
}

impl<K: Serialize, V: Serialize, S> IntoReturnValue for HashMap<K, V, S> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Json(self).into_return_value()
    }
}

impl<K: Serialize, V: Serialize> IntoReturnValue for BTreeMap<K, V> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Json(self).into_return_value()
    }
}

impl<T: Serialize> IntoReturnValue for Vec<T> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Json(self).into_return_value()
    }
}

impl<T: Serialize> IntoReturnValue for Json<T> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        serde_json::to_value(self.0)
            .map(ReturnValue::Json)
            .map_err(ApiError::invalid_return)
    }
}

impl IntoReturnValue for Stream {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Stream(self))
    }
}

impl IntoReturnValue for File {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Stream(Stream::new(self)))
    }
}

impl IntoReturnValue for Response {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Ok(ReturnValue::Raw(self))
    }
}

impl IntoReturnValue for () {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        Err(ApiError::InvalidReturnValue("handler returned no value".into()))
    }
}

impl<T: IntoReturnValue, E: Into<ApiError>> IntoReturnValue for Result<T, E> {
    fn into_return_value(self) -> Result<ReturnValue, ApiError> {
        self.map_err(Into::into)?.into_return_value()
    }
}

/// Encoding policy per return shape. Override single methods to customize
/// one shape and keep the defaults for the others.
pub trait ReturnEncoder: Send + Sync {
    fn text(&self, value: String) -> Result<Response, ApiError> {
        Ok(Response::text(200, value))
    }

    fn json(&self, value: Value) -> Result<Response, ApiError> {
        Response::try_json(200, &value).map_err(ApiError::invalid_return)
    }

    fn stream(&self, stream: Stream) -> Result<Response, ApiError> {
        let (mut reader, content_type, filename) = stream.into_parts();
        let mut data = Vec::new();
        reader.read_to_end(&mut data).map_err(ApiError::invalid_return)?;

        let content_type = content_type.unwrap_or_else(|| OCTET_STREAM.to_string());
        let response = Response::binary(200, data, content_type);
        Ok(match filename {
            Some(name) => response.with_header("Content-Disposition", content_disposition(&name)),
            None => response,
        })
    }

    fn raw(&self, response: Response) -> Result<Response, ApiError> {
        Ok(response)
    }
}

/// The stock encoding policy
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEncoder;

impl ReturnEncoder for DefaultEncoder {}

/// Encode a handler's output.
///
/// An `Err` returned by the handler itself propagates unchanged; every
/// failure inside the encoder surfaces as `InvalidReturnValue`.
pub fn dispatch<R: IntoReturnValue>(encoder: &dyn ReturnEncoder, value: R) -> Result<Response, ApiError> {
    let encoded = match value.into_return_value()? {
        ReturnValue::Text(s) => encoder.text(s),
        ReturnValue::Json(v) => encoder.json(v),
        ReturnValue::Stream(s) => encoder.stream(s),
        ReturnValue::Raw(r) => encoder.raw(r),
    };

    encoded.map_err(|e| match e {
        ApiError::InvalidReturnValue(_) => e,
        other => ApiError::InvalidReturnValue(other.to_string()),
    })
}
