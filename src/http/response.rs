use std::collections::HashMap;

/// HTTP status codes the server produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// An HTTP response produced by a handler.
///
/// Handlers fill in the headers they care about; compression and the
/// writer add `Content-Encoding`, `Content-Length` and `Connection` later.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use tinyhttp::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// assert_eq!(response.header("content-type"), Some("text/plain"));
/// ```
#[derive(Debug)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// `Content-Length` is left alone here: the body may still be compressed,
    /// so the writer fills it in.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }

    /// 200 OK with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    pub fn created() -> Self {
        Self::new(StatusCode::Created)
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::MethodNotAllowed)
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::InternalServerError)
    }

    /// Looks up a header case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, key: &str) -> bool {
        self.header(key).is_some()
    }

    /// Sets a header, replacing any existing one with the same name in
    /// whatever case it was written.
    pub fn set_header(&mut self, key: &str, value: impl Into<String>) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(key));
        self.headers.insert(key.to_string(), value.into());
    }
}
