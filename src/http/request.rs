use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Any token is accepted on the wire; methods the server has no special
/// meaning for are kept as [`Method::Other`] so handlers can answer 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other method token, verbatim.
    Other(String),
}

/// A parsed HTTP request.
///
/// Header names are always lowercase; on duplicates the last value wins.
/// The path is kept exactly as sent, without percent-decoding.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Raw request target (e.g., "/echo/abc")
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// # Example
    ///
    /// ```
    /// # use tinyhttp::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header. The name is lowercased like the parser does.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().trim().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.unwrap_or(Method::GET),
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Returns the Content-Length header as a usize, or 0 when missing or invalid.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// True when the client asked for the connection to be closed after
    /// this response. HTTP/1.1 connections are otherwise kept alive.
    pub fn wants_close(&self) -> bool {
        self.header("connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}
