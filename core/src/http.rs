//! HTTP types exchanged between `EmployeeClient` and a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! a transport executes it and hands back an `HttpResponse`, and the client
//! turns that into a typed value. Keeping these types free of any HTTP
//! library makes the client testable with a stub transport.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded and
//! replayed without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Case-insensitive lookup of a verb name. Returns `None` for verbs this
    /// client never issues (`PATCH`, `TRACE`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ]
        .into_iter()
        .find(|method| method.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL. A present `body` is always JSON; the transport
/// is responsible for the matching content type, so `headers` only holds
/// what the caller asked for explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Transports return every status this way, including 4xx/5xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A decoded response: status, headers and an optional typed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntity<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<T>,
}

impl<T> ResponseEntity<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
