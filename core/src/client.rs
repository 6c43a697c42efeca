//! Blocking client for the `/rest/employees` resource.
//!
//! # Design
//! `EmployeeClient` holds a transport and the resource URI derived once at
//! construction; it carries no mutable state between calls. Every operation
//! is a single round-trip: build an `HttpRequest`, hand it to the transport,
//! reject non-2xx statuses, then decode the body into the shape the
//! operation promises. An empty body decodes to "absent" rather than an
//! error, so callers see `None` / an empty list instead of a decoding
//! failure.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ResponseEntity};
use crate::transport::Transport;
use crate::types::Employee;

pub const RESOURCE_PATH: &str = "/rest/employees";

/// `User-Agent` sent by `create_entity`.
pub const USER_AGENT: &str = "EmployeeRestClient demo class";
/// `Accept-Language` sent by `create_entity`.
pub const ACCEPT_LANGUAGE: &str = "en-US";

/// Client for the employee resource, one method per HTTP call style.
///
/// The resource URI is `{host}:{port}/rest/employees`, where `host` already
/// carries the scheme. The client is `Send + Sync` whenever its transport
/// is, and adds no locking of its own.
#[derive(Debug, Clone)]
pub struct EmployeeClient<T> {
    transport: T,
    request_uri: String,
}

impl<T: Transport> EmployeeClient<T> {
    pub fn new(transport: T, host: &str, port: u16) -> Self {
        Self {
            transport,
            request_uri: format!("{host}:{port}{RESOURCE_PATH}"),
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(transport, &config.host, config.port)
    }

    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET one employee, keeping status and headers alongside the body.
    pub fn fetch_entity(&self, id: i64) -> Result<ResponseEntity<Employee>, ApiError> {
        self.exchange::<(), Employee>(HttpMethod::Get, &self.item_uri(id), None)
    }

    /// GET one page of employees. A response without a body yields an empty
    /// list.
    pub fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Employee>, ApiError> {
        let url = format!("{}?page={page}&pageSize={page_size}", self.request_uri);
        let response = self.send(HttpMethod::Get, url, Vec::new(), None)?;
        Ok(decode_body::<Vec<Employee>>(&response.body)?.unwrap_or_default())
    }

    /// GET one employee, or `None` when the server answers with an empty body.
    pub fn fetch_object(&self, id: i64) -> Result<Option<Employee>, ApiError> {
        let response = self.send(HttpMethod::Get, self.item_uri(id), Vec::new(), None)?;
        decode_body(&response.body)
    }

    /// GET one employee as an untyped JSON tree.
    ///
    /// Fails with `ApiError::Parse` when the body is not valid JSON, including
    /// when it is empty.
    pub fn fetch_as_json(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        let response = self.send(HttpMethod::Get, self.item_uri(id), Vec::new(), None)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// POST a new employee and return the server's copy, if it sent one.
    pub fn create_object(&self, employee: &Employee) -> Result<Option<Employee>, ApiError> {
        let body = encode(employee)?;
        let response = self.send(HttpMethod::Post, self.request_uri.clone(), Vec::new(), Some(body))?;
        decode_body(&response.body)
    }

    /// POST a new employee and return the `Location` header of the response.
    pub fn create_location(&self, employee: &Employee) -> Result<Option<String>, ApiError> {
        let body = encode(employee)?;
        let response = self.send(HttpMethod::Post, self.request_uri.clone(), Vec::new(), Some(body))?;
        Ok(response.header("location").map(str::to_string))
    }

    /// POST a new employee with the demo `User-Agent` and `Accept-Language`
    /// headers, returning the full response.
    pub fn create_entity(&self, employee: &Employee) -> Result<ResponseEntity<Employee>, ApiError> {
        let headers = vec![
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string()),
        ];
        let body = encode(employee)?;
        let response = self.send(HttpMethod::Post, self.request_uri.clone(), headers, Some(body))?;
        into_entity(response)
    }

    /// PUT the employee to `{uri}/{employee.id}`, ignoring the response body.
    pub fn replace(&self, employee: &Employee) -> Result<(), ApiError> {
        let body = encode(employee)?;
        self.send(HttpMethod::Put, self.item_uri(employee.id), Vec::new(), Some(body))?;
        Ok(())
    }

    /// PUT the employee through `exchange`, returning status, headers and the
    /// updated employee.
    pub fn replace_with_response(&self, employee: &Employee) -> Result<ResponseEntity<Employee>, ApiError> {
        self.exchange(HttpMethod::Put, &self.item_uri(employee.id), Some(employee))
    }

    /// DELETE `{uri}/{id}`, ignoring the response body.
    pub fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.send(HttpMethod::Delete, self.item_uri(id), Vec::new(), None)?;
        Ok(())
    }

    /// DELETE `{uri}/{id}`, returning status and headers. The body, if any,
    /// is never read, so a plain-text confirmation is as good as none.
    pub fn remove_with_response(&self, id: i64) -> Result<ResponseEntity<()>, ApiError> {
        let response = self.send(HttpMethod::Delete, self.item_uri(id), Vec::new(), None)?;
        Ok(ResponseEntity {
            status: response.status,
            headers: response.headers,
            body: None,
        })
    }

    /// HEAD the collection URI and return the response headers.
    pub fn headers(&self) -> Result<Vec<(String, String)>, ApiError> {
        let response = self.send(HttpMethod::Head, self.request_uri.clone(), Vec::new(), None)?;
        Ok(response.headers)
    }

    /// OPTIONS `{uri}/{id}` and collect the verbs listed in `Allow`.
    ///
    /// Verbs this client does not model are skipped; a missing `Allow`
    /// header gives an empty set.
    pub fn allowed_methods(&self, id: i64) -> Result<BTreeSet<HttpMethod>, ApiError> {
        let response = self.send(HttpMethod::Options, self.item_uri(id), Vec::new(), None)?;
        let mut methods = BTreeSet::new();
        let allow = response
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("allow"))
            .flat_map(|(_, value)| value.split(','));
        for token in allow {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match HttpMethod::from_name(token) {
                Some(method) => {
                    methods.insert(method);
                }
                None => warn!(method = token, "ignoring unsupported method in Allow header"),
            }
        }
        Ok(methods)
    }

    /// Issue an arbitrary request with an optional JSON body and decode the
    /// response body as `R`.
    ///
    /// GET, HEAD, OPTIONS and DELETE carry no body; passing one for those
    /// verbs fails with `ApiError::Transport` before anything is sent.
    pub fn exchange<B, R>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&B>,
    ) -> Result<ResponseEntity<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(encode).transpose()?;
        let response = self.send(method, url.to_string(), Vec::new(), body)?;
        into_entity(response)
    }

    fn item_uri(&self, id: i64) -> String {
        format!("{}/{id}", self.request_uri)
    }

    fn send(
        &self,
        method: HttpMethod,
        path: String,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        debug!(%method, url = %path, "sending request");
        let response = self.transport.execute(HttpRequest {
            method,
            path,
            headers,
            body,
        })?;
        debug!(%method, status = response.status, "received response");
        check_status(response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body,
    })
}

fn encode<B: Serialize + ?Sized>(value: &B) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Decode a JSON body; an empty body or a literal `null` is `None`.
fn decode_body<R: DeserializeOwned>(body: &str) -> Result<Option<R>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn into_entity<R: DeserializeOwned>(response: HttpResponse) -> Result<ResponseEntity<R>, ApiError> {
    let body = decode_body(&response.body)?;
    Ok(ResponseEntity {
        status: response.status,
        headers: response.headers,
        body,
    })
}
