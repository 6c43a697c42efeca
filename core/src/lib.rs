//! Blocking API client for the employee REST resource.
//!
//! # Overview
//! `EmployeeClient` exposes one method per HTTP call style against
//! `{host}:{port}/rest/employees`: typed and untyped GETs, the three POST
//! flavors (body, location, full response), PUT and DELETE with and without
//! a response, HEAD and OPTIONS.
//!
//! # Design
//! - `EmployeeClient` is stateless apart from the resource URI it derives at
//!   construction.
//! - Network I/O sits behind the `Transport` trait. `UreqTransport` is the
//!   bundled implementation; tests substitute stubs.
//! - Requests and responses cross the transport boundary as plain data
//!   (`HttpRequest` / `HttpResponse`).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::EmployeeClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseEntity};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::Employee;
