//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// An employee record as exchanged with the `/rest/employees` resource.
///
/// `id == 0` means the server has not assigned an identifier yet. Fields
/// missing from a JSON document fall back to their defaults, so a sparse or
/// `null`-laden body still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub yearly_income: i64,
}

impl Employee {
    /// Build an unsaved employee (`id` 0).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        yearly_income: i64,
    ) -> Self {
        Self {
            id: 0,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            yearly_income,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }
}
