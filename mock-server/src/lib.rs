use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const RESOURCE_PATH: &str = "/rest/employees";

/// Methods advertised by `OPTIONS /rest/employees/{id}`.
pub const ALLOW: &str = "GET,HEAD,PUT,DELETE,OPTIONS";

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub yearly_income: i64,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: usize,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Employees keyed by id; ids are handed out sequentially from 1.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    employees: BTreeMap<i64, Employee>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route(RESOURCE_PATH, get(list_employees).post(create_employee))
        .route(
            "/rest/employees/{id}",
            get(get_employee)
                .put(replace_employee)
                .delete(delete_employee)
                .options(allowed_methods),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_employees(
    State(db): State<Db>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<Employee>>, StatusCode> {
    if params.page_size == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let store = db.read().await;
    let page = store
        .employees
        .values()
        .skip(params.page.saturating_mul(params.page_size))
        .take(params.page_size)
        .cloned()
        .collect();
    Ok(Json(page))
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<Employee>,
) -> impl IntoResponse {
    let mut store = db.write().await;
    store.last_id += 1;
    let employee = Employee {
        id: store.last_id,
        ..input
    };
    store.employees.insert(employee.id, employee.clone());
    info!(id = employee.id, "created employee");

    let location = format!("{RESOURCE_PATH}/{}", employee.id);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(employee))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, StatusCode> {
    let store = db.read().await;
    store.employees.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Employee>,
) -> Result<Json<Employee>, StatusCode> {
    let mut store = db.write().await;
    let employee = store.employees.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *employee = Employee { id, ..input };
    debug!(id, "replaced employee");
    Ok(Json(employee.clone()))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.employees.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id = removed.id, "deleted employee");
    Ok(StatusCode::NO_CONTENT)
}

async fn allowed_methods(Path(_id): Path<i64>) -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOW)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_serializes_with_camel_case_names() {
        let employee = Employee {
            id: 1,
            first_name: Some("Ann".to_string()),
            last_name: None,
            yearly_income: 50_000,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Ann");
        assert!(json["lastName"].is_null());
        assert_eq!(json["yearlyIncome"], 50_000);
    }

    #[test]
    fn employee_accepts_sparse_body() {
        let input: Employee = serde_json::from_str(r#"{"lastName":"Lee"}"#).unwrap();
        assert_eq!(input.id, 0);
        assert!(input.first_name.is_none());
        assert_eq!(input.last_name.as_deref(), Some("Lee"));
        assert_eq!(input.yearly_income, 0);
    }

    #[test]
    fn page_params_default() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 0);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_params_use_camel_case_size() {
        let params: PageParams = serde_json::from_str(r#"{"page":3,"pageSize":5}"#).unwrap();
        assert_eq!(params.page, 3);
        assert_eq!(params.page_size, 5);
    }
}
