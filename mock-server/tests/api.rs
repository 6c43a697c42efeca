use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Employee, ALLOW};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_employees_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/rest/employees"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let employees: Vec<Employee> = body_json(resp).await;
    assert!(employees.is_empty());
}

#[tokio::test]
async fn list_employees_zero_page_size_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/rest/employees?page=0&pageSize=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_employees_bad_page_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/rest/employees?page=first"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn head_employees_has_no_body() {
    let resp = app()
        .oneshot(empty_request("HEAD", "/rest/employees"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(body_bytes(resp).await.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_employee_returns_201_with_location() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/rest/employees",
            r#"{"id":99,"firstName":"Ann","lastName":"Lee","yearlyIncome":50000}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(http::header::LOCATION).unwrap(),
        "/rest/employees/1"
    );
    let employee: Employee = body_json(resp).await;
    assert_eq!(employee.id, 1, "server assigns ids");
    assert_eq!(employee.first_name.as_deref(), Some("Ann"));
    assert_eq!(employee.yearly_income, 50_000);
}

#[tokio::test]
async fn create_employee_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/rest/employees", r#"{"yearlyIncome":"lots"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_employee_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/rest/employees/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_employee_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/rest/employees/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn replace_employee_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/rest/employees/1", r#"{"firstName":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_employee_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/rest/employees/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- options ---

#[tokio::test]
async fn options_lists_allowed_methods() {
    let resp = app()
        .oneshot(empty_request("OPTIONS", "/rest/employees/1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(http::header::ALLOW).unwrap(), ALLOW);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two
    let mut ids = Vec::new();
    for body in [
        r#"{"firstName":"Ann","lastName":"Lee","yearlyIncome":50000}"#,
        r#"{"firstName":"Bo","lastName":"Kim","yearlyIncome":62000}"#,
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/rest/employees", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Employee = body_json(resp).await;
        ids.push(created.id);
    }
    assert_eq!(ids, vec![1, 2]);

    // paging: one per page, second page holds Bo
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/rest/employees?page=1&pageSize=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Vec<Employee> = body_json(resp).await;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].first_name.as_deref(), Some("Bo"));

    // replace: id comes from the path, not the body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            "/rest/employees/1",
            r#"{"id":7,"firstName":"Ann","lastName":"Lee","yearlyIncome":55000}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Employee = body_json(resp).await;
    assert_eq!(updated.id, 1);
    assert_eq!(updated.yearly_income, 55_000);

    // get reflects the replacement
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/rest/employees/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Employee = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/rest/employees/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/rest/employees/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete: only Bo remains
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/rest/employees"))
        .await
        .unwrap();
    let employees: Vec<Employee> = body_json(resp).await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, 2);
}
