//! Walks through every call style of `EmployeeClient` against a running
//! employee service (see `mock-server`).
//!
//! Configure with `EMPLOYEE_API_HOST`, `EMPLOYEE_API_PORT` and
//! `EMPLOYEE_API_TIMEOUT_SECS`; log level via `RUST_LOG`.

use employee_client::{ClientConfig, Employee, EmployeeClient, UreqTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::from_env()?;
    let client = EmployeeClient::from_config(UreqTransport::from_config(&config), &config);
    info!(uri = client.request_uri(), "using employee resource");

    let created = client
        .create_entity(&Employee::new("Ann", "Lee", 50_000))?
        .body
        .ok_or("server returned no employee")?;
    info!(?created, "create_entity");

    let location = client.create_location(&Employee::new("Bo", "Kim", 62_000))?;
    info!(?location, "create_location");

    let object = client.create_object(&Employee::new("Cy", "Park", 48_000))?;
    info!(?object, "create_object");

    let entity = client.fetch_entity(created.id)?;
    info!(status = entity.status, body = ?entity.body, "fetch_entity");
    info!(employee = ?client.fetch_object(created.id)?, "fetch_object");
    info!(tree = %client.fetch_as_json(created.id)?, "fetch_as_json");
    info!(page = ?client.fetch_page(0, 10)?, "fetch_page");

    let mut raised = created.clone();
    raised.yearly_income += 5_000;
    client.replace(&raised)?;
    info!(id = raised.id, "replace");

    raised.last_name = Some("Lee-Park".to_string());
    let updated = client.replace_with_response(&raised)?;
    info!(status = updated.status, body = ?updated.body, "replace_with_response");

    info!(headers = ?client.headers()?, "headers");
    info!(methods = ?client.allowed_methods(created.id)?, "allowed_methods");

    let removed = client.remove_with_response(created.id)?;
    info!(status = removed.status, "remove_with_response");
    if let Some(other) = object {
        client.remove(other.id)?;
        info!(id = other.id, "remove");
    }

    Ok(())
}
