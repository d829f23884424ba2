use std::ffi::OsStr;
use std::path::PathBuf;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::json;
use verdict_core::{ErrorCode, ErrorLevel, ServiceError};
use verdict_resolver::Fault;

/// Accounts with a fixed balance of 10
pub fn router() -> Router {
    Router::new()
        .route("/accounts/{id}/withdraw/{amount}", post(withdraw))
        .route("/admin", get(admin))
        .route("/invoices/{name}", get(invoice))
        .route("/orders/{id}", get(order))
        .route("/crash", get(crash))
}

async fn withdraw(Path((id, amount)): Path<(u32, u64)>) -> Result<String, Fault> {
    const BALANCE: u64 = 10;

    if amount > BALANCE {
        let error = ServiceError::business_logic()
            .message("Insufficient balance")
            .level(ErrorLevel::WARNING)
            .data(json!({"balance": BALANCE}))
            .build()
            .map_err(Fault::unexpected)?;
        return Err(error.into());
    }

    Ok(format!("account {id}: withdrew {amount}"))
}

async fn admin() -> Result<&'static str, Fault> {
    let error = ServiceError::with_status(StatusCode::FORBIDDEN)
        .error_code(ErrorCode::ACCESS_DENIED)
        .build()
        .map_err(Fault::unexpected)?;
    Err(error.into())
}

async fn invoice(Path(name): Path<String>) -> Result<String, Fault> {
    let path = invoice_path(&name)?;
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Invoice file for `name`, which must be a single plain file name
fn invoice_path(name: &str) -> Result<PathBuf, Fault> {
    if std::path::Path::new(name).file_name() != Some(OsStr::new(name)) {
        return Err(Fault::access_denied(anyhow::anyhow!("invoice name `{name}` is not a plain file name")));
    }

    Ok(std::env::temp_dir().join("verdict-invoices").join(name))
}

async fn order(Path(id): Path<u32>) -> Result<&'static str, Fault> {
    Err(Fault::entity_not_found(anyhow::anyhow!("order {id}")))
}

async fn crash() -> &'static str {
    panic!("demo crash")
}
