//! Host routes that fail in every way the resolver distinguishes

use std::io;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::json;
use verdict_core::{ErrorCode, ErrorLevel, ServiceError};
use verdict_resolver::Fault;

type Reply = Result<&'static str, Fault>;

async fn withdraw() -> Reply {
    let error = ServiceError::business_logic()
        .message("Insufficient balance")
        .level(ErrorLevel::WARNING)
        .data(json!({"balance": 10}))
        .build()
        .map_err(Fault::unexpected)?;
    Err(error.into())
}

async fn admin() -> Reply {
    let error = ServiceError::with_status(StatusCode::FORBIDDEN)
        .error_code(ErrorCode::ACCESS_DENIED)
        .build()
        .map_err(Fault::unexpected)?;
    Err(error.into())
}

async fn ledger() -> Reply {
    Err(ServiceError::from(ErrorCode::SERVICE_NOT_FOUND).into())
}

async fn quiet() -> Reply {
    let error = ServiceError::without_stacktrace()
        .message("$order.closed")
        .build()
        .map_err(Fault::unexpected)?;
    Err(error.into())
}

async fn file(Path(name): Path<String>) -> Reply {
    Err(io::Error::new(io::ErrorKind::NotFound, name).into())
}

async fn order(Path(id): Path<u32>) -> Reply {
    Err(Fault::entity_not_found(anyhow::anyhow!("order {id}")))
}

async fn locked() -> Reply {
    Err(Fault::access_denied(anyhow::anyhow!("session expired")))
}

async fn chained() -> Reply {
    let error = anyhow::Error::new(io::Error::other("disk full")).context("writing audit log");
    Err(error.into())
}

async fn explode() -> &'static str {
    panic!("ledger corrupted")
}

async fn fine() -> &'static str {
    "fine"
}

/// Router with one route per failure shape
pub fn app() -> Router {
    Router::new()
        .route("/withdraw", post(withdraw).get(withdraw))
        .route("/admin", get(admin))
        .route("/ledger", get(ledger))
        .route("/quiet", get(quiet))
        .route("/files/{name}", get(file))
        .route("/orders/{id}", get(order))
        .route("/locked", get(locked))
        .route("/chained", get(chained))
        .route("/explode", get(explode))
        .route("/fine", get(fine))
}
