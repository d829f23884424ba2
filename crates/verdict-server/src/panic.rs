use std::any::Any;

use axum::response::{IntoResponse, Response};
use verdict_resolver::Fault;

/// Turn a handler panic into an unexpected fault
///
/// Used with `CatchPanicLayer::custom`; the fault middleware resolves the
/// parked fault like any other.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Fault::unexpected(anyhow::Error::msg(format!("handler panicked: {detail}"))).into_response()
}
