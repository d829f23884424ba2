use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use verdict_core::RequestContext;
use verdict_resolver::{ErrorResolver, PendingFault};

/// Middleware that resolves faults returned by inner handlers
///
/// Captures the request identity before the handler runs. When the response
/// comes back carrying a [`PendingFault`], it is replaced with the
/// resolver's JSON error response.
pub async fn fault_middleware(resolver: Arc<ErrorResolver>, request: Request, next: Next) -> Response {
    let context = RequestContext::from_request(&request);

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<PendingFault>() {
        Some(pending) => resolver.resolve(&context, pending.fault()).into_response(),
        None => response,
    }
}
