use std::error::Error as StdError;

use verdict_core::RequestContext;

/// Record a failed request
///
/// Emits a `debug` event naming the request and one `error` event carrying
/// the error and the display text of every error in its source chain.
pub fn log_request_error(context: &RequestContext, error: &(dyn StdError + 'static)) {
    tracing::debug!(
        method = %context.method(),
        path = context.path(),
        "unexpected error processing request"
    );

    let cause_chain: Vec<String> = std::iter::successors(error.source(), |&cause| cause.source())
        .map(ToString::to_string)
        .collect();

    tracing::error!(
        method = %context.method(),
        path = context.path(),
        error = %error,
        cause_chain = ?cause_chain,
        "request error: {error}"
    );
}
