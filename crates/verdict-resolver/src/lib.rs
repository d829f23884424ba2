//! Turns errors raised by request handlers into JSON error responses
//!
//! [`ErrorResolver`] is the façade: one entry point per error condition,
//! each fixing the HTTP status and whether stack frames may be disclosed.
//! Handlers return [`Fault`], which the server's fault middleware hands to
//! the resolver together with the failing request's identity.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod fault;
mod log;
mod message;
mod resolver;
mod response;

pub use fault::{Condition, Fault, PendingFault};
pub use log::log_request_error;
pub use message::{DIRECTIVE_SIGIL, acquire_message, acquire_service_message};
pub use resolver::ErrorResolver;
pub use response::{ErrorReply, ErrorResponse};
