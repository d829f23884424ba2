//! Error vocabulary shared by every Verdict crate
//!
//! Holds the error codes and levels, the `ServiceError` taxonomy raised by
//! request handlers, and the seams (`MessageLookup`, `RequestContext`) the
//! resolver consumes.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod code;
mod context;
mod error;
mod lookup;
mod trace;

pub use code::{ErrorCode, ErrorLevel, InvalidErrorCode};
pub use context::RequestContext;
pub use error::{ConstructionError, ErrorKind, ServiceError, ServiceErrorBuilder};
pub use lookup::MessageLookup;
pub use trace::{StackFrame, backtrace_frames};
