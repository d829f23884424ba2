use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use verdict_core::{ServiceError, StackFrame, backtrace_frames};

/// A failure outside the service error taxonomy, with where it was raised
#[derive(Debug)]
pub struct Condition {
    error: anyhow::Error,
    raise_site: &'static Location<'static>,
}

impl Condition {
    /// Wrap `error`; the caller's location becomes the raise site
    #[track_caller]
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            raise_site: Location::caller(),
        }
    }

    pub const fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub const fn raise_site(&self) -> &'static Location<'static> {
        self.raise_site
    }

    /// Raise site named `site`, followed by the error's captured backtrace
    pub fn stack_frames(&self, site: &str) -> Vec<StackFrame> {
        let mut frames = vec![StackFrame::at(site, self.raise_site)];
        frames.extend(backtrace_frames(self.error.backtrace()));
        frames
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl StdError for Condition {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error.source()
    }
}

/// Error type for request handlers
///
/// Each variant selects one [`ErrorResolver`](crate::ErrorResolver) entry
/// point. `?` classifies foreign errors: an `anyhow::Error` wrapping a
/// [`ServiceError`] stays a service error, I/O errors become `FileNotFound`
/// or `Io`, and anything else is `Unexpected`. Constructors and conversions
/// record their caller as the raise site.
#[derive(Debug, Error)]
pub enum Fault {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("entity not found")]
    EntityNotFound(#[source] Condition),
    /// Optimistic lock failure
    #[error("stale object")]
    StaleObject(#[source] Condition),
    #[error("object locked")]
    ObjectLocked(#[source] Condition),
    #[error("access denied")]
    AccessDenied(#[source] Condition),
    #[error("file not found")]
    FileNotFound(#[source] Condition),
    #[error("i/o failure")]
    Io(#[source] Condition),
    /// Assertion or validation failure
    #[error("validation failed")]
    Validation(#[source] Condition),
    #[error(transparent)]
    Unexpected(Condition),
}

impl Fault {
    #[track_caller]
    pub fn entity_not_found(error: impl Into<anyhow::Error>) -> Self {
        Self::EntityNotFound(Condition::new(error))
    }

    #[track_caller]
    pub fn stale_object(error: impl Into<anyhow::Error>) -> Self {
        Self::StaleObject(Condition::new(error))
    }

    #[track_caller]
    pub fn object_locked(error: impl Into<anyhow::Error>) -> Self {
        Self::ObjectLocked(Condition::new(error))
    }

    #[track_caller]
    pub fn access_denied(error: impl Into<anyhow::Error>) -> Self {
        Self::AccessDenied(Condition::new(error))
    }

    #[track_caller]
    pub fn validation(error: impl Into<anyhow::Error>) -> Self {
        Self::Validation(Condition::new(error))
    }

    #[track_caller]
    pub fn unexpected(error: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(Condition::new(error))
    }
}

impl From<io::Error> for Fault {
    #[track_caller]
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound(Condition::new(error))
        } else {
            Self::Io(Condition::new(error))
        }
    }
}

impl From<anyhow::Error> for Fault {
    #[track_caller]
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ServiceError>() {
            Ok(service) => return Self::Service(service),
            Err(error) => error,
        };

        match error.downcast_ref::<io::Error>().map(io::Error::kind) {
            Some(io::ErrorKind::NotFound) => Self::FileNotFound(Condition::new(error)),
            Some(_) => Self::Io(Condition::new(error)),
            None => Self::Unexpected(Condition::new(error)),
        }
    }
}

/// A [`Fault`] parked in response extensions until the fault middleware
/// resolves it
#[derive(Debug, Clone)]
pub struct PendingFault(Arc<Fault>);

impl PendingFault {
    pub fn fault(&self) -> &Fault {
        &self.0
    }
}

impl IntoResponse for Fault {
    /// Bare 500 carrying the fault as an extension
    ///
    /// The request identity is not known here, so resolution happens in the
    /// fault middleware. Without it the client gets an empty 500.
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(PendingFault(Arc::new(self)));
        response
    }
}
