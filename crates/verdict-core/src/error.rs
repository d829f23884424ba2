use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::{ErrorCode, ErrorLevel, StackFrame, backtrace_frames};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// How a [`ServiceError`] is rendered
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Server-side failure: HTTP 500, stacktrace per the global policy
    Generic,
    /// As `Generic`, but the stacktrace is never disclosed
    WithoutStacktrace,
    /// Expected, user-facing condition the client shows as an alert
    BusinessLogic {
        level: ErrorLevel,
        /// Extra payload for the client
        data: Option<Value>,
    },
    /// Failure carrying the HTTP status chosen by the raiser; no stacktrace
    StatusOverride { status: StatusCode },
}

impl ErrorKind {
    /// Short `snake_case` name, used in logs and raise-site frames
    pub fn label(&self) -> &'static str {
        self.into()
    }

    pub const fn is_informative(&self) -> bool {
        matches!(self, Self::BusinessLogic { .. })
    }

    /// Whether this kind may disclose a stacktrace at all
    pub const fn allows_stacktrace(&self) -> bool {
        matches!(self, Self::Generic | Self::BusinessLogic { .. })
    }
}

/// A [`ServiceError`] could not be built
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("a service error needs a message or an error code")]
    MissingMessageAndCode,
    #[error("level and data are only carried by business logic errors, not `{kind}` errors")]
    BusinessDetailsOnly { kind: &'static str },
}

/// An error raised by service code, carrying what is needed to render it
///
/// Built through [`ServiceErrorBuilder`], which guarantees that a message or
/// an error code is present.
///
/// ```
/// use verdict_core::{ErrorCode, ErrorLevel, ServiceError};
///
/// let error = ServiceError::business_logic()
///     .message("Insufficient balance")
///     .level(ErrorLevel::WARNING)
///     .build()
///     .unwrap();
/// assert!(error.is_informative());
///
/// assert!(ServiceError::generic().build().is_err());
/// ```
#[derive(Debug)]
pub struct ServiceError {
    kind: ErrorKind,
    message: Option<String>,
    error_code: Option<ErrorCode>,
    cause: Option<BoxError>,
    cause_message: Option<String>,
    raise_site: StackFrame,
    backtrace: Backtrace,
}

impl ServiceError {
    pub fn generic() -> ServiceErrorBuilder {
        ServiceErrorBuilder::new(Shape::Generic)
    }

    pub fn without_stacktrace() -> ServiceErrorBuilder {
        ServiceErrorBuilder::new(Shape::WithoutStacktrace)
    }

    pub fn business_logic() -> ServiceErrorBuilder {
        ServiceErrorBuilder::new(Shape::BusinessLogic)
    }

    pub fn with_status(status: StatusCode) -> ServiceErrorBuilder {
        ServiceErrorBuilder::new(Shape::StatusOverride(status))
    }

    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Literal text or `$`-prefixed lookup directive; never empty
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub const fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    /// Display text of the cause, captured at construction
    pub fn cause_message(&self) -> Option<&str> {
        self.cause_message.as_deref()
    }

    pub const fn level(&self) -> Option<ErrorLevel> {
        match self.kind {
            ErrorKind::BusinessLogic { level, .. } => Some(level),
            _ => None,
        }
    }

    pub const fn data(&self) -> Option<&Value> {
        match &self.kind {
            ErrorKind::BusinessLogic { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Status chosen by the raiser of a `StatusOverride` error
    pub const fn status_override(&self) -> Option<StatusCode> {
        match self.kind {
            ErrorKind::StatusOverride { status } => Some(status),
            _ => None,
        }
    }

    pub const fn is_informative(&self) -> bool {
        self.kind.is_informative()
    }

    /// Where `build` was called
    pub const fn raise_site(&self) -> &StackFrame {
        &self.raise_site
    }

    /// Raise site followed by the frames of the captured backtrace
    pub fn stack_frames(&self) -> Vec<StackFrame> {
        let mut frames = vec![self.raise_site.clone()];
        frames.extend(backtrace_frames(&self.backtrace));
        frames
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.error_code) {
            (Some(message), _) => f.write_str(message),
            (None, Some(code)) => write!(f, "{} error: {code}", self.kind.label()),
            (None, None) => write!(f, "{} error", self.kind.label()),
        }
    }
}

impl StdError for ServiceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

impl From<ErrorCode> for ServiceError {
    #[track_caller]
    fn from(code: ErrorCode) -> Self {
        let kind = ErrorKind::Generic;
        Self {
            raise_site: StackFrame::at(kind.label(), Location::caller()),
            kind,
            message: None,
            error_code: Some(code),
            cause: None,
            cause_message: None,
            backtrace: Backtrace::capture(),
        }
    }
}

#[derive(Debug, Clone, Copy, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum Shape {
    Generic,
    WithoutStacktrace,
    BusinessLogic,
    StatusOverride(StatusCode),
}

impl Shape {
    fn label(self) -> &'static str {
        self.into()
    }
}

/// Collects the parts of a [`ServiceError`]; `build` validates them
#[derive(Debug)]
#[must_use]
pub struct ServiceErrorBuilder {
    shape: Shape,
    message: Option<String>,
    error_code: Option<ErrorCode>,
    level: Option<ErrorLevel>,
    data: Option<Value>,
    cause: Option<BoxError>,
}

impl ServiceErrorBuilder {
    const fn new(shape: Shape) -> Self {
        Self {
            shape,
            message: None,
            error_code: None,
            level: None,
            data: None,
            cause: None,
        }
    }

    /// Literal text, or a lookup key prefixed with `$`
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub const fn error_code(mut self, code: ErrorCode) -> Self {
        self.error_code = Some(code);
        self
    }

    /// Business logic errors only; defaults to [`ErrorLevel::ERROR`]
    pub const fn level(mut self, level: ErrorLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Business logic errors only
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Validate and assemble the error
    ///
    /// The caller's location becomes the raise site frame.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::MissingMessageAndCode`] when neither a
    /// non-empty message nor an error code was given, and
    /// [`ConstructionError::BusinessDetailsOnly`] when a level or data was
    /// given to a non business logic error
    #[track_caller]
    pub fn build(self) -> Result<ServiceError, ConstructionError> {
        let message = self.message.filter(|message| !message.is_empty());
        if message.is_none() && self.error_code.is_none() {
            return Err(ConstructionError::MissingMessageAndCode);
        }

        let kind = match self.shape {
            Shape::BusinessLogic => ErrorKind::BusinessLogic {
                level: self.level.unwrap_or_default(),
                data: self.data,
            },
            shape if self.level.is_some() || self.data.is_some() => {
                return Err(ConstructionError::BusinessDetailsOnly { kind: shape.label() });
            }
            Shape::Generic => ErrorKind::Generic,
            Shape::WithoutStacktrace => ErrorKind::WithoutStacktrace,
            Shape::StatusOverride(status) => ErrorKind::StatusOverride { status },
        };

        let cause_message = self.cause.as_ref().map(ToString::to_string);

        Ok(ServiceError {
            raise_site: StackFrame::at(kind.label(), Location::caller()),
            kind,
            message,
            error_code: self.error_code,
            cause: self.cause,
            cause_message,
            backtrace: Backtrace::capture(),
        })
    }
}
