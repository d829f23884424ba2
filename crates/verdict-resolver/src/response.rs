use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use verdict_core::{ErrorCode, ErrorLevel, ServiceError, StackFrame};

/// JSON body of an error response
///
/// Built once per failed request and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Client should show the message as an alert rather than a crash
    informative: bool,
    error_code: Option<ErrorCode>,
    level: Option<ErrorLevel>,
    message: String,
    stacktrace: Option<Vec<StackFrame>>,
    data: Option<Value>,
}

impl ErrorResponse {
    /// Payload for a service error whose message is already resolved
    ///
    /// Stack frames are included only when `include_stacktrace` is set and
    /// the error kind allows disclosure.
    pub fn from_service_error(error: &ServiceError, message: String, include_stacktrace: bool) -> Self {
        let stacktrace = (include_stacktrace && error.kind().allows_stacktrace()).then(|| error.stack_frames());

        Self {
            informative: error.is_informative(),
            error_code: error.error_code(),
            level: error.level(),
            message,
            stacktrace,
            data: error.data().cloned(),
        }
    }

    /// Payload for a failure outside the service error taxonomy
    pub const fn from_code(code: ErrorCode, message: String, stacktrace: Option<Vec<StackFrame>>) -> Self {
        Self {
            informative: false,
            error_code: Some(code),
            level: None,
            message,
            stacktrace,
            data: None,
        }
    }

    pub const fn informative(&self) -> bool {
        self.informative
    }

    pub const fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    pub const fn level(&self) -> Option<ErrorLevel> {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stacktrace(&self) -> Option<&[StackFrame]> {
        self.stacktrace.as_deref()
    }

    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// An [`ErrorResponse`] paired with its HTTP status
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReply {
    status: StatusCode,
    body: ErrorResponse,
}

impl ErrorReply {
    pub const fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn body(&self) -> &ErrorResponse {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, ErrorResponse) {
        (self.status, self.body)
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
