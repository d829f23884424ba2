use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use verdict_config::ErrorsConfig;
use verdict_core::{ErrorCode, ErrorKind, MessageLookup, RequestContext, ServiceError};

use crate::{
    fault::{Condition, Fault},
    log::log_request_error,
    message::{acquire_message, acquire_service_message},
    response::{ErrorReply, ErrorResponse},
};

/// Turns failed requests into error responses
///
/// One instance is built at startup and shared by every request. Each entry
/// point logs the failure once and never fails itself.
#[derive(Clone)]
pub struct ErrorResolver {
    enable_stacktrace: bool,
    messages: Arc<dyn MessageLookup>,
}

impl ErrorResolver {
    pub fn new(enable_stacktrace: bool, messages: Arc<dyn MessageLookup>) -> Self {
        Self {
            enable_stacktrace,
            messages,
        }
    }

    pub fn from_config(config: &ErrorsConfig, messages: Arc<dyn MessageLookup>) -> Self {
        Self::new(config.enable_stacktrace, messages)
    }

    pub const fn enable_stacktrace(&self) -> bool {
        self.enable_stacktrace
    }

    pub fn messages(&self) -> &dyn MessageLookup {
        &*self.messages
    }

    /// Resolve any [`Fault`] through its matching entry point
    pub fn resolve(&self, context: &RequestContext, fault: &Fault) -> ErrorReply {
        match fault {
            Fault::Service(error) => self.resolve_service_error(context, error),
            Fault::EntityNotFound(condition) => self.resolve_entity_not_found(context, condition),
            Fault::StaleObject(condition) => self.resolve_stale_object(context, condition),
            Fault::ObjectLocked(condition) => self.resolve_object_locked(context, condition),
            Fault::AccessDenied(condition) => self.resolve_access_denied(context, condition),
            Fault::FileNotFound(condition) => self.resolve_file_not_found(context, condition),
            Fault::Io(condition) => self.resolve_io_error(context, condition),
            Fault::Validation(condition) => self.resolve_validation_error(context, condition),
            Fault::Unexpected(condition) => self.resolve_unexpected(context, condition),
        }
    }

    /// Resolve a [`ServiceError`] of any kind
    ///
    /// Responds 500 unless the error carries a status override. Frames are
    /// disclosed for generic and business errors when enabled.
    pub fn resolve_service_error(&self, context: &RequestContext, error: &ServiceError) -> ErrorReply {
        log_request_error(context, error);

        match error.kind() {
            ErrorKind::StatusOverride { status } => self.service_reply(*status, error, false),
            ErrorKind::WithoutStacktrace => self.service_reply(StatusCode::INTERNAL_SERVER_ERROR, error, false),
            ErrorKind::Generic | ErrorKind::BusinessLogic { .. } => {
                self.service_reply(StatusCode::INTERNAL_SERVER_ERROR, error, self.enable_stacktrace)
            }
        }
    }

    pub fn resolve_entity_not_found(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::ENTITY_NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    pub fn resolve_stale_object(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::STALE_OBJECT, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    pub fn resolve_object_locked(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::LOCK_OBJECT, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    /// 403, never with frames
    pub fn resolve_access_denied(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::ACCESS_DENIED, StatusCode::FORBIDDEN, false)
    }

    /// 404, never with frames
    pub fn resolve_file_not_found(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::FILE_NOT_FOUND, StatusCode::NOT_FOUND, false)
    }

    pub fn resolve_io_error(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::IO, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    pub fn resolve_validation_error(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::VALIDATION, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    pub fn resolve_unexpected(&self, context: &RequestContext, condition: &Condition) -> ErrorReply {
        self.resolve_with(context, condition, ErrorCode::UNEXPECTED, StatusCode::INTERNAL_SERVER_ERROR, true)
    }

    /// Resolve a failure outside the service error taxonomy
    ///
    /// The message comes from looking up `code` with the error's display text
    /// as argument. Frames are the raise site, named after `code`, followed by
    /// the error's captured backtrace. They are disclosed only when both
    /// `with_stacktrace` and the resolver's flag are set.
    pub fn resolve_with(
        &self,
        context: &RequestContext,
        condition: &Condition,
        code: ErrorCode,
        status: StatusCode,
        with_stacktrace: bool,
    ) -> ErrorReply {
        log_request_error(context, &**condition.error());

        let cause = condition.to_string();
        let message = acquire_message(self.messages(), None, Some(code), Some(&cause));
        let stacktrace = (with_stacktrace && self.enable_stacktrace).then(|| condition.stack_frames(code.name()));

        ErrorReply::new(status, ErrorResponse::from_code(code, message, stacktrace))
    }

    fn service_reply(&self, status: StatusCode, error: &ServiceError, with_stacktrace: bool) -> ErrorReply {
        let message = acquire_service_message(self.messages(), error);
        ErrorReply::new(status, ErrorResponse::from_service_error(error, message, with_stacktrace))
    }
}

impl fmt::Debug for ErrorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorResolver")
            .field("enable_stacktrace", &self.enable_stacktrace)
            .finish_non_exhaustive()
    }
}
