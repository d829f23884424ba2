use verdict_core::{ErrorCode, MessageLookup, ServiceError};

/// Leading character that turns a message into a lookup key
pub const DIRECTIVE_SIGIL: char = '$';

/// Produce the final message of an error response
///
/// Precedence, first match wins:
/// 1. a non-empty `message` starting with [`DIRECTIVE_SIGIL`] is looked up
///    by the remainder; any other non-empty `message` is returned verbatim
/// 2. `error_code` is looked up by its code message
/// 3. the code message of [`ErrorCode::UNEXPECTED`] is looked up
///
/// Every lookup gets `cause_message` as its only argument, or an empty
/// string when there is no cause.
pub fn acquire_message(
    lookup: &dyn MessageLookup,
    message: Option<&str>,
    error_code: Option<ErrorCode>,
    cause_message: Option<&str>,
) -> String {
    let args = [cause_message.unwrap_or_default()];

    if let Some(message) = message.filter(|message| !message.is_empty()) {
        return match message.strip_prefix(DIRECTIVE_SIGIL) {
            Some(key) => lookup.get_message(key, &args),
            None => message.to_owned(),
        };
    }

    let code = error_code.unwrap_or(ErrorCode::UNEXPECTED);
    lookup.get_message(code.code_message(), &args)
}

/// [`acquire_message`] for the parts a [`ServiceError`] carries
pub fn acquire_service_message(lookup: &dyn MessageLookup, error: &ServiceError) -> String {
    acquire_message(lookup, error.message(), error.error_code(), error.cause_message())
}
