use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Stable identifier of an error kind plus the key used to render its message
///
/// The set is open: hosts declare their own codes as `const` items alongside
/// the baseline ones defined here.
///
/// ```
/// use verdict_core::ErrorCode;
///
/// const ORDER_CLOSED: ErrorCode = ErrorCode::new("ORDER_CLOSED", "order.closed");
/// assert_eq!(ORDER_CLOSED.code_message(), "order.closed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    name: &'static str,
    code_message: &'static str,
}

/// Rejected error code definition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidErrorCode {
    /// The code has no name
    #[error("error code name must not be empty")]
    EmptyName,
    /// The code has no message key
    #[error("error code `{0}` has an empty code message")]
    EmptyCodeMessage(&'static str),
}

impl ErrorCode {
    /// Fallback for failures nothing more specific describes
    pub const UNEXPECTED: Self = Self::new("UNEXPECTED", "common.unexpected.exception");
    pub const ENTITY_NOT_FOUND: Self = Self::new("ENTITY_NOT_FOUND", "entity.not.found.exception");
    /// Optimistic lock failure: the entity changed since it was read
    pub const STALE_OBJECT: Self = Self::new("STALE_OBJECT", "stale.object.exception");
    pub const LOCK_OBJECT: Self = Self::new("LOCK_OBJECT", "lock.object.exception");
    pub const ACCESS_DENIED: Self = Self::new("ACCESS_DENIED", "access.denied.exception");
    pub const INVALID_REQUEST: Self = Self::new("INVALID_REQUEST", "invalid.request.exception");
    pub const SECURITY: Self = Self::new("SECURITY", "security.exception");
    /// A collaborating module or service is unavailable
    pub const SERVICE_NOT_FOUND: Self = Self::new("SERVICE_NOT_FOUND", "module.not.available");
    pub const VALIDATION: Self = Self::new("VALIDATION", "validation.exception");
    pub const RESOURCE_NOT_FOUND: Self = Self::new("RESOURCE_NOT_FOUND", "resource.not.found.exception");
    pub const FILE_NOT_FOUND: Self = Self::new("FILE_NOT_FOUND", "file.not.found.exception");
    pub const IO: Self = Self::new("IO", "io.exception");

    /// Every code this crate defines
    pub const BASELINE: [Self; 12] = [
        Self::UNEXPECTED,
        Self::ENTITY_NOT_FOUND,
        Self::STALE_OBJECT,
        Self::LOCK_OBJECT,
        Self::ACCESS_DENIED,
        Self::INVALID_REQUEST,
        Self::SECURITY,
        Self::SERVICE_NOT_FOUND,
        Self::VALIDATION,
        Self::RESOURCE_NOT_FOUND,
        Self::FILE_NOT_FOUND,
        Self::IO,
    ];

    /// Define an error code
    ///
    /// # Panics
    ///
    /// Panics when `name` or `code_message` is empty. In a `const` item this
    /// is a compile error.
    pub const fn new(name: &'static str, code_message: &'static str) -> Self {
        match Self::try_new(name, code_message) {
            Ok(code) => code,
            Err(InvalidErrorCode::EmptyName) => panic!("error code name must not be empty"),
            Err(InvalidErrorCode::EmptyCodeMessage(_)) => panic!("error code message must not be empty"),
        }
    }

    /// Define an error code, rejecting empty parts
    ///
    /// # Errors
    ///
    /// Returns [`InvalidErrorCode`] when `name` or `code_message` is empty
    pub const fn try_new(name: &'static str, code_message: &'static str) -> Result<Self, InvalidErrorCode> {
        if name.is_empty() {
            return Err(InvalidErrorCode::EmptyName);
        }
        if code_message.is_empty() {
            return Err(InvalidErrorCode::EmptyCodeMessage(name));
        }
        Ok(Self { name, code_message })
    }

    /// Identifier sent to clients in the `errorCode` field
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Message key resolved through the message lookup
    pub const fn code_message(&self) -> &'static str {
        self.code_message
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Client-side severity of an informative error
///
/// Tells the client UI how to present the alert; it has no effect on how
/// the error is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorLevel(&'static str);

impl ErrorLevel {
    pub const ERROR: Self = Self("ERROR");
    pub const WARNING: Self = Self("WARNING");
    pub const INFO: Self = Self("INFO");

    /// Define a custom level
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl Default for ErrorLevel {
    fn default() -> Self {
        Self::ERROR
    }
}

impl fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for ErrorLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}
