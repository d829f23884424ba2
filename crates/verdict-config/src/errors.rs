use serde::Deserialize;

/// Error resolution policy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Disclose stack frames in error responses
    ///
    /// Applies to the kinds that allow it; access denied, file not found,
    /// status override and without-stacktrace errors never disclose frames.
    #[serde(default)]
    pub enable_stacktrace: bool,
}
