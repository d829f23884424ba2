use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;

use serde::Serialize;

const UNKNOWN_LOCATION: &str = "<unknown>";

/// One frame of the call stack disclosed in an error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    /// Function or raise-site identifier
    pub site: String,
    /// `file:line:column`, or `<unknown>` when the frame has no debug info
    pub location: String,
}

impl StackFrame {
    pub fn new(site: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            location: location.into(),
        }
    }

    /// Frame for a `#[track_caller]` location
    pub fn at(site: impl Into<String>, location: &Location<'_>) -> Self {
        Self::new(
            site,
            format!("{}:{}:{}", location.file(), location.line(), location.column()),
        )
    }
}

/// Frames of a captured backtrace, innermost first
///
/// Empty unless capture was enabled through `RUST_BACKTRACE` or
/// `RUST_LIB_BACKTRACE` when the backtrace was taken.
pub fn backtrace_frames(backtrace: &Backtrace) -> Vec<StackFrame> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }

    parse_frames(&backtrace.to_string())
}

/// Parse the standard library's rendering of a backtrace
///
/// Each frame is a `N: symbol` line, optionally followed by one or more
/// `at file:line:col` lines; only the first location is kept.
fn parse_frames(rendered: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();

    for line in rendered.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut()
                && frame.location == UNKNOWN_LOCATION
            {
                location.clone_into(&mut frame.location);
            }
            continue;
        }

        if let Some((index, site)) = line.split_once(": ")
            && !index.is_empty()
            && index.bytes().all(|b| b.is_ascii_digit())
        {
            frames.push(StackFrame::new(site, UNKNOWN_LOCATION));
        }
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rendered_backtrace() {
        let rendered = "   0: orders::checkout::charge\n             at ./src/checkout.rs:42:9\n   1: \
                        core::ops::function::FnOnce::call_once\n   2: std::rt::lang_start\n             at \
                        /rustc/library/std/src/rt.rs:206:5\n             at /rustc/library/std/src/rt.rs:1:1\n";

        let frames = parse_frames(rendered);

        assert_eq!(
            frames,
            vec![
                StackFrame::new("orders::checkout::charge", "./src/checkout.rs:42:9"),
                StackFrame::new("core::ops::function::FnOnce::call_once", "<unknown>"),
                StackFrame::new("std::rt::lang_start", "/rustc/library/std/src/rt.rs:206:5"),
            ]
        );
    }

    #[test]
    fn disabled_backtrace_has_no_frames() {
        assert!(backtrace_frames(&Backtrace::disabled()).is_empty());
    }

    #[test]
    fn forced_backtrace_has_frames() {
        let frames = backtrace_frames(&Backtrace::force_capture());
        assert!(!frames.is_empty());
    }

    #[test]
    fn frame_from_caller_location() {
        let frame = StackFrame::at("raise", Location::caller());
        assert!(frame.location.contains("trace.rs"));
        assert_eq!(frame.site, "raise");
    }
}
