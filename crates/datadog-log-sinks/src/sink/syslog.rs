// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::entry::LogEntry;
use crate::error::SinkError;

/// Forwards severity and message to the local syslog daemon.
///
/// Only unix targets have a syslog facility. The capability is checked at runtime by
/// [`SyslogSink::new`] so callers see the same API everywhere.
#[derive(Debug)]
pub struct SyslogSink {
    _private: (),
}

impl SyslogSink {
    #[must_use]
    pub fn is_supported() -> bool {
        cfg!(unix)
    }

    pub fn new() -> Result<Self, SinkError> {
        if !Self::is_supported() {
            return Err(SinkError::UnsupportedPlatform(
                "syslog is not available on this platform".to_string(),
            ));
        }
        Ok(Self { _private: () })
    }

    pub fn accept(&mut self, entry: &LogEntry) {
        #[cfg(unix)]
        platform::send(entry.severity(), entry.message());
        #[cfg(not(unix))]
        let _ = entry;
    }
}

#[cfg(unix)]
mod platform {
    use std::ffi::CString;

    use libc::c_int;

    use crate::severity::Severity;

    pub(super) fn priority(severity: Severity) -> c_int {
        let level = match severity {
            Severity::Debug => libc::LOG_DEBUG,
            Severity::Information => libc::LOG_INFO,
            Severity::Warning => libc::LOG_WARNING,
            Severity::Critical => libc::LOG_CRIT,
        };
        level | libc::LOG_USER
    }

    /// syslog(3) takes a C string; anything after an embedded NUL is dropped.
    pub(super) fn c_message(message: &str) -> CString {
        let bytes = message.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        CString::new(&bytes[..end]).unwrap_or_default()
    }

    pub(super) fn send(severity: Severity, message: &str) {
        let message = c_message(message);
        // SAFETY: both pointers are valid NUL-terminated strings for the duration of the
        // call, and the "%s" format consumes exactly one string argument.
        unsafe {
            libc::syslog(
                priority(severity),
                b"%s\0".as_ptr().cast::<libc::c_char>(),
                message.as_ptr(),
            );
        }
    }
}
