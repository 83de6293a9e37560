// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Local};

use crate::severity::Severity;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A single log call, captured once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    severity: Severity,
    facility: String,
    message: String,
}

impl LogEntry {
    /// Builds an entry stamped with the current wall-clock time.
    pub fn new(
        severity: Severity,
        facility: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(Local::now(), severity, facility, message)
    }

    pub fn with_timestamp(
        timestamp: DateTime<Local>,
        severity: Severity,
        facility: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            facility: facility.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn facility(&self) -> &str {
        &self.facility
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Human readable form used by console and file sinks, without the trailing newline:
    ///
    /// ```text
    /// [2025-03-01 14:02:11 +0100] warning/checker: host unreachable
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "[{}] {}/{}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.severity,
            self.facility,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_format() {
        let timestamp = Local.with_ymd_and_hms(2025, 3, 1, 14, 2, 11).unwrap();
        let entry = LogEntry::with_timestamp(
            timestamp,
            Severity::Warning,
            "checker",
            "host unreachable",
        );

        let expected = format!(
            "[{}] warning/checker: host unreachable",
            timestamp.format("%Y-%m-%d %H:%M:%S %z")
        );
        assert_eq!(entry.render(), expected);
        assert!(entry.render().starts_with("[2025-03-01 14:02:11 "));
    }

    #[test]
    fn test_new_captures_current_time() {
        let before = Local::now();
        let entry = LogEntry::new(Severity::Debug, "app", "starting");
        let after = Local::now();

        assert!(entry.timestamp() >= before && entry.timestamp() <= after);
        assert_eq!(entry.severity(), Severity::Debug);
        assert_eq!(entry.facility(), "app");
        assert_eq!(entry.message(), "starting");
    }
}
