// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Severity of a log entry.
//!
//! Severities are totally ordered by rank:
//!
//! ```text
//! debug < information < warning < critical
//! ```
//!
//! The textual form is exact. Unlike the agent's `DD_LOG_LEVEL` parsing there is no
//! case folding and no lenient fallback: anything outside the four names is rejected
//! with [`SinkError::InvalidSeverity`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::SinkError;

/// Ordered importance level of a log entry.
///
/// ```
/// use datadog_log_sinks::Severity;
///
/// assert!(Severity::Debug < Severity::Warning);
/// assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
/// assert!("Critical".parse::<Severity>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Diagnostic detail, only shown by the fallback console in debug mode.
    Debug,
    /// Normal operation. Default threshold for configured sinks.
    Information,
    /// Something unexpected that the application recovered from.
    Warning,
    /// Failures that need attention.
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Information,
        Severity::Warning,
        Severity::Critical,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Information => "information",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl AsRef<str> for Severity {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Severity::Debug),
            "information" => Ok(Severity::Information),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(SinkError::InvalidSeverity(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Severity::from_str(&s).map_err(serde::de::Error::custom)
    }
}
