// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Errors raised while building, validating or activating sinks.
///
/// Runtime write failures are not part of this enum: a sink that fails while accepting
/// an entry reports it once through `tracing` and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Invalid sink configuration: {0}")]
    Config(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Failed to open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Sink configuration '{0}' must be local to this process")]
    NotLocal(String),

    #[error("Failed to load sink configuration: {0}")]
    Load(String),
}
