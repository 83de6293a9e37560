// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;

use colored::Colorize;

use crate::entry::LogEntry;
use crate::error::SinkError;
use crate::host::stdout_is_terminal;
use crate::severity::Severity;

/// Line-oriented sink over any byte stream. Backs both the console and file variants.
pub struct StreamSink {
    out: Box<dyn Write + Send>,
    colorize: bool,
    destination: String,
    reported: bool,
}

impl StreamSink {
    pub fn new(out: Box<dyn Write + Send>, colorize: bool, destination: impl Into<String>) -> Self {
        Self {
            out,
            colorize,
            destination: destination.into(),
            reported: false,
        }
    }

    /// Process stdout, colourised when stdout is a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()), console_colors(), "stdout")
    }

    /// Opens `path` for appending, creating it if needed. The handle stays open until
    /// the sink is dropped.
    pub fn open_file(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(
            Box::new(file),
            false,
            path.display().to_string(),
        ))
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn accept(&mut self, entry: &LogEntry) {
        let mut line = entry.render();
        if self.colorize {
            line = decorate(line, entry.severity());
        }
        line.push('\n');

        // One write per entry: the caller holds the sink lock, so lines never interleave.
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = result {
            super::report_failure(&mut self.reported, &self.destination, &err);
        }
    }
}

impl fmt::Debug for StreamSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("destination", &self.destination)
            .field("colorize", &self.colorize)
            .finish_non_exhaustive()
    }
}

/// Whether console output is colourised, decided once per process.
///
/// `colored` keeps its own view of the terminal and of `NO_COLOR`/`CLICOLOR`. Both are
/// combined with the terminal probe here and `colored` is then pinned to the result, so
/// this flag alone decides whether escape codes are emitted.
fn console_colors() -> bool {
    static COLORS: OnceLock<bool> = OnceLock::new();
    *COLORS.get_or_init(|| {
        let enabled =
            stdout_is_terminal() && colored::control::SHOULD_COLORIZE.should_colorize();
        colored::control::set_override(enabled);
        enabled
    })
}

fn decorate(line: String, severity: Severity) -> String {
    match severity {
        Severity::Debug => line.dimmed().to_string(),
        Severity::Information => line,
        Severity::Warning => line.yellow().to_string(),
        Severity::Critical => line.red().bold().to_string(),
    }
}
