// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sink variants.
//!
//! A [`Sink`] is built once when its configuration is activated and is owned by that
//! configuration for the rest of the process. The variant is fixed at that point, so
//! accepting an entry is a plain `match` with no configuration lookup.
//!
//! Write failures never leave [`Sink::accept`]. The first failure of each sink is
//! reported through `tracing::error!`; later ones are dropped silently so that a broken
//! disk cannot flood the diagnostics output.

mod stream;
mod syslog;

use std::fmt;

pub use stream::StreamSink;
pub use syslog::SyslogSink;

use crate::entry::LogEntry;

/// Non-owning handle from a sink back to the configuration it serves.
///
/// Resolve it with [`Registry::get`](crate::registry::Registry::get).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(pub(crate) usize);

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink#{}", self.0)
    }
}

/// Destination selected by the `type` field.
#[derive(Debug)]
pub enum SinkTarget {
    Console(StreamSink),
    File(StreamSink),
    Syslog(SyslogSink),
}

#[derive(Debug)]
pub struct Sink {
    owner: SinkId,
    target: SinkTarget,
}

impl Sink {
    pub(crate) fn new(owner: SinkId, target: SinkTarget) -> Self {
        Self { owner, target }
    }

    /// The configuration that owns this sink.
    #[must_use]
    pub fn config_id(&self) -> SinkId {
        self.owner
    }

    #[must_use]
    pub fn target(&self) -> &SinkTarget {
        &self.target
    }

    /// Renders or persists one entry. Never fails; see the module docs.
    pub fn accept(&mut self, entry: &LogEntry) {
        match &mut self.target {
            SinkTarget::Console(stream) | SinkTarget::File(stream) => stream.accept(entry),
            SinkTarget::Syslog(syslog) => syslog.accept(entry),
        }
    }
}

/// Emergency notice for a failing sink, emitted at most once per sink.
///
/// Goes straight to `tracing` rather than back through the dispatcher, so a failing
/// sink cannot trigger another write to itself.
pub(crate) fn report_failure(reported: &mut bool, destination: &str, err: &dyn fmt::Display) {
    if *reported {
        return;
    }
    *reported = true;
    tracing::error!(
        "Failed to write log entry to {}: {}. Further errors from this sink are suppressed",
        destination,
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use crate::test_support::SharedBuffer;
    use tracing_test::traced_test;

    #[test]
    fn test_sink_id_display() {
        assert_eq!(SinkId(3).to_string(), "sink#3");
    }

    #[test]
    fn test_sink_reports_owner() {
        let sink = Sink::new(
            SinkId(7),
            SinkTarget::Console(StreamSink::new(Box::new(std::io::sink()), false, "test")),
        );
        assert_eq!(sink.config_id(), SinkId(7));
        assert!(matches!(sink.target(), SinkTarget::Console(_)));
    }

    #[test]
    #[traced_test]
    fn test_report_failure_only_once() {
        let mut reported = false;
        report_failure(&mut reported, "/var/log/app.log", &"disk full");
        report_failure(&mut reported, "/var/log/app.log", &"disk still full");

        assert!(reported);
        assert!(logs_contain("Failed to write log entry to /var/log/app.log: disk full"));
        assert!(!logs_contain("disk still full"));
    }

    #[test]
    fn test_accept_routes_to_stream() {
        let buffer = SharedBuffer::default();
        let mut sink = Sink::new(
            SinkId(0),
            SinkTarget::File(StreamSink::new(Box::new(buffer.clone()), false, "buffer")),
        );
        sink.accept(&LogEntry::new(Severity::Warning, "app", "hello"));
        assert!(buffer.contents().ends_with("warning/app: hello\n"));
    }
}
