// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Fan-out of log entries to the registered sinks.
//!
//! # Algorithm
//!
//! ```text
//!   LogEntry
//!      │
//!      v
//!  registry snapshot ──> for each sink: lock, check threshold, accept, unlock
//!      │
//!      v
//!  nothing delivered? ──> severity >= baseline? ──> fallback console
//! ```
//!
//! The baseline is `debug` when the host runs in debug mode and `information`
//! otherwise.
//!
//! # Fallback policy
//!
//! By default ([`FallbackPolicy::SuppressWhenConfigured`]) the mere presence of a
//! registered sink counts as delivery, even if that sink filtered the entry out. An
//! application that configures a `warning` file sink therefore gets no console output
//! for `information` entries. [`FallbackPolicy::WhenUndelivered`] instead falls back
//! whenever no sink actually accepted the entry.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::entry::LogEntry;
use crate::host::{Host, ProcessHost};
use crate::registry::Registry;
use crate::severity::Severity;
use crate::sink::StreamSink;

/// When the fallback console is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Only when no sink is registered at all.
    #[default]
    SuppressWhenConfigured,
    /// Whenever no registered sink accepted the entry.
    WhenUndelivered,
}

pub struct Dispatcher<'a> {
    registry: &'a Registry,
    host: &'a dyn Host,
    policy: FallbackPolicy,
    fallback: Option<Mutex<StreamSink>>,
}

impl<'a> Dispatcher<'a> {
    /// Dispatches over `registry`, falling back to the process-wide stdout console.
    ///
    /// Every dispatcher built this way shares that one console, so lines written by
    /// different dispatchers never interleave.
    pub fn new(registry: &'a Registry, host: &'a dyn Host) -> Self {
        Self {
            registry,
            host,
            policy: FallbackPolicy::default(),
            fallback: None,
        }
    }

    /// Uses `fallback` instead of stdout for the default console.
    pub fn with_fallback(
        registry: &'a Registry,
        host: &'a dyn Host,
        fallback: StreamSink,
    ) -> Self {
        Self {
            fallback: Some(Mutex::new(fallback)),
            ..Self::new(registry, host)
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Delivers `entry` to every registered sink whose threshold it meets, falling back
    /// to the console according to the [`FallbackPolicy`].
    pub fn forward(&self, entry: &LogEntry) {
        let mut delivered = false;

        for sink in self.registry.snapshot() {
            let accepted = sink.offer(entry);
            delivered |= match self.policy {
                FallbackPolicy::SuppressWhenConfigured => true,
                FallbackPolicy::WhenUndelivered => accepted,
            };
        }

        if delivered || entry.severity() < self.baseline() {
            return;
        }

        self.fallback()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .accept(entry);
    }

    /// Builds an entry stamped with the current time and forwards it.
    pub fn write(&self, severity: Severity, facility: &str, message: &str) {
        self.forward(&LogEntry::new(severity, facility, message));
    }

    fn baseline(&self) -> Severity {
        if self.host.is_debugging() {
            Severity::Debug
        } else {
            Severity::Information
        }
    }

    fn fallback(&self) -> &Mutex<StreamSink> {
        match &self.fallback {
            Some(fallback) => fallback,
            None => stdout_fallback(),
        }
    }
}

/// The stdout console shared by every dispatcher without an explicit fallback, opened
/// on first use.
fn stdout_fallback() -> &'static Mutex<StreamSink> {
    static STDOUT: OnceLock<Mutex<StreamSink>> = OnceLock::new();
    STDOUT.get_or_init(|| Mutex::new(StreamSink::stdout()))
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("sinks", &self.registry.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Dispatcher<'static> {
    /// The process-wide dispatcher over [`Registry::global`] and [`ProcessHost::global`].
    pub fn global() -> &'static Dispatcher<'static> {
        static DISPATCHER: OnceLock<Dispatcher<'static>> = OnceLock::new();
        DISPATCHER.get_or_init(|| Dispatcher::new(Registry::global(), ProcessHost::global()))
    }
}

/// Writes through the process-wide dispatcher.
pub fn write(severity: Severity, facility: &str, message: &str) {
    Dispatcher::global().write(severity, facility, message);
}
