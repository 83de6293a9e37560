// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! # Datadog Log Sinks
//!
//! Routes log entries produced anywhere in a process to independently configured
//! output sinks, each with its own minimum severity.
//!
//! ## Overview
//!
//! - [`severity`]: the ordered `debug < information < warning < critical` scale
//! - [`entry`]: the immutable [`LogEntry`] produced once per log call
//! - [`sink`]: console, file and syslog destinations
//! - [`config`]: sink definitions, validation and the `type` factory
//! - [`registry`]: the process-wide set of activated sinks
//! - [`dispatcher`]: fan-out, severity filtering and the console fallback
//! - [`host`]: locality and debug-mode queries answered by the embedding application
//!
//! ## Usage
//!
//! ```no_run
//! use datadog_log_sinks::{Dispatcher, ProcessHost, Registry, Severity, SinkConfig, SinksConfig};
//!
//! # fn main() -> Result<(), datadog_log_sinks::SinkError> {
//! for definition in SinksConfig::from_env()?.sinks {
//!     let config = SinkConfig::new(definition, ProcessHost::global())?;
//!     Registry::global().activate(config)?;
//! }
//!
//! Dispatcher::global().write(Severity::Warning, "checker", "host unreachable");
//! # Ok(())
//! # }
//! ```
//!
//! With no sink registered, entries at `information` and above (or `debug` and above in
//! debug mode) go to stdout.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod error;
pub mod host;
pub mod registry;
pub mod severity;
pub mod sink;

mod test_support;

pub use config::{SinkConfig, SinkDefinition, SinksConfig};
pub use dispatcher::{write, Dispatcher, FallbackPolicy};
pub use entry::LogEntry;
pub use error::SinkError;
pub use host::{Host, ProcessHost};
pub use registry::{ActiveSink, Registry};
pub use severity::Severity;
pub use sink::{Sink, SinkId, SinkTarget, StreamSink, SyslogSink};
