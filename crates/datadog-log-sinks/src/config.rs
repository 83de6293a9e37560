// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sink configuration.
//!
//! A sink goes through three stages:
//!
//! 1. [`SinkDefinition`]: raw fields as they appear in the configuration source.
//! 2. [`SinkConfig`]: a definition accepted by the host (local to this process, known
//!    severity). Nothing is opened yet.
//! 3. An activated sink, produced by [`Registry::activate`](crate::registry::Registry::activate),
//!    which runs [`SinkConfig::build_sink`] and registers the result.
//!
//! Definitions are normally loaded from the environment:
//!
//! ```text
//! DD_LOG_SINKS='[{"name":"main","type":"file","path":"/var/log/app.log","severity":"warning"}]'
//! DD_LOG_SINKS_FILE=/etc/app/log-sinks.json
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SinkError;
use crate::host::Host;
use crate::severity::Severity;
use crate::sink::{Sink, SinkId, SinkTarget, StreamSink, SyslogSink};

/// Raw fields of one sink entry. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SinkDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    pub severity: String,
}

/// A sink configuration owned by this process, ready to be activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    name: String,
    kind: String,
    path: String,
    min_severity: Option<Severity>,
}

impl SinkConfig {
    /// Accepts a definition on behalf of `host`.
    ///
    /// Fails with [`SinkError::NotLocal`] if the host does not own the entity and with
    /// [`SinkError::InvalidSeverity`] if `severity` is set to an unknown name. The sink
    /// type and path are only checked on activation.
    pub fn new(definition: SinkDefinition, host: &dyn Host) -> Result<Self, SinkError> {
        if !host.is_local(&definition.name) {
            return Err(SinkError::NotLocal(definition.name));
        }

        let min_severity = if definition.severity.is_empty() {
            None
        } else {
            Some(Severity::from_str(&definition.severity)?)
        };

        Ok(Self {
            name: definition.name,
            kind: definition.kind,
            path: definition.path,
            min_severity,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries below this severity are never handed to the sink.
    #[must_use]
    pub fn effective_min_severity(&self) -> Severity {
        self.min_severity.unwrap_or(Severity::Information)
    }

    /// Resolves the `type` field into a concrete sink owned by `owner`.
    pub fn build_sink(&self, owner: SinkId) -> Result<Sink, SinkError> {
        if self.kind.is_empty() {
            return Err(SinkError::Config("missing type".to_string()));
        }

        let target = match self.kind.as_str() {
            "syslog" => SinkTarget::Syslog(SyslogSink::new()?),
            "file" => {
                if self.path.is_empty() {
                    return Err(SinkError::Config("missing path".to_string()));
                }
                SinkTarget::File(StreamSink::open_file(Path::new(&self.path))?)
            }
            "console" => SinkTarget::Console(StreamSink::stdout()),
            other => return Err(SinkError::Config(format!("unknown type: {other}"))),
        };

        Ok(Sink::new(owner, target))
    }
}

/// The list of sink definitions supplied to the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SinksConfig {
    pub sinks: Vec<SinkDefinition>,
}

impl SinksConfig {
    /// Loads definitions from `DD_LOG_SINKS` (inline JSON) or, if unset, from the file
    /// named by `DD_LOG_SINKS_FILE`. Neither set means no sinks.
    pub fn from_env() -> Result<Self, SinkError> {
        if let Ok(inline) = env::var("DD_LOG_SINKS") {
            return Self::from_json(&inline);
        }
        match env::var("DD_LOG_SINKS_FILE") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        serde_json::from_str(json).map_err(|e| SinkError::Load(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, SinkError> {
        let contents = fs::read_to_string(path).map_err(|source| SinkError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        Self::from_json(&contents)
    }
}
