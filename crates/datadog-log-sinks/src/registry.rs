// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Activated sinks.
//!
//! The registry only grows. Readers take a snapshot (a cloned list of `Arc`s) under a
//! short read lock and iterate it without holding the lock, so a registration racing
//! with a dispatch is either fully visible or not visible at all, and a sink is never
//! visited twice by the same dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::config::SinkConfig;
use crate::entry::LogEntry;
use crate::error::SinkError;
use crate::severity::Severity;
use crate::sink::{Sink, SinkId};

/// A configuration that has been activated, together with the sink it owns.
#[derive(Debug)]
pub struct ActiveSink {
    id: SinkId,
    config: SinkConfig,
    sink: Mutex<Sink>,
}

impl ActiveSink {
    #[must_use]
    pub fn id(&self) -> SinkId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.config.name()
    }

    #[must_use]
    pub fn effective_min_severity(&self) -> Severity {
        self.config.effective_min_severity()
    }

    /// Hands `entry` to the sink if it meets the threshold. Returns whether it did.
    ///
    /// The threshold check and the write happen under this sink's lock, which
    /// serialises writes to this sink without blocking any other one.
    pub fn offer(&self, entry: &LogEntry) -> bool {
        let mut sink = self.lock();
        if entry.severity() < self.effective_min_severity() {
            return false;
        }
        sink.accept(entry);
        true
    }

    /// A writer that panicked mid-entry must not disable the sink for everyone else.
    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    sinks: RwLock<Vec<Arc<ActiveSink>>>,
    next_id: AtomicUsize,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::new)
    }

    /// Builds the sink for `config` and registers it.
    ///
    /// The configuration is consumed, so it cannot be activated twice. On error nothing
    /// is registered and the caller decides whether that aborts startup.
    pub fn activate(&self, config: SinkConfig) -> Result<Arc<ActiveSink>, SinkError> {
        self.register_with(config, SinkConfig::build_sink)
    }

    /// Registers `config` with the sink produced by `build`.
    pub(crate) fn register_with<F>(
        &self,
        config: SinkConfig,
        build: F,
    ) -> Result<Arc<ActiveSink>, SinkError>
    where
        F: FnOnce(&SinkConfig, SinkId) -> Result<Sink, SinkError>,
    {
        // The sink is built outside the lock: opening a file must not stall dispatch.
        let id = SinkId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let sink = build(&config, id)?;

        debug!(
            "Activated {} sink '{}' as {} (min severity {})",
            config.kind(),
            config.name(),
            id,
            config.effective_min_severity()
        );

        let active = Arc::new(ActiveSink {
            id,
            config,
            sink: Mutex::new(sink),
        });
        self.sinks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&active));
        Ok(active)
    }

    /// Resolves a sink's back handle.
    #[must_use]
    pub fn get(&self, id: SinkId) -> Option<Arc<ActiveSink>> {
        self.read().iter().find(|sink| sink.id == id).cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<ActiveSink>> {
        self.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<ActiveSink>>> {
        self.sinks.read().unwrap_or_else(PoisonError::into_inner)
    }
}
