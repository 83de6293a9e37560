// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Queries answered by the embedding application.
//!
//! The dispatcher never reads process state directly. Whether a configuration entity
//! belongs to this process and whether the process runs in debug mode are asked through
//! [`Host`], so that embedders with their own object model can plug it in.

use std::env;
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

pub trait Host: Send + Sync {
    /// Whether the configuration entity called `name` lives in this process.
    fn is_local(&self, name: &str) -> bool;

    /// Whether the process runs in debug mode. Lowers the fallback baseline to debug.
    fn is_debugging(&self) -> bool;
}

/// Default host: every configuration entity is local, debug mode is a process flag.
#[derive(Debug, Default)]
pub struct ProcessHost {
    debugging: AtomicBool,
}

impl ProcessHost {
    #[must_use]
    pub fn new(debugging: bool) -> Self {
        Self {
            debugging: AtomicBool::new(debugging),
        }
    }

    /// Reads `DD_LOG_DEBUG` (`true` or `1`, case-insensitive).
    #[must_use]
    pub fn from_env() -> Self {
        let debugging = env::var("DD_LOG_DEBUG")
            .map(|val| {
                let val = val.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false);
        Self::new(debugging)
    }

    /// Process-wide host, seeded from the environment on first use.
    pub fn global() -> &'static ProcessHost {
        static HOST: OnceLock<ProcessHost> = OnceLock::new();
        HOST.get_or_init(ProcessHost::from_env)
    }

    pub fn set_debugging(&self, debugging: bool) {
        self.debugging.store(debugging, Ordering::Relaxed);
    }
}

impl Host for ProcessHost {
    fn is_local(&self, _name: &str) -> bool {
        true
    }

    fn is_debugging(&self) -> bool {
        self.debugging.load(Ordering::Relaxed)
    }
}

/// Whether stdout is an interactive terminal.
///
/// Probed once for the lifetime of the process; concurrent first callers all observe
/// the same answer.
pub fn stdout_is_terminal() -> bool {
    static STDOUT_TTY: OnceLock<bool> = OnceLock::new();
    *STDOUT_TTY.get_or_init(|| io::stdout().is_terminal())
}
