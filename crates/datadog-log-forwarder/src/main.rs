// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::io::{self, BufRead};
use std::str::FromStr;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use datadog_log_sinks::{Dispatcher, ProcessHost, Registry, Severity, SinkConfig, SinksConfig};

const DEFAULT_FACILITY: &str = "stdin";

pub fn main() {
    let log_level = env::var("DD_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(log_level).expect("could not parse log level in configuration"),
        )
        .with_writer(io::stderr)
        .with_level(true)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let facility = env::var("DD_LOG_FACILITY").unwrap_or_else(|_| DEFAULT_FACILITY.to_string());

    let sinks = match SinksConfig::from_env() {
        Ok(sinks) => sinks,
        Err(e) => {
            error!("Error loading sink configuration: {e}");
            return;
        }
    };

    let host = ProcessHost::global();
    let registry = Registry::global();
    for definition in sinks.sinks {
        let name = definition.name.clone();
        let activated = SinkConfig::new(definition, host).and_then(|c| registry.activate(c));
        if let Err(e) = activated {
            error!("Skipping log sink '{name}': {e}");
        }
    }
    info!(
        "Forwarding stdin to {} log sink(s) as facility '{facility}'",
        registry.len()
    );

    let dispatcher = Dispatcher::global();
    let forwarded = forward_lines(io::stdin().lock(), |line| {
        let (severity, message) = split_severity(line);
        dispatcher.write(severity, &facility, message);
    });
    if let Err(e) = forwarded {
        error!("Error reading stdin: {e}");
    }
}

/// Hands every line of `input` to `forward` until end of input, without the trailing
/// `\n` or `\r\n`. Invalid UTF-8 is replaced rather than ending the stream.
fn forward_lines(mut input: impl BufRead, mut forward: impl FnMut(&str)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&buf);
        let mut line: &str = &text;
        line = line.strip_suffix('\n').unwrap_or(line);
        line = line.strip_suffix('\r').unwrap_or(line);
        forward(line);
    }
}

/// `"warning: disk almost full"` is forwarded as a warning; lines without a recognised
/// severity prefix are forwarded verbatim as information.
fn split_severity(line: &str) -> (Severity, &str) {
    line.split_once(": ")
        .and_then(|(prefix, rest)| Severity::from_str(prefix).ok().map(|s| (s, rest)))
        .unwrap_or((Severity::Information, line))
}
