// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_log_sinks::{
    Dispatcher, Host, LogEntry, ProcessHost, Registry, Severity, SinkConfig, SinkDefinition,
    SinkError, SinksConfig, StreamSink, SyslogSink,
};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// Captures fallback console output
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capturing_dispatcher<'a>(
    registry: &'a Registry,
    host: &'a dyn Host,
) -> (Dispatcher<'a>, Capture) {
    let capture = Capture::default();
    let fallback = StreamSink::new(Box::new(capture.clone()), false, "capture");
    (Dispatcher::with_fallback(registry, host, fallback), capture)
}

fn definition(kind: &str, path: &Path, severity: &str) -> SinkDefinition {
    SinkDefinition {
        name: format!("{kind}-sink"),
        kind: kind.to_string(),
        path: path.display().to_string(),
        severity: severity.to_string(),
    }
}

fn file_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_warning_file_sink_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    let config = SinkConfig::new(definition("file", &path, "warning"), &host).unwrap();
    registry.activate(config).unwrap();
    let (dispatcher, console) = capturing_dispatcher(&registry, &host);

    dispatcher.forward(&LogEntry::new(Severity::Debug, "app", "noise"));
    assert!(file_lines(&path).is_empty());
    assert!(console.lines().is_empty());

    dispatcher.forward(&LogEntry::new(Severity::Critical, "app", "disk failing"));
    let lines = file_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("] critical/app: disk failing"));
    assert!(console.lines().is_empty());
}

#[test]
fn test_no_sinks_scenario() {
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    let (dispatcher, console) = capturing_dispatcher(&registry, &host);

    dispatcher.forward(&LogEntry::new(Severity::Information, "app", "started"));
    dispatcher.forward(&LogEntry::new(Severity::Debug, "app", "details"));

    let lines = console.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("] information/app: started"));
}

#[test]
fn test_file_without_path_is_not_registered() {
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    let config = SinkConfig::new(definition("file", Path::new(""), ""), &host).unwrap();

    let err = registry.activate(config).unwrap_err();
    assert_eq!(err.to_string(), "Invalid sink configuration: missing path");
    assert!(registry.is_empty());

    // nothing registered, so the fallback still works
    let (dispatcher, console) = capturing_dispatcher(&registry, &host);
    dispatcher.write(Severity::Warning, "app", "still visible");
    assert_eq!(console.lines().len(), 1);
}

#[test]
fn test_syslog_activation_follows_platform() {
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    let config = SinkConfig::new(definition("syslog", Path::new(""), ""), &host).unwrap();

    match registry.activate(config) {
        Ok(active) => {
            assert!(SyslogSink::is_supported());
            assert_eq!(active.name(), "syslog-sink");
        }
        Err(SinkError::UnsupportedPlatform(_)) => assert!(!SyslogSink::is_supported()),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_concurrent_forwards_do_not_tear_lines() {
    const THREADS: usize = 8;
    const ENTRIES: usize = 200;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.log");
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    let config = SinkConfig::new(definition("file", &path, "debug"), &host).unwrap();
    registry.activate(config).unwrap();
    let (dispatcher, console) = capturing_dispatcher(&registry, &host);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let dispatcher = &dispatcher;
            scope.spawn(move || {
                let payload = format!("thread-{t}-").repeat(64);
                for i in 0..ENTRIES {
                    dispatcher.write(Severity::Information, "worker", &format!("{payload}{i}"));
                }
            });
        }
    });

    let lines = file_lines(&path);
    assert_eq!(lines.len(), THREADS * ENTRIES);
    for line in &lines {
        let (_, message) = line
            .split_once("] information/worker: ")
            .unwrap_or_else(|| panic!("malformed line: {line}"));
        let body = message.trim_end_matches(|c: char| c.is_ascii_digit());
        let tag = body
            .strip_prefix("thread-")
            .and_then(|rest| rest.split('-').next())
            .unwrap();
        assert_eq!(body, format!("thread-{tag}-").repeat(64), "torn line: {line}");
    }
    assert!(console.lines().is_empty());
}

#[test]
fn test_loaded_definitions_activate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from-json.log");
    let json = format!(
        r#"[{{"name": "main", "type": "file", "path": {:?}, "severity": "information"}}]"#,
        path.display().to_string()
    );
    let host = ProcessHost::new(false);
    let registry = Registry::new();
    for definition in SinksConfig::from_json(&json).unwrap().sinks {
        registry
            .activate(SinkConfig::new(definition, &host).unwrap())
            .unwrap();
    }
    let (dispatcher, _console) = capturing_dispatcher(&registry, &host);

    dispatcher.write(Severity::Information, "loader", "configured from json");
    let lines = file_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("information/loader: configured from json"));
}
