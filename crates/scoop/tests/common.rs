//! Shared helpers for debugger integration tests.
#![allow(dead_code, unused_imports)]

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

pub use scoop::{ConfigureOutput, Debugger, MemorySources, NoSourcePolicy, ScoopError};

/// Lines written by a debugger.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<String>>>);

impl Captured {
    /// Every write so far, one entry per invocation.
    pub fn writes(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Every output line so far.
    pub fn lines(&self) -> Vec<String> {
        self.0
            .lock()
            .iter()
            .flat_map(|text| text.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }
}

/// Points `debugger` at a fresh capture.
pub fn capture(debugger: &Debugger) -> Captured {
    let captured = Captured::default();
    let sink = Arc::clone(&captured.0);
    debugger
        .configure_output(
            ConfigureOutput::new().output_function(move |text: &str| sink.lock().push(text.to_string())),
        )
        .expect("setting the output sink");
    captured
}

/// A debugger reading the test sources from disk, writing to a capture.
pub fn capturing() -> (Debugger, Captured) {
    let debugger = Debugger::new();
    let captured = capture(&debugger);
    (debugger, captured)
}

/// Text written through `tracing` by a scoped subscriber.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with `tracing` events at `WARN` and above recorded.
pub fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
