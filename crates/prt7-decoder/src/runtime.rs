//! Driver loop: pull records, apply frames, report progress.
//!
//! [`Runtime`] owns the decoding session and an output sink. It is generic
//! over the sink so the same loop writes to the terminal in production and
//! to a buffer in tests.

use std::io::Write;

use prt7_core::{Decoder, Progress};
use tracing::{info, warn};

use crate::{
    config::{Config, SourceKind},
    error::RuntimeError,
    source::{self, RecordSource, ScriptSource},
};

/// Decoding session plus report sink.
#[derive(Debug)]
pub struct Runtime<W> {
    decoder: Decoder,
    out: W,
    accepted: usize,
    rejected: usize,
}

impl<W: Write> Runtime<W> {
    /// Fresh session writing its report to `out`.
    pub fn new(out: W) -> Self {
        Self { decoder: Decoder::new(), out, accepted: 0, rejected: 0 }
    }

    /// Session state.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Apply one record and write its progress line.
    ///
    /// Rejected records are counted and skipped silently.
    pub fn step(&mut self, record: &str) -> Result<Option<Progress>, RuntimeError> {
        let Some(progress) = self.decoder.feed(record) else {
            self.rejected += 1;
            return Ok(None);
        };
        self.accepted += 1;

        match progress {
            Progress::Loaded { .. } => {
                writeln!(self.out, "Frame received: [{record}] -> Processing... -> {progress}")?;
            },
            Progress::Rotated { .. } => {
                writeln!(self.out)?;
                writeln!(self.out, "Frame received: [{record}] -> Processing... -> {progress}")?;
                writeln!(self.out)?;
            },
        }

        Ok(Some(progress))
    }

    /// Drain `source`, then write the final report and return the message.
    pub fn run<S: RecordSource + ?Sized>(mut self, source: &mut S) -> Result<String, RuntimeError> {
        writeln!(self.out, "Connection established. Waiting for frames...")?;
        writeln!(self.out)?;

        while let Some(record) = source.next_record() {
            self.step(&record)?;
        }

        info!(accepted = self.accepted, rejected = self.rejected, "record stream finished");

        let message = self.decoder.finish();
        writeln!(self.out)?;
        writeln!(self.out, "---")?;
        writeln!(self.out, "Data stream finished.")?;
        writeln!(self.out, "ASSEMBLED HIDDEN MESSAGE:")?;
        writeln!(self.out, "{message}")?;
        writeln!(self.out, "---")?;
        self.out.flush()?;

        Ok(message)
    }
}

/// Open the configured source and decode it to completion.
///
/// When the serial port cannot be opened and fallback is enabled, the demo
/// records are replayed instead.
pub fn launch<W: Write>(config: &Config, mut out: W) -> Result<String, RuntimeError> {
    let kind = config.source_kind();
    writeln!(out, "Starting PRT-7 decoder. Connecting to {kind}...")?;

    let mut source: Box<dyn RecordSource> = match source::open(&kind) {
        Ok(source) => source,
        Err(e) if matches!(kind, SourceKind::Serial(_)) && config.fallback_to_demo() => {
            warn!(error = %e, "serial port unavailable, replaying demo records");
            writeln!(out, "Could not open the serial port. Using test mode with simulated data.")?;
            Box::new(ScriptSource::demo())
        },
        Err(e) => return Err(e.into()),
    };

    let message = Runtime::new(&mut out).run(&mut source)?;
    writeln!(out, "Releasing resources... System shut down.")?;
    Ok(message)
}
