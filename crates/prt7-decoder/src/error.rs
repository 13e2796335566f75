//! Decoder error types.
//!
//! The decoding core never fails. Errors here come from the outer shell:
//! opening the transport and writing the report.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to open a record source.
///
/// Read failures after opening are not errors; they end the record stream.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The serial port could not be opened or configured.
    #[error("failed to open serial port {port}: {source}")]
    Serial {
        /// Port name that was requested.
        port: String,
        /// Underlying serial error.
        source: serialport::Error,
    },

    /// The input file could not be opened.
    #[error("failed to open input file {path:?}: {source}")]
    File {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Failure while running a decoding session.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No record source could be opened.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The report could not be written to the output sink.
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}
