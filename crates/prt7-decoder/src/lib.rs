//! PRT-7 decoder
//!
//! A thin shell over [`prt7_core::Decoder`] that supplies records from a
//! serial port, a file, or the built-in demo data and writes the progress
//! report. All decoding logic lives in `prt7-core`.
//!
//! # Components
//!
//! - [`Config`]: Command-line configuration
//! - [`RecordSource`]: Ordered record supply (serial, file, demo)
//! - [`Runtime`]: Driver loop and report writer
//! - [`launch`]: Open the configured source and decode it

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod runtime;
pub mod source;

pub use config::{Config, SerialSettings, SourceKind};
pub use error::{RuntimeError, TransportError};
pub use runtime::{Runtime, launch};
pub use source::{
    DEMO_RECORDS, LineSource, MAX_RECORD_LEN, RecordSource, ScriptSource, SerialSource,
};
