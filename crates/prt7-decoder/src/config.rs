//! Command-line configuration.

use std::{fmt, path::PathBuf, time::Duration};

use clap::Parser;

/// Serial port used when none is given.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Line speed of PRT-7 transmitters.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Serial read timeout. Expiry only wakes the reader; it does not end the
/// stream.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// PRT-7 decoder configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "prt7-decoder", version, about = "Reassemble hidden PRT-7 messages from a serial link")]
pub struct Config {
    /// Serial port to read frames from.
    #[arg(long, env = "PRT7_PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// Baud rate of the serial link.
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,

    /// Serial read timeout in milliseconds. A timed-out read keeps waiting.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// End the stream after this many milliseconds without data. Without it
    /// the decoder waits until the port closes.
    #[arg(long, value_name = "MS")]
    pub idle_timeout_ms: Option<u64>,

    /// Read newline-delimited records from a file instead of the port.
    #[arg(long, value_name = "FILE", conflicts_with = "demo")]
    pub input: Option<PathBuf>,

    /// Replay the built-in demo records instead of opening the port.
    #[arg(long)]
    pub demo: bool,

    /// Fail when the serial port cannot be opened instead of replaying the
    /// demo records.
    #[arg(long)]
    pub no_fallback: bool,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// Pick the record source. Demo wins over a file, a file over the port.
    pub fn source_kind(&self) -> SourceKind {
        if self.demo {
            return SourceKind::Demo;
        }

        match &self.input {
            Some(path) => SourceKind::File(path.clone()),
            None => SourceKind::Serial(self.serial_settings()),
        }
    }

    /// Serial link parameters.
    pub fn serial_settings(&self) -> SerialSettings {
        SerialSettings {
            port: self.port.clone(),
            baud_rate: self.baud,
            timeout: Duration::from_millis(self.timeout_ms),
            idle_timeout: self.idle_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Whether a failed serial open falls back to the demo records.
    pub fn fallback_to_demo(&self) -> bool {
        !self.no_fallback
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud: DEFAULT_BAUD_RATE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            idle_timeout_ms: None,
            input: None,
            demo: false,
            no_fallback: false,
            log_level: "warn".to_string(),
        }
    }
}

/// Serial link parameters (8 data bits, no parity, one stop bit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    /// Port name, e.g. `/dev/ttyUSB0` or `COM3`.
    pub port: String,
    /// Line speed.
    pub baud_rate: u32,
    /// Per-read timeout.
    pub timeout: Duration,
    /// Silence after which the record stream ends. `None` waits for EOF or
    /// an error.
    pub idle_timeout: Option<Duration>,
}

/// Where records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A serial port.
    Serial(SerialSettings),
    /// A text file with one record per line.
    File(PathBuf),
    /// The built-in demo records.
    Demo,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial(settings) => {
                write!(f, "serial port {} @ {} baud", settings.port, settings.baud_rate)
            },
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Demo => f.write_str("demo data"),
        }
    }
}
