//! Record sources.
//!
//! Abstracts over anything that can deliver complete PRT-7 records in order.
//! Production reads a serial port; tests and offline runs use files or the
//! built-in demo records.
//!
//! A source never fails mid-stream. EOF and read errors end the stream, and
//! the decoder reports whatever it assembled up to that point. Read timeouts
//! only end it when an idle limit is configured.

use std::{
    collections::VecDeque,
    fs::File,
    io::{self, BufRead, BufReader},
    time::{Duration, Instant},
};

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, trace, warn};

use crate::{
    config::{SerialSettings, SourceKind},
    error::TransportError,
};

/// Records replayed when no transport is available.
pub const DEMO_RECORDS: [&str; 12] =
    ["L,H", "L,O", "L,L", "M,2", "L,A", "L,Space", "L,W", "M,-2", "L,O", "L,R", "L,L", "L,D"];

/// Ordered supply of complete text records.
pub trait RecordSource {
    /// Next record without its line terminator, or `None` once the stream
    /// has ended.
    fn next_record(&mut self) -> Option<String>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn next_record(&mut self) -> Option<String> {
        (**self).next_record()
    }
}

/// Longest record accepted, in bytes, not counting the line terminator.
pub const MAX_RECORD_LEN: usize = 255;

/// Newline-delimited records from any buffered reader.
///
/// Strips `\r\n` or `\n`, skips blank lines, and decodes invalid UTF-8
/// lossily. A final line without a terminator still counts as a record.
/// Lines longer than [`MAX_RECORD_LEN`] are dropped without being buffered
/// in full.
///
/// A read timeout keeps the partial line and waits for more data. With an
/// idle limit set, the stream ends once no byte has arrived for that long.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    overlong: bool,
    idle_limit: Option<Duration>,
    last_data: Instant,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader. Timeouts never end the stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            overlong: false,
            idle_limit: None,
            last_data: Instant::now(),
        }
    }

    /// End the stream once the reader has been idle for `limit`.
    #[must_use]
    pub fn with_idle_limit(mut self, limit: Option<Duration>) -> Self {
        self.idle_limit = limit;
        self
    }

    /// Finish the pending line. Returns the record if it is non-empty and
    /// within the length limit.
    fn take_line(&mut self) -> Option<String> {
        let overlong = std::mem::take(&mut self.overlong);
        let line = strip_terminator(&self.buf);
        if !overlong && line.len() > MAX_RECORD_LEN {
            debug!(len = line.len(), "record too long, discarding");
        }

        let keep = !overlong && !line.is_empty() && line.len() <= MAX_RECORD_LEN;
        let record = keep.then(|| String::from_utf8_lossy(line).into_owned());
        self.buf.clear();
        record
    }
}

impl LineSource<BufReader<File>> {
    /// Open a text file of records.
    pub fn open_file(path: &std::path::Path) -> Result<Self, TransportError> {
        let file = File::open(path)
            .map_err(|source| TransportError::File { path: path.to_path_buf(), source })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> RecordSource for LineSource<R> {
    fn next_record(&mut self) -> Option<String> {
        loop {
            let (used, complete) = match self.reader.fill_buf() {
                Ok([]) => {
                    // EOF: a pending unterminated line is the last record.
                    return self.take_line();
                },
                Ok(available) => {
                    let (chunk, complete) = match available.iter().position(|&b| b == b'\n') {
                        Some(end) => (&available[..=end], true),
                        None => (available, false),
                    };
                    push_chunk(&mut self.buf, &mut self.overlong, chunk);
                    (chunk.len(), complete)
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    let last_data = self.last_data;
                    if self.idle_limit.is_some_and(|limit| last_data.elapsed() >= limit) {
                        debug!("link idle, ending record stream");
                        return None;
                    }
                    trace!(pending = self.buf.len(), "read timed out, waiting");
                    continue;
                },
                Err(e) => {
                    warn!(error = %e, "read failed, ending record stream");
                    return None;
                },
            };

            self.reader.consume(used);
            self.last_data = Instant::now();

            if !complete {
                continue;
            }
            if let Some(record) = self.take_line() {
                return Some(record);
            }
        }
    }
}

/// Append `chunk` to the pending line, or switch to discarding once the line
/// can no longer fit.
fn push_chunk(buf: &mut Vec<u8>, overlong: &mut bool, chunk: &[u8]) {
    if *overlong {
        return;
    }

    // Room for the record plus "\r\n".
    if buf.len() + chunk.len() > MAX_RECORD_LEN + 2 {
        debug!(len = buf.len() + chunk.len(), "record too long, discarding");
        buf.clear();
        *overlong = true;
        return;
    }

    buf.extend_from_slice(chunk);
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Records read from a serial port (8N1, no flow control).
pub struct SerialSource {
    lines: LineSource<BufReader<Box<dyn SerialPort>>>,
}

impl SerialSource {
    /// Open and configure the port.
    pub fn open(settings: &SerialSettings) -> Result<Self, TransportError> {
        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(settings.timeout)
            .open()
            .map_err(|source| TransportError::Serial { port: settings.port.clone(), source })?;

        info!(port = %settings.port, baud = settings.baud_rate, "serial port opened");
        Ok(Self {
            lines: LineSource::new(BufReader::new(port)).with_idle_limit(settings.idle_timeout),
        })
    }
}

impl RecordSource for SerialSource {
    fn next_record(&mut self) -> Option<String> {
        self.lines.next_record()
    }
}

/// Fixed list of records, replayed in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    records: VecDeque<String>,
}

impl ScriptSource {
    /// Replay the given records.
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { records: records.into_iter().map(Into::into).collect() }
    }

    /// The built-in demo records, which decode to `HOLA WORLD`.
    pub fn demo() -> Self {
        Self::new(DEMO_RECORDS)
    }
}

impl RecordSource for ScriptSource {
    fn next_record(&mut self) -> Option<String> {
        self.records.pop_front()
    }
}

/// Open the source a configuration asks for.
pub fn open(kind: &SourceKind) -> Result<Box<dyn RecordSource>, TransportError> {
    match kind {
        SourceKind::Serial(settings) => Ok(Box::new(SerialSource::open(settings)?)),
        SourceKind::File(path) => Ok(Box::new(LineSource::open_file(path)?)),
        SourceKind::Demo => Ok(Box::new(ScriptSource::demo())),
    }
}
