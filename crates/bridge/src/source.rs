//! Line-oriented data sources.
//!
//! [`LineSource`] is the seam between the ingestion loop and whatever
//! produces sensor lines. Production uses [`SerialSource`]; tests plug in
//! scripted sources.

use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use serialport::SerialPort;

/// A transport-level failure of the data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The serial device could not be opened or queried.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Reading from the device failed.
    #[error("Read failed: {0}")]
    Io(#[from] io::Error),

    /// The device stopped producing bytes (unplugged, closed).
    #[error("Source closed")]
    Closed,
}

/// A blocking source of text lines.
pub trait LineSource: Send {
    /// Device path or other human-readable identity.
    fn identifier(&self) -> &str;

    /// Whether input is waiting to be read.
    fn has_input(&mut self) -> Result<bool, SourceError>;

    /// Read one line without its terminator.
    ///
    /// Waits at most the source's read timeout. Returns `Ok(None)` if no
    /// complete line arrived in time; partial input is kept for the next
    /// call.
    fn read_line(&mut self) -> Result<Option<String>, SourceError>;
}

/// Settings for opening a serial device.
#[derive(Debug, Clone)]
pub struct SerialSettings {
    pub path: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
    /// Pause after opening; most boards reset when the port opens.
    pub settle: Duration,
}

/// A serial device producing newline-terminated text.
pub struct SerialSource {
    path: String,
    reader: BufReader<Box<dyn SerialPort>>,
    pending: Vec<u8>,
}

impl SerialSource {
    /// Open the device and wait for it to settle.
    ///
    /// Blocks for `settings.settle`; call from a blocking context.
    pub fn open(settings: &SerialSettings) -> Result<Self, SourceError> {
        let port = serialport::new(&settings.path, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()?;

        std::thread::sleep(settings.settle);

        tracing::info!(
            path = %settings.path,
            baud_rate = settings.baud_rate,
            "Serial source opened",
        );

        Ok(Self {
            path: settings.path.clone(),
            reader: BufReader::new(port),
            pending: Vec::new(),
        })
    }
}

impl LineSource for SerialSource {
    fn identifier(&self) -> &str {
        &self.path
    }

    fn has_input(&mut self) -> Result<bool, SourceError> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }
        Ok(self.reader.get_ref().bytes_to_read()? > 0)
    }

    fn read_line(&mut self) -> Result<Option<String>, SourceError> {
        read_line_into(&mut self.reader, &mut self.pending)
    }
}

/// Shared line assembly for any buffered byte stream.
///
/// Bytes read before a timeout stay in `pending`. Invalid UTF-8 is replaced
/// rather than rejected; the parser ignores anything it does not recognise.
pub fn read_line_into<R: BufRead>(
    reader: &mut R,
    pending: &mut Vec<u8>,
) -> Result<Option<String>, SourceError> {
    match reader.read_until(b'\n', pending) {
        Ok(0) if pending.is_empty() => Err(SourceError::Closed),
        Ok(_) => {
            let line = String::from_utf8_lossy(pending).trim_end().to_string();
            pending.clear();
            Ok(Some(line))
        }
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
            ) =>
        {
            Ok(None)
        }
        Err(e) => Err(SourceError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn reads_lines_and_strips_terminators() {
        let mut reader = Cursor::new(b"Temp: 20 \xC2\xB0C\r\nHumidity: 50 %\n".to_vec());
        let mut pending = Vec::new();

        assert_eq!(
            read_line_into(&mut reader, &mut pending).unwrap().as_deref(),
            Some("Temp: 20 °C")
        );
        assert_eq!(
            read_line_into(&mut reader, &mut pending).unwrap().as_deref(),
            Some("Humidity: 50 %")
        );
        assert_matches!(read_line_into(&mut reader, &mut pending), Err(SourceError::Closed));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut reader = Cursor::new(b"Temp: 2\xFF0 \n".to_vec());
        let mut pending = Vec::new();
        let line = read_line_into(&mut reader, &mut pending).unwrap().unwrap();
        assert!(line.starts_with("Temp: 2"));
        assert!(line.contains('\u{FFFD}'));
    }

    /// Yields a partial line, then a timeout, then the rest.
    struct Stuttering {
        chunks: Vec<io::Result<Vec<u8>>>,
    }

    impl Read for Stuttering {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0)?;
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn timeout_keeps_partial_line() {
        let inner = Stuttering {
            chunks: vec![
                Ok(b"Soil Mois".to_vec()),
                Err(io::Error::new(io::ErrorKind::TimedOut, "timed out")),
                Ok(b"ture: 45 %\n".to_vec()),
            ],
        };
        let mut reader = BufReader::new(inner);
        let mut pending = Vec::new();

        assert_eq!(read_line_into(&mut reader, &mut pending).unwrap(), None);
        assert_eq!(pending, b"Soil Mois");
        assert_eq!(
            read_line_into(&mut reader, &mut pending).unwrap().as_deref(),
            Some("Soil Moisture: 45 %")
        );
    }

    #[test]
    fn other_io_errors_are_faults() {
        let inner = Stuttering {
            chunks: vec![Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))],
        };
        let mut reader = BufReader::new(inner);
        let mut pending = Vec::new();

        assert_matches!(
            read_line_into(&mut reader, &mut pending),
            Err(SourceError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe
        );
    }
}
