use std::io::{self, Read};
use std::time::Duration;

use serialport::{SerialPort, SerialPortInfo};

use crate::error::ConnectionError;
use crate::framing::FrameBuffer;

/// One newline-terminated line of raw bytes, terminator included.
pub type RawFrame = Vec<u8>;

/// How long one poll of the port waits before reporting "nothing yet". This
/// is an internal polling interval, not a read deadline; `read_line` waits
/// through any number of them.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

const READ_CHUNK: usize = 4096;

/// A detected serial port plus whatever USB identity the platform reports.
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub port_name: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
    pub product: Option<String>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let (vid, pid, product) = match info.port_type {
            serialport::SerialPortType::UsbPort(usb) => {
                (Some(usb.vid), Some(usb.pid), usb.product)
            }
            _ => (None, None, None),
        };
        Self {
            port_name: info.port_name,
            vid,
            pid,
            product,
        }
    }
}

impl PortInfo {
    /// `name (VVVV:PPPP)` when USB IDs are known, bare name otherwise.
    pub fn display_name(&self) -> String {
        match (self.vid, self.pid) {
            (Some(vid), Some(pid)) => format!("{} ({:04X}:{:04X})", self.port_name, vid, pid),
            _ => self.port_name.clone(),
        }
    }
}

/// Available serial ports.
pub fn list_ports() -> Vec<PortInfo> {
    serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(PortInfo::from)
        .collect()
}

/// Transport settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow_control: serialport::FlowControl,
}

impl SerialConfig {
    /// Config for `port` at `baud`, 8-N-1 with no flow control.
    pub fn new(port_name: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            ..Default::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port_name: String::new(),
            baud_rate: 115_200,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow_control: serialport::FlowControl::None,
        }
    }
}

/// An open serial connection, owned exclusively for the run of a pipeline.
///
/// The session is generic over its byte source so the read loop can be
/// exercised with in-memory readers; the default is a real port opened by
/// [`Session::open`]. Dropping the session releases the port; [`Session::close`]
/// does the same eagerly and may be called any number of times.
pub struct Session<R: Read = Box<dyn SerialPort>> {
    reader: Option<R>,
    frames: FrameBuffer,
}

impl Session<Box<dyn SerialPort>> {
    /// Open `cfg.port_name` at `cfg.baud_rate`.
    pub fn open(cfg: &SerialConfig) -> Result<Self, ConnectionError> {
        let port = serialport::new(&cfg.port_name, cfg.baud_rate)
            .data_bits(cfg.data_bits)
            .parity(cfg.parity)
            .stop_bits(cfg.stop_bits)
            .flow_control(cfg.flow_control)
            .timeout(POLL_TIMEOUT)
            .open()
            .map_err(|source| ConnectionError::Open {
                port: cfg.port_name.clone(),
                source,
            })?;
        log::info!("opened {} at {} baud", cfg.port_name, cfg.baud_rate);
        Ok(Self::attach(port))
    }
}

impl<R: Read> Session<R> {
    /// Wrap an already-open byte source.
    pub fn attach(reader: R) -> Self {
        Self {
            reader: Some(reader),
            frames: FrameBuffer::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// One poll cycle: `Ok(None)` when no complete line has arrived yet.
    ///
    /// End of stream is a disconnect and therefore fatal; the port's poll
    /// timeout is absorbed here and never surfaces as an error.
    pub fn try_read_line(&mut self) -> Result<Option<RawFrame>, ConnectionError> {
        if let Some(frame) = self.frames.pop_frame() {
            return Ok(Some(frame));
        }
        let reader = self.reader.as_mut().ok_or(ConnectionError::Closed)?;
        let mut chunk = [0u8; READ_CHUNK];
        match reader.read(&mut chunk) {
            Ok(0) => Err(ConnectionError::Disconnected),
            Ok(n) => {
                self.frames.extend(&chunk[..n]);
                Ok(self.frames.pop_frame())
            }
            Err(e)
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::Interrupted =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Block until a full line arrives or the transport fails. A silent
    /// device keeps this waiting indefinitely.
    pub fn read_line(&mut self) -> Result<RawFrame, ConnectionError> {
        loop {
            if let Some(frame) = self.try_read_line()? {
                return Ok(frame);
            }
        }
    }

    /// Release the port. Safe to call any number of times.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("serial session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Replays a fixed sequence of read results, then reports end of stream.
    struct Scripted {
        steps: VecDeque<io::Result<Vec<u8>>>,
    }

    impl Scripted {
        fn new(steps: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                steps: steps.into(),
            }
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.steps.pop_front() {
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn reads_lines_in_arrival_order_then_disconnects() {
        let mut session = Session::attach(Cursor::new(b"one\ntwo\n".to_vec()));
        assert_eq!(session.read_line().unwrap(), b"one\n");
        assert_eq!(session.read_line().unwrap(), b"two\n");
        assert!(matches!(
            session.read_line(),
            Err(ConnectionError::Disconnected)
        ));
    }

    #[test]
    fn close_is_idempotent() {
        let mut session = Session::attach(Cursor::new(Vec::new()));
        assert!(session.is_open());
        session.close();
        session.close();
        session.close();
        assert!(!session.is_open());
        assert!(matches!(session.read_line(), Err(ConnectionError::Closed)));
    }

    #[test]
    fn poll_timeout_is_not_fatal() {
        let mut session = Session::attach(Scripted::new(vec![
            Err(io::Error::new(io::ErrorKind::TimedOut, "no data")),
            Ok(b"late\n".to_vec()),
        ]));
        assert!(matches!(session.try_read_line(), Ok(None)));
        assert_eq!(session.read_line().unwrap(), b"late\n");
    }

    #[test]
    fn read_failure_is_fatal() {
        let mut session = Session::attach(Scripted::new(vec![
            Ok(b"good\n".to_vec()),
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone")),
        ]));
        assert_eq!(session.read_line().unwrap(), b"good\n");
        assert!(matches!(session.read_line(), Err(ConnectionError::Io(_))));
        // The caller still owns the release step.
        assert!(session.is_open());
        session.close();
        assert!(matches!(session.read_line(), Err(ConnectionError::Closed)));
    }

    #[test]
    fn partial_tail_without_terminator_is_never_a_frame() {
        let mut session = Session::attach(Cursor::new(b"head\ntail".to_vec()));
        assert_eq!(session.read_line().unwrap(), b"head\n");
        assert!(matches!(
            session.read_line(),
            Err(ConnectionError::Disconnected)
        ));
    }
}
