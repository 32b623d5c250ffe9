use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::session::{RawFrame, SerialConfig, Session};

/// What the reader thread reports, in arrival order.
#[derive(Debug, Clone)]
pub enum SerialEvent {
    Opened(String),
    Line(RawFrame),
    Error(String),
    Closed,
}

enum Command {
    Close,
}

/// Owns the reader thread for one session.
///
/// The thread opens the port, turns the byte stream into line events and
/// pushes them over a FIFO channel; whoever holds the service is the single
/// consumer. A fatal transport error is reported once, after which the
/// thread closes the session and exits; no reads happen past that point.
/// Dropping the service shuts the thread down the same way [`close`] does.
///
/// [`close`]: SerialService::close
pub struct SerialService {
    cfg: SerialConfig,
    tx_cmd: Sender<Command>,
    rx_evt: Receiver<SerialEvent>,
}

impl SerialService {
    pub fn open(cfg: SerialConfig) -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<Command>();
        let (tx_evt, rx_evt) = unbounded::<SerialEvent>();
        let cfg_clone = cfg.clone();

        std::thread::spawn(move || run_reader(cfg_clone, rx_cmd, tx_evt));

        Self {
            cfg,
            tx_cmd,
            rx_evt,
        }
    }

    /// Ask the reader thread to release the port and stop.
    pub fn close(&self) {
        let _ = self.tx_cmd.send(Command::Close);
    }

    pub fn events(&self) -> &Receiver<SerialEvent> {
        &self.rx_evt
    }

    pub fn config(&self) -> &SerialConfig {
        &self.cfg
    }
}

fn run_reader(cfg: SerialConfig, rx_cmd: Receiver<Command>, tx_evt: Sender<SerialEvent>) {
    let mut session = match Session::open(&cfg) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            let _ = tx_evt.send(SerialEvent::Error(e.to_string()));
            let _ = tx_evt.send(SerialEvent::Closed);
            return;
        }
    };
    let _ = tx_evt.send(SerialEvent::Opened(cfg.port_name.clone()));

    loop {
        match session.try_read_line() {
            Ok(Some(frame)) => {
                if tx_evt.send(SerialEvent::Line(frame)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("{e}");
                let _ = tx_evt.send(SerialEvent::Error(e.to_string()));
                break;
            }
        }
        match rx_cmd.try_recv() {
            Ok(Command::Close) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }
    }

    session.close();
    let _ = tx_evt.send(SerialEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn open_failure_reports_error_then_closed() {
        let cfg = SerialConfig::new("/dev/serscope-test-missing", 115_200);
        let service = SerialService::open(cfg);

        let events = service.events();
        let first = events.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(first, SerialEvent::Error(_)));
        let second = events.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(second, SerialEvent::Closed));
        // The thread is gone; nothing else arrives.
        assert!(events.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
