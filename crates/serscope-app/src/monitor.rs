//! The filter/printer pipeline: echo debug lines carrying the marker.

use std::io::{self, Read, Write};

use serscope_core::{decode_line, ConnectionError, SerialConfig, Session};
use serscope_decode::contains_marker;

/// Run the monitor loop until the connection fails. Single thread, one
/// sequential loop; the error comes back only after the session has been
/// released, and the caller reports it once.
pub fn run(cfg: &SerialConfig, marker: &[u8]) -> Result<(), ConnectionError> {
    let mut session = Session::open(cfg)?;
    println!("Connected to {} at {} baud", cfg.port_name, cfg.baud_rate);

    let err = pump(&mut session, marker, &mut io::stdout().lock());
    session.close();
    Err(err)
}

/// Read lines forever; echo the ones whose raw bytes carry `marker` and
/// decode cleanly, drop everything else without a trace. Only a transport
/// failure gets out of the loop.
fn pump<R: Read, W: Write>(session: &mut Session<R>, marker: &[u8], out: &mut W) -> ConnectionError {
    loop {
        let frame = match session.read_line() {
            Ok(frame) => frame,
            Err(e) => return e,
        };
        if !contains_marker(&frame, marker) {
            continue;
        }
        if let Some(text) = decode_line(&frame) {
            let _ = writeln!(out, "Received: {text}");
        }
    }
}
