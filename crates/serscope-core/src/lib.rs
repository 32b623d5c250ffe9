//! Core functionalities: serial session, line framing, text decoding,
//! reader service.

pub mod decode;
pub mod error;
pub mod framing;
pub mod service;
pub mod session;

pub use decode::decode_line;
pub use error::ConnectionError;
pub use framing::FrameBuffer;
pub use service::{SerialEvent, SerialService};
pub use session::{list_ports, PortInfo, RawFrame, SerialConfig, Session};
