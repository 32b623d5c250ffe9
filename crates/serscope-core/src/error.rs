use thiserror::Error;

/// Fatal transport errors. Any of these ends the pipeline that hit it; there
/// are no retries and no reconnects.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The port could not be opened (bad device path, busy, permissions).
    #[error("failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// A read failed mid-stream.
    #[error("serial read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The transport reached end of stream.
    #[error("device disconnected")]
    Disconnected,

    /// The session was already released.
    #[error("session is closed")]
    Closed,
}
