/// Splits a raw byte stream into newline-terminated frames.
///
/// Bytes arrive from the port in arbitrary chunks; a partial line is held
/// until its terminator shows up in a later chunk.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete frame, terminator included. `None` until one is buffered.
    pub fn pop_frame(&mut self) -> Option<Vec<u8>> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        Some(self.buf.drain(..=pos).collect())
    }

    /// Bytes held back waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_frames_in_order() {
        let mut frames = FrameBuffer::new();
        frames.extend(b"one\ntwo\n");
        assert_eq!(frames.pop_frame().as_deref(), Some(&b"one\n"[..]));
        assert_eq!(frames.pop_frame().as_deref(), Some(&b"two\n"[..]));
        assert_eq!(frames.pop_frame(), None);
    }

    #[test]
    fn holds_partial_line_across_chunks() {
        let mut frames = FrameBuffer::new();
        frames.extend(b"par");
        assert_eq!(frames.pop_frame(), None);
        assert_eq!(frames.pending(), 3);
        frames.extend(b"tial\nrest");
        assert_eq!(frames.pop_frame().as_deref(), Some(&b"partial\n"[..]));
        assert_eq!(frames.pop_frame(), None);
        assert_eq!(frames.pending(), 4);
    }

    #[test]
    fn empty_line_is_a_frame() {
        let mut frames = FrameBuffer::new();
        frames.extend(b"\n");
        assert_eq!(frames.pop_frame().as_deref(), Some(&b"\n"[..]));
    }
}
