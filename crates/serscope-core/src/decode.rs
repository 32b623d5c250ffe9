use encoding_rs::UTF_8;

/// Decode one raw frame as strict UTF-8 and strip the line terminator plus
/// any trailing whitespace.
///
/// Returns `None` for invalid byte sequences: the line is unusable and gets
/// dropped, the session stays valid. No replacement characters are produced.
pub fn decode_line(frame: &[u8]) -> Option<String> {
    let text = UTF_8.decode_without_bom_handling_and_without_replacement(frame)?;
    Some(text.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_newline() {
        assert_eq!(
            decode_line(b"debug printf hello\n").as_deref(),
            Some("debug printf hello")
        );
    }

    #[test]
    fn strips_crlf_and_trailing_spaces() {
        assert_eq!(decode_line(b"value: 42 \r\n").as_deref(), Some("value: 42"));
    }

    #[test]
    fn leading_whitespace_is_kept() {
        assert_eq!(decode_line(b"  indented\n").as_deref(), Some("  indented"));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(decode_line(b"\xff\xfe broken\n"), None);
    }

    #[test]
    fn empty_frame_decodes_to_empty_line() {
        assert_eq!(decode_line(b"\n").as_deref(), Some(""));
    }
}
