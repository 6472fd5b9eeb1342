use std::io::{self, Write};

/// Ask the terminal on the other end of `out` to put `text` on the system
/// clipboard, via the OSC 52 escape sequence.  Terminals that don't support
/// it ignore the sequence.
pub(crate) fn copy<W: Write>(mut out: W, text: &str) -> io::Result<()> {
    write!(out, "\x1b]52;c;{}\x07", base64::encode(text))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy() {
        let mut out = Vec::new();
        copy(&mut out, "2024/02/15").unwrap();
        assert_eq!(out, b"\x1b]52;c;MjAyNC8wMi8xNQ==\x07");
    }
}
