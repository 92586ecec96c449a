#![forbid(unsafe_code)]

//! Line assembly for the console log writer, and panic line formatting.
//!
//! The formatter writes an event in several chunks; the console wants whole
//! lines. [`LineBuffer`] collects bytes and yields complete lines without
//! their terminator.

#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Next complete line, if a newline has been written.
    pub fn take_line(&mut self) -> Option<String> {
        let end = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Whatever is left, as a final line. `None` if empty.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Console line for a panic.
pub fn panic_line(location: Option<(&str, u32)>, message: &str) -> String {
    match location {
        Some((file, line)) => format!("folio panicked at {file}:{line}: {message}"),
        None => format!("folio panicked: {message}"),
    }
}
