//! Byte-at-a-time line reader for integer input.
//!
//! The reader pulls exactly one byte per `read` call and stops at the first
//! `\n`, so it never consumes input that belongs to a later request. This
//! keeps it safe to share stdin with anything else reading after the guest.

use std::io::{self, ErrorKind, Read, Stdin};

use crate::error::HostError;
use crate::traits::InputSource;

/// `InputSource` reading newline-terminated lines from any `Read`.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    max_line_len: usize,
}

impl LineReader<Stdin> {
    /// Reader over the process's stdin.
    pub fn stdin(max_line_len: usize) -> Self {
        Self::new(io::stdin(), max_line_len)
    }
}

impl<R: Read> LineReader<R> {
    /// Create a reader that rejects lines longer than `max_line_len` bytes.
    pub fn new(reader: R, max_line_len: usize) -> Self {
        Self {
            reader,
            max_line_len,
        }
    }

    /// Maximum accepted line length in bytes, terminator excluded.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    fn next_byte(&mut self) -> Result<Option<u8>, HostError> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Skip the rest of an overlong line so the next read starts fresh.
    fn discard_rest_of_line(&mut self) -> Result<(), HostError> {
        while let Some(byte) = self.next_byte()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }
}

impl<R: Read + Send> InputSource for LineReader<R> {
    fn read_line(&mut self) -> Result<String, HostError> {
        let mut buf = Vec::new();
        loop {
            match self.next_byte()? {
                None => return Err(HostError::NoMoreInput),
                Some(b'\n') => break,
                Some(byte) => {
                    if buf.len() >= self.max_line_len {
                        tracing::debug!(limit = self.max_line_len, "discarding overlong input line");
                        self.discard_rest_of_line()?;
                        return Err(HostError::LineTooLong {
                            limit: self.max_line_len,
                        });
                    }
                    buf.push(byte);
                }
            }
        }

        let mut line = String::from_utf8_lossy(&buf).into_owned();
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
