use std::collections::TryReserveError;
use std::io::{self, Read, StdinLock};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::trace;

pub const INITIAL_STRING_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(String),
    EndOfInput,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Out of memory while reading input: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

impl ReadError {
    // A bad line is discarded; the stream itself is still usable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ReadError::InvalidUtf8(_))
    }
}

/// Reads one line at a time from a byte stream into a growable buffer.
pub struct LineReader<R> {
    input: R,
    initial_capacity: usize,
}

impl LineReader<StdinLock<'static>> {
    pub fn stdin() -> Self {
        LineReader::new(io::stdin().lock())
    }
}

impl<R: Read> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self::with_capacity(input, INITIAL_STRING_SIZE)
    }

    pub fn with_capacity(input: R, initial_capacity: usize) -> Self {
        LineReader {
            input,
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Reads up to and including the next `\n`, or to end of stream.
    ///
    /// The terminator (and a `\r` right before it) is not part of the returned
    /// line. A last line without a terminator is still a `Line`; the next call
    /// then reports `EndOfInput`.
    pub fn read_line(&mut self) -> Result<LineRead, ReadError> {
        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(self.initial_capacity)?;
        let mut saw_any = false;
        let mut terminated = false;

        while let Some(byte) = self.next_byte()? {
            saw_any = true;
            if byte == b'\n' {
                terminated = true;
                break;
            }
            if buf.len() == buf.capacity() {
                let grow_by = buf.capacity();
                buf.try_reserve_exact(grow_by)?;
                trace!(capacity = buf.capacity(), "grew line buffer");
            }
            buf.push(byte);
        }

        if !saw_any {
            return Ok(LineRead::EndOfInput);
        }
        if terminated && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(LineRead::Line(String::from_utf8(buf)?))
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
