use std::io::{BufRead, Write};

use super::{LineSource, ReadOutcome};
use crate::error::ShellError;

/// Reads lines from any buffered reader and writes the prompt to `prompt_out`.
///
/// Bytes that are not UTF-8 are replaced rather than rejected. Reads cut
/// short by a signal are retried by the reader, so this source never yields
/// [`ReadOutcome::Interrupted`].
pub struct StreamInput<R, W> {
    reader: R,
    prompt_out: W,
    buffer: Vec<u8>,
}

impl<R: BufRead, W: Write> StreamInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self {
            reader,
            prompt_out,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead, W: Write> LineSource for StreamInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        write!(self.prompt_out, "{prompt}")?;
        self.prompt_out.flush()?;

        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        let line = self.buffer.strip_suffix(b"\n").unwrap_or(&self.buffer[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Ok(ReadOutcome::Line(String::from_utf8_lossy(line).into_owned()))
    }
}
