//! Line cursor over the text part of an RTI file.

use crate::rti_pipeline::common::error::{FormatError, Result};

/// Result of asking the cursor for the next header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine<'a> {
    /// Whitespace-separated tokens of a non-comment line. Blank lines yield
    /// an empty token list.
    Tokens(Vec<&'a str>),
    /// The stream ended before another line started.
    EndOfStream,
}

/// Walks the header line by line, skipping `#` comment lines, and hands
/// the remaining bytes to the binary parser afterwards.
pub struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_raw_line(&mut self) -> Option<&'a [u8]> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.pos..];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some(line)
    }

    /// Advances to the next non-comment line. `name` labels the line in
    /// errors.
    pub fn next_line(&mut self, name: &'static str) -> Result<HeaderLine<'a>> {
        loop {
            let Some(line) = self.next_raw_line() else {
                return Ok(HeaderLine::EndOfStream);
            };
            if line.first() == Some(&b'#') {
                continue;
            }
            let text = std::str::from_utf8(line).map_err(|_| FormatError::MalformedHeader {
                line: name,
                reason: "line is not valid text".to_string(),
            })?;
            return Ok(HeaderLine::Tokens(text.split_whitespace().collect()));
        }
    }

    /// Like [`next_line`](Self::next_line) but treats end of stream as
    /// `UnexpectedEof`.
    pub fn expect_line(&mut self, name: &'static str) -> Result<Vec<&'a str>> {
        match self.next_line(name)? {
            HeaderLine::Tokens(tokens) => Ok(tokens),
            HeaderLine::EndOfStream => Err(FormatError::UnexpectedEof(name).into()),
        }
    }

    /// Parses a line of exactly three integers.
    pub fn expect_triple(&mut self, name: &'static str) -> Result<[i64; 3]> {
        let tokens = self.expect_line(name)?;
        if tokens.len() != 3 {
            return Err(FormatError::MalformedHeader {
                line: name,
                reason: format!("expected 3 integers, found {} tokens", tokens.len()),
            }
            .into());
        }
        let mut values = [0i64; 3];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            *slot = token.parse().map_err(|_| FormatError::MalformedHeader {
                line: name,
                reason: format!("{:?} is not an integer", token),
            })?;
        }
        Ok(values)
    }

    /// Bytes after the last consumed line.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }
}
