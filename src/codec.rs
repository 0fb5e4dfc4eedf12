use bytes::BytesMut;
use std::{env, io, str};
use thiserror::Error as ThisError;
use tokio_util::codec::Decoder;

const DEFAULT_MAX_LINE_SIZE: usize = 64 * 1024;

#[derive(Debug, ThisError)]
pub enum CodecError {
    #[error("line exceeds the maximum of {max} bytes")]
    LineTooLong { max: usize },
    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[from] str::Utf8Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Splits the input into lines and each line into whitespace separated tokens. Blank lines decode
/// to an empty token list.
pub struct CommandCodec {
    max_length: usize,
}

impl CommandCodec {
    /// Uses `MAX_LINE_SIZE` from the environment as the line limit, falling back to 64 KiB.
    pub fn new() -> CommandCodec {
        let max_length = env::var("MAX_LINE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_LINE_SIZE);

        Self::with_max_length(max_length)
    }

    pub fn with_max_length(max_length: usize) -> CommandCodec {
        CommandCodec { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for CommandCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for CommandCodec {
    type Item = Vec<String>;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let newline = match src.iter().position(|b| *b == b'\n') {
            Some(newline) => newline,
            None if src.len() > self.max_length => {
                return Err(CodecError::LineTooLong {
                    max: self.max_length,
                })
            }
            // Not enough data to hold a full line.
            None => return Ok(None),
        };

        if newline > self.max_length {
            return Err(CodecError::LineTooLong {
                max: self.max_length,
            });
        }

        // Remove the line, including its terminator, from the buffer.
        let line = src.split_to(newline + 1);
        let line = str::from_utf8(&line[..newline])?;

        Ok(Some(tokenize(line)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(tokens) = self.decode(src)? {
            return Ok(Some(tokens));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // The input ended without a trailing newline.
        let line = src.split();
        let line = str::from_utf8(&line[..])?;

        Ok(Some(tokenize(line)))
    }
}

fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
