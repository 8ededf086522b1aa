//! NDJSON streaming parser for Ollama generate responses.
//!
//! Converts a raw `reqwest` byte stream into `GenerateChunk` values.
//! Handles partial lines, malformed lines, and the `done: true` terminator.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::OllamaError;
use crate::types::GenerateChunk;

/// Stream adapter that converts raw NDJSON bytes into `GenerateChunk` values.
///
/// The stream ends as soon as a chunk with `done: true` has been yielded,
/// even if more bytes remain buffered. Lines that fail to parse as JSON are
/// logged and skipped rather than failing the stream.
///
/// Buffering is byte-level: a network read can split a multi-byte character
/// across two chunks, so decoding happens per complete line, never per read.
pub struct GenerateStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: Vec<u8>,
    done: bool,
}

impl GenerateStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            done: false,
        }
    }
}

impl Stream for GenerateStream {
    type Item = Result<GenerateChunk, OllamaError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.done {
            return Poll::Ready(None);
        }

        loop {
            // Try to parse a complete line from the buffer
            if let Some(chunk) = try_parse_line(&mut this.buffer) {
                if chunk.done {
                    this.done = true;
                }
                return Poll::Ready(Some(Ok(chunk)));
            }

            // Need more data from the byte stream
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.buffer.extend_from_slice(&bytes);
                    // Loop to try parsing again
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(OllamaError::Network(e.to_string()))));
                }
                Poll::Ready(None) => {
                    // Stream ended without a done marker. A final unterminated
                    // line may still be sitting in the buffer.
                    if this.buffer.iter().all(u8::is_ascii_whitespace) {
                        return Poll::Ready(None);
                    }
                    this.buffer.push(b'\n');
                    if let Some(chunk) = try_parse_line(&mut this.buffer) {
                        if chunk.done {
                            this.done = true;
                        }
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Try to extract and parse a complete NDJSON line from the buffer.
/// Returns `None` if no complete, parseable line is available yet.
fn try_parse_line(buffer: &mut Vec<u8>) -> Option<GenerateChunk> {
    loop {
        let newline_pos = buffer.iter().position(|&b| b == b'\n')?;
        // Drain through the newline, keep the line without it.
        let line: Vec<u8> = buffer.drain(..=newline_pos).take(newline_pos).collect();

        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<GenerateChunk>(&line) {
            Ok(chunk) => return Some(chunk),
            Err(e) => {
                let preview: String = String::from_utf8_lossy(&line).chars().take(200).collect();
                tracing::debug!(
                    error = %e,
                    line = %preview,
                    "Skipping malformed NDJSON line"
                );
            }
        }
    }
}
