//! Server-sent event stream
//!
//! The service pushes card updates over `GET /stream` as `text/event-stream`
//! frames: one `data: <json>` line per update, blank-line terminated, with
//! `:` comment lines as keep-alives. [`SseDecoder`] is the pure incremental
//! decoder; [`EventStream`] wraps a live response body. Frames that do not
//! parse into a usable update are logged and skipped, never fatal.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::document::CardUpdate;
use crate::error::{ApiError, Result};

/// Incremental decoder for `text/event-stream` bytes
///
/// Feed arbitrary chunk boundaries; complete `data` payloads come out.
/// Multi-line data fields are joined with newlines, CRLF line endings are
/// tolerated, comment and unknown field lines are ignored.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a chunk and returns every payload it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                // Blank line terminates the event.
                if !self.data_lines.is_empty() {
                    payloads.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
            } else if line.starts_with(':') {
                // Keep-alive comment.
            } else {
                // event:/id:/retry: fields are not used by the service.
                debug!("Ignoring event stream field: {}", line);
            }
        }
        payloads
    }
}

/// A connected `/stream` subscription
pub struct EventStream {
    response: reqwest::Response,
    decoder: SseDecoder,
    pending: VecDeque<CardUpdate>,
}

impl EventStream {
    /// Opens the stream; a non-success status is an error carrying the body
    pub async fn connect(http: &reqwest::Client, base_url: &str) -> Result<Self> {
        let url = format!("{}/stream", base_url.trim_end_matches('/'));
        info!("Connecting to event stream at {}", url);

        let response = http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Self {
            response,
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        })
    }

    /// Next card update, or `None` when the server closed the stream
    ///
    /// Payloads that fail to parse or lack a usable id are skipped.
    pub async fn next_update(&mut self) -> Result<Option<CardUpdate>> {
        loop {
            if let Some(update) = self.pending.pop_front() {
                return Ok(Some(update));
            }

            match self.response.chunk().await? {
                Some(chunk) => {
                    for payload in self.decoder.feed(&chunk) {
                        match CardUpdate::from_json(&payload) {
                            Ok(update) if update.id > 0 => self.pending.push_back(update),
                            Ok(update) => {
                                debug!("Skipping update without usable id: {}", update.id)
                            }
                            Err(error) => {
                                warn!("Skipping malformed stream payload: {}", error)
                            }
                        }
                    }
                }
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_single_frame() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: {\"id\": 1}\n\n");
        assert_eq!(payloads, ["{\"id\": 1}"]);
    }

    #[test]
    fn reassembles_frames_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"id\"").is_empty());
        assert!(decoder.feed(b": 7}\n").is_empty());
        let payloads = decoder.feed(b"\ndata: {\"id\": 8}\n\n");
        assert_eq!(payloads, ["{\"id\": 7}", "{\"id\": 8}"]);
    }

    #[test]
    fn skips_keep_alive_comments() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b": keep-alive\n\ndata: {\"id\": 2}\n\n");
        assert_eq!(payloads, ["{\"id\": 2}"]);
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: {\"id\": 3}\r\n\r\n");
        assert_eq!(payloads, ["{\"id\": 3}"]);
    }

    #[test]
    fn joins_multi_line_data() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"data: line one\ndata: line two\n\n");
        assert_eq!(payloads, ["line one\nline two"]);
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.feed(b"event: update\nid: 4\ndata: {\"id\": 4}\n\n");
        assert_eq!(payloads, ["{\"id\": 4}"]);
    }

    #[test]
    fn blank_lines_without_data_emit_nothing() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\n\n\n").is_empty());
    }
}
