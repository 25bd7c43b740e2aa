//! Server-sent event parsing.

use futures::{Stream, StreamExt};
use panelwright_error::{ClientError, ClientErrorKind};
use serde_json::Value;

/// Parse one SSE line. Lines that are not `data:` lines or do not hold
/// valid JSON yield `None`.
///
/// # Examples
///
/// ```
/// use panelwright_client::parse_sse_line;
///
/// assert!(parse_sse_line(r#"data: {"author": "script_generator"}"#).is_some());
/// assert!(parse_sse_line("data: not json").is_none());
/// assert!(parse_sse_line(": keep-alive").is_none());
/// ```
pub fn parse_sse_line(line: &str) -> Option<Value> {
    let data = line.trim_end_matches('\r').strip_prefix("data:")?.trim();
    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "Skipping invalid SSE payload");
            None
        }
    }
}

/// Parse a complete SSE body into events.
pub fn parse_sse_text(text: &str) -> Vec<Value> {
    text.lines().filter_map(parse_sse_line).collect()
}

/// Turn a streaming response body into a stream of events.
pub(crate) fn parse_sse_stream(
    response: reqwest::Response,
) -> impl Stream<Item = Result<Value, ClientError>> {
    response
        .bytes_stream()
        .scan(Vec::<u8>::new(), |buffer, bytes_result| {
            let items: Vec<Result<Value, ClientError>> = match bytes_result {
                Ok(bytes) => {
                    // A chunk may end inside a multi-byte character
                    buffer.extend_from_slice(&bytes);
                    let mut events = Vec::new();
                    while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                        let line: Vec<u8> = buffer.drain(..=pos).collect();
                        let line = String::from_utf8_lossy(&line[..pos]);
                        if let Some(event) = parse_sse_line(&line) {
                            events.push(Ok(event));
                        }
                    }
                    events
                }
                Err(e) => vec![Err(ClientError::new(ClientErrorKind::Stream(format!(
                    "Stream error: {}",
                    e
                ))))],
            };
            futures::future::ready(Some(futures::stream::iter(items)))
        })
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_skips_noise() {
        let body = "data: {\"id\": \"1\"}\n\n: comment\ndata: {broken\n\ndata:{\"id\": \"2\"}\r\n\n";
        let events = parse_sse_text(body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["id"], "1");
        assert_eq!(events[1]["id"], "2");
    }
}
