//! Feishu event webhook endpoint.
//!
//! Answers the event subscription handshake: echoes the URL verification
//! challenge and acknowledges every other event with `{"code": 0}`.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Build the JSON reply for one webhook event body.
pub fn event_reply(body: &Value) -> Value {
    if let Some(challenge) = body.get("challenge") {
        return json!({ "challenge": challenge });
    }
    json!({ "code": 0 })
}

/// Serve the webhook endpoint on `port` until the process is stopped.
pub async fn run_server(port: u16) -> Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Webhook listening on {}", addr);

    loop {
        let (stream, peer) = listener.accept().await.context("Accept failed")?;
        debug!("Connection from {}", peer);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream).await {
                warn!("Webhook connection failed: {:#}", e);
            }
        });
    }
}

/// Read one HTTP request, reply with JSON, close.
///
/// Only the minimal HTTP/1.1 subset Feishu sends is understood: headers
/// terminated by a blank line and a Content-Length JSON body.
async fn handle_connection(mut stream: TcpStream) -> Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.context("Read failed")?;
        if n == 0 {
            anyhow::bail!("Connection closed before headers were complete");
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 64 * 1024 {
            anyhow::bail!("Header section too large");
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = content_length(&headers).unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.context("Read failed")?;
        if n == 0 {
            anyhow::bail!("Connection closed before body was complete");
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body: Value =
        serde_json::from_slice(&buf[body_start..body_start + content_length]).unwrap_or(Value::Null);
    debug!("Webhook event: {}", body);

    let reply = event_reply(&body).to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.len(),
        reply
    );
    stream
        .write_all(response.as_bytes())
        .await
        .context("Write failed")?;
    stream.shutdown().await.ok();

    Ok(())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_is_echoed_back() {
        let body = json!({ "challenge": "abc123", "type": "url_verification" });
        assert_eq!(event_reply(&body), json!({ "challenge": "abc123" }));
    }

    #[test]
    fn plain_events_are_acknowledged() {
        let body = json!({ "event": { "type": "record.created" } });
        assert_eq!(event_reply(&body), json!({ "code": 0 }));
        assert_eq!(event_reply(&Value::Null), json!({ "code": 0 }));
    }

    #[test]
    fn header_terminator_is_found() {
        let raw = b"POST /webhook/feishu HTTP/1.1\r\nContent-Length: 2\r\n\r\n{}";
        let pos = find_header_end(raw).unwrap();
        assert_eq!(&raw[pos + 4..], b"{}");
    }

    #[test]
    fn content_length_header_is_case_insensitive() {
        assert_eq!(content_length("content-LENGTH: 42\r\nHost: x"), Some(42));
        assert_eq!(content_length("Host: x"), None);
    }
}
