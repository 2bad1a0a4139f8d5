//! HTTP transport seam.
//!
//! The client only needs one capability from HTTP: POST a body with some
//! headers and a timeout, and hand back the status and body as text. Keeping
//! that behind a trait lets tests swap in a stub and lets callers bring their
//! own client.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::TransportError;

/// An outgoing POST request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub timeout: Duration,
}

/// Whatever the server answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends POST requests.
///
/// Implementations must return `Err` only when no response was received;
/// error statuses are returned as `Ok` responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the underlying HTTP client
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .post(&request.url)
            .timeout(request.timeout)
            .body(request.body);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| classify(&request.url, err))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| classify(&request.url, err))?;

        Ok(HttpResponse { status, body })
    }
}

fn classify(url: &str, err: reqwest::Error) -> TransportError {
    let url = url.to_string();
    if err.is_timeout() {
        TransportError::Timeout { url }
    } else if err.is_connect() {
        TransportError::Connect {
            url,
            message: err.to_string(),
        }
    } else {
        TransportError::Other {
            url,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    // Reads headers plus Content-Length bytes of body so the socket is
    // drained before the reply is written
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&received).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&received).to_string()
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_connect_failure_is_a_transport_error() {
        // Bind then drop to get a port with nothing listening on it
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let result = transport
            .post(HttpRequest {
                url: format!("http://{}/apps/1/channels/c/events", addr),
                headers: vec![],
                body: "{}".to_string(),
                timeout: Duration::from_secs(5),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_post_returns_status_and_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let body = "{}";
            let reply = format!(
                "HTTP/1.1 202 Accepted\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport
            .post(HttpRequest {
                url: format!("http://{}/apps/1/channels/c/events", addr),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: "{}".to_string(),
                timeout: Duration::from_secs(5),
            })
            .await
            .unwrap();

        assert_eq!(response, HttpResponse::new(202, "{}"));
        server.await.unwrap();
    }
}
