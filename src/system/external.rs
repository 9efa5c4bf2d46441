//! External address lookup through an HTTP IP-echo service.

use std::net::IpAddr;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::Uri;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::error::{IpiError, Result};

/// HTTP(S) client for echo services that answer with the caller's address.
pub struct EchoClient {
    client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
    timeout: Duration,
}

impl EchoClient {
    pub fn new(timeout: Duration) -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(https);

        Self { client, timeout }
    }

    /// GET `url` and parse the body as an IP address.
    pub async fn fetch(&self, url: &str) -> Result<IpAddr> {
        let uri: Uri = url
            .parse()
            .map_err(|e| IpiError::Http(format!("invalid URL {url}: {e}")))?;

        let body = tokio::time::timeout(self.timeout, self.get_body(uri))
            .await
            .map_err(|_| IpiError::Timeout(self.timeout.as_secs()))??;

        parse_echo_body(&body)
    }

    async fn get_body(&self, uri: Uri) -> Result<Bytes> {
        let response = self
            .client
            .get(uri)
            .await
            .map_err(|e| IpiError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpiError::Http(format!("echo service answered {status}")));
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| IpiError::Http(e.to_string()))?
            .to_bytes();

        Ok(body)
    }
}

/// Echo services answer with a bare address, possibly followed by a newline.
fn parse_echo_body(body: &[u8]) -> Result<IpAddr> {
    let text = std::str::from_utf8(body)
        .map_err(|_| IpiError::ParseError("echo response is not UTF-8".into()))?
        .trim();

    text.parse()
        .map_err(|_| IpiError::ParseError(format!("echo response is not an address: {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Lookup;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_parse_echo_body() {
        assert_eq!(
            parse_echo_body(b"203.0.113.7\n").unwrap(),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            parse_echo_body(b"2001:db8::1").unwrap(),
            "2001:db8::1".parse::<IpAddr>().unwrap()
        );
        assert!(parse_echo_body(b"<html>rate limited</html>").is_err());
    }

    #[tokio::test]
    async fn test_fetch_from_local_echo_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\n203.0.113.7",
                )
                .await
                .unwrap();
        });

        let client = EchoClient::new(Duration::from_secs(5));
        let ip = client.fetch(&format!("http://{addr}/")).await.unwrap();
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_service_degrades_to_unavailable() {
        // Grab a free port, then close it so nothing is listening.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let client = EchoClient::new(Duration::from_secs(2));
        let lookup: Lookup<IpAddr> = client.fetch(&format!("http://{addr}/")).await.into();
        assert!(!lookup.is_found());
    }

    #[tokio::test]
    async fn test_error_status_is_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .await
                .unwrap();
        });

        let client = EchoClient::new(Duration::from_secs(5));
        let err = client.fetch(&format!("http://{addr}/")).await.unwrap_err();
        assert!(matches!(err, IpiError::Http(_)));
    }
}
