//! Tests for `ReqwestClient`.
//!
//! These tests only touch loopback addresses; the refused-connection case
//! binds an ephemeral port and releases it before connecting.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

use super::{HttpClient, HttpError, ReqwestClient, RpcRequest};

fn handler_url(port: u16) -> url::Url {
    url::Url::parse(&format!("http://127.0.0.1:{port}/daemon_command")).unwrap()
}

mod reqwest_client {
    use super::*;

    #[test]
    fn with_timeout_creates_client() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(1)).unwrap();
        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn post_sends_json_body_and_returns_answer() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            while !String::from_utf8_lossy(&request).contains(r#"["status"]}"#) {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream
                .write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope",
                )
                .unwrap();
            String::from_utf8_lossy(&request).to_ascii_lowercase()
        });

        let client = ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap();
        let request =
            RpcRequest::json(handler_url(port), &serde_json::json!({ "command": ["status"] }))
                .unwrap();

        let response = client.post(request).await.unwrap();
        let seen = server.join().unwrap();

        assert_eq!(response.status, http::StatusCode::NOT_FOUND);
        assert_eq!(response.body, b"nope");
        assert!(seen.starts_with("post /daemon_command http/1.1"));
        assert!(seen.contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn post_to_closed_port_is_connection_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ReqwestClient::with_timeout(Duration::from_secs(2)).unwrap();
        let request = RpcRequest {
            url: handler_url(port),
            body: Vec::new(),
        };

        let result = client.post(request).await;

        assert!(matches!(
            result,
            Err(HttpError::Connection(_) | HttpError::Timeout)
        ));
    }
}
