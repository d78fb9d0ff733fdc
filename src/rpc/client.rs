//! Production transport using reqwest.

use std::time::Duration;

use super::http::JSON_CONTENT_TYPE;
use super::{HttpClient, HttpError, RpcRequest, RpcResponse};

/// Production transport using reqwest.
///
/// The control endpoint is a local or LAN address, so proxies from the
/// environment are ignored.
///
/// # Example
///
/// ```no_run
/// use coind::rpc::{HttpClient, ReqwestClient, RpcRequest};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_timeout(Duration::from_secs(10))?;
/// let url = Url::parse("http://127.0.0.1:18081/daemon_command")?;
/// let request = RpcRequest::json(url, &serde_json::json!({ "command": ["status"] }))?;
/// let response = client.post(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client whose connect and overall request time are bounded.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        Ok(Self { inner })
    }
}

fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}

impl HttpClient for ReqwestClient {
    async fn post(&self, req: RpcRequest) -> Result<RpcResponse, HttpError> {
        let response = self
            .inner
            .post(req.url)
            .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(http::header::ACCEPT, JSON_CONTENT_TYPE)
            .body(req.body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        Ok(RpcResponse { status, body })
    }
}
