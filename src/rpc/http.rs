//! Control endpoint messages and the transport that carries them.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::HttpError;

/// Media type of every request and reply body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON body posted to the control endpoint.
///
/// Requests are always `POST` with a JSON body; nothing else travels on
/// this channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    /// Handler URL
    pub url: url::Url,
    /// Encoded JSON body
    pub body: Vec<u8>,
}

impl RpcRequest {
    /// Encodes `payload` as the body of a request to `url`.
    ///
    /// # Errors
    ///
    /// Returns the encoder's error if `payload` cannot be represented as JSON.
    pub fn json<T: Serialize>(url: url::Url, payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            url,
            body: serde_json::to_vec(payload)?,
        })
    }
}

/// What the control endpoint answered: a status and the buffered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl RpcResponse {
    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error for a body that is not a `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport for control endpoint requests.
///
/// [`CommandClient`](super::CommandClient) is generic over this so it can
/// be driven by fakes that record every call.
pub trait HttpClient: Send + Sync {
    /// Posts `req` and returns the endpoint's answer, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when nothing was answered: the connection
    /// failed ([`HttpError::Connection`]), the deadline passed
    /// ([`HttpError::Timeout`]), or the URL was rejected
    /// ([`HttpError::InvalidUrl`]).
    fn post(
        &self,
        req: RpcRequest,
    ) -> impl std::future::Future<Output = Result<RpcResponse, HttpError>> + Send;
}
