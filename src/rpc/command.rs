//! Forwarding a single command to a running instance.

use serde::{Deserialize, Serialize};

use super::{CommandError, HttpClient, HttpError, NetworkError, RpcRequest, TargetAddress};
use crate::config::Endpoint;

/// Request body sent to the control endpoint.
#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    command: &'a [String],
}

/// Reply body returned by the control endpoint.
#[derive(Debug, Deserialize)]
struct CommandResponse {
    recognized: bool,
    #[serde(default)]
    output: String,
}

/// Successful outcome of a forwarded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    /// Text produced by the running instance
    pub output: String,
}

/// Client for a running instance's control endpoint.
///
/// Makes exactly one attempt per command; there is no retry.
///
/// # Example
///
/// ```no_run
/// use coind::config::Endpoint;
/// use coind::rpc::{CommandClient, ReqwestClient};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CommandClient::new(ReqwestClient::with_timeout(Duration::from_secs(10))?);
/// let endpoint = Endpoint { ip: "127.0.0.1".into(), port: "18081".into() };
/// let reply = client.forward(&endpoint, &["print_height".to_string()]).await?;
/// println!("{}", reply.output);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CommandClient<H> {
    client: H,
}

impl<H: HttpClient> CommandClient<H> {
    /// Creates a command client over the given transport.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }

    /// Validates the endpoint, then forwards the command.
    ///
    /// # Errors
    ///
    /// - [`CommandError::EmptyCommand`] for an empty token list
    /// - [`CommandError::Validation`] for a malformed address; no request is made
    /// - otherwise as [`CommandClient::send`]
    pub async fn forward(
        &self,
        endpoint: &Endpoint,
        command: &[String],
    ) -> Result<CommandReply, CommandError> {
        if command.is_empty() {
            return Err(CommandError::EmptyCommand);
        }

        let target = TargetAddress::from_endpoint(endpoint)?;
        self.send(&target, command).await
    }

    /// Sends the command tokens to a validated target.
    ///
    /// # Errors
    ///
    /// - [`CommandError::Network`] when the endpoint is unreachable, times
    ///   out, answers with a non-2xx status, or sends an undecodable reply
    /// - [`CommandError::UnknownCommand`] when the instance does not
    ///   recognize the command
    pub async fn send(
        &self,
        target: &TargetAddress,
        command: &[String],
    ) -> Result<CommandReply, CommandError> {
        let unreachable = |source: HttpError| NetworkError::Unreachable {
            target: target.to_string(),
            source,
        };

        let url = target
            .command_url()
            .map_err(|e| unreachable(HttpError::InvalidUrl(e.to_string())))?;

        let request =
            RpcRequest::json(url, &CommandRequest { command }).map_err(CommandError::Encode)?;

        tracing::debug!("Forwarding {:?} to {target}", command);

        let response = self.client.post(request).await.map_err(unreachable)?;

        if !response.is_success() {
            return Err(NetworkError::Status {
                target: target.to_string(),
                status: response.status,
            }
            .into());
        }

        let reply: CommandResponse = response.decode().map_err(|e| NetworkError::MalformedReply {
            target: target.to_string(),
            source: e,
        })?;

        if !reply.recognized {
            return Err(CommandError::UnknownCommand {
                command: command.join(" "),
            });
        }

        Ok(CommandReply {
            output: reply.output,
        })
    }
}
