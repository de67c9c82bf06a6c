// HTTP POST primitive for daemon RPC

use anyhow::{Context, Result};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, StatusCode};

use crate::logging::{LogSink, Severity};
use crate::protocol::RpcError;
use crate::registry::DaemonInstance;

/// Thin wrapper around a shared reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    logger: LogSink,
}

impl HttpTransport {
    /// Build the transport. The client carries no request timeout; a call
    /// runs until the platform resolves or errors it.
    pub fn new(logger: LogSink) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, logger })
    }

    /// Send one serialized request body to one daemon instance.
    ///
    /// Classification: HTTP 401 is `Unauthorized`, connection refused is
    /// `Offline`, any other transport failure is `RequestError`. A successful
    /// response yields the full body text for the parser.
    pub async fn send(&self, instance: &DaemonInstance, body: String) -> Result<String, RpcError> {
        tracing::debug!(
            instance = instance.index,
            url = %instance.url(),
            "Sending RPC request"
        );

        let response = self
            .client
            .post(instance.url())
            .basic_auth(&instance.user, Some(&instance.password))
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            (*self.logger)(
                Severity::Error,
                "Unauthorized RPC access - invalid RPC username or password",
            );
            return Err(RpcError::Unauthorized);
        }

        response
            .text()
            .await
            .map_err(|e| RpcError::RequestError(e.to_string()))
    }
}

fn classify_transport_error(err: reqwest::Error) -> RpcError {
    if err.is_connect() {
        RpcError::Offline(err.to_string())
    } else {
        RpcError::RequestError(err.to_string())
    }
}
