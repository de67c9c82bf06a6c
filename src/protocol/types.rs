// JSON-RPC wire types and per-instance outcomes

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::registry::DaemonInstance;

/// One JSON-RPC request object.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<Value>,
    pub id: i64,
}

impl RpcRequest {
    /// Build a request with a fresh advisory id.
    ///
    /// Ids are wall-clock milliseconds plus a small random offset to reduce
    /// collision odds across concurrent calls. Uniqueness is advisory only;
    /// response correlation is positional (one request per instance).
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
            id: next_request_id(0),
        }
    }

    /// Build the request objects for a batch body, one per `(method, params)`
    /// pair. Adding the command ordinal to a shared base keeps ids distinct
    /// within the batch.
    pub fn batch(commands: &[(String, Vec<Value>)]) -> Vec<Self> {
        let base = next_request_id(0);
        commands
            .iter()
            .enumerate()
            .map(|(ordinal, (method, params))| Self {
                method: method.clone(),
                params: params.clone(),
                id: base + ordinal as i64,
            })
            .collect()
    }
}

fn next_request_id(offset: i64) -> i64 {
    use rand::Rng;
    chrono::Utc::now().timestamp_millis() + rand::thread_rng().gen_range(0..10) + offset
}

/// Per-instance call failure, or an error object returned by the daemon.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// HTTP 401 from the daemon: bad RPC username or password.
    #[error("unauthorized RPC access - invalid RPC username or password")]
    Unauthorized,

    /// Connection refused: the daemon is not accepting connections.
    #[error("daemon offline: {0}")]
    Offline(String),

    /// Any other transport-level failure.
    #[error("request error: {0}")]
    RequestError(String),

    /// The daemon answered with a non-null `error` field.
    #[error("daemon error: {0}")]
    Daemon(Value),
}

/// Result of one dispatched call against one daemon instance.
#[derive(Debug, Clone)]
pub struct RpcOutcome {
    /// Transport/auth failure or daemon-reported error, if any.
    pub error: Option<RpcError>,
    /// Extracted `result` payload, if the daemon produced one.
    pub response: Option<Value>,
    /// The daemon this outcome came from.
    pub instance: Arc<DaemonInstance>,
    /// Raw response body, attached only when requested.
    pub data: Option<String>,
}

impl RpcOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
