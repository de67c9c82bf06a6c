// Fan-out dispatcher
//
// Issues one logical JSON-RPC command to every registered daemon instance
// concurrently. One task is spawned per instance; each resolves to exactly
// one (index, outcome) message. A per-dispatch collector keeps an explicit
// settled flag per instance and drops any duplicate completion, so a
// misbehaving transport cannot double-count an instance.
//
// Batched mode collects outcomes into registry-order slots and returns once
// every instance has settled (failures count as completions). Streamed mode
// forwards each first settlement in completion order through a channel.

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::config::DaemonConfig;
use crate::logging::{default_sink, LogSink, Severity};
use crate::protocol::{decode_body, split_response, RpcError, RpcOutcome, RpcRequest};
use crate::registry::{DaemonInstance, InstanceRegistry};
use crate::transport::HttpTransport;

use super::events::DaemonEvent;

/// Client for a fleet of daemon instances sharing one RPC interface.
pub struct RpcFleet {
    registry: InstanceRegistry,
    transport: HttpTransport,
    pub(super) logger: LogSink,
    pub(super) events: broadcast::Sender<DaemonEvent>,
}

impl RpcFleet {
    /// Build a fleet client from one or more daemon configurations.
    pub fn new(configs: Vec<DaemonConfig>) -> Result<Self> {
        Self::with_logger(configs, default_sink())
    }

    /// Build a fleet client with a custom log sink.
    pub fn with_logger(configs: Vec<DaemonConfig>, logger: LogSink) -> Result<Self> {
        let registry = InstanceRegistry::new(configs)?;
        let transport = HttpTransport::new(logger.clone())?;
        let (events, _) = broadcast::channel(16);

        Ok(Self {
            registry,
            transport,
            logger,
            events,
        })
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Listen for fleet events (`Online`, `ConnectionFailed`).
    pub fn subscribe(&self) -> broadcast::Receiver<DaemonEvent> {
        self.events.subscribe()
    }

    /// Send a JSON-RPC command to every configured daemon and collect one
    /// outcome per instance, in registry order.
    pub async fn cmd(&self, method: &str, params: Vec<Value>) -> Vec<RpcOutcome> {
        self.cmd_detailed(method, params, false).await
    }

    /// `cmd` with the raw response body attached to each outcome.
    pub async fn cmd_detailed(
        &self,
        method: &str,
        params: Vec<Value>,
        include_raw_data: bool,
    ) -> Vec<RpcOutcome> {
        let count = self.registry.len();
        let mut inbound = self.spawn_fanout(method, params, include_raw_data);

        // Registry-order slots double as settled flags: the first completion
        // per instance wins, later duplicates are dropped.
        let mut slots: Vec<Option<RpcOutcome>> = vec![None; count];
        let mut remaining = count;

        while remaining > 0 {
            let Some((index, outcome)) = inbound.recv().await else {
                break;
            };
            if slots[index].is_some() {
                continue;
            }
            slots[index] = Some(outcome);
            remaining -= 1;
        }

        slots.into_iter().flatten().collect()
    }

    /// Send a JSON-RPC command to every configured daemon and receive each
    /// outcome as soon as that instance settles, in completion order.
    ///
    /// The channel yields exactly one outcome per instance and then closes.
    pub fn cmd_stream(
        &self,
        method: &str,
        params: Vec<Value>,
        include_raw_data: bool,
    ) -> mpsc::Receiver<RpcOutcome> {
        let count = self.registry.len();
        let mut inbound = self.spawn_fanout(method, params, include_raw_data);
        let (tx, rx) = mpsc::channel(count);

        tokio::spawn(async move {
            let mut settled = vec![false; count];
            let mut remaining = count;

            while remaining > 0 {
                let Some((index, outcome)) = inbound.recv().await else {
                    break;
                };
                if settled[index] {
                    continue;
                }
                settled[index] = true;
                remaining -= 1;

                if tx.send(outcome).await.is_err() {
                    // Receiver dropped, stop forwarding
                    break;
                }
            }
        });

        rx
    }

    /// Send a batch of JSON-RPC commands as a single array body, only to the
    /// first configured daemon.
    ///
    /// The decoded array passes through as the outcome's response; individual
    /// entries are not correlated back to their commands here.
    pub async fn batch_cmd(&self, commands: &[(String, Vec<Value>)]) -> RpcOutcome {
        let instance = self.registry.first().clone();
        let requests = RpcRequest::batch(commands);

        let body = match serde_json::to_string(&requests) {
            Ok(body) => body,
            Err(e) => {
                return RpcOutcome {
                    error: Some(RpcError::RequestError(format!(
                        "failed to serialize batch request: {e}"
                    ))),
                    response: None,
                    instance,
                    data: None,
                }
            }
        };

        match self.transport.send(&instance, body.clone()).await {
            Err(error) => RpcOutcome {
                error: Some(error),
                response: None,
                instance,
                data: None,
            },
            Ok(raw) => match decode_body(&raw) {
                Ok(value) => RpcOutcome {
                    error: None,
                    response: Some(value),
                    instance,
                    data: None,
                },
                Err(_) => {
                    log_parse_failure(&self.logger, instance.index, &body, &raw);
                    RpcOutcome {
                        error: None,
                        response: None,
                        instance,
                        data: None,
                    }
                }
            },
        }
    }

    /// Spawn one call task per instance; each sends exactly one
    /// (index, outcome) message.
    fn spawn_fanout(
        &self,
        method: &str,
        params: Vec<Value>,
        include_raw_data: bool,
    ) -> mpsc::Receiver<(usize, RpcOutcome)> {
        let (tx, rx) = mpsc::channel(self.registry.len());

        for instance in self.registry.iter() {
            let request = RpcRequest::new(method, params.clone());
            let body = serde_json::to_string(&request);
            let transport = self.transport.clone();
            let logger = self.logger.clone();
            let instance = instance.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let index = instance.index;
                let outcome = match body {
                    Ok(body) => {
                        call_instance(&transport, &logger, instance, body, include_raw_data).await
                    }
                    Err(e) => RpcOutcome {
                        error: Some(RpcError::RequestError(format!(
                            "failed to serialize request: {e}"
                        ))),
                        response: None,
                        instance,
                        data: None,
                    },
                };
                let _ = tx.send((index, outcome)).await;
            });
        }

        rx
    }
}

fn log_parse_failure(logger: &LogSink, index: usize, request: &str, raw: &str) {
    (**logger)(
        Severity::Error,
        &format!(
            "Could not parse RPC data from daemon instance {index}\nRequest Data: {request}\nResponse Data: {raw}"
        ),
    );
}

/// One transport round-trip plus decoding, always resolving to an outcome.
///
/// A parse failure is logged and yields an outcome with neither error nor
/// response, matching the daemon interface this replaces; it still counts as
/// a completion, so dispatch never hangs on a garbled body.
async fn call_instance(
    transport: &HttpTransport,
    logger: &LogSink,
    instance: Arc<DaemonInstance>,
    body: String,
    include_raw_data: bool,
) -> RpcOutcome {
    match transport.send(&instance, body.clone()).await {
        Err(error) => RpcOutcome {
            error: Some(error),
            response: None,
            instance,
            data: None,
        },
        Ok(raw) => match decode_body(&raw) {
            Ok(value) => {
                let (daemon_error, result) = split_response(&value);
                RpcOutcome {
                    error: daemon_error.map(RpcError::Daemon),
                    response: result,
                    instance,
                    data: include_raw_data.then_some(raw),
                }
            }
            Err(_) => {
                log_parse_failure(logger, instance.index, &body, &raw);
                RpcOutcome {
                    error: None,
                    response: None,
                    instance,
                    data: include_raw_data.then_some(raw),
                }
            }
        },
    }
}
