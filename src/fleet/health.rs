// Fleet health monitor
//
// Aggregate liveness is the logical AND across instances: a single
// unreachable daemon makes the whole fleet report non-live, because
// downstream consumers need all-or-nothing guarantees.

use thiserror::Error;

use crate::logging::Severity;
use crate::protocol::RpcOutcome;

use super::dispatch::RpcFleet;
use super::events::DaemonEvent;

/// Well-known diagnostic RPC method used as the liveness probe.
const LIVENESS_METHOD: &str = "getinfo";

/// The fleet failed its liveness probe; carries every instance outcome.
#[derive(Debug, Error)]
#[error("daemon fleet is not online")]
pub struct NotOnline {
    pub outcomes: Vec<RpcOutcome>,
}

impl RpcFleet {
    /// Probe every instance with the liveness call.
    ///
    /// Returns true only when every outcome carries no error. On failure a
    /// `ConnectionFailed` event with the full outcome sequence is broadcast
    /// in addition to the returned boolean.
    pub async fn is_online(&self) -> bool {
        self.probe_online().await.is_ok()
    }

    /// Readiness check: verifies the fleet is online, broadcasts `Online`,
    /// and returns `Ok`. A non-live fleet fails loudly with the outcome
    /// snapshot instead of staying silent.
    pub async fn init(&self) -> Result<(), NotOnline> {
        self.probe_online().await?;
        let _ = self.events.send(DaemonEvent::Online);
        Ok(())
    }

    async fn probe_online(&self) -> Result<(), NotOnline> {
        let outcomes = self.cmd(LIVENESS_METHOD, Vec::new()).await;

        if outcomes.iter().all(RpcOutcome::is_ok) {
            return Ok(());
        }

        let unreachable: Vec<usize> = outcomes
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.instance.index)
            .collect();
        (*self.logger)(
            Severity::Warn,
            &format!("Fleet liveness check failed for daemon instance(s) {unreachable:?}"),
        );

        let _ = self.events.send(DaemonEvent::ConnectionFailed(outcomes.clone()));
        Err(NotOnline { outcomes })
    }
}
