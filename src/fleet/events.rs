// Fleet event notifications

use crate::protocol::RpcOutcome;

/// Async notifications broadcast to subscribers; never returned as call
/// results. Each fleet owns its own channel, so listeners on one fleet never
/// see another fleet's events.
#[derive(Debug, Clone)]
pub enum DaemonEvent {
    /// The whole fleet answered the liveness probe.
    Online,
    /// Aggregate liveness failed; carries every instance outcome for diagnosis.
    ConnectionFailed(Vec<RpcOutcome>),
}
