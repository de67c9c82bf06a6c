// rpcfleet - fan-out JSON-RPC client for daemon fleets
// Library exports

pub mod config;
pub mod fleet; // Fan-out dispatcher, health checks, events
pub mod logging;
pub mod protocol;
pub mod registry;
pub mod transport;

pub use config::DaemonConfig;
pub use fleet::{DaemonEvent, NotOnline, RpcFleet};
pub use logging::{LogSink, Severity};
pub use protocol::{RpcError, RpcOutcome, RpcRequest};
pub use registry::{DaemonInstance, InstanceRegistry};
