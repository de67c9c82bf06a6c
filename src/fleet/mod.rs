// Fleet module
// Fan-out dispatcher, health monitor, and event notifications

mod dispatch;
mod events;
mod health;

pub use dispatch::RpcFleet;
pub use events::DaemonEvent;
pub use health::NotOnline;
