// Configuration module
// Public interface for daemon connection settings

mod loader;
mod settings;

pub use loader::{default_config_path, load_daemons};
pub use settings::DaemonConfig;
