// Configuration loader
// Loads daemon connection settings from a TOML file

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::DaemonConfig;

#[derive(Deserialize)]
struct DaemonsFile {
    #[serde(default)]
    daemon: Vec<DaemonConfig>,
}

/// Load daemon configurations from a TOML file.
///
/// Expected layout, one `[[daemon]]` table per backend:
///
/// ```toml
/// [[daemon]]
/// host = "10.0.0.5"   # optional, defaults to loopback
/// port = 8332
/// user = "rpcuser"
/// password = "rpcpass"
/// ```
pub fn load_daemons(path: &Path) -> Result<Vec<DaemonConfig>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let parsed: DaemonsFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if parsed.daemon.is_empty() {
        bail!("No [[daemon]] entries found in {}", path.display());
    }

    Ok(parsed.daemon)
}

/// Default config file location: `~/.rpcfleet/daemons.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".rpcfleet/daemons.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_daemons_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[daemon]]\nport = 8332\nuser = \"a\"\npassword = \"b\"\n\n\
             [[daemon]]\nhost = \"10.0.0.5\"\nport = 8333\nuser = \"c\"\npassword = \"d\"\n"
        )
        .unwrap();

        let daemons = load_daemons(file.path()).unwrap();
        assert_eq!(daemons.len(), 2);
        assert!(daemons[0].host.is_none());
        assert_eq!(daemons[1].host.as_deref(), Some("10.0.0.5"));
        assert_eq!(daemons[1].port, 8333);
    }

    #[test]
    fn test_load_daemons_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_daemons(file.path()).unwrap_err();
        assert!(err.to_string().contains("No [[daemon]] entries"));
    }

    #[test]
    fn test_load_daemons_missing_file() {
        let result = load_daemons(Path::new("/nonexistent/daemons.toml"));
        assert!(result.is_err());
    }
}
