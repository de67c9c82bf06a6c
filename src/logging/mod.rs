// Pluggable log sink
//
// Every diagnostic condition in the crate goes through a (severity, message)
// sink instead of being returned or panicking. The default sink forwards to
// the tracing macros so embedders get structured logs for free; callers that
// want to capture or redirect output supply their own closure.

use std::fmt;
use std::sync::Arc;

/// Message severity routed through the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => write!(f, "debug"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Shared logging callback: `(severity, message)`.
pub type LogSink = Arc<dyn Fn(Severity, &str) + Send + Sync>;

/// Default sink: forward to `tracing` at the matching level.
pub fn default_sink() -> LogSink {
    Arc::new(|severity, message| match severity {
        Severity::Debug => tracing::debug!("{}", message),
        Severity::Info => tracing::info!("{}", message),
        Severity::Warn => tracing::warn!("{}", message),
        Severity::Error => tracing::error!("{}", message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Debug.to_string(), "debug");
    }

    #[test]
    fn test_custom_sink_captures_messages() {
        let captured: Arc<Mutex<Vec<(Severity, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let capture = captured.clone();
        let sink: LogSink = Arc::new(move |severity, message| {
            capture.lock().unwrap().push((severity, message.to_string()));
        });

        sink(Severity::Warn, "daemon 2 unreachable");

        let messages = captured.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, Severity::Warn);
        assert_eq!(messages[0].1, "daemon 2 unreachable");
    }
}
