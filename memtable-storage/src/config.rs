//! Logging configuration consumed by the storage layer.

use serde::{Deserialize, Serialize};

/// Options that control what storage diagnostics may reveal.
///
/// ```json
/// {"sensitive_data_logging": true}
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Include key values in error messages and log events.
    pub sensitive_data_logging: bool,
}

impl LoggingOptions {
    #[must_use]
    pub fn with_sensitive_data_logging(mut self, enabled: bool) -> Self {
        self.sensitive_data_logging = enabled;
        self
    }
}
