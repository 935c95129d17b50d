//! # Router configuration.
//!
//! [`RouterConfig`] controls the handler's last-resort behavior: whether
//! events that could not be delivered anywhere (no dead-letter sink, or the
//! sink failed too) are dumped through the configured failure writer
//! (stderr by default).
//!
//! # Example
//! ```
//! use eventrouter::RouterConfig;
//!
//! let mut cfg = RouterConfig::default();
//! cfg.log_failure = false;
//!
//! assert!(!cfg.log_failure);
//! ```

/// Configuration for the router handler.
#[derive(Clone, Debug)]
pub struct RouterConfig {
    /// Dump irrecoverable failed events through the failure writer
    /// (stderr as pretty-printed JSON, by default).
    ///
    /// This is the last-resort visibility mechanism, used only when no
    /// dead-letter sink exists or the sink itself reports failures.
    pub log_failure: bool,
}

impl Default for RouterConfig {
    /// Provides a default configuration:
    /// - `log_failure = true`
    fn default() -> Self {
        Self { log_failure: true }
    }
}
