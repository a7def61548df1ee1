//! Configuration for transport, model selection, and job polling.

use std::collections::HashMap;
use std::time::Duration;

/// Transport configuration options.
///
/// Controls how requests are sent over the network. By default no timeout is
/// applied; long-running generation calls are expected to take their time.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Request timeout. If None, the client's default is used.
    pub timeout: Option<Duration>,
    /// HTTP proxy URL.
    pub proxy: Option<String>,
    /// Additional HTTP headers to send with every request.
    pub headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy = Some(proxy_url.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Model identifiers, one per gateway feature.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    pub advice: String,
    pub visualize: String,
    pub video: String,
    pub places: String,
    pub chat: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            advice: "gemini-3-flash-preview".to_string(),
            visualize: "gemini-2.5-flash-image".to_string(),
            video: "veo-3.1-fast-generate-preview".to_string(),
            places: "gemini-2.5-flash".to_string(),
            chat: "gemini-3-flash-preview".to_string(),
        }
    }
}

/// Polling behavior for long-running video jobs.
///
/// The default preserves the provider's recommended 10-second cadence with no
/// attempt bound; callers that cannot tolerate an open-ended job should set
/// `max_attempts`.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Sleep between status fetches.
    pub interval: Duration,
    /// Maximum number of status fetches before giving up. None polls forever.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: None,
        }
    }
}

impl PollPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayOptions {
    pub models: ModelCatalog,
    pub poll: PollPolicy,
}
