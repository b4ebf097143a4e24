use std::time::Duration;
use url::Url;

/// Server probed when no base URL is given
pub const DEFAULT_BASE_URL: &str = "https://youtube-mcp-server.anis-ayari-perso.workers.dev";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every case path is appended to
    pub base_url: Url,

    /// Per-request timeout, covering connect through body read
    pub timeout: Duration,

    /// Maximum number of requests in flight
    pub concurrency: usize,

    /// Longest response preview printed per case, in characters
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),

            // Default request timeout: 10 seconds
            timeout: Duration::from_secs(10),

            // Default to one request at a time
            concurrency: 1,

            preview_chars: 500,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }
}
