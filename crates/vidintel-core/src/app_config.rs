use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YouTube Data API key. Optional at load time; the server and the
    /// CLI's live-fetch path require it and fail with a clear message.
    pub youtube_api_key: Option<String>,
    pub youtube_timeout_secs: u64,
    pub youtube_max_retries: u32,
    pub youtube_backoff_base_ms: u64,
    /// How far back the search window reaches, in days.
    pub search_window_days: u32,
    /// Upper bound on candidates fetched per topic.
    pub max_results: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("youtube_max_retries", &self.youtube_max_retries)
            .field("youtube_backoff_base_ms", &self.youtube_backoff_base_ms)
            .field("search_window_days", &self.search_window_days)
            .field("max_results", &self.max_results)
            .finish()
    }
}
