use std::time::Duration;

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub user_agent: String,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// Whole-request limit, redirects included
    pub timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("xpostgen/", env!("CARGO_PKG_VERSION")).to_string(),
            follow_redirects: true,
            max_redirects: 10,
            timeout: Duration::from_secs(30),
        }
    }
}
