//! Environment-driven configuration.

/// Runtime configuration for the ordering shell.
pub struct AppConfig {
    /// Base URL of the restaurant API. Dynamic route registration stays off
    /// while this is unset — navigation then runs purely on the static
    /// route table.
    pub api_base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("GUSTO_API_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        }
    }
}
