use serde::{Deserialize, Serialize};

use crate::list_view::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Dashboard settings, fixed at build time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Backend base URL without a trailing slash
    pub api_base_url: String,
    /// Rows per page in every table
    pub page_size: usize,
    /// How long a toast stays visible
    pub toast_duration_ms: u32,
    pub enable_debug_logging: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            toast_duration_ms: 3000,
            enable_debug_logging: false,
        }
    }
}

impl DashboardConfig {
    /// Defaults with the backend URL taken from `SCHOOL_API_URL`, if set.
    /// Blank values are ignored.
    pub fn from_env_value(api_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        config
    }

    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.enable_debug_logging = enabled;
        self
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.enable_debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_env_override_trims_trailing_slashes() {
        let config = DashboardConfig::from_env_value(Some("https://api.school.test//"));
        assert_eq!(config.api_base_url, "https://api.school.test");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        assert_eq!(
            DashboardConfig::from_env_value(Some("  ")),
            DashboardConfig::default()
        );
        assert_eq!(DashboardConfig::from_env_value(None), DashboardConfig::default());
    }

    #[test]
    fn test_debug_logging_level() {
        let config = DashboardConfig::default().with_debug_logging(true);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }
}
