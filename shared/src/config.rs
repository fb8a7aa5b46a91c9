use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PAGE_SIZE;

/// Largest page the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Path prefix of every versioned backend route
pub const API_PREFIX: &str = "/api/v1";

/// Client-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, without the API prefix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Transactions per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Normalize values the backend would reject
    pub fn validated(mut self) -> Self {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = default_api_base_url();
        }
        self
    }

    /// Absolute URL of an API route, e.g. `/financial/transactions`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base_url, API_PREFIX, path)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
