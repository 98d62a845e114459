//! Shareable link configuration.

use serde::{Deserialize, Serialize};

/// Settings for shareable profile links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Origin the public share URLs are built on.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum length of a link name after trimming.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl LinksConfig {
    /// Returns the public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_max_name_length() -> usize {
    100
}
