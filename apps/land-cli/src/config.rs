//! Project configuration from .land/config.toml

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration, read from `<root>/.land/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandConfig {
    /// Review service configuration.
    #[serde(default)]
    pub review: ReviewConfig,

    /// VCS invocation configuration.
    #[serde(default)]
    pub vcs: VcsConfig,
}

/// Review service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Base URL of the review service.
    #[serde(default = "default_url")]
    pub url: String,

    /// Default revision owner (overridden by --owner).
    pub owner: Option<String>,

    /// True when the repository runs server-side commit hooks that mark
    /// revisions committed automatically. When false, `land commit`
    /// performs that call itself after a successful commit.
    #[serde(default)]
    pub server_hooks: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            owner: None,
            server_hooks: false,
        }
    }
}

/// VCS invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsConfig {
    /// Name or path of the svn binary.
    #[serde(default = "default_svn_binary")]
    pub svn_binary: String,

    /// Locale exported to svn invocations for encoding-safe output.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            svn_binary: default_svn_binary(),
            locale: default_locale(),
        }
    }
}

// Serde default functions
fn default_url() -> String {
    "https://review.example.com".to_string()
}

fn default_svn_binary() -> String {
    "svn".to_string()
}

fn default_locale() -> String {
    "en_US.UTF-8".to_string()
}

impl LandConfig {
    /// Load config from a specific file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `<root>/.land/config.toml`, returning defaults if absent or
    /// unreadable.
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(&root.join(".land").join("config.toml")).unwrap_or_default()
    }
}
