//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root. The
//! file is optional; missing keys fall back to stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Knowledge Base"       # Homepage hero heading, <title> suffix
//! header_title = "Knowledge Base"     # Header text (defaults to site_title)
//! site_subtitle = ""                  # Homepage hero tagline
//! site_url = ""                       # Absolute origin for canonical links
//! base_url = ""                       # Path prefix when served from a subdirectory
//! default_description = "Documentation and knowledge base"
//! show_hero = true                    # Show the homepage hero block
//! copyright_text = ""                 # Footer text
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the configuration file inside the content root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name, used in the homepage hero and document titles.
    pub site_title: String,
    /// Text shown in the page header. Falls back to `site_title`.
    pub header_title: Option<String>,
    /// Tagline under the homepage hero heading.
    pub site_subtitle: String,
    /// Absolute origin (`https://docs.example.com`) for canonical links.
    pub site_url: String,
    /// Path prefix for every emitted link (`/docs` when hosted under `/docs/`).
    pub base_url: String,
    /// Description for pages without a frontmatter `description`.
    pub default_description: String,
    /// Render the homepage hero block.
    pub show_hero: bool,
    /// Footer text.
    pub copyright_text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Knowledge Base".to_string(),
            header_title: None,
            site_subtitle: String::new(),
            site_url: String::new(),
            base_url: String::new(),
            default_description: "Documentation and knowledge base".to_string(),
            show_hero: true,
            copyright_text: String::new(),
        }
    }
}

impl SiteConfig {
    /// Validate values that would otherwise produce broken links.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.is_empty() && !self.base_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "base_url must start with '/'".into(),
            ));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with '/' (use \"\" for the site root)".into(),
            ));
        }
        if self.site_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site_url must not end with '/'".into(),
            ));
        }
        Ok(())
    }

    /// Header text: `header_title`, else `site_title`.
    pub fn header(&self) -> &str {
        self.header_title.as_deref().unwrap_or(&self.site_title)
    }

    /// Prefix a root-relative URL with `base_url` for use in an `href`.
    pub fn link(&self, url: &str) -> String {
        format!("{}{}", self.base_url, url)
    }

    /// Absolute URL the page is served at (`site_url` + `base_url` + `url`)
    /// when `site_url` is configured.
    pub fn canonical(&self, url: &str) -> Option<String> {
        (!self.site_url.is_empty()).then(|| format!("{}{}", self.site_url, self.link(url)))
    }
}

/// Load config from `config.toml` in the given directory.
///
/// Returns stock defaults when the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# MarkStack Configuration
# =======================
# Place this file at the root of your content directory.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site name, shown in the homepage hero and appended to page titles.
site_title = "Knowledge Base"

# Text in the page header. Defaults to site_title when omitted.
# header_title = "Knowledge Base"

# Tagline shown under the homepage hero heading.
site_subtitle = ""

# Absolute origin used for canonical links, without a trailing slash.
# Example: "https://docs.example.com"
site_url = ""

# Path prefix for every link, when the site is not served from the domain root.
# Must start with "/" and must not end with "/". Example: "/docs"
base_url = ""

# Description used by pages without a frontmatter `description`.
default_description = "Documentation and knowledge base"

# Show the hero block (site_title + site_subtitle) on the homepage.
show_hero = true

# Footer text.
copyright_text = ""
"##
}
