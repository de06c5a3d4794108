//! Client configuration module.
//!
//! Handles loading, validating, and merging a `config.toml`. User files are
//! sparse: they override only the keys they name, layered over the stock
//! defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! base_url = "https://api.artic.edu/api/v1"
//! # user_agent = "artgal/<version>"
//! # timeout_secs = 30        # No timeout unless set
//!
//! [images]
//! url_template = "https://www.artic.edu/iiif/2/{image_id}/full/843,/0/default.jpg"
//! placeholder = "assets/img/logo.svg"
//!
//! [runtime]
//! # workers = 4              # Concurrent fetches (omit for auto = CPU cores)
//! stale_guard = false        # Drop listing responses superseded by a newer request
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Placeholder token substituted by [`crate::iiif::ImageService`].
pub const IMAGE_ID_TOKEN: &str = "{image_id}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Client configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Remote collection API settings.
    pub api: ApiConfig,
    /// Image URL construction and the placeholder shown until resolution.
    pub images: ImagesConfig,
    /// Fetch concurrency and response ordering.
    pub runtime: RuntimeConfig,
}

impl ClientConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "api.base_url must be an http(s) URL".into(),
            ));
        }
        if !self.images.url_template.contains(IMAGE_ID_TOKEN) {
            return Err(ConfigError::Validation(format!(
                "images.url_template must contain {IMAGE_ID_TOKEN}"
            )));
        }
        if self.runtime.workers == Some(0) {
            return Err(ConfigError::Validation(
                "runtime.workers must be at least 1".into(),
            ));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Root of the REST API; listing and search endpoints hang off it.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout. Absent means the transport default (none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.artic.edu/api/v1".to_string(),
            user_agent: concat!("artgal/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub url_template: String,
    pub placeholder: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            url_template: "https://www.artic.edu/iiif/2/{image_id}/full/843,/0/default.jpg"
                .to_string(),
            placeholder: "assets/img/logo.svg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Maximum number of fetches in flight at once.
    /// When absent, defaults to the number of CPU cores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// When set, listing and detail-view responses older than the latest
    /// request of their kind are discarded instead of overwriting newer state.
    pub stale_guard: bool,
}

/// Resolve the effective fetch worker count from config.
///
/// - `None` → one worker per available core
/// - `Some(n)` → exactly `n`; fetches are IO-bound so more than cores is fine
pub fn effective_workers(config: &RuntimeConfig) -> usize {
    config.workers.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ClientConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ClientConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ClientConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults for every key the
/// file leaves out (or entirely, when the file is missing).
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Returns a fully-commented stock config file. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# artgal configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Collection API
# ---------------------------------------------------------------------------
[api]
# Root of the REST API. Listings use <base_url>/artworks, searches use
# <base_url>/artworks/search.
base_url = "https://api.artic.edu/api/v1"

# Sent with every request. Defaults to "artgal/<version>".
# user_agent = "artgal"

# Per-request timeout in seconds. Unset means no timeout.
# timeout_secs = 30

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# IIIF URL pattern; {image_id} is replaced with the artwork's image id.
url_template = "https://www.artic.edu/iiif/2/{image_id}/full/843,/0/default.jpg"

# Shown on every card until its real image is resolved.
placeholder = "assets/img/logo.svg"

# ---------------------------------------------------------------------------
# Runtime
# ---------------------------------------------------------------------------
[runtime]
# Maximum concurrent fetches. Unset means one per CPU core.
# workers = 4

# Responses can land out of order when paging quickly. With the guard off a
# late response for an older page overwrites the newer one. Turn it on to
# drop listing responses that a newer listing request has superseded.
stale_guard = false
"##
}
