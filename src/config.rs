//! Client configuration.
//!
//! Defaults point at the public BlogHub deployment. Environment variables
//! override the defaults and command-line flags override both.
//!
//! # Example
//!
//! ```ignore
//! use bloghub::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_api_url("http://localhost:1337/api");
//! ```

use std::path::PathBuf;

/// Default API origin (Strapi REST root).
pub const DEFAULT_API_URL: &str = "https://blogapp-strapi.onrender.com/api";

/// Default origin prefixed onto server-relative image paths.
pub const DEFAULT_IMAGE_ORIGIN: &str = "https://blogapp-strapi.onrender.com";

/// Shown when a post has no cover image.
pub const PLACEHOLDER_IMAGE: &str = "/blog-cover.png";

/// Posts requested by the listing view.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Directory under `$HOME` holding storage and logs.
pub const APP_DIR: &str = ".bloghub";

/// Environment variable overriding the API origin.
pub const ENV_API_URL: &str = "BLOGHUB_API_URL";
/// Environment variable overriding the image origin.
pub const ENV_IMAGE_ORIGIN: &str = "BLOGHUB_IMAGE_ORIGIN";
/// Environment variable overriding the app directory.
pub const ENV_HOME: &str = "BLOGHUB_HOME";

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to (no trailing slash)
    pub api_url: String,
    /// Origin prefixed onto relative asset URLs
    pub image_origin: String,
    /// Directory holding `storage.json` and the log file
    pub app_dir: PathBuf,
    /// Explicit log file, overriding `<app_dir>/bloghub.log`
    pub log_file: Option<PathBuf>,
    /// Number of posts on the listing page
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let app_dir = dirs::home_dir()
            .map(|home| home.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(APP_DIR));
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_origin: DEFAULT_IMAGE_ORIGIN.to_string(),
            app_dir,
            log_file: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the image origin. A trailing slash is dropped.
    pub fn with_image_origin(mut self, origin: impl Into<String>) -> Self {
        self.image_origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the app directory.
    pub fn with_app_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_dir = dir.into();
        self
    }

    /// Set an explicit log file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Defaults overlaid with `BLOGHUB_API_URL`, `BLOGHUB_IMAGE_ORIGIN` and
    /// `BLOGHUB_HOME`. Empty values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = non_empty_env(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Some(origin) = non_empty_env(ENV_IMAGE_ORIGIN) {
            config = config.with_image_origin(origin);
        }
        if let Some(home) = non_empty_env(ENV_HOME) {
            config = config.with_app_dir(home);
        }
        config
    }

    /// Path of the session storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.app_dir.join(crate::adapters::file_storage::STORAGE_FILE)
    }

    /// Path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.app_dir.join("bloghub.log"))
    }

    /// Absolute URL for a server-relative asset path, or the placeholder
    /// when there is no path. Absolute URLs pass through unchanged.
    pub fn image_url(&self, relative: Option<&str>) -> String {
        match relative.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) if path.starts_with('/') => format!("{}{}", self.image_origin, path),
            Some(path) => format!("{}/{}", self.image_origin, path),
            None => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
