//! Selection of the API base URL.
//!
//! Development talks to a local server directly. Production uses the
//! relative `/api` path the server mounts next to the front end, resolved
//! against an origin since there is no page to be relative to.
//!
//! Environment variables:
//! - `TODO_ENV`: `development` (or `dev`) selects development mode.
//! - `TODO_API_URL`: explicit base URL, overrides the mode default.
//! - `TODO_ORIGIN`: origin for relative base URLs.

use std::env;

pub const DEV_API_URL: &str = "http://localhost:5000/api";
pub const PROD_API_PATH: &str = "/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Mode::Development,
            _ => Mode::Production,
        }
    }

    pub fn from_env() -> Self {
        env::var("TODO_ENV").map(|v| Mode::parse(&v)).unwrap_or(Mode::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub mode: Mode,
    pub api_url: Option<String>,
    pub origin: String,
}

impl ApiConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            api_url: None,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new(Mode::from_env());
        config.api_url = env::var("TODO_API_URL").ok().filter(|v| !v.trim().is_empty());
        if let Ok(origin) = env::var("TODO_ORIGIN") {
            if !origin.trim().is_empty() {
                config.origin = origin;
            }
        }
        config
    }

    /// The configured base URL, as given.
    pub fn base_url(&self) -> &str {
        match (&self.api_url, self.mode) {
            (Some(url), _) => url,
            (None, Mode::Development) => DEV_API_URL,
            (None, Mode::Production) => PROD_API_PATH,
        }
    }

    /// The base URL with relative paths joined onto `origin`.
    pub fn resolved_base_url(&self) -> String {
        let base = self.base_url();
        if base.starts_with('/') {
            format!("{}{base}", self.origin.trim_end_matches('/'))
        } else {
            base.to_string()
        }
    }
}
