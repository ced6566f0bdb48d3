//! Server configuration loaded from environment variables.

use crate::error::{Result, SiteError};
use actix_web::cookie::Key;

/// Google Apps Script endpoint that appends registrations to the league spreadsheet.
pub const DEFAULT_SUBMISSION_URL: &str = "https://script.google.com/macros/s/AKfycbyXVSZ0KHZV3cM2QyLTd-8e1eqDfkiLFGY6pe6TJldVnNYPqylydA6J1o4YczX-iPegOg/exec";

/// Shortest accepted `SESSION_KEY`, in bytes.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Clone)]
pub struct Config {
    /// Bind address (e.g. 0.0.0.0 so the site is reachable on a VPS).
    pub host: String,
    pub port: u16,
    /// Where registrations are posted.
    pub submission_url: String,
    /// Raw session signing key; a random one is used per process when absent.
    pub session_key: Option<Vec<u8>>,
    /// Only send the session cookie over HTTPS.
    pub cookie_secure: bool,
    /// Directory served under /static (logo, background image, stylesheet).
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            submission_url: DEFAULT_SUBMISSION_URL.to_string(),
            session_key: None,
            cookie_secure: false,
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Unset variables fall back to [`Config::default`].
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match var("PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| SiteError::Config(format!("Invalid PORT: {p}")))?,
            None => defaults.port,
        };
        let session_key = match var("SESSION_KEY") {
            Some(k) if k.len() < MIN_SESSION_KEY_LEN => {
                return Err(SiteError::Config(format!(
                    "SESSION_KEY must be at least {MIN_SESSION_KEY_LEN} bytes"
                )));
            }
            Some(k) => Some(k.into_bytes()),
            None => None,
        };
        let cookie_secure = match var("COOKIE_SECURE").as_deref() {
            Some("1" | "true") => true,
            Some("0" | "false") | None => false,
            Some(other) => {
                return Err(SiteError::Config(format!("Invalid COOKIE_SECURE: {other}")));
            }
        };
        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            submission_url: var("SUBMISSION_URL").unwrap_or(defaults.submission_url),
            session_key,
            cookie_secure,
            static_dir: var("STATIC_DIR").unwrap_or(defaults.static_dir),
        })
    }

    /// Key for signing the session cookie.
    pub fn session_key(&self) -> Result<Key> {
        match &self.session_key {
            Some(bytes) => {
                Key::try_from(bytes.as_slice()).map_err(|e| SiteError::Config(e.to_string()))
            }
            None => {
                log::warn!("SESSION_KEY not set; registrations will not be remembered across restarts");
                Ok(Key::generate())
            }
        }
    }
}
