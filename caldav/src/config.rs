// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::CalDavError;

/// `CalDAV` server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CalDavConfig {
    /// Base URL of the `CalDAV` server.
    pub base_url: String,
    /// Calendar home path (e.g., /dav/calendars/user/).
    #[serde(default)]
    pub calendar_home: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("cdav-caldav/", env!("CARGO_PKG_VERSION")).to_string()
}

impl CalDavConfig {
    /// Creates a configuration for a server with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Checks that the configuration can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or not HTTP(S), or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), CalDavError> {
        if self.base_url.is_empty() {
            return Err(CalDavError::Config("base_url is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CalDavError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CalDavError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Resolves an href against the base URL.
    ///
    /// Absolute `http(s)` hrefs are returned unchanged.
    #[must_use]
    pub fn url_for(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{base}{href}")
        } else {
            format!("{base}/{href}")
        }
    }
}

impl Default for CalDavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            calendar_home: String::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_url_for_joins_paths() {
        let config = CalDavConfig::new("https://dav.example.com/");
        assert_eq!(
            config.url_for("/calendars/user/"),
            "https://dav.example.com/calendars/user/"
        );
        assert_eq!(
            config.url_for("calendars/user/"),
            "https://dav.example.com/calendars/user/"
        );
        assert_eq!(
            config.url_for("https://other.example.com/x/"),
            "https://other.example.com/x/"
        );
    }

    #[test]
    fn config_validate() {
        assert!(CalDavConfig::new("https://dav.example.com").validate().is_ok());
        assert!(CalDavConfig::default().validate().is_err());
        assert!(CalDavConfig::new("ftp://dav.example.com").validate().is_err());

        let config = CalDavConfig {
            timeout_secs: 0,
            ..CalDavConfig::new("http://localhost")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_user_agent_default() {
        let config = CalDavConfig::default();
        assert!(config.user_agent.starts_with("cdav-caldav/"));
        assert_eq!(config.timeout_secs, 30);
    }
}
