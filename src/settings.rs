//! Hub configuration surface.
//!
//! Settings are resolved once before the adapter is first constructed. The
//! block derives serde traits so hosts can embed it in their own
//! configuration files; environment overrides are applied explicitly via
//! [`HubSettings::from_env`].

use serde::{Deserialize, Serialize};

use crate::error::HubError;

fn default_endpoint() -> String {
    ".".to_string()
}

/// Configuration for one hub connection.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HubSettings {
    /// Name of the hub channel to bind. Required; construction fails loudly
    /// when empty.
    pub hub_name: String,
    /// Enable the transport's diagnostic logging.
    #[serde(default)]
    pub logging: bool,
    /// Base endpoint path the connection is opened against. Defaults to the
    /// current origin (`.`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl HubSettings {
    /// Settings for `hub_name` with default logging and endpoint.
    pub fn new(hub_name: impl Into<String>) -> Self {
        Self {
            hub_name: hub_name.into(),
            logging: false,
            endpoint: default_endpoint(),
        }
    }

    /// Settings for `hub_name` with environment overrides applied.
    pub fn from_env(hub_name: impl Into<String>) -> Self {
        let mut settings = Self::new(hub_name);
        settings.apply_env_overrides();
        settings
    }

    /// Apply `HUBLINK_ENDPOINT` and `HUBLINK_LOGGING` overrides.
    ///
    /// `HUBLINK_LOGGING` accepts `1`/`true`/`0`/`false`; anything else is
    /// ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("HUBLINK_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Ok(logging) = std::env::var("HUBLINK_LOGGING") {
            match logging.as_str() {
                "1" | "true" => self.logging = true,
                "0" | "false" => self.logging = false,
                other => {
                    log::debug!("[Hub] ignoring unparsable HUBLINK_LOGGING value: {other}");
                }
            }
        }
    }

    /// Check that the block names a hub.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::MissingHubName`] when the hub name is empty or
    /// whitespace.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.hub_name.trim().is_empty() {
            return Err(HubError::MissingHubName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = HubSettings::new("chat");
        assert_eq!(settings.hub_name, "chat");
        assert_eq!(settings.endpoint, ".");
        assert!(!settings.logging);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(HubSettings::new("").validate().is_err());
        assert!(HubSettings::new("   ").validate().is_err());
        assert!(HubSettings::new("chat").validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let settings: HubSettings = serde_json::from_str(r#"{"hub_name":"chat"}"#).unwrap();
        assert_eq!(settings.endpoint, ".");
        assert!(!settings.logging);
    }

    #[test]
    fn test_env_overrides() {
        // Set and clear in one test - env vars are process-global and the
        // test harness runs tests in parallel threads.
        std::env::set_var("HUBLINK_ENDPOINT", "https://example.test/realtime");
        std::env::set_var("HUBLINK_LOGGING", "true");

        let settings = HubSettings::from_env("chat");
        assert_eq!(settings.endpoint, "https://example.test/realtime");
        assert!(settings.logging);

        // Unparsable logging value leaves the flag untouched
        std::env::set_var("HUBLINK_LOGGING", "maybe");
        let mut settings = HubSettings::new("chat");
        settings.logging = true;
        settings.apply_env_overrides();
        assert!(settings.logging);

        std::env::remove_var("HUBLINK_ENDPOINT");
        std::env::remove_var("HUBLINK_LOGGING");
    }
}
