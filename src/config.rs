//! Bridge settings and the configuration schema reported to the host.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};

/// Settings of a [`crate::LifxBridge`].
///
/// The token is normally delivered later by the host through
/// [`crate::HostPlugin::on_configuration_update`]; the other fields are
/// fixed for the bridge's lifetime.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Personal access token sent as a bearer credential.
    pub token: String,
    /// Root of the LIFX HTTP API, without a trailing slash.
    pub base_url: String,
    /// Upper bound on any single vendor call.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub request_timeout: Duration,
    /// Minimum age of the device cache before reads fetch it again.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub refresh_interval: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl BridgeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.lifx.com/v1";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.trim().to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// Type of value a configuration entry holds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValueType {
    StringValue,
    BooleanValue,
    IntValue,
}

/// One setting the host should collect from the user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginConfig {
    pub title: String,
    pub description: String,
    pub key: String,
    #[serde(rename = "Type")]
    pub value_type: ConfigValueType,
    /// Whether every user of the host sets their own value.
    pub is_user_specific: bool,
}

/// A configured value delivered by the host.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigKV {
    pub key: String,
    pub value: String,
}

impl ConfigKV {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
