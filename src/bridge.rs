//! The LIFX device plugin.

use std::time::Duration;

use log::{debug, error};
use serde_json::{Value, json};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::cache::DeviceCache;
use crate::client::LifxClient;
use crate::config::{BridgeConfig, ConfigKV, ConfigValueType, PluginConfig};
use crate::errors::Error;
use crate::history::RequestHistory;
use crate::plugin::{AvailableDevice, HostPlugin, PluginManifest, WebExtension};
use crate::types::PowerState;

type Result<T> = std::result::Result<T, Error>;

/// Exposes LIFX cloud lights to the host.
///
/// Device listings are fetched lazily and kept for the configured refresh
/// interval (30 seconds by default). Power changes go straight to the vendor
/// and, once accepted, are written into the cache without re-reading the
/// listing. Changes made outside the bridge show up on the next refresh.
///
/// The cached listing, power states and refresh time sit behind a single
/// lock. A refresh holds it for the whole vendor round trip, so concurrent
/// reads inside one interval share a single request.
///
/// # Example
///
/// ```no_run
/// use lifx_cloud_bridge::{BridgeConfig, HostPlugin, LifxBridge};
///
/// # async fn run() -> Result<(), lifx_cloud_bridge::Error> {
/// let bridge = LifxBridge::new(BridgeConfig::new().with_token("c87c3b..."))?;
/// for device in bridge.get_available_devices().await {
///     bridge.on_device_toggle(&device.unique_id, true).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LifxBridge {
    client: LifxClient,
    token: RwLock<String>,
    cache: Mutex<DeviceCache>,
    refresh_interval: Duration,
}

impl LifxBridge {
    /// Configuration key of the personal access token.
    pub const TOKEN_KEY: &'static str = "pak";

    pub fn new(config: BridgeConfig) -> Result<Self> {
        let client = LifxClient::new(&config.base_url, config.request_timeout)?;
        Ok(LifxBridge {
            client,
            token: RwLock::new(config.token.trim().to_string()),
            cache: Mutex::new(DeviceCache::new()),
            refresh_interval: config.refresh_interval,
        })
    }

    pub fn manifest() -> PluginManifest {
        PluginManifest {
            id: "lifx".to_string(),
            name: "LIFX Integration Plugin".to_string(),
            author: "Nacdlow".to_string(),
            version: "v0.1.0".to_string(),
        }
    }

    pub fn configuration_schema() -> Vec<PluginConfig> {
        vec![PluginConfig {
            title: "Personal Integration Token".to_string(),
            description: "Get your token from cloud.lifx.com!".to_string(),
            key: Self::TOKEN_KEY.to_string(),
            value_type: ConfigValueType::StringValue,
            is_user_specific: false,
        }]
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub async fn token_configured(&self) -> bool {
        !self.token.read().await.is_empty()
    }

    /// Replaces the bearer token.
    ///
    /// Returns whether the token changed. A new token makes the next read
    /// refresh regardless of the interval; cached data is kept until then.
    pub async fn set_token(&self, token: &str) -> bool {
        let token = token.trim();
        {
            let mut current = self.token.write().await;
            if *current == token {
                return false;
            }
            *current = token.to_string();
        }
        self.cache.lock().await.invalidate();
        true
    }

    /// Fetches the device listing now, ignoring the refresh interval.
    ///
    /// Returns the number of listed devices.
    pub async fn refresh(&self) -> Result<usize> {
        let mut cache = self.cache.lock().await;
        self.refresh_locked(&mut cache).await
    }

    /// Copy of the current cache contents, without refreshing.
    pub async fn cache_snapshot(&self) -> DeviceCache {
        self.cache.lock().await.clone()
    }

    pub async fn history(&self) -> RequestHistory {
        self.client.history().await
    }

    /// Returns diagnostics including cache state, settings and history.
    pub async fn diagnostics(&self) -> Value {
        let token_configured = self.token_configured().await;
        let cache = self.cache.lock().await;
        let mut diag = json!({
            "manifest": Self::manifest(),
            "base_url": self.client.base_url(),
            "token_configured": token_configured,
            "refresh_interval_secs": self.refresh_interval().as_secs_f64(),
            "cache": {
                "devices": cache.available().len(),
                "states": cache.len(),
                "powered_on": cache.states().values().filter(|on| **on).count(),
                "secs_since_refresh": cache.since_refresh().map(|d| d.as_secs_f64()),
            },
        });
        drop(cache);

        let history = self.client.history().await;
        diag["history"] = serde_json::to_value(history.summary()).unwrap_or(Value::Null);
        diag
    }

    async fn refresh_locked(&self, cache: &mut DeviceCache) -> Result<usize> {
        cache.mark_attempt();
        let token = self.token.read().await.clone();

        let devices = self
            .client
            .list_lights(&token)
            .await
            .inspect_err(|e| error!("get available: {}", e))?;

        cache.replace(&devices);
        let listed = cache.available().len();
        debug!("refreshed {} LIFX device(s)", listed);
        Ok(listed)
    }

    /// Locks the cache, refreshing it first if it is stale.
    ///
    /// A failed refresh is logged and the previous contents are served.
    async fn fresh_cache(&self) -> MutexGuard<'_, DeviceCache> {
        let mut cache = self.cache.lock().await;
        if cache.is_stale(self.refresh_interval)
            && self.refresh_locked(&mut cache).await.is_err()
        {
            debug!("serving {} cached device state(s)", cache.len());
        }
        cache
    }
}

impl HostPlugin for LifxBridge {
    async fn on_load(&self) -> Result<()> {
        debug!("Loading LIFX integration plugin!");
        if !self.token_configured().await {
            debug!("no LIFX token configured yet");
        }
        Ok(())
    }

    fn get_manifest(&self) -> PluginManifest {
        Self::manifest()
    }

    async fn on_device_toggle(&self, id: &str, status: bool) -> Result<()> {
        let token = self.token.read().await.clone();

        self.client
            .set_power(&token, id, PowerState::from(status))
            .await
            .inspect_err(|e| error!("on toggle: {}", e))?;

        self.cache.lock().await.set_power(id, status);
        Ok(())
    }

    async fn get_device_status(&self, id: &str) -> bool {
        self.fresh_cache().await.power(id)
    }

    fn get_plugin_configuration(&self) -> Vec<PluginConfig> {
        Self::configuration_schema()
    }

    async fn on_configuration_update(&self, config: &[ConfigKV]) {
        for entry in config {
            if entry.key == Self::TOKEN_KEY {
                if self.set_token(&entry.value).await {
                    debug!("LIFX token updated");
                }
            } else {
                debug!("ignoring unknown configuration key {:?}", entry.key);
            }
        }
    }

    async fn get_available_devices(&self) -> Vec<AvailableDevice> {
        self.fresh_cache().await.available().to_vec()
    }

    fn get_web_extensions(&self) -> Vec<WebExtension> {
        Vec::new()
    }
}
