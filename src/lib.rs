//! # lifx_cloud_bridge
//!
//! A smart-home host plugin that exposes LIFX lights through the LIFX cloud
//! HTTP API.
//!
//! The host drives the plugin through the [`HostPlugin`] trait: it asks for
//! the plugin's manifest and configuration schema, hands over the user's
//! personal access token, lists the available lights, queries their power
//! state and switches them on or off. [`LifxBridge`] implements that trait on
//! top of `https://api.lifx.com/v1`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lifx_cloud_bridge::{BridgeConfig, ConfigKV, HostPlugin, LifxBridge};
//!
//! async fn switch_everything_on() -> Result<(), lifx_cloud_bridge::Error> {
//!     let bridge = LifxBridge::new(BridgeConfig::new())?;
//!     bridge.on_configuration_update(&[ConfigKV::new("pak", "c87c3b...")]).await;
//!
//!     for device in bridge.get_available_devices().await {
//!         if !bridge.get_device_status(&device.unique_id).await {
//!             bridge.on_device_toggle(&device.unique_id, true).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Caching
//!
//! The device listing is fetched at most once per refresh interval (30
//! seconds by default), counted from the start of the last attempt. A failed
//! fetch is logged and the previous listing keeps being served, so status
//! and listing calls never fail. Toggles are sent immediately and update the
//! cached state once the vendor accepts them.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade. Vendor failures are logged at
//! `error` level, cache activity at `debug` level. Installing a logger is up
//! to the host process.

mod bridge;
mod cache;
mod client;
mod config;
mod device;
mod errors;
mod history;
pub mod plugin;
mod types;

// Re-export public API
pub use bridge::LifxBridge;
pub use cache::DeviceCache;
pub use client::LifxClient;
pub use config::{BridgeConfig, ConfigKV, ConfigValueType, PluginConfig};
pub use device::{Capabilities, Device, Group, Location, Product};
pub use errors::Error;
pub use history::{EventKind, HistoryEntry, HistorySummary, RequestHistory};
pub use plugin::{
    AvailableDevice, DeviceType, HANDSHAKE, Handshake, HostPlugin, PLUGIN_NAME, PluginManifest,
    WebExtension,
};
pub use types::{Color, PowerState};
