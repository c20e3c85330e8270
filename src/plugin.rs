//! The contract between the smart-home host and its device plugins.
//!
//! The host loads each plugin as a separate process and drives it through the
//! methods of [`HostPlugin`]. The process handshake and the transport that
//! carries these calls belong to the host; this module only fixes the
//! handshake values and the shapes exchanged over it.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigKV, PluginConfig};
use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Values both sides must agree on before the host dispenses a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    pub protocol_version: u32,
    pub magic_cookie_key: &'static str,
    pub magic_cookie_value: &'static str,
}

pub const HANDSHAKE: Handshake = Handshake {
    protocol_version: 1,
    magic_cookie_key: "IGLU_PLUGIN",
    magic_cookie_value: "MzlK0OGpIRs",
};

/// Name under which the host looks the plugin up in the served plugin map.
pub const PLUGIN_NAME: &str = "iglu_plugin";

/// Static description of a plugin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub author: String,
    pub version: String,
}

/// Kind of device advertised to the host.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(into = "u8", try_from = "u8")]
pub enum DeviceType {
    #[default]
    Light = 0,
}

impl From<DeviceType> for u8 {
    fn from(value: DeviceType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for DeviceType {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, String> {
        match value {
            0 => Ok(DeviceType::Light),
            other => Err(format!("unknown device type {other}")),
        }
    }
}

/// A device the host may add to its inventory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AvailableDevice {
    #[serde(rename = "UniqueID")]
    pub unique_id: String,
    #[serde(rename = "ManufacturerName")]
    pub manufacturer_name: String,
    #[serde(rename = "ModelName")]
    pub model_name: String,
    #[serde(rename = "Type")]
    pub device_type: DeviceType,
}

/// A page a plugin contributes to the host's web interface.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct WebExtension {
    pub id: String,
    pub name: String,
    pub path: String,
}

/// Calls the host makes into a device plugin.
///
/// The host may issue these concurrently, so implementors must be `Sync`.
pub trait HostPlugin: Send + Sync {
    /// Called once after the plugin process is dispensed.
    fn on_load(&self) -> impl Future<Output = Result<()>> + Send;

    fn get_manifest(&self) -> PluginManifest;

    /// Switch a device on or off.
    fn on_device_toggle(&self, id: &str, status: bool) -> impl Future<Output = Result<()>> + Send;

    /// Power state of a device; unknown devices report `false`.
    fn get_device_status(&self, id: &str) -> impl Future<Output = bool> + Send;

    /// Schema of the settings the host should ask the user for.
    fn get_plugin_configuration(&self) -> Vec<PluginConfig>;

    /// Deliver the settings the user entered.
    fn on_configuration_update(&self, config: &[ConfigKV]) -> impl Future<Output = ()> + Send;

    fn get_available_devices(&self) -> impl Future<Output = Vec<AvailableDevice>> + Send;

    fn get_web_extensions(&self) -> Vec<WebExtension>;
}
