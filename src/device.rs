//! Light descriptions returned by the LIFX cloud API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::plugin::{AvailableDevice, DeviceType};
use crate::types::{Color, PowerState};

/// A light as listed by `GET /lights/all`.
///
/// Every field falls back to its default when the vendor omits it or sends
/// `null`, so one sparse light never fails the whole listing. Entries
/// without an `id` parse but are dropped by [`crate::DeviceCache`]. Fields
/// the vendor adds later are ignored.
#[serde_as]
#[serde_with::skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Device {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub uuid: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub label: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub connected: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub power: PowerState,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub color: Color,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub brightness: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub effect: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub group: Group,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub location: Location,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub product: Product,
    pub last_seen: Option<DateTime<Utc>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub seconds_since_seen: f64,
}

impl Device {
    /// The host-facing view of this light.
    pub fn available(&self) -> AvailableDevice {
        AvailableDevice {
            unique_id: self.id.clone(),
            manufacturer_name: self.product.company.clone(),
            model_name: self.product.name.clone(),
            device_type: DeviceType::Light,
        }
    }
}

/// Group a light belongs to.
#[serde_as]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Group {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
}

/// Location a light belongs to.
#[serde_as]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Location {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
}

/// Hardware product description.
#[serde_as]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Product {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub identifier: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub company: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub capabilities: Capabilities,
}

/// Feature flags and colour temperature range of a product.
#[serde_as]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Capabilities {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_color: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_variable_color_temp: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_ir: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_chain: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_matrix: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub has_multizone: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub min_kelvin: u16,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub max_kelvin: u16,
}
