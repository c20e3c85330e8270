//! Colour as reported by the LIFX cloud API.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Hue, saturation and colour temperature of a light.
///
/// Hue is in degrees (0-360), saturation a ratio (0.0-1.0) and kelvin the
/// white point. The vendor reports hue and saturation as floats.
#[serde_as]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Color {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub hue: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub saturation: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub kelvin: u16,
}
