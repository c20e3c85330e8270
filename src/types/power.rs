//! Power state of a LIFX light.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Power state as reported and accepted by the LIFX cloud API.
///
/// The API speaks lowercase strings (`"on"` / `"off"`). Anything else the
/// vendor might report decodes to [`PowerState::Unknown`], which counts as
/// off.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PowerState {
    /// The light is emitting
    On,
    /// The light is off
    #[default]
    Off,
    #[serde(other)]
    Unknown,
}

impl PowerState {
    pub fn is_on(&self) -> bool {
        matches!(self, PowerState::On)
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { PowerState::On } else { PowerState::Off }
    }
}
