//! Value types reported by the LIFX cloud API.

mod color;
mod power;

pub use color::Color;
pub use power::PowerState;
