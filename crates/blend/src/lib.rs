#![deny(unsafe_code)]
//! Mode registry: maps combination mode names to the combiners in
//! [`combine`].
//!
//! This crate sits between `colormix-core` (which defines [`Color`]) and the
//! CLI, so mode-name dispatch lives in one place.

pub mod combine;

use std::fmt;
use std::str::FromStr;

use colormix_core::{Color, ColorError};
use serde::{Deserialize, Serialize};

/// All available mode names, in display order.
const MODE_NAMES: &[&str] = &["mix", "lowest", "highest", "mix-saturate"];

/// A strategy for reducing several colors to one.
///
/// Use [`Mode::from_name`] for string-based construction. The default is
/// [`Mode::Mix`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Per-channel mean.
    #[default]
    Mix,
    /// Per-channel minimum.
    Lowest,
    /// Per-channel maximum.
    Highest,
    /// Mean saturation of all but the last color, applied to the last color.
    MixSaturate,
}

impl Mode {
    /// Looks up a mode by name.
    ///
    /// Returns `ColorError::UnknownMode` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, ColorError> {
        match name {
            "mix" => Ok(Mode::Mix),
            "lowest" => Ok(Mode::Lowest),
            "highest" => Ok(Mode::Highest),
            "mix-saturate" => Ok(Mode::MixSaturate),
            _ => Err(ColorError::UnknownMode(name.to_string())),
        }
    }

    /// Returns the mode's name as accepted by [`Mode::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Mode::Mix => "mix",
            Mode::Lowest => "lowest",
            Mode::Highest => "highest",
            Mode::MixSaturate => "mix-saturate",
        }
    }

    /// Returns a slice of all recognized mode names.
    pub fn list_modes() -> &'static [&'static str] {
        MODE_NAMES
    }

    /// The smallest number of colors this mode accepts.
    pub fn min_inputs(self) -> usize {
        match self {
            Mode::MixSaturate => 2,
            _ => 1,
        }
    }

    /// Reduces `colors` to one color with this mode's combiner.
    pub fn combine(self, colors: &[Color]) -> Result<Color, ColorError> {
        match self {
            Mode::Mix => combine::mix(colors),
            Mode::Lowest => combine::lowest(colors),
            Mode::Highest => combine::highest(colors),
            Mode::MixSaturate => combine::mix_saturate(colors),
        }
    }
}

impl FromStr for Mode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_name(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
