//! The color value type and conversion functions for colormix.
//!
//! A [`Color`] carries three equivalent representations: RGBA bytes, an
//! 8-digit hex string and HSL. RGBA and HSL are fixed at construction; the
//! hex form is rendered from RGBA on demand, so all three always agree.
//!
//! Construction goes through one factory per input shape:
//! [`Color::parse`] for text, [`Color::from_rgba`] / [`Color::from_rgb_checked`]
//! for channel values, [`Color::from_hsla`] for HSL, and
//! `Color::try_from(ColorSpec)` for loosely-typed records.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Alpha assigned to inputs that do not carry an alpha channel.
pub const DEFAULT_ALPHA: u8 = 255;

/// An immutable color with RGBA, hex and HSL views.
///
/// Channels are bytes in [0, 255]. Hue is in degrees in [0, 360);
/// saturation and lightness are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Color {
    /// Builds an opaque color from RGB channels.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color::from_rgba(red, green, blue, DEFAULT_ALPHA)
    }

    /// Builds a color from RGBA channels, deriving HSL.
    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        let (hue, saturation, lightness) = rgb_to_hsl(red, green, blue);
        Color {
            red,
            green,
            blue,
            alpha,
            hue,
            saturation,
            lightness,
        }
    }

    /// Builds a color from wide integer channels.
    ///
    /// Returns `ColorError::InvalidInput` if any channel is outside [0, 255].
    pub fn from_rgb_checked(
        red: i64,
        green: i64,
        blue: i64,
        alpha: i64,
    ) -> Result<Color, ColorError> {
        let bytes = (
            u8::try_from(red),
            u8::try_from(green),
            u8::try_from(blue),
            u8::try_from(alpha),
        );
        match bytes {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::from_rgba(r, g, b, a)),
            _ => Err(ColorError::InvalidInput(format!(
                "[red green blue alpha] = [{red} {green} {blue} {alpha}] must each be in 0-255"
            ))),
        }
    }

    /// Builds an opaque color from HSL values.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Result<Color, ColorError> {
        Color::from_hsla(hue, saturation, lightness, DEFAULT_ALPHA)
    }

    /// Builds a color from HSL values and an alpha byte, deriving RGB.
    ///
    /// Hue must be in [0, 360], saturation and lightness in [0, 1]; NaN is
    /// rejected. A hue of exactly 360 is stored as 0.
    pub fn from_hsla(
        hue: f64,
        saturation: f64,
        lightness: f64,
        alpha: u8,
    ) -> Result<Color, ColorError> {
        let valid = (0.0..=360.0).contains(&hue)
            && (0.0..=1.0).contains(&saturation)
            && (0.0..=1.0).contains(&lightness);
        if !valid {
            return Err(ColorError::InvalidInput(format!(
                "[hue saturation lightness] = [{hue} {saturation} {lightness}] out of range"
            )));
        }
        // `+ 0.0` turns a negative zero into positive zero.
        let hue = hue.rem_euclid(360.0) + 0.0;
        let (red, green, blue) = hsl_to_rgb(hue, saturation, lightness);
        Ok(Color {
            red,
            green,
            blue,
            alpha,
            hue,
            saturation,
            lightness,
        })
    }

    /// Parses a text color token using [`DEFAULT_ALPHA`] where the token has none.
    ///
    /// Accepted forms: 3, 6 or 8 hex digits (case insensitive), or 3 or 4
    /// comma-separated decimal channels in [0, 255], each comma followed by
    /// at most one whitespace character.
    pub fn parse(text: &str) -> Result<Color, ColorError> {
        Color::parse_with_alpha(text, DEFAULT_ALPHA)
    }

    /// Parses a text color token, filling in `default_alpha` for 3- and
    /// 6-digit hex and for 3-component decimal tokens.
    pub fn parse_with_alpha(text: &str, default_alpha: u8) -> Result<Color, ColorError> {
        let rgba = expand_hex(text, default_alpha)
            .map(|hex| hex_to_rgba(&hex))
            .transpose()?
            .or_else(|| parse_decimal(text, default_alpha))
            .ok_or_else(|| {
                ColorError::InvalidInput(format!("{text} is not a valid color number"))
            })?;
        let [r, g, b, a] = rgba;
        Ok(Color::from_rgba(r, g, b, a))
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Returns `[red, green, blue, alpha]`.
    pub fn rgba(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Hue in degrees, [0, 360).
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// Returns the lowercase `rrggbbaa` hex string, without a `#`.
    pub fn hex(&self) -> String {
        rgba_to_hex(self.rgba())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    R:          {}", self.red)?;
        writeln!(f, "    G:          {}", self.green)?;
        writeln!(f, "    B:          {}", self.blue)?;
        writeln!(f, "    alpha:      {}", self.alpha)?;
        writeln!(f, "    hex:        #{}", self.hex())?;
        writeln!(f, "    hue:        {:.3}", self.hue)?;
        writeln!(f, "    saturation: {:.3}", self.saturation)?;
        writeln!(f, "    lightness:  {:.3}", self.lightness)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Color", 8)?;
        state.serialize_field("red", &self.red)?;
        state.serialize_field("green", &self.green)?;
        state.serialize_field("blue", &self.blue)?;
        state.serialize_field("alpha", &self.alpha)?;
        state.serialize_field("hex", &self.hex())?;
        state.serialize_field("hue", &self.hue)?;
        state.serialize_field("saturation", &self.saturation)?;
        state.serialize_field("lightness", &self.lightness)?;
        state.end()
    }
}

/// A loosely-typed color record, e.g. from JSON.
///
/// Exactly one shape must be complete: `text`, or all of `red`/`green`/`blue`,
/// or all of `hue`/`saturation`/`lightness`. `alpha` is optional for every
/// shape; for `text` it is the default alpha.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorSpec {
    pub text: Option<String>,
    pub red: Option<i64>,
    pub green: Option<i64>,
    pub blue: Option<i64>,
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub lightness: Option<f64>,
    pub alpha: Option<i64>,
}

impl TryFrom<ColorSpec> for Color {
    type Error = ColorError;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        let alpha = match spec.alpha {
            Some(a) => u8::try_from(a)
                .map_err(|_| ColorError::InvalidInput(format!("alpha {a} must be in 0-255")))?,
            None => DEFAULT_ALPHA,
        };
        let any_rgb = spec.red.is_some() || spec.green.is_some() || spec.blue.is_some();
        let any_hsl =
            spec.hue.is_some() || spec.saturation.is_some() || spec.lightness.is_some();

        if let Some(text) = spec.text {
            if any_rgb || any_hsl {
                return Err(ColorError::InvalidInput(
                    "text cannot be combined with channel values".to_string(),
                ));
            }
            return Color::parse_with_alpha(&text, alpha);
        }
        if any_rgb && any_hsl {
            return Err(ColorError::InvalidInput(
                "either [red green blue] or [hue saturation lightness] should be provided, not both"
                    .to_string(),
            ));
        }
        if any_rgb {
            return match (spec.red, spec.green, spec.blue) {
                (Some(r), Some(g), Some(b)) => Color::from_rgb_checked(r, g, b, i64::from(alpha)),
                _ => Err(ColorError::InvalidInput(
                    "incomplete [red green blue]".to_string(),
                )),
            };
        }
        match (spec.hue, spec.saturation, spec.lightness) {
            (Some(h), Some(s), Some(l)) => Color::from_hsla(h, s, l, alpha),
            _ if any_hsl => Err(ColorError::InvalidInput(
                "incomplete [hue saturation lightness]".to_string(),
            )),
            _ => Err(ColorError::InvalidInput(
                "either text or [red green blue] or [hue saturation lightness] should be provided"
                    .to_string(),
            )),
        }
    }
}

/// Normalizes a hex token to 8 lowercase digits.
///
/// 3-digit tokens have each digit doubled; 3- and 6-digit tokens get
/// `default_alpha` appended. Returns `None` if `text` is not a hex token.
fn expand_hex(text: &str, default_alpha: u8) -> Option<String> {
    if !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits = text.to_ascii_lowercase();
    match digits.len() {
        3 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            Some(format!("{doubled}{default_alpha:02x}"))
        }
        6 => Some(format!("{digits}{default_alpha:02x}")),
        8 => Some(digits),
        _ => None,
    }
}

/// Parses `r,g,b` or `r,g,b,a`, allowing one whitespace character after
/// each comma. Three-digit channels may not start with `0`.
fn parse_decimal(text: &str, default_alpha: u8) -> Option<[u8; 4]> {
    let parts: Vec<&str> = text.split(',').collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let mut rgba = [0, 0, 0, default_alpha];
    for (i, part) in parts.into_iter().enumerate() {
        let part = match part.chars().next() {
            Some(c) if i > 0 && c.is_whitespace() => &part[c.len_utf8()..],
            _ => part,
        };
        let well_formed = (1..=3).contains(&part.len())
            && part.bytes().all(|b| b.is_ascii_digit())
            && !(part.len() == 3 && part.starts_with('0'));
        if !well_formed {
            return None;
        }
        rgba[i] = part.parse().ok()?;
    }
    Some(rgba)
}

/// Decodes an 8-digit `rrggbbaa` string into bytes.
pub fn hex_to_rgba(hex: &str) -> Result<[u8; 4], ColorError> {
    if hex.len() != 8 || !hex.is_ascii() {
        return Err(ColorError::InvalidInput(format!(
            "expected 8 hex digits, got '{hex}'"
        )));
    }
    let mut rgba = [0u8; 4];
    for (i, byte) in rgba.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|e| ColorError::InvalidInput(format!("invalid hex '{hex}': {e}")))?;
    }
    Ok(rgba)
}

/// Encodes RGBA bytes as a lowercase, zero-padded `rrggbbaa` string.
pub fn rgba_to_hex(rgba: [u8; 4]) -> String {
    let [r, g, b, a] = rgba;
    format!("{r:02x}{g:02x}{b:02x}{a:02x}")
}

/// Converts RGB bytes to `(hue, saturation, lightness)`.
pub fn rgb_to_hsl(red: u8, green: u8, blue: u8) -> (f64, f64, f64) {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let cmax = f64::from(max) / 255.0;
    let cmin = f64::from(min) / 255.0;
    let lightness = (cmax + cmin) / 2.0;
    if max == min {
        return (0.0, 0.0, lightness);
    }

    let (r, g, b) = (
        f64::from(red) / 255.0,
        f64::from(green) / 255.0,
        f64::from(blue) / 255.0,
    );
    let delta = cmax - cmin;
    let saturation = (delta / (1.0 - (2.0 * lightness - 1.0).abs())).clamp(0.0, 1.0);
    let hue = if max == red {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == green {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    (hue, saturation, lightness)
}

/// Converts HSL to RGB bytes. Hue is taken modulo 360.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue.rem_euclid(360.0);
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = lightness - c / 2.0;
    let (r, g, b) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        unit_to_channel(r + m),
        unit_to_channel(g + m),
        unit_to_channel(b + m),
    )
}

fn unit_to_channel(v: f64) -> u8 {
    (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}
