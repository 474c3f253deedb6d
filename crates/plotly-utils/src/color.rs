//! Color strings accepted by the band builder and the default colorway.
use std::fmt;
use std::str::FromStr;

use crate::error::{PlotError, Result};

/// Colors assigned to lines that do not carry one, in trace order.
pub const DEFAULT_COLORWAY: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Transparent white, used for the invisible border of filled bands.
pub const TRANSPARENT: &str = "rgba(255,255,255,0)";

/// Colorway entry for the `index`-th trace.
pub fn default_color(index: usize) -> &'static str {
    DEFAULT_COLORWAY[index % DEFAULT_COLORWAY.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || PlotError::InvalidColorFormat(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse `rgb(r, g, b)`; whitespace around the channels is ignored.
    pub fn from_css(s: &str) -> Result<Self> {
        let invalid = || PlotError::InvalidColorFormat(s.to_string());
        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let channels = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>>>()?;
        match channels.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

impl FromStr for Rgb {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else if trimmed.starts_with("rgb(") {
            Self::from_css(trimmed)
        } else {
            Err(PlotError::InvalidColorFormat(s.to_string()))
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// An RGB color with an alpha channel, rendered as `rgba(r,g,b,a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// Translucent version of `color` for filling a band.
pub fn fill_color(color: &str, alpha: f64) -> Result<Rgba> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(PlotError::InvalidArgument(format!(
            "opacity must be within [0, 1], received {}",
            alpha
        )));
    }
    Ok(color.parse::<Rgb>()?.with_alpha(alpha))
}
