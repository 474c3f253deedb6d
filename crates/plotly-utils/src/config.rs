use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{PlotError, Result};
use crate::theme::Theme;

/// What to do with NaN samples before binning.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    #[default]
    Omit,
    Raise,
}

impl FromStr for NanPolicy {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "omit" => Ok(NanPolicy::Omit),
            "raise" => Ok(NanPolicy::Raise),
            _ => Err(PlotError::InvalidArgument(format!(
                "`nan_policy` must be 'omit' or 'raise', received {:?}",
                s
            ))),
        }
    }
}

/// Automatic bin-width estimators, following the usual histogram rules.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BinRule {
    /// Minimum of the Freedman-Diaconis and Sturges widths.
    #[default]
    Auto,
    /// Freedman-Diaconis: 2 IQR n^(-1/3).
    Fd,
    Sturges,
    Scott,
    Rice,
    Sqrt,
}

impl FromStr for BinRule {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(BinRule::Auto),
            "fd" => Ok(BinRule::Fd),
            "sturges" => Ok(BinRule::Sturges),
            "scott" => Ok(BinRule::Scott),
            "rice" => Ok(BinRule::Rice),
            "sqrt" => Ok(BinRule::Sqrt),
            _ => Err(PlotError::InvalidArgument(format!(
                "Unknown binning rule: {:?}. Expected one of auto, fd, sturges, scott, rice, sqrt",
                s
            ))),
        }
    }
}

/// How histogram bins are chosen.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum BinSpec {
    /// Number of equal-width bins over the data range.
    Count(usize),
    Rule(BinRule),
    /// Explicit, strictly ascending bin edges.
    Edges(Vec<f64>),
}

impl Default for BinSpec {
    fn default() -> Self {
        BinSpec::Rule(BinRule::Auto)
    }
}

impl FromStr for BinSpec {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<usize>() {
            Ok(n) => Ok(BinSpec::Count(n)),
            Err(_) => Ok(BinSpec::Rule(s.parse()?)),
        }
    }
}

/// How the errors of a line are drawn.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorYMode {
    /// Regular plotly error bars.
    Bar,
    /// Continuous filled band around the line.
    Band,
}

impl ErrorYMode {
    /// Parse an optional mode, `"none"` meaning no errors at all.
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        match s.to_lowercase().as_str() {
            "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for ErrorYMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bar" | "bars" => Ok(ErrorYMode::Bar),
            "band" | "bands" => Ok(ErrorYMode::Band),
            _ => Err(PlotError::InvalidArgument(format!(
                "`error_y_mode` must be one of bar, bars, band, bands or none, received {:?}",
                s
            ))),
        }
    }
}

/// Minor tick selection for the logarithmic color bar.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MinorTicks {
    On,
    Off,
    /// Minor ticks only when the data spans at most three decades.
    #[default]
    Auto,
}

impl FromStr for MinorTicks {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "on" | "true" => Ok(MinorTicks::On),
            "off" | "false" => Ok(MinorTicks::Off),
            "auto" => Ok(MinorTicks::Auto),
            _ => Err(PlotError::InvalidArgument(format!(
                "`minor_ticks` must be true, false or \"auto\", received {:?}",
                s
            ))),
        }
    }
}

/// Presentation of error bars; `None` fields fall back to the defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ErrorBarStyle {
    pub width: Option<usize>,
    pub thickness: Option<f64>,
    pub visible: Option<bool>,
}

impl ErrorBarStyle {
    pub const DEFAULT_WIDTH: usize = 1;
    pub const DEFAULT_THICKNESS: f64 = 0.8;

    pub fn width(&self) -> usize {
        self.width.unwrap_or(Self::DEFAULT_WIDTH)
    }

    pub fn thickness(&self) -> f64 {
        self.thickness.unwrap_or(Self::DEFAULT_THICKNESS)
    }

    pub fn visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Fill the unspecified fields from `fallback`.
    pub fn or(self, fallback: ErrorBarStyle) -> Self {
        Self {
            width: self.width.or(fallback.width),
            thickness: self.thickness.or(fallback.thickness),
            visible: self.visible.or(fallback.visible),
        }
    }
}

/// Settings threaded into every figure built by the crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub theme: Theme,
    /// Opacity of error bands.
    pub band_opacity: f64,
    pub error_bar: ErrorBarStyle,
    /// d3 format of the decimal exponent shown in log-scale image hovers.
    pub hover_z_format: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            band_opacity: 0.3,
            error_bar: ErrorBarStyle::default(),
            hover_z_format: ".2f".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

/// Read an optional boolean flag from a JSON object.
///
/// Missing keys and `null` yield `None`; anything that is not a boolean is a
/// `TypeMismatch`.
pub fn bool_flag(options: &Value, name: &str) -> Result<Option<bool>> {
    match options.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(PlotError::TypeMismatch {
            name: name.to_string(),
            expected: "`true` or `false`",
            received: json_type_name(other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
