//! Styling presets.
//!
//! A theme is a plain value that every figure builder receives through
//! `PlotConfig`; nothing here touches process-wide state.
use plotly::common::{ColorScale, ColorScaleElement, Font, Label, Line, Marker, MarkerSymbol};
use plotly::layout::{Axis, Layout, Legend, Mirror, TicksDirection, VAlign};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ErrorBarStyle;
use crate::error::{PlotError, Result};

const MARKER_SYMBOLS: [MarkerSymbol; 27] = [
    MarkerSymbol::Circle,
    MarkerSymbol::Cross,
    MarkerSymbol::X,
    MarkerSymbol::TriangleUp,
    MarkerSymbol::Star,
    MarkerSymbol::Hexagram,
    MarkerSymbol::Square,
    MarkerSymbol::Diamond,
    MarkerSymbol::Hourglass,
    MarkerSymbol::BowTie,
    MarkerSymbol::Pentagon,
    MarkerSymbol::TriangleDown,
    MarkerSymbol::TriangleLeft,
    MarkerSymbol::TriangleRight,
    MarkerSymbol::StarTriangleUp,
    MarkerSymbol::StarTriangleDown,
    MarkerSymbol::StarSquare,
    MarkerSymbol::StarDiamond,
    MarkerSymbol::DiamondTall,
    MarkerSymbol::DiamondWide,
    MarkerSymbol::TriangleNE,
    MarkerSymbol::TriangleSE,
    MarkerSymbol::TriangleSW,
    MarkerSymbol::TriangleNW,
    MarkerSymbol::Hexagon,
    MarkerSymbol::Hexagon2,
    MarkerSymbol::Octagon,
];

const PEACH: [&str; 7] = [
    "rgb(253,224,197)",
    "rgb(250,203,166)",
    "rgb(248,181,139)",
    "rgb(245,158,114)",
    "rgb(242,133,93)",
    "rgb(239,106,76)",
    "rgb(235,74,64)",
];

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Plotly defaults with the Comfortaa font.
    #[default]
    Plotly,
    /// Serif font with mirrored axis lines and inside ticks.
    BoringThesis,
}

impl FromStr for Theme {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "plotly" => Ok(Theme::Plotly),
            "boring_thesis" => Ok(Theme::BoringThesis),
            _ => Err(PlotError::InvalidArgument(format!("Unknown theme: {:?}", s))),
        }
    }
}

impl Theme {
    pub fn config(self) -> ThemeConfig {
        match self {
            Theme::Plotly => ThemeConfig {
                font_family: "Comfortaa",
                inside_ticks: false,
                show_axis_lines: false,
                mirror_axes: false,
                sequential_scale: None,
                ..ThemeConfig::base()
            },
            Theme::BoringThesis => ThemeConfig {
                font_family: "serif",
                inside_ticks: true,
                show_axis_lines: true,
                mirror_axes: true,
                sequential_scale: Some(&PEACH),
                ..ThemeConfig::base()
            },
        }
    }
}

/// Resolved styling values of a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub font_family: &'static str,
    pub marker_line_width: f64,
    pub error_bar: ErrorBarStyle,
    pub inside_ticks: bool,
    pub show_axis_lines: bool,
    /// Repeat axis lines and ticks on the opposite side of the plot.
    pub mirror_axes: bool,
    /// Color scale for heatmaps and contours; `None` keeps the plotly default.
    pub sequential_scale: Option<&'static [&'static str]>,
}

impl ThemeConfig {
    fn base() -> Self {
        Self {
            font_family: "",
            marker_line_width: 0.5,
            error_bar: ErrorBarStyle {
                width: Some(ErrorBarStyle::DEFAULT_WIDTH),
                thickness: Some(ErrorBarStyle::DEFAULT_THICKNESS),
                visible: None,
            },
            inside_ticks: false,
            show_axis_lines: false,
            mirror_axes: false,
            sequential_scale: None,
        }
    }

    /// Starting layout for a figure.
    pub fn layout(&self) -> Layout {
        Layout::new()
            .font(Font::new().family(self.font_family))
            .hover_label(Label::new().font(Font::new().family(self.font_family)))
            .legend(Legend::new().valign(VAlign::Top))
            .x_axis(self.axis())
            .y_axis(self.axis())
    }

    /// Starting axis; callers add titles, domains and anchors on top.
    pub fn axis(&self) -> Axis {
        let axis = Axis::new();
        let axis = if self.inside_ticks {
            axis.ticks(TicksDirection::Inside)
        } else {
            axis
        };
        let axis = if self.show_axis_lines {
            axis.show_line(true)
        } else {
            axis
        };
        if self.mirror_axes {
            axis.mirror(Mirror::AllTicks)
        } else {
            axis
        }
    }

    /// Marker for the `index`-th trace, cycling through the symbol list.
    pub fn marker(&self, index: usize) -> Marker {
        Marker::new()
            .symbol(self.marker_symbol(index))
            .line(Line::new().width(self.marker_line_width))
    }

    pub fn marker_symbol(&self, index: usize) -> MarkerSymbol {
        MARKER_SYMBOLS[index % MARKER_SYMBOLS.len()].clone()
    }

    pub fn color_scale(&self) -> Option<ColorScale> {
        let colors = self.sequential_scale?;
        let last = colors.len().saturating_sub(1).max(1) as f64;
        Some(ColorScale::Vector(
            colors
                .iter()
                .enumerate()
                .map(|(i, c)| ColorScaleElement(i as f64 / last, c.to_string()))
                .collect(),
        ))
    }
}
