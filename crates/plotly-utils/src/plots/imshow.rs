//! Images with a logarithmic color scale.
//!
//! The heatmap shows `log10` of the data while the color bar is labelled
//! with the original values in engineering notation.
use log::debug;
use ndarray::Array2;
use plotly::common::{ColorBar, HoverInfo, Line};
use plotly::contour::{Coloring, Contours};
use plotly::layout::Axis;
use plotly::{Contour, HeatMap, Plot};

use crate::config::{MinorTicks, PlotConfig};
use crate::error::{PlotError, Result};

/// Decades covered by the color bar ticks, `10^-18` up to `10^11`.
const DECADES: std::ops::Range<i32> = -18..12;

/// Decades spanned by the data above which minor ticks are dropped.
const MINOR_TICKS_MAX_SPAN: f64 = 3.0;

/// Grid of values with their coordinates; rows follow `y`, columns `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogImage {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Array2<f64>,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
}

impl LogImage {
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Array2<f64>) -> Result<Self> {
        let (rows, cols) = z.dim();
        if rows != y.len() || cols != x.len() {
            return Err(PlotError::InvalidArgument(format!(
                "image of shape ({}, {}) does not match {} y and {} x coordinates",
                rows,
                cols,
                y.len(),
                x.len()
            )));
        }
        Ok(Self {
            x,
            y,
            z,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            z_label: "color".to_string(),
        })
    }

    pub fn labels(mut self, x: &str, y: &str, z: &str) -> Self {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
        self.z_label = z.to_string();
        self
    }

    /// Smallest and largest finite value, ignoring NaN.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.z.iter().copied())
    }

    fn rows(data: &Array2<f64>) -> Vec<Vec<f64>> {
        data.outer_iter().map(|row| row.to_vec()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogImageOptions {
    pub minor_ticks: MinorTicks,
    /// Draw an iso-line for every tick value inside the data range.
    pub draw_contours: bool,
    pub title: Option<String>,
}

impl Default for LogImageOptions {
    fn default() -> Self {
        Self {
            minor_ticks: MinorTicks::Auto,
            draw_contours: true,
            title: None,
        }
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Color bar tick values: `k * 10^e` for every decade, with `k` in `1..=9`
/// when `minor` is set and only `k = 1` otherwise.
pub fn log_ticks(minor: bool) -> Vec<f64> {
    let multipliers: &[f64] = if minor {
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
    } else {
        &[1.0]
    };
    DECADES
        .flat_map(|e| multipliers.iter().map(move |k| k * 10f64.powi(e)))
        .collect()
}

/// Whether minor ticks are shown for data spanning `log_span` decades.
pub fn use_minor_ticks(minor_ticks: MinorTicks, log_span: f64) -> bool {
    match minor_ticks {
        MinorTicks::On => true,
        MinorTicks::Off => false,
        MinorTicks::Auto => log_span <= MINOR_TICKS_MAX_SPAN,
    }
}

const PREFIXES: [(i32, &str); 17] = [
    (-24, "y"),
    (-21, "z"),
    (-18, "a"),
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "u"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
    (15, "P"),
    (18, "E"),
    (21, "Z"),
    (24, "Y"),
];

/// Format `value` with an SI prefix and at most two decimals, e.g. `2.5m`,
/// `1k`, `300n`.
pub fn eng_notation(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let mut exponent = ((value.abs().log10() / 3.0).floor() as i32 * 3).clamp(-24, 24);
    let mut mantissa = value / 10f64.powi(exponent);
    if (mantissa.abs() * 100.0).round() >= 100_000.0 && exponent < 24 {
        exponent += 3;
        mantissa /= 1000.0;
    }
    let mut digits = format!("{:.2}", mantissa);
    if digits.contains('.') {
        digits = digits.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    let prefix = PREFIXES
        .iter()
        .find(|(e, _)| *e == exponent)
        .map(|(_, p)| *p)
        .unwrap_or("");
    format!("{}{}", digits, prefix)
}

/// Heatmap of `image` on a logarithmic color scale.
pub fn imshow_logscale(image: &LogImage, options: &LogImageOptions, config: &PlotConfig) -> Result<Plot> {
    let theme = config.theme.config();
    let log_data = image.z.mapv(f64::log10);
    let log_range = finite_range(log_data.iter().copied());

    let span = log_range.map(|(lo, hi)| hi - lo).unwrap_or(0.0);
    let minor = use_minor_ticks(options.minor_ticks, span);
    let ticks: Vec<f64> = match log_range {
        Some((lo, hi)) => log_ticks(minor)
            .into_iter()
            .filter(|t| {
                let l = t.log10();
                l >= lo.floor() - 1e-9 && l <= hi.ceil() + 1e-9
            })
            .collect(),
        None => Vec::new(),
    };
    debug!(
        "Log image spanning {:.2} decades, {} color bar ticks (minor: {})",
        span,
        ticks.len(),
        minor
    );
    let tick_text: Vec<String> = ticks.iter().map(|&t| eng_notation(t)).collect();
    let tick_vals: Vec<f64> = ticks.iter().map(|t| t.log10()).collect();

    let hover = format!(
        "{}: %{{x}}<br>{}: %{{y}}<br>{}: 10<sup>%{{z:{}}}</sup><extra></extra>",
        image.x_label, image.y_label, image.z_label, config.hover_z_format
    );
    let mut heatmap = HeatMap::new(image.x.clone(), image.y.clone(), LogImage::rows(&log_data))
        .color_bar(
            ColorBar::new()
                .tick_vals(tick_vals)
                .tick_text(tick_text.clone()),
        )
        .hover_template(hover.as_str())
        .name(image.z_label.as_str());
    if let Some(scale) = theme.color_scale() {
        heatmap = heatmap.color_scale(scale);
    }

    let mut plot = Plot::new();
    plot.add_trace(heatmap);

    if options.draw_contours {
        if let Some((lo, hi)) = image.value_range() {
            let levels: Vec<f64> = ticks.iter().copied().filter(|&t| lo < t && t < hi).collect();
            debug!("Drawing {} iso-lines", levels.len());
            for level in levels {
                let contour = Contour::new(image.x.clone(), image.y.clone(), LogImage::rows(&image.z))
                    .contours(
                        Contours::new()
                            .start(level)
                            .end(level)
                            .size(level)
                            .coloring(Coloring::None)
                            .show_labels(true),
                    )
                    .line(Line::new().width(0.5).color("black"))
                    .show_scale(false)
                    .show_legend(false)
                    .hover_info(HoverInfo::Skip);
                plot.add_trace(contour);
            }
        }
    }

    let mut layout = theme
        .layout()
        .x_axis(theme.axis().title(image.x_label.as_str()))
        .y_axis(theme.axis().title(image.y_label.as_str()));
    if let Some(title) = &options.title {
        layout = layout.title(title.as_str());
    }
    plot.set_layout(layout);
    Ok(plot)
}
