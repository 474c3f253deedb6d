//! Histograms drawn as a step-shaped scatter trace.
//!
//! Besides the regular bins, one extra bin is added on each side holding the
//! samples that fell outside the binned range, so the step line drops back to
//! the baseline at both ends.
use log::debug;
use plotly::common::{ErrorData, ErrorType, Line, LineShape, Mode};
use plotly::{Plot, Scatter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{bool_flag, BinSpec, ErrorBarStyle, NanPolicy, PlotConfig};
use crate::error::{PlotError, Result};
use crate::stats::{binomial_error, filter_nan, histogram, Histogram};
use crate::theme::ThemeConfig;

/// Error bars attached to a scatter histogram.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorYSpec {
    #[default]
    None,
    /// Binomial errors computed from the bin counts.
    Auto(ErrorBarStyle),
    /// Caller-provided symmetric errors, one per emitted point.
    Data(Vec<f64>),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistogramOptions {
    pub bins: BinSpec,
    pub density: bool,
    pub nan_policy: NanPolicy,
    pub error_y: ErrorYSpec,
    pub name: Option<String>,
    pub mode: HistogramMode,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bins: BinSpec::default(),
            density: false,
            nan_policy: NanPolicy::Omit,
            error_y: ErrorYSpec::None,
            name: None,
            mode: HistogramMode::Lines,
        }
    }
}

impl HistogramOptions {
    /// Options from a JSON object, e.g. a section of a config file.
    ///
    /// `density` must be a JSON boolean; other fields are deserialized as is.
    pub fn from_value(value: &Value) -> Result<Self> {
        bool_flag(value, "density")?;
        serde_json::from_value(value.clone())
            .map_err(|e| PlotError::InvalidArgument(format!("invalid histogram options: {}", e)))
    }
}

/// Scatter drawing mode of the histogram trace.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HistogramMode {
    #[default]
    Lines,
    Markers,
    LinesMarkers,
}

impl From<HistogramMode> for Mode {
    fn from(mode: HistogramMode) -> Self {
        match mode {
            HistogramMode::Lines => Mode::Lines,
            HistogramMode::Markers => Mode::Markers,
            HistogramMode::LinesMarkers => Mode::LinesMarkers,
        }
    }
}

/// Points of a histogram ready to be drawn with a horizontal-vertical-
/// horizontal step line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterHistogram {
    /// Bin centers, including the two synthetic outer bins.
    pub x: Vec<f64>,
    /// Counts, or densities when the histogram is normalized.
    pub y: Vec<f64>,
    pub error_y: Option<Vec<f64>>,
    pub error_style: ErrorBarStyle,
    pub histogram: Histogram,
    pub name: Option<String>,
    pub mode: HistogramMode,
}

impl ScatterHistogram {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn to_trace(&self, theme: &ThemeConfig, index: usize) -> Box<Scatter<f64, f64>> {
        let mut trace = Scatter::new(self.x.clone(), self.y.clone())
            .mode(self.mode.into())
            .line(Line::new().shape(LineShape::Hvh))
            .marker(theme.marker(index));
        if let Some(name) = &self.name {
            trace = trace.name(name);
        }
        if let Some(errors) = &self.error_y {
            let style = self.error_style.or(theme.error_bar);
            trace = trace.error_y(
                ErrorData::new(ErrorType::Data)
                    .array(errors.clone())
                    .width(style.width())
                    .thickness(style.thickness())
                    .visible(style.visible()),
            );
        }
        trace
    }
}

/// Bin `samples` and lay the result out as scatter points.
pub fn scatter_histogram(samples: &[f64], options: &HistogramOptions) -> Result<ScatterHistogram> {
    let samples = filter_nan(samples, options.nan_policy)?;
    let histogram = histogram(&samples, &options.bins, options.density)?;

    // Both synthetic bins reuse the width of the first bin.
    let width = histogram.widths()[0];
    let centers = histogram.centers();
    let mut x = Vec::with_capacity(centers.len() + 2);
    x.push(centers[0] - width);
    x.extend_from_slice(&centers);
    x.push(centers[centers.len() - 1] + width);

    let mut y = Vec::with_capacity(x.len());
    // Outer bins hold plain sample counts, also with density.
    y.push(histogram.underflow as f64);
    y.extend(histogram.values());
    y.push(histogram.overflow as f64);

    let (error_y, error_style) = match &options.error_y {
        ErrorYSpec::None => (None, ErrorBarStyle::default()),
        ErrorYSpec::Data(errors) => {
            if errors.len() != x.len() {
                return Err(PlotError::InvalidArgument(format!(
                    "expected {} error values (bins plus the two outer bins), received {}",
                    x.len(),
                    errors.len()
                )));
            }
            (Some(errors.clone()), ErrorBarStyle::default())
        }
        ErrorYSpec::Auto(style) => (
            Some(auto_errors(&histogram, options.density)),
            style.or(ErrorBarStyle {
                width: Some(ErrorBarStyle::DEFAULT_WIDTH),
                thickness: Some(ErrorBarStyle::DEFAULT_THICKNESS),
                visible: Some(true),
            }),
        ),
    };

    debug!(
        "Scatter histogram of {} samples with {} points",
        samples.len(),
        x.len()
    );
    Ok(ScatterHistogram {
        x,
        y,
        error_y,
        error_style,
        histogram,
        name: options.name.clone(),
        mode: options.mode,
    })
}

/// Figure with one step trace per histogram, in the given order.
pub fn histogram_plot(histograms: &[ScatterHistogram], config: &PlotConfig) -> Plot {
    let theme = config.theme.config();
    let mut plot = Plot::new();
    for (i, h) in histograms.iter().enumerate() {
        plot.add_trace(h.to_trace(&theme, i));
    }
    plot.set_layout(theme.layout());
    plot
}

/// Binomial error of every emitted point, outer bins included.
///
/// Each bin is treated as a Bernoulli proportion of all the samples; with
/// density the error of a core bin is scaled the same way as its height.
/// Outer bins are counts in every mode, and so are their errors.
fn auto_errors(histogram: &Histogram, density: bool) -> Vec<f64> {
    let n = histogram.total();
    let norm = histogram.in_range() as f64;
    let scale = |sigma: f64, width: f64| -> f64 {
        if !density {
            sigma
        } else if norm > 0.0 && width > 0.0 {
            sigma / (norm * width)
        } else {
            0.0
        }
    };

    let mut errors = Vec::with_capacity(histogram.n_bins() + 2);
    errors.push(binomial_error(histogram.underflow, n));
    errors.extend(
        histogram
            .counts
            .iter()
            .zip(histogram.widths())
            .map(|(&c, w)| scale(binomial_error(c, n), w)),
    );
    errors.push(binomial_error(histogram.overflow, n));
    errors
}
