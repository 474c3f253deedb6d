//! Line plots whose errors are drawn as filled bands.
//!
//! A band is the polygon enclosing `y + plus` and `y - minus`. It is emitted
//! as its own scatter trace right before the line it belongs to, so the line
//! is drawn on top of it.
use log::{debug, warn};
use plotly::common::{ErrorData, ErrorType, Fill, HoverInfo, Line, Mode};
use plotly::{Plot, Scatter};

use crate::color::{default_color, fill_color, Rgba, TRANSPARENT};
use crate::config::{ErrorBarStyle, ErrorYMode, PlotConfig};
use crate::error::{PlotError, Result};
use crate::theme::ThemeConfig;

/// Error magnitudes of a line; `minus` falls back to `plus` when absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorY {
    pub plus: Vec<f64>,
    pub minus: Option<Vec<f64>>,
}

impl ErrorY {
    pub fn symmetric(plus: Vec<f64>) -> Self {
        Self { plus, minus: None }
    }

    pub fn asymmetric(plus: Vec<f64>, minus: Vec<f64>) -> Self {
        Self {
            plus,
            minus: Some(minus),
        }
    }

    pub fn minus(&self) -> &[f64] {
        self.minus.as_deref().unwrap_or(&self.plus)
    }
}

/// One line series as it is handed to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineTrace {
    pub name: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub error_y: Option<ErrorY>,
    /// `#rrggbb` or `rgb(r,g,b)`; filled from the default colorway if unset.
    pub color: Option<String>,
    pub legend_group: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
}

impl LineTrace {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn error_y(mut self, error_y: ErrorY) -> Self {
        self.error_y = Some(error_y);
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn legend_group(mut self, group: &str) -> Self {
        self.legend_group = Some(group.to_string());
        self
    }

    pub fn axes(mut self, x_axis: &str, y_axis: &str) -> Self {
        self.x_axis = Some(x_axis.to_string());
        self.y_axis = Some(y_axis.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(PlotError::InvalidArgument(format!(
                "x and y must have equal lengths, received {} and {}",
                self.x.len(),
                self.y.len()
            )));
        }
        if let Some(err) = &self.error_y {
            if err.plus.len() != self.len() || err.minus().len() != self.len() {
                return Err(PlotError::InvalidArgument(format!(
                    "error arrays must have {} entries, received {} (plus) and {} (minus)",
                    self.len(),
                    err.plus.len(),
                    err.minus().len()
                )));
            }
        }
        Ok(())
    }

    /// Scatter trace for the line; errors become plotly error bars.
    pub fn to_trace(
        &self,
        theme: &ThemeConfig,
        index: usize,
        style: &ErrorBarStyle,
    ) -> Box<Scatter<f64, f64>> {
        let color = self
            .color
            .clone()
            .unwrap_or_else(|| default_color(index).to_string());
        let mut trace = Scatter::new(self.x.clone(), self.y.clone())
            .mode(Mode::Lines)
            .line(Line::new().color(color.clone()))
            .marker(theme.marker(index));
        if let Some(name) = &self.name {
            trace = trace.name(name);
        }
        if let Some(group) = &self.legend_group {
            trace = trace.legend_group(group);
        }
        if let Some(axis) = &self.x_axis {
            trace = trace.x_axis(axis);
        }
        if let Some(axis) = &self.y_axis {
            trace = trace.y_axis(axis);
        }
        if let Some(err) = &self.error_y {
            let style = style.or(theme.error_bar);
            trace = trace.error_y(
                ErrorData::new(ErrorType::Data)
                    .array(err.plus.clone())
                    .array_minus(err.minus().to_vec())
                    .color(color)
                    .width(style.width())
                    .thickness(style.thickness())
                    .visible(style.visible()),
            );
        }
        trace
    }
}

/// Filled polygon enclosing a line's error envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// Upper envelope in x order followed by the lower one reversed.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub fill_color: Rgba,
    pub legend_group: Option<String>,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
}

impl Band {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Scatter trace filling the polygon with an invisible border, no hover
    /// and no legend entry of its own.
    pub fn to_trace(&self) -> Box<Scatter<f64, f64>> {
        let mut trace = Scatter::new(self.x.clone(), self.y.clone())
            .mode(Mode::Lines)
            .fill(Fill::ToSelf)
            .fill_color(self.fill_color.to_string())
            .line(Line::new().color(TRANSPARENT).width(0.0))
            .hover_info(HoverInfo::Skip)
            .show_legend(false);
        if let Some(group) = &self.legend_group {
            trace = trace.legend_group(group);
        }
        if let Some(axis) = &self.x_axis {
            trace = trace.x_axis(axis);
        }
        if let Some(axis) = &self.y_axis {
            trace = trace.y_axis(axis);
        }
        trace
    }
}

/// Build the error band of `line` filled with its color at `opacity`.
///
/// NaN values in either envelope are drawn at 0.
pub fn error_band(line: &LineTrace, opacity: f64) -> Result<Band> {
    line.validate()?;
    let err = line.error_y.as_ref().ok_or_else(|| {
        PlotError::InvalidArgument(
            "an error band was requested for a line without `error_y`".to_string(),
        )
    })?;
    let color = line.color.as_deref().ok_or_else(|| {
        PlotError::InvalidArgument("the line needs a color to derive its band".to_string())
    })?;
    let fill_color = fill_color(color, opacity)?;

    let mut replaced = 0usize;
    let mut finite_or_zero = |v: f64| {
        if v.is_nan() {
            replaced += 1;
            0.0
        } else {
            v
        }
    };
    let upper: Vec<f64> = line
        .y
        .iter()
        .zip(&err.plus)
        .map(|(y, e)| finite_or_zero(y + e))
        .collect();
    let lower: Vec<f64> = line
        .y
        .iter()
        .zip(err.minus())
        .map(|(y, e)| finite_or_zero(y - e))
        .collect();
    if replaced > 0 {
        warn!("Replaced {} NaN values in the error band with 0", replaced);
    }

    let x = line.x.iter().chain(line.x.iter().rev()).copied().collect();
    let y = upper.into_iter().chain(lower.into_iter().rev()).collect();
    Ok(Band {
        x,
        y,
        fill_color,
        legend_group: line.legend_group.clone(),
        x_axis: line.x_axis.clone(),
        y_axis: line.y_axis.clone(),
    })
}

/// A trace in the order it is added to the figure.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureTrace {
    Band(Band),
    Line(LineTrace),
}

/// Resolve colors and lay out the traces for `mode`.
///
/// With bands, each band comes immediately before its line. Without any
/// mode the errors are dropped from the lines.
pub fn draw_order(
    lines: Vec<LineTrace>,
    mode: Option<ErrorYMode>,
    config: &PlotConfig,
) -> Result<Vec<FigureTrace>> {
    let mut traces = Vec::with_capacity(lines.len() * 2);
    for (i, mut line) in lines.into_iter().enumerate() {
        line.validate()?;
        if line.color.is_none() {
            line.color = Some(default_color(i).to_string());
        }
        match mode {
            Some(ErrorYMode::Band) => {
                traces.push(FigureTrace::Band(error_band(&line, config.band_opacity)?));
                line.error_y = None;
            }
            Some(ErrorYMode::Bar) => {}
            None => line.error_y = None,
        }
        traces.push(FigureTrace::Line(line));
    }
    debug!("Laid out {} traces for error mode {:?}", traces.len(), mode);
    Ok(traces)
}

/// Line figure with errors drawn according to `mode`.
pub fn line(lines: Vec<LineTrace>, mode: Option<ErrorYMode>, config: &PlotConfig) -> Result<Plot> {
    let theme = config.theme.config();
    let mut plot = Plot::new();
    let mut line_index = 0;
    for trace in draw_order(lines, mode, config)? {
        match trace {
            FigureTrace::Band(band) => plot.add_trace(band.to_trace()),
            FigureTrace::Line(line) => {
                plot.add_trace(line.to_trace(&theme, line_index, &config.error_bar));
                line_index += 1;
            }
        }
    }
    plot.set_layout(theme.layout());
    Ok(plot)
}
