//! plotly-utils: convenience helpers layered on top of the `plotly` crate.
//!
//! The crate provides error-band line plots, a histogram rendered as a
//! step-shaped scatter trace, a scatter matrix made of 2D-histogram contours
//! and an image plotter with a logarithmic color scale.
//!
//! The numeric work (band polygons, binning, binomial errors, log ticks) is
//! done here and exposed as plain data so it can be tested without a
//! renderer. Rendering and HTML export are left to `plotly::Plot`.
pub mod color;
pub mod config;
pub mod error;
pub mod plots;
pub mod stats;
pub mod theme;

pub use config::{BinRule, BinSpec, ErrorBarStyle, ErrorYMode, MinorTicks, NanPolicy, PlotConfig};
pub use error::{PlotError, Result};
pub use plots::band::{draw_order, error_band, line, Band, ErrorY, FigureTrace, LineTrace};
pub use plots::histogram::{
    histogram_plot, scatter_histogram, ErrorYSpec, HistogramMode, HistogramOptions, ScatterHistogram,
};
pub use plots::imshow::{imshow_logscale, LogImage, LogImageOptions};
pub use plots::scatter_matrix::{scatter_matrix_histogram, Dimension};
pub use theme::Theme;
