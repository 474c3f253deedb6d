use std::path::PathBuf;

use anyhow::Result;
use plotly::Plot;

use plotly_utils::{
    histogram_plot, scatter_histogram, BinSpec, ErrorYSpec, HistogramMode, HistogramOptions,
    NanPolicy, PlotConfig, ScatterHistogram,
};

use crate::input::Table;

#[derive(Debug, Clone)]
pub struct HistogramArgs {
    pub input: PathBuf,
    /// One histogram trace per column.
    pub columns: Vec<String>,
    pub bins: BinSpec,
    pub density: bool,
    pub nan_policy: NanPolicy,
    pub errors: bool,
    pub markers: bool,
}

pub fn run(args: &HistogramArgs, config: &PlotConfig) -> Result<Plot> {
    let table = Table::read(&args.input)?;
    let histograms = args
        .columns
        .iter()
        .map(|name| -> Result<ScatterHistogram> {
            let samples = table.column(name)?;
            let options = HistogramOptions {
                bins: args.bins.clone(),
                density: args.density,
                nan_policy: args.nan_policy,
                error_y: if args.errors {
                    ErrorYSpec::Auto(config.error_bar)
                } else {
                    ErrorYSpec::None
                },
                name: Some(name.clone()),
                mode: if args.markers {
                    HistogramMode::LinesMarkers
                } else {
                    HistogramMode::Lines
                },
            };
            let h = scatter_histogram(&samples, &options)?;
            log::info!(
                "[plotly-utils::histogram] {}: {} samples in {} bins",
                name,
                h.histogram.total(),
                h.histogram.n_bins()
            );
            Ok(h)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(histogram_plot(&histograms, config))
}
