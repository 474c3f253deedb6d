use std::path::PathBuf;

use anyhow::Result;
use plotly::Plot;

use plotly_utils::{scatter_matrix_histogram, Dimension, PlotConfig};

use crate::input::Table;

#[derive(Debug, Clone)]
pub struct ScatterMatrixArgs {
    pub input: PathBuf,
    pub dimensions: Vec<String>,
    pub contour: bool,
}

pub fn run(args: &ScatterMatrixArgs, config: &PlotConfig) -> Result<Plot> {
    let table = Table::read(&args.input)?;
    let dimensions = args
        .dimensions
        .iter()
        .map(|name| -> Result<Dimension> { Ok(Dimension::new(name, table.column(name)?)) })
        .collect::<Result<Vec<_>>>()?;
    Ok(scatter_matrix_histogram(&dimensions, args.contour, config)?)
}
