use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::Array2;
use plotly::Plot;

use plotly_utils::{imshow_logscale, LogImage, LogImageOptions, MinorTicks, PlotConfig};

use crate::input::{parse_value, Table};

#[derive(Debug, Clone)]
pub struct ImshowArgs {
    pub input: PathBuf,
    pub minor_ticks: MinorTicks,
    pub draw_contours: bool,
    pub title: Option<String>,
    pub z_label: String,
}

/// Read a grid stored as a table: the header holds the x coordinates after
/// a leading label cell, and each row starts with its y coordinate.
pub fn read_image(table: &Table, z_label: &str) -> Result<LogImage> {
    let (y_label, x_headers) = table
        .headers
        .split_first()
        .context("Image table needs a header row")?;
    let x = x_headers
        .iter()
        .map(|h| parse_value(h).with_context(|| format!("x coordinate {:?}", h)))
        .collect::<Result<Vec<f64>>>()?;

    let mut y = Vec::with_capacity(table.rows.len());
    let mut values = Vec::with_capacity(table.rows.len() * x.len());
    for (i, row) in table.rows.iter().enumerate() {
        let mut cells = row.iter();
        let y_cell = cells.next().unwrap_or("");
        y.push(parse_value(y_cell).with_context(|| format!("y coordinate of row {}", i + 1))?);
        for cell in cells {
            values.push(parse_value(cell).with_context(|| format!("Row {}", i + 1))?);
        }
    }
    let z = Array2::from_shape_vec((y.len(), x.len()), values)
        .context("Every row must hold one value per x coordinate")?;
    Ok(LogImage::new(x, y, z)?.labels("x", y_label, z_label))
}

pub fn run(args: &ImshowArgs, config: &PlotConfig) -> Result<Plot> {
    let table = Table::read(&args.input)?;
    let image = read_image(&table, &args.z_label)?;
    let options = LogImageOptions {
        minor_ticks: args.minor_ticks,
        draw_contours: args.draw_contours,
        title: args.title.clone(),
    };
    Ok(imshow_logscale(&image, &options, config)?)
}
