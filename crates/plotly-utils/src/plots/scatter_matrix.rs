//! Scatter matrix where every cell is a 2D-histogram contour instead of a
//! cloud of markers.
use log::debug;
use plotly::layout::{Axis, Layout};
use plotly::{Contour, Plot};

use crate::config::{BinRule, BinSpec, PlotConfig};
use crate::error::{PlotError, Result};
use crate::stats::{bin_edges, histogram2d, Histogram2d};

/// Number of x (and y) axes a plotly layout can hold.
pub const MAX_DIMENSIONS: usize = 8;

const SPACING: f64 = 0.01;

/// A named column of the data set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub values: Vec<f64>,
}

impl Dimension {
    pub fn new(name: &str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }
}

fn validate(dimensions: &[Dimension]) -> Result<()> {
    if dimensions.is_empty() {
        return Err(PlotError::InvalidArgument(
            "`dimensions` must name at least one column".to_string(),
        ));
    }
    if dimensions.iter().any(|d| d.name.is_empty()) {
        return Err(PlotError::InvalidArgument(
            "every dimension needs a non-empty name".to_string(),
        ));
    }
    let len = dimensions[0].values.len();
    if let Some(d) = dimensions.iter().find(|d| d.values.len() != len) {
        return Err(PlotError::InvalidArgument(format!(
            "dimension {:?} has {} values, expected {}",
            d.name,
            d.values.len(),
            len
        )));
    }
    if dimensions.len() > MAX_DIMENSIONS {
        return Err(PlotError::Unimplemented(format!(
            "scatter matrices with more than {} dimensions",
            MAX_DIMENSIONS
        )));
    }
    Ok(())
}

/// Joint histograms of every pair; `result[row][col]` bins column `col` on x
/// against column `row` on y.
pub fn pair_histograms(dimensions: &[Dimension]) -> Result<Vec<Vec<Histogram2d>>> {
    validate(dimensions)?;
    let edges = dimensions
        .iter()
        .map(|d| {
            let finite: Vec<f64> = d.values.iter().copied().filter(|v| !v.is_nan()).collect();
            bin_edges(&finite, &BinSpec::Rule(BinRule::Auto))
        })
        .collect::<Result<Vec<_>>>()?;

    dimensions
        .iter()
        .zip(&edges)
        .map(|(row, row_edges)| {
            dimensions
                .iter()
                .zip(&edges)
                .map(|(col, col_edges)| histogram2d(&col.values, &row.values, col_edges, row_edges))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

fn axis_id(prefix: char, index: usize) -> String {
    if index == 0 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, index + 1)
    }
}

/// `(start, end)` of the `index`-th of `n` cells along an axis.
fn domain(index: usize, n: usize) -> (f64, f64) {
    let size = (1.0 - SPACING * (n as f64 - 1.0)) / n as f64;
    let start = index as f64 * (size + SPACING);
    (start, start + size)
}

fn set_axes(layout: Layout, index: usize, x: Axis, y: Axis) -> Layout {
    match index {
        0 => layout.x_axis(x).y_axis(y),
        1 => layout.x_axis2(x).y_axis2(y),
        2 => layout.x_axis3(x).y_axis3(y),
        3 => layout.x_axis4(x).y_axis4(y),
        4 => layout.x_axis5(x).y_axis5(y),
        5 => layout.x_axis6(x).y_axis6(y),
        6 => layout.x_axis7(x).y_axis7(y),
        7 => layout.x_axis8(x).y_axis8(y),
        _ => layout,
    }
}

/// Scatter matrix of `dimensions` drawn with 2D-histogram contours.
///
/// Columns share their x axis and rows share their y axis; only the bottom
/// row and the left column carry titles.
pub fn scatter_matrix_histogram(
    dimensions: &[Dimension],
    contour: bool,
    config: &PlotConfig,
) -> Result<Plot> {
    validate(dimensions)?;
    if !contour {
        return Err(PlotError::Unimplemented("`contour = false`".to_string()));
    }
    let theme = config.theme.config();
    let n = dimensions.len();
    let histograms = pair_histograms(dimensions)?;

    let mut plot = Plot::new();
    for (row, cells) in histograms.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let z: Vec<Vec<f64>> = cell
                .counts
                .iter()
                .map(|r| r.iter().map(|&c| c as f64).collect())
                .collect();
            let mut trace = Contour::new(cell.x_centers(), cell.y_centers(), z)
                .x_axis(&axis_id('x', col))
                .y_axis(&axis_id('y', row))
                .show_scale(false);
            if let Some(scale) = theme.color_scale() {
                trace = trace.color_scale(scale);
            }
            plot.add_trace(trace);
        }
    }

    let mut layout = theme.layout();
    for (i, dim) in dimensions.iter().enumerate() {
        let (x_start, x_end) = domain(i, n);
        // Row 0 is the top row, plotly's y domain grows upwards.
        let (y_start, y_end) = domain(n - 1 - i, n);
        let x_axis = theme
            .axis()
            .domain(&[x_start, x_end])
            .anchor(&axis_id('y', n - 1))
            .title(dim.name.as_str());
        let y_axis = theme
            .axis()
            .domain(&[y_start, y_end])
            .anchor(&axis_id('x', 0))
            .title(dim.name.as_str());
        layout = set_axes(layout, i, x_axis, y_axis);
    }
    plot.set_layout(layout);
    debug!("Scatter matrix with {}x{} contour cells", n, n);
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_ids() {
        assert_eq!(axis_id('x', 0), "x");
        assert_eq!(axis_id('y', 2), "y3");
    }

    #[test]
    fn test_domains_fill_unit_interval() {
        let (start, _) = domain(0, 3);
        let (_, end) = domain(2, 3);
        assert!(start.abs() < 1e-12);
        assert!((end - 1.0).abs() < 1e-12);
        let (_, first_end) = domain(0, 3);
        let (second_start, _) = domain(1, 3);
        assert!((second_start - first_end - SPACING).abs() < 1e-12);
    }

    #[test]
    fn test_pair_histograms_cover_all_pairs() {
        let dims = vec![
            Dimension::new("a", vec![0.0, 1.0, 2.0, f64::NAN]),
            Dimension::new("b", vec![1.0, 1.5, 3.0, 2.0]),
        ];
        let h = pair_histograms(&dims).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h[0].len(), 2);
        assert_eq!(h[1][1].total(), 4);
        assert_eq!(h[0][1].total(), 3);
    }
}
