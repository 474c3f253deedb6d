use std::path::PathBuf;

use anyhow::Result;
use plotly::Plot;

use plotly_utils::{line, ErrorY, ErrorYMode, LineTrace, PlotConfig};

use crate::input::Table;

#[derive(Debug, Clone)]
pub struct LinesArgs {
    pub input: PathBuf,
    pub x: String,
    pub y: String,
    pub error: Option<String>,
    /// Lower error column for asymmetric errors.
    pub error_minus: Option<String>,
    /// Column whose values split the rows into separate lines.
    pub group: Option<String>,
    pub mode: Option<ErrorYMode>,
}

pub fn run(args: &LinesArgs, config: &PlotConfig) -> Result<Plot> {
    let table = Table::read(&args.input)?;
    let x = table.column(&args.x)?;
    let y = table.column(&args.y)?;
    let plus = args.error.as_deref().map(|c| table.column(c)).transpose()?;
    let minus = args.error_minus.as_deref().map(|c| table.column(c)).transpose()?;
    let groups = match &args.group {
        Some(col) => table.text_column(col)?,
        None => vec![args.y.clone(); x.len()],
    };

    // Lines keep the order in which their group first appears.
    let mut names: Vec<String> = Vec::new();
    for g in &groups {
        if !names.contains(g) {
            names.push(g.clone());
        }
    }
    let traces = names
        .iter()
        .map(|name| {
            let rows: Vec<usize> = (0..x.len()).filter(|&i| &groups[i] == name).collect();
            let pick = |values: &Vec<f64>| rows.iter().map(|&i| values[i]).collect::<Vec<f64>>();
            let mut trace = LineTrace::new(pick(&x), pick(&y)).name(name).legend_group(name);
            if let Some(plus) = &plus {
                trace = trace.error_y(ErrorY {
                    plus: pick(plus),
                    minus: minus.as_ref().map(|m| pick(m)),
                });
            }
            trace
        })
        .collect::<Vec<_>>();
    log::info!(
        "[plotly-utils::lines] {} lines, error mode {:?}",
        traces.len(),
        args.mode
    );
    Ok(line(traces, args.mode, config)?)
}
