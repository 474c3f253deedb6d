use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use plotly::Plot;

use plotly_utils::PlotConfig;

pub fn validate_tsv_or_csv_file(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path.display()),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

/// A delimited text file held in memory.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl Table {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        validate_tsv_or_csv_file(path)?;
        let delimiter = match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(false)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read rows of {}", path.display()))?;
        log::debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(Self { headers, rows })
    }

    fn index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column {:?} not found; available: {}", name, self.headers.join(", ")))
    }

    /// Raw text of a column.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>> {
        let idx = self.index(name)?;
        Ok(self.rows.iter().map(|r| r.get(idx).unwrap_or("").trim().to_string()).collect())
    }

    /// Numeric column; empty cells and `nan` read as NaN.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        self.text_column(name)?
            .iter()
            .enumerate()
            .map(|(i, v)| parse_value(v).with_context(|| format!("Row {} of column {:?}", i + 1, name)))
            .collect()
    }
}

pub fn parse_value(v: &str) -> Result<f64> {
    let v = v.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("nan") || v.eq_ignore_ascii_case("na") {
        return Ok(f64::NAN);
    }
    v.parse::<f64>()
        .with_context(|| format!("Not a number: {:?}", v))
}

/// Load a plot configuration from a JSON file.
pub fn load_plot_config<P: AsRef<Path>>(path: P) -> Result<PlotConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: PlotConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Output path: the given one, or the input file name with an `.html` extension.
pub fn output_path(input: &Path, output: Option<&PathBuf>) -> PathBuf {
    match output {
        Some(path) => path.clone(),
        None => input.with_extension("html"),
    }
}

pub fn write_html(plot: &Plot, path: &Path) -> Result<()> {
    std::fs::write(path, plot.to_html())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Plot saved in {}", path.display());
    Ok(())
}
