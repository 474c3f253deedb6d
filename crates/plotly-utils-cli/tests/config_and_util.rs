//! Integration tests for input reading and plot configuration loading.

use std::path::Path;

use plotly_utils::{PlotConfig, Theme};
use plotly_utils_cli::commands::imshow::read_image;
use plotly_utils_cli::input::{load_plot_config, validate_tsv_or_csv_file, Table};

// ---------------------------------------------------------------------------
// validate_tsv_or_csv_file
// ---------------------------------------------------------------------------

#[test]
fn validate_tsv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_tsv_or_csv_file(Path::new("/nonexistent/path/data.tsv")).is_err());
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[test]
fn table_reads_tsv_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::write(&path, "name\tvalue\nfoo\t1.5\nbar\t\nbaz\tNaN\n").unwrap();
    let table = Table::read(&path).unwrap();
    assert_eq!(table.headers, vec!["name", "value"]);
    assert_eq!(table.text_column("name").unwrap(), vec!["foo", "bar", "baz"]);
    let values = table.column("value").unwrap();
    assert_eq!(values[0], 1.5);
    assert!(values[1].is_nan());
    assert!(values[2].is_nan());
    assert!(table.column("missing").is_err());
    assert!(table.column("name").is_err());
}

#[test]
fn image_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.csv");
    std::fs::write(&path, "depth,0.5,1.5\n10,1,2\n20,3,4\n30,5,6\n").unwrap();
    let table = Table::read(&path).unwrap();
    let image = read_image(&table, "signal").unwrap();
    assert_eq!(image.x, vec![0.5, 1.5]);
    assert_eq!(image.y, vec![10.0, 20.0, 30.0]);
    assert_eq!(image.z.dim(), (3, 2));
    assert_eq!(image.z[[2, 0]], 5.0);
    assert_eq!(image.y_label, "depth");
    assert_eq!(image.z_label, "signal");
}

#[test]
fn image_table_bad_header_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.csv");
    std::fs::write(&path, "y,left,right\n0,1,2\n").unwrap();
    let table = Table::read(&path).unwrap();
    assert!(read_image(&table, "z").is_err());
}

// ---------------------------------------------------------------------------
// PlotConfig loading
// ---------------------------------------------------------------------------

#[test]
fn load_config_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"theme": "boring_thesis", "band_opacity": 0.5}"#).unwrap();
    let config = load_plot_config(&path).unwrap();
    assert_eq!(config.theme, Theme::BoringThesis);
    assert!((config.band_opacity - 0.5).abs() < 1e-12);
    assert_eq!(config.hover_z_format, PlotConfig::default().hover_z_format);
}

#[test]
fn load_config_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(load_plot_config(&path).is_err());
}

#[test]
fn load_config_nonexistent_errors() {
    assert!(load_plot_config("/nonexistent/config.json").is_err());
}
