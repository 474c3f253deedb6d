//! Integration tests for the figure builders: scatter matrix, log images,
//! themes and configuration.

use ndarray::Array2;

use plotly_utils::plots::imshow::{eng_notation, log_ticks};
use plotly_utils::{
    histogram_plot, imshow_logscale, scatter_histogram, scatter_matrix_histogram, Dimension,
    HistogramOptions, LogImage, LogImageOptions, MinorTicks, PlotConfig, PlotError, Theme,
};

fn dimensions(n: usize) -> Vec<Dimension> {
    (0..n)
        .map(|d| {
            let values = (0..50).map(|i| ((i * (d + 1)) % 17) as f64).collect();
            Dimension::new(&format!("dim{}", d), values)
        })
        .collect()
}

fn image() -> LogImage {
    let x: Vec<f64> = (0..11).map(|i| -1.0 + 0.2 * i as f64).collect();
    let y: Vec<f64> = (0..9).map(|i| -2.0 + 0.5 * i as f64).collect();
    let z = Array2::from_shape_fn((y.len(), x.len()), |(r, c)| 2.0 * 10f64.powf(x[c] + y[r]));
    LogImage::new(x, y, z)
        .unwrap()
        .labels("x values", "y values", "f(x,y)")
}

// ---------------------------------------------------------------------------
// Scatter matrix
// ---------------------------------------------------------------------------

#[test]
fn scatter_matrix_has_one_contour_per_cell() {
    let plot = scatter_matrix_histogram(&dimensions(3), true, &PlotConfig::default()).unwrap();
    let json = plot.to_json();
    assert_eq!(json.matches("\"type\":\"contour\"").count(), 9);
    assert!(json.contains("\"xaxis\":\"x3\""));
    assert!(json.contains("\"yaxis\":\"y3\""));
    assert!(json.contains("dim2"));
}

#[test]
fn scatter_matrix_without_contours_is_unimplemented() {
    let err = scatter_matrix_histogram(&dimensions(2), false, &PlotConfig::default()).err().unwrap();
    assert!(matches!(err, PlotError::Unimplemented(_)));
}

#[test]
fn scatter_matrix_rejects_bad_dimensions() {
    let config = PlotConfig::default();
    assert!(matches!(
        scatter_matrix_histogram(&[], true, &config),
        Err(PlotError::InvalidArgument(_))
    ));
    let mut dims = dimensions(2);
    dims[1].values.pop();
    assert!(matches!(
        scatter_matrix_histogram(&dims, true, &config),
        Err(PlotError::InvalidArgument(_))
    ));
    assert!(matches!(
        scatter_matrix_histogram(&dimensions(9), true, &config),
        Err(PlotError::Unimplemented(_))
    ));
}

// ---------------------------------------------------------------------------
// Log-scale images
// ---------------------------------------------------------------------------

#[test]
fn imshow_logscale_labels_color_bar() {
    let plot = imshow_logscale(&image(), &LogImageOptions::default(), &PlotConfig::default()).unwrap();
    let json = plot.to_json();
    assert!(json.contains("heatmap"));
    assert!(json.contains("\"1k\""));
    assert!(json.contains("\"10m\""));
    assert!(json.contains("10<sup>%{z:.2f}</sup>"));
    // Values span 0.002..2000: six decades, so only major ticks, and an
    // iso-line for each of 0.01, 0.1, 1, 10, 100 and 1000.
    assert!(!json.contains("\"2k\""));
    assert_eq!(json.matches("\"type\":\"contour\"").count(), 6);
}

#[test]
fn imshow_logscale_without_contours() {
    let options = LogImageOptions {
        draw_contours: false,
        minor_ticks: MinorTicks::On,
        title: Some("log scale".to_string()),
    };
    let plot = imshow_logscale(&image(), &options, &PlotConfig::default()).unwrap();
    let json = plot.to_json();
    assert_eq!(json.matches("\"type\":\"contour\"").count(), 0);
    assert!(json.contains("\"2k\""));
    assert!(json.contains("\"300m\""));
    assert!(json.contains("log scale"));
}

#[test]
fn ticks_and_notation() {
    let major = log_ticks(false);
    assert!(major.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(eng_notation(major[0]), "1a");
    assert_eq!(eng_notation(2e3), "2k");
}

// ---------------------------------------------------------------------------
// Themes and configuration
// ---------------------------------------------------------------------------

#[test]
fn thesis_theme_reaches_the_layout() {
    let h = scatter_histogram(&[0.0, 1.0, 1.0, 2.0], &HistogramOptions::default()).unwrap();
    let plot = histogram_plot(&[h], &PlotConfig::new(Theme::BoringThesis));
    let json = plot.to_json();
    assert!(json.contains("serif"));
    assert!(json.contains("\"ticks\":\"inside\""));
}

#[test]
fn plot_config_from_json() {
    let config: PlotConfig =
        serde_json::from_str(r#"{"theme": "boring_thesis", "band_opacity": 0.5}"#).unwrap();
    assert_eq!(config.theme, Theme::BoringThesis);
    assert!((config.band_opacity - 0.5).abs() < 1e-12);
    assert_eq!(config.hover_z_format, ".2f");
}
