//! Integration tests for error-band construction and draw order.

use plotly_utils::color::Rgb;
use plotly_utils::{
    draw_order, error_band, line, ErrorY, ErrorYMode, FigureTrace, LineTrace, PlotConfig,
    PlotError,
};

fn lines() -> Vec<LineTrace> {
    vec![
        LineTrace::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0, 16.0])
            .name("squares")
            .legend_group("squares")
            .error_y(ErrorY::symmetric(vec![0.1, 0.2, 0.3, 0.4])),
        LineTrace::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0])
            .name("linear")
            .color("rgb(10, 20, 30)")
            .error_y(ErrorY::asymmetric(vec![0.5; 4], vec![0.25; 4])),
    ]
}

// ---------------------------------------------------------------------------
// Band geometry
// ---------------------------------------------------------------------------

#[test]
fn band_has_twice_the_points() {
    for n in [1usize, 2, 7, 100] {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let line = LineTrace::new(x, y)
            .color("#ff0000")
            .error_y(ErrorY::symmetric(vec![0.1; n]));
        let band = error_band(&line, 0.3).unwrap();
        assert_eq!(band.len(), 2 * n);
        assert_eq!(band.y.len(), 2 * n);
    }
}

#[test]
fn band_alpha_and_channels_follow_the_line() {
    let line = LineTrace::new(vec![0.0, 1.0], vec![0.0, 1.0])
        .color("#10a0ff")
        .error_y(ErrorY::symmetric(vec![1.0, 1.0]));
    let band = error_band(&line, 0.45).unwrap();
    assert_eq!(band.fill_color.rgb, Rgb::new(0x10, 0xa0, 0xff));
    assert!((band.fill_color.alpha - 0.45).abs() < 1e-12);
    assert_eq!(band.fill_color.to_string(), "rgba(16,160,255,0.45)");
}

#[test]
fn band_upper_then_reversed_lower() {
    let line = lines()[1].clone();
    let band = error_band(&line, 0.3).unwrap();
    assert_eq!(band.x, vec![0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0]);
    assert_eq!(band.y, vec![0.5, 1.5, 2.5, 3.5, 2.75, 1.75, 0.75, -0.25]);
}

#[test]
fn named_color_is_rejected() {
    let line = LineTrace::new(vec![0.0], vec![0.0])
        .color("red")
        .error_y(ErrorY::symmetric(vec![1.0]));
    assert_eq!(
        error_band(&line, 0.3),
        Err(PlotError::InvalidColorFormat("red".to_string()))
    );
}

// ---------------------------------------------------------------------------
// Draw order
// ---------------------------------------------------------------------------

#[test]
fn bands_precede_their_lines() {
    let traces = draw_order(lines(), Some(ErrorYMode::Band), &PlotConfig::default()).unwrap();
    assert_eq!(traces.len(), 4);
    match (&traces[0], &traces[1]) {
        (FigureTrace::Band(band), FigureTrace::Line(line)) => {
            assert_eq!(band.legend_group, line.legend_group);
            assert_eq!(line.name.as_deref(), Some("squares"));
            // Default colorway color was assigned and used for the fill.
            assert_eq!(band.fill_color.to_string(), "rgba(99,110,250,0.3)");
            assert!(line.error_y.is_none());
        }
        other => panic!("unexpected order: {:?}", other),
    }
    match (&traces[2], &traces[3]) {
        (FigureTrace::Band(band), FigureTrace::Line(line)) => {
            assert_eq!(band.fill_color.to_string(), "rgba(10,20,30,0.3)");
            assert_eq!(line.name.as_deref(), Some("linear"));
        }
        other => panic!("unexpected order: {:?}", other),
    }
}

#[test]
fn bar_mode_keeps_errors_on_lines() {
    let traces = draw_order(lines(), Some(ErrorYMode::Bar), &PlotConfig::default()).unwrap();
    assert_eq!(traces.len(), 2);
    assert!(traces
        .iter()
        .all(|t| matches!(t, FigureTrace::Line(l) if l.error_y.is_some())));
}

#[test]
fn no_mode_drops_errors() {
    let traces = draw_order(lines(), None, &PlotConfig::default()).unwrap();
    assert!(traces
        .iter()
        .all(|t| matches!(t, FigureTrace::Line(l) if l.error_y.is_none())));
}

#[test]
fn band_mode_requires_errors() {
    let mut input = lines();
    input.push(LineTrace::new(vec![0.0], vec![0.0]));
    let err = draw_order(input, Some(ErrorYMode::Band), &PlotConfig::default()).unwrap_err();
    assert!(matches!(err, PlotError::InvalidArgument(_)));
}

#[test]
fn band_opacity_comes_from_config() {
    let config = PlotConfig {
        band_opacity: 0.1,
        ..PlotConfig::default()
    };
    let traces = draw_order(lines(), Some(ErrorYMode::Band), &config).unwrap();
    match &traces[0] {
        FigureTrace::Band(band) => assert!((band.fill_color.alpha - 0.1).abs() < 1e-12),
        other => panic!("expected a band, got {:?}", other),
    }
}

#[test]
fn line_plot_serializes_band_traces() {
    let plot = line(lines(), Some(ErrorYMode::Band), &PlotConfig::default()).unwrap();
    let json = plot.to_json();
    assert!(json.contains("toself"));
    assert!(json.contains("rgba(255,255,255,0)"));
    assert!(json.contains("\"hoverinfo\":\"skip\""));
}
