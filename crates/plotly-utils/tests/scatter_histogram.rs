//! Integration tests for the histogram-as-scatter builder.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use plotly_utils::stats::binomial_error;
use plotly_utils::{
    scatter_histogram, BinRule, BinSpec, ErrorBarStyle, ErrorYSpec, HistogramOptions, NanPolicy,
    PlotError,
};

fn normal_samples(n: usize, seed: u64) -> Vec<f64> {
    // Box-Muller on uniform draws.
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
            let u2: f64 = rng.gen();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[test]
fn counts_sum_to_sample_size() {
    let samples = normal_samples(999, 7);
    for bins in [
        BinSpec::Rule(BinRule::Auto),
        BinSpec::Rule(BinRule::Fd),
        BinSpec::Rule(BinRule::Scott),
        BinSpec::Count(13),
        BinSpec::Edges(vec![-1.0, 0.0, 0.5, 1.0]),
    ] {
        let options = HistogramOptions {
            bins: bins.clone(),
            ..Default::default()
        };
        let h = scatter_histogram(&samples, &options).unwrap();
        let total: f64 = h.y.iter().sum();
        assert_eq!(total as usize, samples.len(), "bins = {:?}", bins);
        assert_eq!(h.histogram.total(), samples.len() as u64);
        assert_eq!(h.len(), h.histogram.n_bins() + 2);
    }
}

#[test]
fn omit_policy_excludes_nan() {
    let mut samples = normal_samples(500, 1);
    samples.extend([f64::NAN; 25]);
    let h = scatter_histogram(&samples, &HistogramOptions::default()).unwrap();
    assert_eq!(h.y.iter().sum::<f64>() as usize, 500);
}

#[test]
fn raise_policy_fails_on_nan() {
    let samples = vec![1.0, f64::NAN, 2.0];
    let options = HistogramOptions {
        nan_policy: NanPolicy::Raise,
        ..Default::default()
    };
    assert_eq!(
        scatter_histogram(&samples, &options),
        Err(PlotError::ContainsNaN(1))
    );
}

#[test]
fn outer_bins_are_one_width_away() {
    let samples = normal_samples(200, 3);
    let h = scatter_histogram(&samples, &HistogramOptions::default()).unwrap();
    let width = h.histogram.widths()[0];
    let centers = h.histogram.centers();
    assert!((h.x[0] - (centers[0] - width)).abs() < 1e-12);
    assert!((h.x[h.len() - 1] - (centers[centers.len() - 1] + width)).abs() < 1e-12);
    // Data-derived ranges cover every sample.
    assert_eq!(h.y[0], 0.0);
    assert_eq!(h.y[h.len() - 1], 0.0);
}

// ---------------------------------------------------------------------------
// Density
// ---------------------------------------------------------------------------

#[test]
fn density_integrates_to_one() {
    let samples = normal_samples(2000, 11);
    for bins in [BinSpec::Rule(BinRule::Auto), BinSpec::Count(7)] {
        let options = HistogramOptions {
            bins,
            density: true,
            ..Default::default()
        };
        let h = scatter_histogram(&samples, &options).unwrap();
        let integral: f64 = h.y[1..h.len() - 1]
            .iter()
            .zip(h.histogram.widths())
            .map(|(v, w)| v * w)
            .sum();
        assert!((integral - 1.0).abs() < 1e-9, "integral = {}", integral);
    }
}

#[test]
fn density_keeps_outlier_counts() {
    let samples = normal_samples(500, 3);
    let options = HistogramOptions {
        bins: BinSpec::Edges(vec![-1.0, -0.5, 0.0, 0.5, 1.0]),
        density: true,
        ..Default::default()
    };
    let h = scatter_histogram(&samples, &options).unwrap();
    let below = samples.iter().filter(|&&s| s < -1.0).count() as f64;
    let above = samples.iter().filter(|&&s| s > 1.0).count() as f64;
    assert!(below > 0.0 && above > 0.0);
    assert_eq!(h.y[0], below);
    assert_eq!(h.y[h.len() - 1], above);
    assert_eq!(
        h.histogram.in_range() as f64 + below + above,
        samples.len() as f64
    );
}

// ---------------------------------------------------------------------------
// Automatic errors
// ---------------------------------------------------------------------------

#[test]
fn binomial_errors_on_uniform_samples() {
    let n = 10_000usize;
    let samples: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
    let edges: Vec<f64> = (0..=10).map(|k| k as f64 / 10.0).collect();
    let options = HistogramOptions {
        bins: BinSpec::Edges(edges),
        error_y: ErrorYSpec::Auto(ErrorBarStyle::default()),
        ..Default::default()
    };
    let h = scatter_histogram(&samples, &options).unwrap();
    let errors = h.error_y.as_ref().unwrap();
    assert_eq!(errors.len(), 12);
    for (count, err) in h.y[1..11].iter().zip(&errors[1..11]) {
        assert_eq!(*count, 1000.0);
        let p = count / n as f64;
        let expected = (n as f64 * p * (1.0 - p)).sqrt();
        assert!((err - expected).abs() < 1e-9);
        assert!((err - 30.0).abs() < 1e-9);
    }
    assert_eq!(h.error_style.width(), 1);
    assert!((h.error_style.thickness() - 0.8).abs() < 1e-12);
    assert!(h.error_style.visible());
}

#[test]
fn density_errors_scale_like_values() {
    let samples = normal_samples(1000, 5);
    let counts = scatter_histogram(
        &samples,
        &HistogramOptions {
            bins: BinSpec::Count(8),
            error_y: ErrorYSpec::Auto(ErrorBarStyle::default()),
            ..Default::default()
        },
    )
    .unwrap();
    let density = scatter_histogram(
        &samples,
        &HistogramOptions {
            bins: BinSpec::Count(8),
            density: true,
            error_y: ErrorYSpec::Auto(ErrorBarStyle::default()),
            ..Default::default()
        },
    )
    .unwrap();
    let widths = counts.histogram.widths();
    let count_errors = counts.error_y.as_ref().unwrap();
    let density_errors = density.error_y.as_ref().unwrap();
    for i in 1..counts.len() - 1 {
        let c = counts.histogram.counts[i - 1];
        let expected = binomial_error(c, 1000) / (1000.0 * widths[i - 1]);
        assert!((density_errors[i] - expected).abs() < 1e-9);
        if c > 0 {
            let value_ratio = density.y[i] / counts.y[i];
            let error_ratio = density_errors[i] / count_errors[i];
            assert!((value_ratio - error_ratio).abs() < 1e-9);
        }
    }
}
