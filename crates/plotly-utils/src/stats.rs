use itertools_num::linspace;
use log::{debug, warn};
use statrs::statistics::Statistics;

use crate::config::{BinRule, BinSpec, NanPolicy};
use crate::error::{PlotError, Result};

/// Largest number of bins a histogram may have.
pub const MAX_BINS: usize = 1_000_000;

/// Binned samples plus the counts falling outside the binned range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    /// Samples strictly below the first edge.
    pub underflow: u64,
    /// Samples strictly above the last edge.
    pub overflow: u64,
    pub density: bool,
}

impl Histogram {
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[0] + (w[1] - w[0]) / 2.0).collect()
    }

    /// Samples counted inside `[first edge, last edge]`.
    pub fn in_range(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Every sample that went in, including under- and overflow.
    pub fn total(&self) -> u64 {
        self.in_range() + self.underflow + self.overflow
    }

    /// Height of each bin: raw counts, or a density integrating to 1 over
    /// the bin widths when `density` is set.
    pub fn values(&self) -> Vec<f64> {
        if !self.density {
            return self.counts.iter().map(|&c| c as f64).collect();
        }
        let norm = self.in_range() as f64;
        self.counts
            .iter()
            .zip(self.widths())
            .map(|(&c, w)| density_value(c, norm, w))
            .collect()
    }
}

fn density_value(count: u64, norm: f64, width: f64) -> f64 {
    if norm > 0.0 && width > 0.0 {
        count as f64 / (norm * width)
    } else {
        0.0
    }
}

/// Apply the NaN policy, returning the samples that take part in binning.
pub fn filter_nan(samples: &[f64], policy: NanPolicy) -> Result<Vec<f64>> {
    let n_nan = samples.iter().filter(|v| v.is_nan()).count();
    if n_nan == 0 {
        return Ok(samples.to_vec());
    }
    match policy {
        NanPolicy::Raise => Err(PlotError::ContainsNaN(n_nan)),
        NanPolicy::Omit => {
            warn!("Omitting {} NaN values out of {} samples", n_nan, samples.len());
            Ok(samples.iter().copied().filter(|v| !v.is_nan()).collect())
        }
    }
}

/// Bin `samples` (which must already be free of NaN).
pub fn histogram(samples: &[f64], bins: &BinSpec, density: bool) -> Result<Histogram> {
    let edges = bin_edges(samples, bins)?;
    let mut counts = vec![0u64; edges.len() - 1];
    let mut underflow = 0u64;
    let mut overflow = 0u64;
    for &v in samples {
        match locate(&edges, v) {
            Location::Below => underflow += 1,
            Location::Above => overflow += 1,
            Location::Bin(i) => counts[i] += 1,
        }
    }
    debug!(
        "Histogram with {} bins over [{}, {}]: {} in range, {} below, {} above",
        counts.len(),
        edges[0],
        edges[edges.len() - 1],
        counts.iter().sum::<u64>(),
        underflow,
        overflow
    );
    Ok(Histogram {
        edges,
        counts,
        underflow,
        overflow,
        density,
    })
}

enum Location {
    Below,
    Above,
    Bin(usize),
}

/// Bins are half-open except the last one, which is closed on the right.
fn locate(edges: &[f64], v: f64) -> Location {
    let first = edges[0];
    let last = edges[edges.len() - 1];
    if v < first {
        return Location::Below;
    }
    if v > last {
        return Location::Above;
    }
    if v == last {
        return Location::Bin(edges.len() - 2);
    }
    // First edge strictly greater than v, minus one.
    let upper = edges.partition_point(|&e| e <= v);
    Location::Bin(upper - 1)
}

/// Edges for `samples` according to `bins`.
pub fn bin_edges(samples: &[f64], bins: &BinSpec) -> Result<Vec<f64>> {
    match bins {
        BinSpec::Edges(edges) => {
            if edges.len() < 2 {
                return Err(PlotError::InvalidArgument(
                    "explicit bin edges need at least two values".to_string(),
                ));
            }
            if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[1] <= w[0]) {
                return Err(PlotError::InvalidArgument(
                    "bin edges must be finite and strictly ascending".to_string(),
                ));
            }
            Ok(edges.clone())
        }
        BinSpec::Count(0) => Err(PlotError::InvalidArgument(
            "number of bins must be positive".to_string(),
        )),
        BinSpec::Count(n) => {
            check_bin_count(*n as f64)?;
            let (lo, hi) = data_range(samples)?;
            Ok(uniform_edges(lo, hi, *n))
        }
        BinSpec::Rule(rule) => {
            let (lo, hi) = data_range(samples)?;
            let width = rule_width(samples, *rule);
            let n = if width > 0.0 {
                let n = ((hi - lo) / width).ceil().max(1.0);
                check_bin_count(n)?;
                n as usize
            } else {
                1
            };
            debug!("Bin rule {:?} chose width {} ({} bins)", rule, width, n);
            Ok(uniform_edges(lo, hi, n))
        }
    }
}

fn check_bin_count(n: f64) -> Result<()> {
    if n.is_nan() || n > MAX_BINS as f64 {
        return Err(PlotError::InvalidArgument(format!(
            "{} bins requested, at most {} are supported",
            n, MAX_BINS
        )));
    }
    Ok(())
}

/// `n + 1` equally spaced edges; the last one is pinned to `hi` so the
/// maximum sample always lands in the last bin.
fn uniform_edges(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let mut edges: Vec<f64> = linspace(lo, hi, n + 1).collect();
    if let Some(last) = edges.last_mut() {
        *last = hi;
    }
    edges
}

/// Range used when edges are derived from the data.
fn data_range(samples: &[f64]) -> Result<(f64, f64)> {
    if samples.is_empty() {
        return Ok((0.0, 1.0));
    }
    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return Err(PlotError::InvalidArgument(format!(
            "autodetected range of [{}, {}] is not finite",
            lo, hi
        )));
    }
    if lo == hi {
        Ok((lo - 0.5, hi + 0.5))
    } else {
        Ok((lo, hi))
    }
}

/// Bin width suggested by `rule`; 0 means "fall back to a single bin".
fn rule_width(samples: &[f64], rule: BinRule) -> f64 {
    let n = samples.len();
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let ptp = peak_to_peak(samples);
    match rule {
        BinRule::Sturges => ptp / (nf.log2() + 1.0),
        BinRule::Rice => ptp / (2.0 * nf.cbrt()),
        BinRule::Sqrt => ptp / nf.sqrt(),
        BinRule::Scott => {
            let std = Statistics::population_std_dev(samples.iter());
            (24.0 * std::f64::consts::PI.sqrt() / nf).cbrt() * std
        }
        BinRule::Fd => fd_width(samples),
        BinRule::Auto => {
            let fd = fd_width(samples);
            let sturges = rule_width(samples, BinRule::Sturges);
            if fd > 0.0 {
                fd.min(sturges)
            } else {
                sturges
            }
        }
    }
}

fn fd_width(samples: &[f64]) -> f64 {
    let iqr = percentile(samples, 75.0) - percentile(samples, 25.0);
    2.0 * iqr * (samples.len() as f64).powf(-1.0 / 3.0)
}

fn peak_to_peak(samples: &[f64]) -> f64 {
    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    hi - lo
}

/// Percentile with linear interpolation between closest ranks.
pub fn percentile(samples: &[f64], q: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let frac = rank - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * frac
}

/// Binomial standard error of a bin holding `count` out of `n` samples,
/// `sqrt(n p (1 - p))` with `p = count / n`.
pub fn binomial_error(count: u64, n: u64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let p = count as f64 / nf;
    (nf * p * (1.0 - p)).max(0.0).sqrt()
}

/// Joint histogram of paired samples; `counts[j][i]` holds the pairs with
/// x in bin `i` and y in bin `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub counts: Vec<Vec<u64>>,
}

impl Histogram2d {
    pub fn x_centers(&self) -> Vec<f64> {
        centers(&self.x_edges)
    }

    pub fn y_centers(&self) -> Vec<f64> {
        centers(&self.y_edges)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

fn centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// Bin `(x, y)` pairs; pairs where either coordinate is NaN or outside the
/// edges are dropped.
pub fn histogram2d(x: &[f64], y: &[f64], x_edges: &[f64], y_edges: &[f64]) -> Result<Histogram2d> {
    if x.len() != y.len() {
        return Err(PlotError::InvalidArgument(format!(
            "x and y must have equal lengths, received {} and {}",
            x.len(),
            y.len()
        )));
    }
    if x_edges.len() < 2 || y_edges.len() < 2 {
        return Err(PlotError::InvalidArgument(
            "2D histogram needs at least one bin per axis".to_string(),
        ));
    }
    let mut counts = vec![vec![0u64; x_edges.len() - 1]; y_edges.len() - 1];
    for (&xv, &yv) in x.iter().zip(y) {
        if xv.is_nan() || yv.is_nan() {
            continue;
        }
        if let (Location::Bin(i), Location::Bin(j)) = (locate(x_edges, xv), locate(y_edges, yv)) {
            counts[j][i] += 1;
        }
    }
    Ok(Histogram2d {
        x_edges: x_edges.to_vec(),
        y_edges: y_edges.to_vec(),
        counts,
    })
}
