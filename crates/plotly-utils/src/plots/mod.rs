//! Figure builders.
//!
//! Each builder keeps its numeric result as plain data (`Band`,
//! `ScatterHistogram`, `Histogram2d`) next to the function turning it into
//! `plotly` traces.
pub mod band;
pub mod histogram;
pub mod imshow;
pub mod scatter_matrix;
