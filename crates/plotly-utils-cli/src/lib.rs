//! Command line front-end for plotly-utils: reads CSV/TSV columns, builds a
//! figure and writes it as standalone HTML.
pub mod commands;
pub mod input;
