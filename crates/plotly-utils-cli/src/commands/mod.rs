//! One module per subcommand; each turns parsed arguments into a `Plot`.
pub mod histogram;
pub mod imshow;
pub mod lines;
pub mod scatter_matrix;
