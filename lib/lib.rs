/// Go domain types.
pub mod go;
/// Go Text Protocol client for Leela Zero.
pub mod gtp;
/// Annotation of game records with engine evaluations.
pub mod review;
/// Smart Game Format records.
pub mod sgf;
/// Assorted utilities.
pub mod util;
