//! Delimited file reading.

pub mod frame;
pub mod header;

pub use frame::read_frame;
pub use header::{CsvHeaders, read_headers};
