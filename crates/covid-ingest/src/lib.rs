//! Loading of the case dataset.
//!
//! [`load_dataset`] reads a delimited file into an owned [`Dataset`] whose
//! column names are normalized to upper case and checked against the
//! required schema. [`DatasetCache`] memoizes loads by path and modification
//! time for callers that render several views from the same file.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod options;
pub mod polars_utils;
pub mod read;

pub use cache::DatasetCache;
pub use dataset::Dataset;
pub use error::{LoadError, Result, SchemaError};
pub use loader::load_dataset;
pub use options::LoadOptions;
pub use polars_utils::any_to_string;
