//! Presentation layer for the case dashboard CLI.

pub mod logging;
pub mod render;
