//! Export core modules shared across CLI and desktop wrappers.

#[cfg(feature = "excel")]
pub mod excel_core;
