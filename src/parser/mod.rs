//! PDF parsing module.

mod factsheet;
mod options;
mod spans;
mod tables;

pub use factsheet::FactsheetParser;
pub use options::{ErrorMode, ParseOptions};
pub use tables::TableExtractorConfig;
