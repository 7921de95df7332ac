//! Binary CSV datasets, experiment naming and JSON result artifacts for arbor.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{BinaryDataset, ExperimentName};
pub use error::IoError;
pub use reader::BinaryCsvReader;
pub use writer::ResultWriter;
