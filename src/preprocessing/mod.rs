//! Turning raw listings into a model-ready feature matrix.
//!
//! The entry point is [`CleaningPipeline`]; the submodules expose the pieces
//! it is built from so they can be tested and reused on their own.

pub mod encoding;
pub mod error;
pub mod outliers;
pub mod parse;
pub mod pipeline;
pub mod record;

pub use encoding::{FittedOneHotEncoder, OneHotEncoder};
pub use error::{PipelineError, RowError};
pub use parse::{convert_sqft_to_num, parse_bhk};
pub use pipeline::{
    CleanedDataset, CleaningConfig, CleaningPipeline, CleaningReport, NUMERIC_COLUMNS,
    OTHER_LOCATION,
};
pub use record::CleanedRecord;
