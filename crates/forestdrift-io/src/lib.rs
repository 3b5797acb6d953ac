//! Artifact loading, sample-table I/O, and scoring for the forestdrift pipeline.

mod artifact;
mod driver;
mod error;
mod reader;
mod report;
mod table;
mod writer;

pub use artifact::{ForestReader, ScalerReader};
pub use driver::{ScoredLabels, ScoringDriver};
pub use error::IoError;
pub use reader::TableReader;
pub use report::{AgreementReport, ColumnAgreement};
pub use table::{
    HARD_VOTE_COLUMN, REFERENCE_COLUMN, RESERVED_COLUMNS, SOFT_VOTE_COLUMN, SampleTable,
    TRUTH_COLUMN,
};
pub use writer::TableWriter;
