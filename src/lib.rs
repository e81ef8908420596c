//! ETL and charting for IDEB approval rates (final years of primary school)
//! in the Baixada Santista municipalities, comparing 2017 and 2019 with 2021.

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod transform;
pub mod visualize;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ColumnConfig, PipelineConfig};
pub use error::PipelineError;
pub use extract::{load_workbook, RawTable};
pub use pipeline::{run, RunSummary};
pub use transform::{transform, ApprovalRecord, ApprovalTable, Network};
