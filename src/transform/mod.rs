// src/transform/mod.rs
//
// Wide (one rate column per year) → long (one row per municipality, network, year).

pub mod columns;
pub mod network;
pub mod rate;

pub use columns::{normalize_headers, ColumnMapping};
pub use network::Network;
pub use rate::parse_localized_rate;

use crate::config::ColumnConfig;
use crate::error::{PipelineError, Result};
use crate::extract::RawTable;
use arrow::{
    array::{
        Array, ArrayRef, AsArray, Float64Array, Float64Builder, Int32Array, Int32Builder, StringArray,
        StringBuilder,
    },
    datatypes::{DataType, Field, Float64Type, Int32Type, Schema, SchemaRef},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};
use tracing::{debug, info, warn};

/// One long-form row.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalRecord {
    pub municipality: String,
    pub network: Network,
    pub year: i32,
    /// Percentage in `[0, 100]`; `None` when the source cell was not numeric.
    pub rate: Option<f64>,
}

/// Arrow layout of the long-form table.
pub fn approval_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("municipality", DataType::Utf8, false),
        Field::new("network", DataType::Utf8, false),
        Field::new("year", DataType::Int32, false),
        Field::new("rate", DataType::Float64, true),
    ]))
}

/// The long-form table: one row per (municipality, network, year).
#[derive(Debug, Clone)]
pub struct ApprovalTable {
    batch: RecordBatch,
}

impl ApprovalTable {
    /// Wrap a batch, checking it has exactly the [`approval_schema`] layout.
    pub fn try_new(batch: RecordBatch) -> std::result::Result<Self, ArrowError> {
        let expected = approval_schema();
        if batch.schema().fields() != expected.fields() {
            return Err(ArrowError::SchemaError(format!(
                "expected long-form schema {:?}, got {:?}",
                expected,
                batch.schema()
            )));
        }
        Ok(Self { batch })
    }

    pub fn from_records(records: &[ApprovalRecord]) -> std::result::Result<Self, ArrowError> {
        let mut municipality = StringBuilder::new();
        let mut network = StringBuilder::new();
        let mut year = Int32Builder::with_capacity(records.len());
        let mut rate = Float64Builder::with_capacity(records.len());
        for r in records {
            municipality.append_value(&r.municipality);
            network.append_value(r.network.label());
            year.append_value(r.year);
            rate.append_option(r.rate);
        }

        let cols: Vec<ArrayRef> = vec![
            Arc::new(municipality.finish()),
            Arc::new(network.finish()),
            Arc::new(year.finish()),
            Arc::new(rate.finish()),
        ];
        Self::try_new(RecordBatch::try_new(approval_schema(), cols)?)
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn municipalities(&self) -> &StringArray {
        self.batch.column(0).as_string::<i32>()
    }

    pub fn networks(&self) -> &StringArray {
        self.batch.column(1).as_string::<i32>()
    }

    pub fn year_values(&self) -> &Int32Array {
        self.batch.column(2).as_primitive::<Int32Type>()
    }

    pub fn rates(&self) -> &Float64Array {
        self.batch.column(3).as_primitive::<Float64Type>()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.year_values()
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn records(&self) -> Vec<ApprovalRecord> {
        let (m, n, y, r) = (
            self.municipalities(),
            self.networks(),
            self.year_values(),
            self.rates(),
        );
        (0..self.num_rows())
            .map(|i| ApprovalRecord {
                municipality: m.value(i).to_string(),
                network: Network::parse(n.value(i)),
                year: y.value(i),
                rate: r.is_valid(i).then(|| r.value(i)),
            })
            .collect()
    }
}

/// Reshape the raw sheet into the long-form table.
///
/// Headers are trimmed, the configured columns located, and every data row
/// unpivoted into one record per target year whose column is present. A
/// missing rate column drops that year unless `strict_columns` is set.
pub fn transform(
    raw: &RawTable,
    columns: &ColumnConfig,
    years: &[i32],
    strict_columns: bool,
) -> Result<ApprovalTable> {
    info!(rows = raw.rows.len(), "transforming wide table to long form");

    let headers = normalize_headers(&raw.headers);
    let mapping = ColumnMapping::resolve(&headers, columns, years)?;

    if !mapping.missing_years.is_empty() {
        let missing: Vec<String> = mapping
            .missing_years
            .iter()
            .map(|&y| {
                columns
                    .rate_label(y)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("<rate column for {}>", y))
            })
            .collect();
        if strict_columns {
            return Err(PipelineError::SchemaMismatch(missing));
        }
        warn!(?missing, "expected rate columns absent; those years are omitted");
    }

    let mut seen: HashSet<(String, Network)> = HashSet::new();
    let mut records = Vec::with_capacity(raw.rows.len() * mapping.rates.len());
    let (mut blank, mut duplicate) = (0usize, 0usize);

    for row in 0..raw.rows.len() {
        let municipality = raw.cell(row, mapping.municipality).trim();
        if municipality.is_empty() {
            blank += 1;
            continue;
        }
        let network = Network::parse(raw.cell(row, mapping.network));
        if !seen.insert((municipality.to_string(), network.clone())) {
            duplicate += 1;
            warn!(municipality, %network, "duplicate source row; keeping the first");
            continue;
        }

        for &(year, col) in &mapping.rates {
            records.push(ApprovalRecord {
                municipality: municipality.to_string(),
                network: network.clone(),
                year,
                rate: parse_localized_rate(raw.cell(row, col)),
            });
        }
    }

    let nulls = records.iter().filter(|r| r.rate.is_none()).count();
    debug!(blank, duplicate, nulls, "rows skipped and rates coerced to null");

    let table = ApprovalTable::from_records(&records)?;
    info!(rows = table.num_rows(), years = ?table.years(), "long-form table ready");
    Ok(table)
}
