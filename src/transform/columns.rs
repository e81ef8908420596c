use crate::config::ColumnConfig;
use crate::error::{PipelineError, Result};

/// Trim surrounding whitespace from every header; the source is known to
/// pad some labels inconsistently.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_string()).collect()
}

/// Where the kept columns sit in a (normalized) header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub municipality: usize,
    pub network: usize,
    /// `(year, column index)` for every target year whose column exists,
    /// in target-year order; a year listed twice appears once.
    pub rates: Vec<(i32, usize)>,
    /// Target years with no matching column.
    pub missing_years: Vec<i32>,
}

impl ColumnMapping {
    pub fn resolve(headers: &[String], columns: &ColumnConfig, years: &[i32]) -> Result<Self> {
        let find = |label: &str| headers.iter().position(|h| h == label);
        let require = |label: &str| {
            find(label).ok_or_else(|| PipelineError::MissingColumn(label.to_string()))
        };

        let municipality = require(&columns.municipality)?;
        let network = require(&columns.network)?;

        let mut rates: Vec<(i32, usize)> = Vec::with_capacity(years.len());
        let mut missing_years: Vec<i32> = Vec::new();
        for &year in years {
            if rates.iter().any(|&(y, _)| y == year) || missing_years.contains(&year) {
                continue;
            }
            match columns.rate_label(year).and_then(find) {
                Some(idx) => rates.push((year, idx)),
                None => missing_years.push(year),
            }
        }

        Ok(Self {
            municipality,
            network,
            rates,
            missing_years,
        })
    }
}
