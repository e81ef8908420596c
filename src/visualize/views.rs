use crate::transform::{ApprovalTable, Network};
use arrow::{
    array::BooleanArray,
    compute::{and, filter_record_batch, is_not_null},
    error::ArrowError,
};
use std::collections::BTreeMap;

/// Mean approval rate of one network in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkMean {
    pub year: i32,
    pub network: String,
    pub mean_rate: f64,
    /// Non-null rates averaged.
    pub count: usize,
}

/// Keep rows whose municipality is allow-listed, whose network passes
/// `network_ok`, and whose rate is not null.
fn filter_rows(
    table: &ApprovalTable,
    allow_list: &[String],
    network_ok: impl Fn(&str) -> bool,
) -> Result<ApprovalTable, ArrowError> {
    let keep: BooleanArray = table
        .municipalities()
        .iter()
        .zip(table.networks().iter())
        .map(|(m, n)| {
            let listed = m.is_some_and(|m| allow_list.iter().any(|a| a == m));
            Some(listed && n.is_some_and(&network_ok))
        })
        .collect();
    let mask = and(&keep, &is_not_null(table.rates())?)?;
    ApprovalTable::try_new(filter_record_batch(table.batch(), &mask)?)
}

/// Public-network records of the allow-listed municipalities with a known
/// rate, in table order.
pub fn municipality_view(
    table: &ApprovalTable,
    allow_list: &[String],
) -> Result<ApprovalTable, ArrowError> {
    filter_rows(table, allow_list, |n| Network::parse(n).is_public())
}

/// Arithmetic mean of the non-null rates per (year, network) across the
/// allow-listed municipalities, ordered by year then network label.
pub fn network_means(
    table: &ApprovalTable,
    allow_list: &[String],
) -> Result<Vec<NetworkMean>, ArrowError> {
    let filtered = filter_rows(table, allow_list, |_| true)?;

    let mut groups: BTreeMap<(i32, String), (f64, usize)> = BTreeMap::new();
    for rec in filtered.records() {
        if let Some(rate) = rec.rate {
            let acc = groups
                .entry((rec.year, rec.network.label().to_string()))
                .or_insert((0.0, 0));
            acc.0 += rate;
            acc.1 += 1;
        }
    }

    Ok(groups
        .into_iter()
        .map(|((year, network), (sum, count))| NetworkMean {
            year,
            network,
            mean_rate: sum / count as f64,
            count,
        })
        .collect())
}
