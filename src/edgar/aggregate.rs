use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::parsing::HoldingRecord;

type IdentityKey = (
    String,    // source
    String,    // manager cik
    String,    // manager address
    String,    // manager name
    NaiveDate, // report period
    String,    // cusip6
    String,    // cusip
);

fn identity_key(record: &HoldingRecord) -> IdentityKey {
    (
        record.source.clone(),
        record.manager_cik.clone(),
        record.manager_address.clone(),
        record.manager_name.clone(),
        record.report_period,
        record.cusip6.clone(),
        record.cusip.clone(),
    )
}

/// Collapse duplicate reports of the same position. Filers restate a
/// holding more than once within one filing for the same report period;
/// those rows are the same economic fact, so value and shares are summed
/// rather than first-wins or max. The company name keeps the first
/// spelling encountered in input order. Output is sorted by identity key.
pub fn aggregate(records: Vec<HoldingRecord>) -> Vec<HoldingRecord> {
    let mut groups: BTreeMap<IdentityKey, HoldingRecord> = BTreeMap::new();
    for record in records {
        match groups.entry(identity_key(&record)) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                let merged = slot.get_mut();
                merged.value += record.value;
                merged.shares += record.shares;
            }
        }
    }
    groups.into_values().collect()
}

/// Keep only the records from the `top_n` most recent distinct report
/// periods present in the batch.
pub fn filter_top_periods(records: Vec<HoldingRecord>, top_n: usize) -> Vec<HoldingRecord> {
    let periods: BTreeSet<NaiveDate> = records.iter().map(|r| r.report_period).collect();
    let keep: BTreeSet<NaiveDate> = periods
        .into_iter()
        .rev()
        .take(top_n)
        .collect();
    records
        .into_iter()
        .filter(|r| keep.contains(&r.report_period))
        .collect()
}
