use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recognized section heading inside a sub-document. Offsets are byte
/// positions; `end` is the start of the next heading in document order, or
/// the document length for the final section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// The cleaned text of the four 10-K items we keep, plus the filer's CIK.
/// Field order matches the JSON documents the downstream loader expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenKSections {
    pub item1: String,
    pub item1a: String,
    pub item7: String,
    pub item7a: String,
    pub cik: String,
}

/// Cover-page fields shared by every holding reported in one 13F filing.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerInfo {
    pub cik: String,
    pub name: String,
    pub address: String,
    pub report_period: NaiveDate,
}

/// One reported position from a 13F information table, already filtered and
/// projected. Never mutated after creation; aggregation builds new records.
/// Serde names are the column names of the output csv.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub source: String,
    #[serde(rename = "managerCik")]
    pub manager_cik: String,
    #[serde(rename = "managerAddress")]
    pub manager_address: String,
    #[serde(rename = "managerName")]
    pub manager_name: String,
    #[serde(rename = "reportCalendarOrQuarter")]
    pub report_period: NaiveDate,
    pub cusip6: String,
    pub cusip: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub value: f64,
    pub shares: i64,
}
