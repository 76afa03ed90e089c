use chrono::NaiveDate;
use serde_json::Value;

use super::super::error::ExtractError;
use super::types::{HoldingRecord, ManagerInfo};
use super::xml::{extract_xml_payload, parse_xml_value, strip_namespaces};

// Positional indices of the embedded payloads in a 13F-HR filing.
const SUBMISSION_PAYLOAD: usize = 1;
const INFO_TABLE_PAYLOAD: usize = 2;

// "none to report" sentinel
const ZERO_CUSIP: &str = "000000000";
// share positions, as opposed to principal-amount positions
const SHARES_TYPE: &str = "SH";
// case-sensitive markers that the class description names common stock
const COMMON_STOCK_MARKERS: [&str; 5] = ["COM", "CL", "ORD", "SHS", "STOCK"];

/// Parse one raw 13F-HR filing into its filtered holding records.
/// `source` is the provenance id stamped on every record. Any missing
/// required field or malformed payload fails the whole document; no
/// partial records are emitted.
pub fn holdings_from_filing(raw: &str, source: &str) -> Result<Vec<HoldingRecord>, ExtractError> {
    let manager = extract_manager_info(raw)?;

    let payload = extract_xml_payload(raw, INFO_TABLE_PAYLOAD)?;
    let tree = strip_namespaces(parse_xml_value(payload)?);
    let info_tables = tree
        .get("informationTable")
        .and_then(|t| t.get("infoTable"))
        .ok_or_else(|| ExtractError::Parse("payload has no infoTable entries".to_string()))?;

    // A table with a single position parses as one object rather than an
    // array; treat it as a one-element sequence.
    let entries: Vec<&Value> = match info_tables {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut records = Vec::new();
    for entry in entries {
        if let Some(record) = project_entry(entry, &manager, source)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Cover-page fields from the submission metadata payload.
pub fn extract_manager_info(raw: &str) -> Result<ManagerInfo, ExtractError> {
    let payload = extract_xml_payload(raw, SUBMISSION_PAYLOAD)?;
    let tree = strip_namespaces(parse_xml_value(payload)?);
    let submission = tree
        .get("edgarSubmission")
        .ok_or_else(|| ExtractError::Parse("payload has no edgarSubmission root".to_string()))?;

    let cik = get_str(submission, &["headerData", "filerInfo", "filer", "credentials", "cik"])?;
    let name = get_str(submission, &["formData", "coverPage", "filingManager", "name"])?;
    let address = join_address(submission)?;
    let period = get_str(submission, &["formData", "coverPage", "reportCalendarOrQuarter"])?;

    Ok(ManagerInfo {
        cik: cik.to_string(),
        name: name.to_string(),
        address,
        report_period: parse_report_period(period)?,
    })
}

// Filing managers format addresses inconsistently; the canonical form is
// the field values joined in document order.
fn join_address(submission: &Value) -> Result<String, ExtractError> {
    let address = get_field(submission, &["formData", "coverPage", "filingManager", "address"])?;
    let fields = address.as_object().ok_or_else(|| {
        ExtractError::Parse("filingManager address is not a field mapping".to_string())
    })?;
    let parts: Vec<&str> = fields.values().filter_map(|v| v.as_str()).collect();
    if parts.is_empty() {
        return Err(ExtractError::Parse(
            "filingManager address has no fields".to_string(),
        ));
    }
    Ok(parts.join(", "))
}

// Apply the inclusion predicates in order and project a surviving entry to
// a flat record. Returns Ok(None) for an excluded entry.
fn project_entry(
    entry: &Value,
    manager: &ManagerInfo,
    source: &str,
) -> Result<Option<HoldingRecord>, ExtractError> {
    let cusip = get_str(entry, &["cusip"])?;
    if cusip == ZERO_CUSIP {
        return Ok(None);
    }

    let position_type = get_str(entry, &["shrsOrPrnAmt", "sshPrnamtType"])?;
    if position_type != SHARES_TYPE {
        return Ok(None);
    }

    let title_of_class = get_str(entry, &["titleOfClass"])?;
    if !COMMON_STOCK_MARKERS
        .iter()
        .any(|marker| title_of_class.contains(marker))
    {
        return Ok(None);
    }

    let value_text: String = get_str(entry, &["value"])?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    // reported values are in thousands of dollars
    let value = value_text.parse::<f64>().map_err(|_| {
        ExtractError::Parse(format!("unparseable holding value: {}", value_text))
    })? * 1000.0;

    let shares_text = get_str(entry, &["shrsOrPrnAmt", "sshPrnamt"])?.trim();
    let shares = shares_text.parse::<i64>().map_err(|_| {
        ExtractError::Parse(format!("unparseable share count: {}", shares_text))
    })?;

    Ok(Some(HoldingRecord {
        source: source.to_string(),
        manager_cik: manager.cik.clone(),
        manager_address: manager.address.clone(),
        manager_name: manager.name.clone(),
        report_period: manager.report_period,
        cusip6: derive_cusip6(cusip),
        cusip: cusip.to_uppercase(),
        company_name: get_str(entry, &["nameOfIssuer"])?.to_string(),
        value,
        shares,
    }))
}

/// Issuer-level 6-character id from a 9-character cusip. Filers
/// inconsistently zero-pad the identifier; a triple-zero prefix is
/// treated as padding and skipped down to the digit that genuinely
/// starts the issuer code.
pub fn derive_cusip6(cusip: &str) -> String {
    let upper = cusip.to_uppercase();
    if upper.starts_with("000") {
        upper.chars().skip(2).take(6).collect()
    } else {
        upper.chars().take(6).collect()
    }
}

fn parse_report_period(raw: &str) -> Result<NaiveDate, ExtractError> {
    const FORMATS: [&str; 3] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y"];
    let trimmed = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ExtractError::Parse(format!("unrecognized report period: {}", trimmed)))
}

fn get_field<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, ExtractError> {
    let mut current = value;
    for key in path {
        current = current
            .get(key)
            .ok_or_else(|| ExtractError::Parse(format!("missing field {}", path.join("."))))?;
    }
    Ok(current)
}

fn get_str<'a>(value: &'a Value, path: &[&str]) -> Result<&'a str, ExtractError> {
    get_field(value, path)?
        .as_str()
        .ok_or_else(|| ExtractError::Parse(format!("field {} is not text", path.join("."))))
}
