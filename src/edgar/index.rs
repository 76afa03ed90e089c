use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use encoding_rs::WINDOWS_1252;
use log::{debug, info, warn};
use reqwest::Client;
use std::str::FromStr;

use super::error::ExtractError;
use super::report::ReportType;

pub fn daily_index_path(date: NaiveDate) -> String {
    let quarter = (date.month() - 1) / 3 + 1;
    format!(
        "/Archives/edgar/daily-index/{}/QTR{}/master.{}.idx",
        date.year(),
        quarter,
        date.format("%Y%m%d")
    )
}

/// Rows of the master index are pipe-delimited:
/// CIK|Company Name|Form Type|Date Filed|Filename. Banner and header
/// lines never have five fields; the dashed separator row does.
pub fn parse_master_index(text: &str, wanted: &ReportType) -> Vec<String> {
    let mut archive_paths = Vec::new();
    for line in text.lines() {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() != 5 || fields[0].contains("---") {
            continue;
        }
        let row_type = ReportType::from_str(fields[2])
            .unwrap_or_else(|_| ReportType::Other(fields[2].to_string()));
        if &row_type == wanted {
            archive_paths.push(format!("/Archives/{}", fields[4]));
        }
    }
    archive_paths
}

/// Fetch one day's master index and return the archive paths of every
/// filing of the wanted form type filed that day. Days without an index
/// (weekends, holidays) yield an empty list rather than an error.
pub async fn fetch_form_paths(
    client: &Client,
    date: NaiveDate,
    wanted: &ReportType,
    user_agent: &str,
) -> Result<Vec<String>> {
    let path = daily_index_path(date);
    let url = format!("{}{}", super::filing::EDGAR_ARCHIVES_URL, path);
    debug!("fetching daily index {}", url);

    let response = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await?;

    if !response.status().is_success() {
        warn!("no daily index for {} ({})", date, response.status());
        return Ok(Vec::new());
    }

    let bytes = response.bytes().await?;
    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        return Err(ExtractError::Encoding(format!("daily index for {}", date)).into());
    }

    let paths = parse_master_index(&text, wanted);
    info!("{} {} filings listed for {}", paths.len(), wanted, date);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_index_path_uses_calendar_quarters() {
        let date = NaiveDate::from_ymd_opt(2023, 2, 14).unwrap();
        assert_eq!(
            daily_index_path(date),
            "/Archives/edgar/daily-index/2023/QTR1/master.20230214.idx"
        );
        let date = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        assert_eq!(
            daily_index_path(date),
            "/Archives/edgar/daily-index/2022/QTR4/master.20221231.idx"
        );
    }

    #[test]
    fn master_index_rows_filter_by_form_type() {
        let text = concat!(
            "Description:           Daily Index of EDGAR Dissemination Feed\n",
            "Last Data Received:    March 31, 2023\n",
            "\n",
            "CIK|Company Name|Form Type|Date Filed|Filename\n",
            "--------------------------------------------------------------------------------\n",
            "1962636|EXAMPLE CAPITAL|13F-HR|2023-03-31|edgar/data/1962636/0001398344-23-009400.txt\n",
            "320193|APPLE INC|10-K|2023-03-31|edgar/data/320193/0000320193-23-000106.txt\n",
            "1111111|OTHER FUND|13F-NT|2023-03-31|edgar/data/1111111/0001111111-23-000001.txt\n",
        );
        let paths = parse_master_index(text, &ReportType::Form13FHR);
        assert_eq!(
            paths,
            vec!["/Archives/edgar/data/1962636/0001398344-23-009400.txt"]
        );
    }

    #[test]
    fn header_and_separator_rows_are_skipped() {
        let text = "CIK|Company Name|Form Type|Date Filed|Filename\n---|---|---|---|---\n";
        assert!(parse_master_index(text, &ReportType::Form13FHR).is_empty());
    }
}
