use anyhow::Result;
use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::filing;
use super::parsing::form13f::holdings_from_filing;
use super::parsing::HoldingRecord;

/// Outcome of one batch run, for operator-facing reporting.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub failed_ids: Vec<String>,
}

impl BatchReport {
    pub fn success(&mut self) {
        self.succeeded += 1;
    }

    pub fn failure(&mut self, id: &str) {
        self.failed += 1;
        self.failed_ids.push(id.to_string());
    }

    pub fn log_summary(&self, what: &str) {
        info!(
            "batch complete: {} {} parsed, {} failed",
            self.succeeded, what, self.failed
        );
        if !self.failed_ids.is_empty() {
            info!("failed ids: {}", self.failed_ids.iter().join(", "));
        }
    }
}

// The flattened raw file name maps back to its archive url.
pub fn source_id(file_name: &str) -> String {
    format!("https://sec.gov{}", file_name.replace('_', "/"))
}

fn parse_one(path: &Path, file_name: &str) -> Result<Vec<HoldingRecord>> {
    let raw = filing::read_filing(path)?;
    Ok(holdings_from_filing(&raw, &source_id(file_name))?)
}

/// Parse every raw 13F file in a directory. Failures are isolated per
/// document: a file that fails to decode or parse is recorded in the
/// report and contributes no records, and the loop continues. File names
/// are visited in sorted order so output and failures are reproducible.
pub fn parse_holdings_dir(dir: &Path) -> Result<(Vec<HoldingRecord>, BatchReport)> {
    info!("parsing raw filings from {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map_or(false, |ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut records = Vec::new();
    let mut report = BatchReport::default();

    for path in &paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("parsing {}", file_name);

        match parse_one(path, &file_name) {
            Ok(mut filing_records) => {
                report.success();
                records.append(&mut filing_records);
            }
            Err(e) => {
                warn!("skipping {}: {}", file_name, e);
                report.failure(&file_name);
            }
        }
    }

    report.log_summary("filings");
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_restores_the_archive_url() {
        assert_eq!(
            source_id("_Archives_edgar_data_1962636_0001398344-23-009400.txt"),
            "https://sec.gov/Archives/edgar/data/1962636/0001398344-23-009400.txt"
        );
    }
}
