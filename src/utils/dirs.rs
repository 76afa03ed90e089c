use anyhow::Result;
use std::fs;
use std::path::Path;

// Raw and formatted 13F locations
pub const FORM13F_RAW_DIR: &str = "data/form13-raw";
pub const FORM13F_CSV_FILE: &str = "data/form13.csv";

// 10-K staging and output locations
pub const FORM10K_URLS_FILE: &str = "data/cik-10k-urls.csv";
pub const FORM10K_TEMP_DIR: &str = "data/temp-10k";
pub const FORM10K_CLEAN_DIR: &str = "data/form10k-clean";

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
