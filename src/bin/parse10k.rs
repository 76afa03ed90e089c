use anyhow::Result;
use edgar_extract::edgar::batch::BatchReport;
use edgar_extract::edgar::{filing, parsing::form10k};
use edgar_extract::utils::{dirs, http};
use indicatif::ProgressBar;
use log::{error, info};
use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use url::Url;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "parse-10k",
    about = "download 10-K filings and extract items 1, 1A, 7, and 7A as json"
)]
struct Opt {
    /// csv listing cik and form10KUrls columns [default: data/cik-10k-urls.csv]
    #[structopt(short = "i", long, parse(from_os_str))]
    input_file: Option<PathBuf>,

    /// Staging directory for raw downloads [default: data/temp-10k]
    #[structopt(short = "t", long, parse(from_os_str))]
    temp_directory: Option<PathBuf>,

    /// Directory cleaned json documents are written to [default: data/form10k-clean]
    #[structopt(short = "o", long, parse(from_os_str))]
    output_directory: Option<PathBuf>,

    /// Name part of the archive User-Agent header
    #[structopt(long, default_value = "Example")]
    user_name: String,

    /// Email part of the archive User-Agent header
    #[structopt(long, default_value = "software@example.com")]
    user_email: String,
}

#[derive(Debug, Deserialize)]
struct UrlRow {
    cik: String,
    #[serde(rename = "form10KUrls")]
    form10k_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let input_file = opt
        .input_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(dirs::FORM10K_URLS_FILE));
    let temp_dir = opt
        .temp_directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(dirs::FORM10K_TEMP_DIR));
    let output_dir = opt
        .output_directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(dirs::FORM10K_CLEAN_DIR));
    let user_agent = format!("{} {}", opt.user_name, opt.user_email);

    dirs::ensure_dir(&temp_dir)?;
    dirs::ensure_dir(&output_dir)?;

    let mut reader = csv::Reader::from_path(&input_file)?;
    let rows: Vec<UrlRow> = reader.deserialize().collect::<Result<_, csv::Error>>()?;
    info!("found {} companies to pull filings for", rows.len());

    let client = Client::new();
    let progress = ProgressBar::new(rows.len() as u64);
    let mut report = BatchReport::default();

    for row in &rows {
        match process_row(&client, &temp_dir, &output_dir, row, &user_agent).await {
            Ok(()) => report.success(),
            Err(e) => {
                error!("skipping filing for cik {}: {}", row.cik, e);
                report.failure(filing::file_id(&row.form10k_url));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    report.log_summary("10-K filings");
    Ok(())
}

async fn process_row(
    client: &Client,
    temp_dir: &Path,
    output_dir: &Path,
    row: &UrlRow,
    user_agent: &str,
) -> Result<()> {
    let id = filing::file_id(&row.form10k_url);
    let raw_path = temp_dir.join(format!("raw_{}", id));
    let url = Url::parse(&format!(
        "{}{}",
        filing::EDGAR_ARCHIVES_URL,
        row.form10k_url
    ))?;

    http::fetch_and_save(client, &url, &raw_path, user_agent).await?;
    let raw = filing::read_filing(&raw_path)?;
    let sections = form10k::extract_ten_k_sections(&raw, &row.cik)?;

    fs::write(output_dir.join(id), serde_json::to_string_pretty(&sections)?)?;
    fs::remove_file(&raw_path)?;
    Ok(())
}
