use anyhow::{bail, Result};
use chrono::NaiveDate;
use edgar_extract::edgar::report::ReportType;
use edgar_extract::edgar::{filing, index};
use edgar_extract::utils::{dirs, http};
use indicatif::ProgressBar;
use log::{error, info};
use reqwest::Client;
use std::path::PathBuf;
use structopt::StructOpt;
use url::Url;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fetch-13f",
    about = "download raw 13F-HR filings listed in the EDGAR daily index"
)]
struct Opt {
    /// First filing date to fetch, yyyy-mm-dd
    #[structopt(short = "s", long, default_value = "2022-12-31")]
    start_date: NaiveDate,

    /// Last filing date to fetch, yyyy-mm-dd
    #[structopt(short = "e", long, default_value = "2023-12-22")]
    end_date: NaiveDate,

    /// Directory raw filings are written to [default: data/form13-raw]
    #[structopt(short = "o", long, parse(from_os_str))]
    output_directory: Option<PathBuf>,

    /// Form type to pull from the daily index
    #[structopt(long, default_value = "13F-HR")]
    form_type: ReportType,

    /// User-Agent header for archive requests
    #[structopt(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let output_dir = opt
        .output_directory
        .unwrap_or_else(|| PathBuf::from(dirs::FORM13F_RAW_DIR));
    let user_agent = opt
        .user_agent
        .unwrap_or_else(|| filing::USER_AGENT.to_string());
    if let ReportType::Other(ref unknown) = opt.form_type {
        bail!(
            "unknown form type {}; known types: {}",
            unknown,
            ReportType::list_types()
        );
    }
    dirs::ensure_dir(&output_dir)?;

    let client = Client::new();
    let mut date = opt.end_date;

    while date >= opt.start_date {
        match index::fetch_form_paths(&client, date, &opt.form_type, &user_agent).await {
            Ok(paths) => {
                let progress = ProgressBar::new(paths.len() as u64);
                for path in &paths {
                    let url = Url::parse(&format!("{}{}", filing::EDGAR_ARCHIVES_URL, path))?;
                    let dest = output_dir.join(filing::raw_file_name(path));
                    if let Err(e) = http::fetch_and_save(&client, &url, &dest, &user_agent).await {
                        error!("download failed for {}: {}", path, e);
                    }
                    progress.inc(1);
                }
                progress.finish_and_clear();
                info!("{}: fetched {} filings", date, paths.len());
            }
            Err(e) => error!("daily index fetch failed for {}: {}", date, e),
        }

        match date.pred_opt() {
            Some(previous) => date = previous,
            None => break,
        }
    }

    Ok(())
}
