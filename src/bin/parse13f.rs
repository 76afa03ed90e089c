use anyhow::Result;
use edgar_extract::edgar::{aggregate, batch};
use edgar_extract::utils::dirs;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "parse-13f",
    about = "format raw 13F filings into an aggregated holdings csv"
)]
struct Opt {
    /// Directory containing raw filings [default: data/form13-raw]
    #[structopt(short = "i", long, parse(from_os_str))]
    input_directory: Option<PathBuf>,

    /// Path the formatted csv is written to [default: data/form13.csv]
    #[structopt(short = "o", long, parse(from_os_str))]
    output_file: Option<PathBuf>,

    /// Only keep data from the n most recent report quarters
    #[structopt(short = "p", long)]
    top_periods: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let input_dir = opt
        .input_directory
        .unwrap_or_else(|| PathBuf::from(dirs::FORM13F_RAW_DIR));
    let output_file = opt
        .output_file
        .unwrap_or_else(|| PathBuf::from(dirs::FORM13F_CSV_FILE));

    let (records, report) = batch::parse_holdings_dir(&input_dir)?;
    let mut records = aggregate::aggregate(records);
    info!("{} holdings after aggregation", records.len());

    if let Some(n) = opt.top_periods {
        records = aggregate::filter_top_periods(records, n);
        info!(
            "{} holdings within the {} most recent report periods",
            records.len(),
            n
        );
    }

    let mut writer = csv::Writer::from_path(&output_file)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("wrote {} rows to {}", records.len(), output_file.display());

    println!(
        "===== {} files parsed, {} failed =====",
        report.succeeded, report.failed
    );
    for id in &report.failed_ids {
        println!("{}", id);
    }
    Ok(())
}
