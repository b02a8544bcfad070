use std::env;

use renewable_growth::{
    compute_growth, compute_summary, load_records, print_summary, write_growth_csv, Result,
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
};

use anyhow::Error;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let args: Vec<String> = env::args().collect();
    let (input_path, output_path) = match args.len() {
        1 => (DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH),
        2 => (args[1].as_str(), DEFAULT_OUTPUT_PATH),
        3 => (args[1].as_str(), args[2].as_str()),
        _ => {
            return Err(Error::msg(
                "Usage: ./renewable_growth [input.xlsx] [output.csv]",
            ))
        }
    };

    let records = load_records(input_path)?;
    info!("loaded {} records from {}", records.len(), input_path);

    let table = compute_growth(&records);
    info!(
        rows = table.rows.len(),
        skipped_cells = table.skipped_cells,
        "computed year-over-year growth"
    );

    write_growth_csv(&table.rows, output_path)?;

    if let Some(summary) = compute_summary(&table.rows) {
        print_summary(&summary);
    }

    Ok(())
}
