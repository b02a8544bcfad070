//! Year-over-year growth analysis of renewable energy production figures:
//! reads the source spreadsheet, writes a long-format CSV, prints a summary.

use anyhow::Error;

pub mod growth;
pub mod sheet;
pub mod summary;

pub use growth::{compute_growth, write_growth_csv, GrowthRow, GrowthTable};
pub use sheet::{load_records, records_from_range, Record};
pub use summary::{compute_summary, print_summary, SourceSummary, Summary};

pub type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_INPUT_PATH: &str =
    "data/Table_10.1_Renewable_Energy_Production_and_Consumption_by_Source.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "output/renewable_summary.csv";

/// Header of the column holding the reporting year; every other named column
/// is treated as an energy source.
pub const YEAR_COLUMN: &str = "Year";
