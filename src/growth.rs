use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::{Record, Result};

#[derive(Debug, Clone)]
pub struct GrowthRow {
    pub year: String,
    pub source: String,
    pub value: f64,
    /// Year-over-year growth in percent. `None` when no finite growth exists
    /// for the source: its first numeric appearance, a zero baseline, or a
    /// ratio that overflows f64. Rendered as `0.00` in the CSV.
    pub growth: Option<f64>,
}

#[derive(Debug, Default)]
pub struct GrowthTable {
    pub rows: Vec<GrowthRow>,
    /// Source cells that were blank or non-numeric and produced no row.
    pub skipped_cells: usize,
}

/// Single pass over the records in input order, carrying each source's last
/// seen numeric value to compute its growth. Row order follows (record,
/// column) traversal order; nothing is sorted or grouped.
pub fn compute_growth(records: &[Record]) -> GrowthTable {
    let mut prev_year: HashMap<String, f64> = HashMap::new();
    let mut table = GrowthTable::default();

    for record in records {
        for (source, raw) in &record.sources {
            let Some(value) = parse_value(raw) else {
                if !raw.is_empty() {
                    debug!(year = %record.year, source = %source, cell = %raw, "skipping cell");
                }
                table.skipped_cells += 1;
                continue;
            };
            // a zero baseline divides to inf/NaN and an extreme ratio
            // overflows f64; neither is a growth figure, so the source
            // starts over in both cases
            let growth = prev_year
                .get(source.as_str())
                .map(|&prev| (value - prev) / prev * 100.0)
                .filter(|growth| growth.is_finite());
            table.rows.push(GrowthRow {
                year: record.year.clone(),
                source: source.clone(),
                value,
                growth,
            });
            prev_year.insert(source.clone(), value);
        }
    }
    table
}

// "inf" and "NaN" parse as f64 but have no place in the report
fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn write_growth_csv<P: AsRef<Path>>(rows: &[GrowthRow], file_path: P) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)
        .with_context(|| format!("failed to create output CSV {}", path.display()))?;
    wtr.write_record(["Year", "Source", "Value", "Growth (%)"])?;
    for row in rows {
        wtr.write_record(&[
            row.year.clone(),
            row.source.clone(),
            format!("{:.2}", row.value),
            format!("{:.2}", row.growth.unwrap_or(0.0)),
        ])?;
    }
    wtr.flush()?;
    println!(
        "The growth table was written as CSV to file {}",
        path.display()
    );
    Ok(())
}
