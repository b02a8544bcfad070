use std::cmp::Ordering;

use crate::GrowthRow;

#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub source: String,
    pub latest_value: f64,
    /// Share of the latest year's total production, in percent.
    pub share: f64,
    /// Mean of the source's computed growth figures; `None` for a source that
    /// never had a usable baseline.
    pub avg_growth: Option<f64>,
}

#[derive(Debug)]
pub struct Summary {
    pub latest_year: i32,
    pub total_latest: f64,
    pub change_from_prev: f64,
    pub sources: Vec<SourceSummary>,
}

/// Aggregates the growth rows into a latest-year report. Only rows whose year
/// parses as an integer participate; returns `None` when no row does.
pub fn compute_summary(rows: &[GrowthRow]) -> Option<Summary> {
    let dated: Vec<(i32, &GrowthRow)> = rows
        .iter()
        .filter_map(|row| row.year.parse::<i32>().ok().map(|year| (year, row)))
        .collect();
    let latest_year = dated.iter().map(|(year, _)| *year).max()?;

    let total_latest = year_total(&dated, latest_year);
    let total_prev = year_total(&dated, latest_year.saturating_sub(1));
    let change_from_prev = if total_prev > 0.0 {
        (total_latest - total_prev) / total_prev * 100.0
    } else {
        0.0
    };

    let mut names: Vec<&str> = Vec::new();
    for (_, row) in &dated {
        if !names.contains(&row.source.as_str()) {
            names.push(row.source.as_str());
        }
    }

    let mut sources = Vec::with_capacity(names.len());
    for name in names {
        let latest_value: f64 = dated
            .iter()
            .filter(|(year, row)| *year == latest_year && row.source == name)
            .map(|(_, row)| row.value)
            .sum();
        let growths: Vec<f64> = dated
            .iter()
            .filter(|(_, row)| row.source == name)
            .filter_map(|(_, row)| row.growth)
            .collect();
        let avg_growth = if growths.is_empty() {
            None
        } else {
            Some(growths.iter().sum::<f64>() / growths.len() as f64)
        };
        let share = if total_latest > 0.0 {
            latest_value / total_latest * 100.0
        } else {
            0.0
        };
        sources.push(SourceSummary {
            source: name.to_string(),
            latest_value,
            share,
            avg_growth,
        });
    }
    sources.sort_by(|a, b| {
        b.latest_value
            .partial_cmp(&a.latest_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.source.cmp(&b.source))
    });

    Some(Summary {
        latest_year,
        total_latest,
        change_from_prev,
        sources,
    })
}

fn year_total(dated: &[(i32, &GrowthRow)], year: i32) -> f64 {
    dated
        .iter()
        .filter(|(row_year, _)| *row_year == year)
        .map(|(_, row)| row.value)
        .sum()
}

pub fn print_summary(summary: &Summary) {
    println!(
        "\n=== RENEWABLE ENERGY SUMMARY FOR {} ===\n",
        summary.latest_year
    );
    println!("Total production: {:.2}", summary.total_latest);
    println!(
        "Change from {}: {:+.2}%\n",
        summary.latest_year.saturating_sub(1),
        summary.change_from_prev
    );
    for s in &summary.sources {
        match s.avg_growth {
            Some(avg) => println!(
                "{}: {:.2} ({:.1}% of total), average growth {:+.2}%",
                s.source, s.latest_value, s.share, avg
            ),
            None => println!(
                "{}: {:.2} ({:.1}% of total)",
                s.source, s.latest_value, s.share
            ),
        }
    }
}
