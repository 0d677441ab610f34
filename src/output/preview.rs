//! Console summary of a finished crawl

use crate::record::{CrawlReport, COLUMNS};
use std::path::Path;

/// Formats the first `rows` records as an aligned text table
pub fn format_preview(report: &CrawlReport, rows: usize) -> String {
    let shown = &report.records[..rows.min(report.records.len())];

    let cells: Vec<[String; 4]> = shown
        .iter()
        .map(|record| {
            [
                record.title.clone(),
                record.price.clone(),
                record.rating.to_string(),
                record.category.clone(),
            ]
        })
        .collect();

    let index_width = shown.len().saturating_sub(1).to_string().len();
    let mut widths = COLUMNS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (header, width) in COLUMNS.iter().zip(widths.iter()) {
        out.push_str(&format!("  {:<width$}", header, width = *width));
    }
    out.push('\n');

    for (index, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:>width$}", index, width = index_width));
        for (cell, width) in row.iter().zip(widths.iter()) {
            out.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        out.push('\n');
    }

    out
}

/// Prints the preview, the table shape, per-category totals and the saved path
pub fn print_summary(report: &CrawlReport, preview_rows: usize, saved_to: &Path) {
    println!("{}", format_preview(report, preview_rows));

    let (rows, columns) = report.shape();
    println!("({}, {})", rows, columns);
    println!();

    for tally in &report.tallies {
        println!("Total {} Books: {}", tally.category, tally.books);
    }

    println!("\nBook details saved to '{}'.", saved_to.display());
}
