//! Summary and staging reports.

use console::style;

use crate::fs::StageReport;
use crate::source::DataSummary;

/// Print per-split counts and sample file names.
pub fn print_data_summary(summary: &DataSummary) {
    println!();
    println!("{}", style("Data summary:").bold());
    for (split, info) in summary.iter() {
        println!("  {:<6} {:>6} file(s)", split.as_str(), info.count);
        if !info.sample_names.is_empty() {
            println!("         e.g. {}", style(info.sample_names.join(", ")).dim());
        }
    }
    println!("  {:<6} {:>6} file(s)", "total", summary.total());
    println!();
}

/// Print the outcome of a staging run.
pub fn print_stage_report(report: &StageReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Staged data ({}):", report.mode)).bold()
    );
    println!("  Source: {}", report.source.display());
    println!("  Root:   {}", report.root.display());
    if report.mode == crate::config::StageMode::Copy {
        println!("  Copied:  {} file(s)", style(report.files_copied).green());
        if report.files_skipped > 0 {
            println!("  Skipped: {} file(s)", style(report.files_skipped).yellow());
        }
        println!("  Created: {} director(ies)", report.dirs_created);
    }
    println!("{}", style("═".repeat(50)).dim());
}
