//! Report command implementation

use crate::error::Result;
use crate::report::{build_report, render_report, Report};
use crate::store::Store;
use std::path::Path;
use tracing::info;

/// Build the aggregated report
pub async fn cmd_report(store: &Store) -> Result<Report> {
    build_report(store).await
}

/// Render the report, writing it to a file when a path is given, stdout
/// otherwise
pub fn write_report(report: &Report, output: Option<&Path>) -> Result<()> {
    let text = render_report(report);

    match output {
        Some(path) => {
            std::fs::write(path, &text)?;
            info!("Report written to {}", path.display());
            println!("✓ Report written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
