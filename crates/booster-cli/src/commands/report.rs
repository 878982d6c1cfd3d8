//! Usage report download.

use std::io::Write;
use std::path::{Path, PathBuf};

use booster_client::Action;
use booster_core::validation;

use super::Console;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn usage_report(
    console: &Console,
    from: Option<&str>,
    to: Option<&str>,
    target: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let range = validation::report_range(from, to)?;
    let pdf = console
        .dashboard
        .usage_report(from, to)
        .await
        .map_err(alert_for(Action::UsageReport))?;

    let path = target
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(output::report_file_name(&range)));
    std::fs::write(&path, &pdf).map_err(|e| booster_core::Error::io_with_path(e, &path))?;
    tracing::info!(path = %path.display(), bytes = pdf.len(), "Usage report written");
    writeln!(out, "Report saved to {}", path.display())?;
    Ok(())
}
