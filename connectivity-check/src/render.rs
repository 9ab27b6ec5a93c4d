//! Report rendering for stdout.

use std::io::{self, Write};

use common::errors::AppError;
use common::models::CheckReport;

/// Writes the table listing, success banner and settings summary.
pub fn write_text_summary<W: Write>(report: &CheckReport, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "PhotoSight tables:")?;
    if report.tables.is_empty() {
        writeln!(out, "  (none of the checked tables exist)")?;
    }
    for table in &report.tables {
        writeln!(out, "  - {}: {} rows", table.table_name, table.num_rows)?;
    }

    writeln!(out)?;
    writeln!(out, "✅ PhotoSight database connectivity check passed!")?;
    writeln!(out)?;
    writeln!(out, "Connection settings in use:")?;
    writeln!(
        out,
        "  - Wallet: {}",
        report.wallet_dir.as_deref().unwrap_or("(client default)")
    )?;
    writeln!(out, "  - User: {}", report.user)?;
    writeln!(out, "  - Target: {}", report.target)?;
    writeln!(
        out,
        "  - Oracle Client: {}",
        report.client_lib_dir.as_deref().unwrap_or("(system library path)")
    )?;
    writeln!(out, "  - Elapsed: {} ms", report.elapsed_ms)?;
    Ok(())
}

/// Writes the report as one pretty-printed JSON document.
pub fn write_json_report<W: Write>(report: &CheckReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Writes the failure line; the diagnostic trace goes to `trace`.
pub fn write_text_failure<W: Write, T: Write>(
    err: &anyhow::Error,
    out: &mut W,
    trace: &mut T,
) -> io::Result<()> {
    let message = err
        .downcast_ref::<AppError>()
        .map(|e| e.to_string())
        .unwrap_or_else(|| format!("{:#}", err));
    writeln!(out, "❌ Error: {}", message)?;
    writeln!(trace, "{:?}", err)
}

/// Writes the failure as a JSON error body.
pub fn write_json_failure<W: Write>(err: &AppError, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &err.to_body())?;
    writeln!(out)
}
