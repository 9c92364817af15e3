//! Command handler functions for the piggly CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::ReportConfig;
use crate::model::{MetricKind, Procedure};
use crate::profile::{Index, Profile, ProfileDump};
use crate::report;

/// Pick the procedures to report on: all of them, or only those named.
fn select<'a>(dump: &'a ProfileDump, only: &[String]) -> Result<Vec<&'a Procedure>> {
    if only.is_empty() {
        return Ok(dump.procedures().collect());
    }
    only.iter()
        .map(|key| dump.find(key).with_context(|| format!("Cannot report on '{key}'")))
        .collect()
}

pub fn cmd_report(dump: &ProfileDump, config: &ReportConfig, only: &[String]) -> Result<String> {
    let procedures = select(dump, only)?;

    let listing = |procedure: &Procedure| {
        if let Some(lines) = dump.listing(procedure) {
            return lines.to_vec();
        }
        let source = dump.source(procedure).unwrap_or_else(|| {
            warn!(procedure = %procedure.name, "no source in profile, listing left empty");
            ""
        });
        report::plain_listing(source, dump.tags(procedure))
    };

    let written = report::write_all(&procedures, dump, listing, config).with_context(|| {
        format!("Failed to write report to {}", config.output_dir.display())
    })?;

    let mut out = String::new();
    writeln!(
        out,
        "Wrote {} procedure pages to {}",
        procedures.len(),
        config.output_dir.display()
    )
    .unwrap();
    if let Some(index) = written.last() {
        writeln!(out, "Index: {}", index.display()).unwrap();
    }
    Ok(out)
}

fn percent_column(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{p:.2}%"),
        None => "-".to_string(),
    }
}

pub fn cmd_summary(dump: &ProfileDump) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<40} {:>7} {:>7} {:>9} {:>8} {:>8} {:>8}",
        "PROCEDURE", "BLOCKS", "LOOPS", "BRANCHES", "BLOCK%", "LOOP%", "BRANCH%"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(95)).unwrap();

    for procedure in dump.procedures() {
        let label = dump.label(procedure);
        let summary = dump.summary(procedure);
        if summary.is_unparseable() {
            writeln!(out, "{:<40} (unparseable)", label).unwrap();
            continue;
        }
        let [block, loops, branch] = MetricKind::ALL;
        writeln!(
            out,
            "{:<40} {:>7} {:>7} {:>9} {:>8} {:>8} {:>8}",
            label,
            summary.count(block),
            summary.count(loops),
            summary.count(branch),
            percent_column(summary.percent(block)),
            percent_column(summary.percent(loops)),
            percent_column(summary.percent(branch)),
        )
        .unwrap();
    }

    Ok(out)
}
