//! Writing rendered pages to disk.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::{PigglyError, Result};
use crate::html::toc::tag_anchor;
use crate::html::{self, escape};
use crate::model::{Procedure, Tag};
use crate::profile::{Index, Profile};

/// Output path for a procedure's page: the file stem of its source path,
/// or its identifier when it has none, plus `extension`.
#[must_use]
pub fn report_path(output_dir: &Path, procedure: &Procedure, extension: &str) -> PathBuf {
    let stem = procedure
        .source_path
        .as_deref()
        .and_then(|p| Path::new(p).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or(procedure.identifier.as_str());
    output_dir.join(format!("{stem}{extension}"))
}

/// Escaped source split into lines, for when no highlighter is available.
///
/// Each tag gets an empty `T<id>` target at the start of its line so the
/// table of contents has somewhere to jump. Tags without a usable line are
/// anchored on the first line.
#[must_use]
pub fn plain_listing(source: &str, tags: &[Tag]) -> Vec<String> {
    let mut lines: Vec<String> = source.lines().map(escape).collect();
    if lines.is_empty() && !tags.is_empty() {
        lines.push(String::new());
    }

    let count = lines.len();
    let mut targets = vec![String::new(); count];
    for tag in tags {
        let line = tag.line.filter(|&n| (1..=count).contains(&n)).unwrap_or(1);
        let target = html::Element::new("span").attr("id", tag_anchor(tag));
        target.write_to(&mut targets[line - 1]);
    }

    targets
        .into_iter()
        .zip(lines)
        .map(|(target, line)| target + &line)
        .collect()
}

/// Fail if two procedures, or a procedure and the index, would share an
/// output file.
pub fn check_output_paths(procedures: &[&Procedure], config: &ReportConfig) -> Result<()> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    seen.insert(config.output_dir.join(&config.index_file), "the index page");

    for procedure in procedures {
        let path = report_path(&config.output_dir, procedure, &config.extension);
        if let Some(first) = seen.insert(path.clone(), procedure.identifier.as_str()) {
            return Err(PigglyError::DuplicateOutput {
                path,
                first: first.to_string(),
                second: procedure.identifier.clone(),
            });
        }
    }
    Ok(())
}

/// Write `contents` to `path`, flushing before returning.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(contents.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Render and write one procedure page. Returns the path written.
pub fn write_page(
    procedure: &Procedure,
    profile: &dyn Profile,
    lines: &[String],
    config: &ReportConfig,
    generated_at: &str,
) -> Result<PathBuf> {
    let path = report_path(&config.output_dir, procedure, &config.extension);
    let page = html::page::render(procedure, profile, lines, config, generated_at);
    write_document(&path, &page)?;
    debug!(procedure = %procedure.name, path = %path.display(), "wrote page");
    Ok(path)
}

/// Render and write the index page. Returns the path written.
pub fn write_index(
    procedures: &[&Procedure],
    profile: &dyn Profile,
    index: &dyn Index,
    config: &ReportConfig,
    generated_at: &str,
) -> Result<PathBuf> {
    let path = config.output_dir.join(&config.index_file);
    let page = html::index::render(procedures, profile, index, config, generated_at);
    write_document(&path, &page)?;
    debug!(path = %path.display(), "wrote index");
    Ok(path)
}

/// Write a page for every procedure and then the index. `listing` supplies
/// the highlighted source lines for a procedure.
///
/// Pages go to distinct files and only read shared data, so they are written
/// in parallel when `config.parallel` is set. Nothing is written when two
/// pages would share a path. Otherwise the first failure is returned.
pub fn write_all<P, F>(
    procedures: &[&Procedure],
    profile: &P,
    listing: F,
    config: &ReportConfig,
) -> Result<Vec<PathBuf>>
where
    P: Profile + Index + Sync,
    F: Fn(&Procedure) -> Vec<String> + Sync,
{
    check_output_paths(procedures, config)?;
    std::fs::create_dir_all(&config.output_dir)?;
    let generated_at = html::format_timestamp(&Utc::now());

    let write_one = |procedure: &&Procedure| {
        write_page(procedure, profile, &listing(*procedure), config, &generated_at)
    };
    let mut written: Vec<PathBuf> = if config.parallel {
        procedures.par_iter().map(write_one).collect::<Result<_>>()?
    } else {
        procedures.iter().map(write_one).collect::<Result<_>>()?
    };

    written.push(write_index(procedures, profile, profile, config, &generated_at)?);
    info!(
        pages = procedures.len(),
        output_dir = %config.output_dir.display(),
        "wrote coverage report"
    );
    Ok(written)
}
