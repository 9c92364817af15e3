//! Read-only views over profiler output.
//!
//! Renderers never look anything up globally: they take a [`Profile`] for
//! summaries and tags and an [`Index`] for display labels.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{PigglyError, Result};
use crate::model::{CoverageSummary, Procedure, Tag};

/// Coverage results produced by the profiler.
pub trait Profile {
    /// Summary for one procedure. Empty when the source could not be parsed.
    fn summary(&self, procedure: &Procedure) -> CoverageSummary;

    /// Tags for one procedure, in source order.
    fn tags(&self, procedure: &Procedure) -> &[Tag];
}

/// Supplies the label shown for a procedure in the index table.
pub trait Index {
    fn label(&self, procedure: &Procedure) -> String;
}

/// One procedure as recorded in a profile dump.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcedureEntry {
    #[serde(flatten)]
    pub procedure: Procedure,
    /// Highlighted markup, one entry per source line, carrying its own
    /// `T<id>` tag anchors.
    #[serde(default)]
    pub listing: Option<Vec<String>>,
    /// Raw source text, used when no highlighted listing is supplied.
    #[serde(default)]
    pub source: Option<String>,
    /// Precomputed summary. Derived from `tags` when absent.
    #[serde(default)]
    pub summary: Option<CoverageSummary>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDump {
    #[serde(default)]
    procedures: Vec<ProcedureEntry>,
}

/// JSON-backed profile: every procedure, its tags and optional summary.
#[derive(Debug, Default)]
pub struct ProfileDump {
    entries: Vec<ProcedureEntry>,
    by_identifier: HashMap<String, usize>,
}

impl ProfileDump {
    pub fn new(entries: Vec<ProcedureEntry>) -> Self {
        let by_identifier = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.procedure.identifier.clone(), i))
            .collect();
        Self {
            entries,
            by_identifier,
        }
    }

    /// Parse a dump from JSON bytes.
    pub fn from_json(input: &[u8]) -> serde_json::Result<Self> {
        let raw: RawDump = serde_json::from_slice(input)?;
        Ok(Self::new(raw.procedures))
    }

    /// Read and parse a dump file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        let dump = Self::from_json(&content).map_err(|source| PigglyError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            procedures = dump.entries.len(),
            "loaded profile"
        );
        Ok(dump)
    }

    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.entries.iter().map(|e| &e.procedure)
    }

    pub fn entry(&self, procedure: &Procedure) -> Option<&ProcedureEntry> {
        self.by_identifier
            .get(&procedure.identifier)
            .map(|&i| &self.entries[i])
    }

    /// Find a procedure by identifier or by name.
    pub fn find(&self, key: &str) -> Result<&Procedure> {
        if let Some(&i) = self.by_identifier.get(key) {
            return Ok(&self.entries[i].procedure);
        }
        self.procedures()
            .find(|p| p.name == key)
            .ok_or_else(|| PigglyError::UnknownProcedure(key.to_string()))
    }

    pub fn source(&self, procedure: &Procedure) -> Option<&str> {
        self.entry(procedure).and_then(|e| e.source.as_deref())
    }

    pub fn listing(&self, procedure: &Procedure) -> Option<&[String]> {
        self.entry(procedure).and_then(|e| e.listing.as_deref())
    }
}

impl Profile for ProfileDump {
    fn summary(&self, procedure: &Procedure) -> CoverageSummary {
        match self.entry(procedure) {
            Some(ProcedureEntry {
                summary: Some(summary),
                ..
            }) => summary.clone(),
            Some(entry) => CoverageSummary::from_tags(&entry.tags),
            None => CoverageSummary::new(),
        }
    }

    fn tags(&self, procedure: &Procedure) -> &[Tag] {
        self.entry(procedure).map(|e| e.tags.as_slice()).unwrap_or(&[])
    }
}

impl Index for ProfileDump {
    /// File name of the procedure's source path, falling back to its name.
    fn label(&self, procedure: &Procedure) -> String {
        procedure
            .source_path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| procedure.name.clone())
    }
}
