//! In-memory representation of what the profiler hands to the reporter:
//! procedure signatures, coverage tags and per-procedure summaries.
//! Nothing here is mutated once loaded.

use serde::{Deserialize, Serialize};

/// Compute a coverage percentage, returning `None` when the total is zero.
#[must_use]
pub fn percent(covered: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(covered as f64 * 100.0 / total as f64)
    }
}

/// Argument mode of a stored procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    In,
    Out,
    InOut,
}

impl ArgMode {
    /// Translate a one-letter catalog code (`i`, `o`, `b`). Any other code,
    /// including the empty string, has no mode.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "i" => Some(ArgMode::In),
            "o" => Some(ArgMode::Out),
            "b" => Some(ArgMode::InOut),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ArgMode::In => "IN",
            ArgMode::Out => "OUT",
            ArgMode::InOut => "INOUT",
        }
    }
}

/// A single declared argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    /// Raw mode code as stored in the catalog; see [`ArgMode::from_code`].
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub arg_type: String,
}

impl Argument {
    pub fn mode(&self) -> Option<ArgMode> {
        self.mode.as_deref().and_then(ArgMode::from_code)
    }
}

/// Signature and identity of a stored procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    /// Stable identifier, used to name the per-procedure page.
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(default)]
    pub secdef: bool,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub setof: bool,
    pub rettype: String,
}

impl Procedure {
    pub fn new(identifier: &str, name: &str, rettype: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: name.to_string(),
            source_path: None,
            arguments: Vec::new(),
            secdef: false,
            strict: false,
            setof: false,
            rettype: rettype.to_string(),
        }
    }
}

/// A coverage annotation attached to one construct of a procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    /// Category label, e.g. `block`, `loop` or `branch`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub complete: bool,
    /// 1-based source line the tag starts on, when the profiler knows it.
    #[serde(default)]
    pub line: Option<usize>,
}

/// The three metrics reported for every procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Block,
    Loop,
    Branch,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Block, MetricKind::Loop, MetricKind::Branch];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Block => "block",
            MetricKind::Loop => "loop",
            MetricKind::Branch => "branch",
        }
    }

    /// Column heading for the count column.
    pub fn count_heading(&self) -> &'static str {
        match self {
            MetricKind::Block => "Blocks",
            MetricKind::Loop => "Loops",
            MetricKind::Branch => "Branches",
        }
    }

    /// Column heading for the percentage column.
    pub fn coverage_heading(&self) -> &'static str {
        match self {
            MetricKind::Block => "Block Coverage",
            MetricKind::Loop => "Loop Coverage",
            MetricKind::Branch => "Branch Coverage",
        }
    }

    fn from_tag_kind(kind: &str) -> Option<Self> {
        match kind {
            "block" => Some(MetricKind::Block),
            "loop" => Some(MetricKind::Loop),
            "branch" => Some(MetricKind::Branch),
            _ => None,
        }
    }
}

/// Count and coverage for one metric kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub count: Option<u64>,
    /// `None` when there is nothing to divide by.
    #[serde(default)]
    pub percent: Option<f64>,
}

/// Per-procedure coverage, keyed by metric kind.
///
/// A summary with no keys at all means the profiler could not parse the
/// procedure's source. That is different from a summary whose keys are
/// present with zero counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<Metric>,
    #[serde(default, rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loops: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Metric>,
}

impl CoverageSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful in tests.
    #[must_use]
    pub fn with(mut self, kind: MetricKind, metric: Metric) -> Self {
        *self.slot(kind) = Some(metric);
        self
    }

    pub fn get(&self, kind: MetricKind) -> Option<&Metric> {
        match kind {
            MetricKind::Block => self.block.as_ref(),
            MetricKind::Loop => self.loops.as_ref(),
            MetricKind::Branch => self.branch.as_ref(),
        }
    }

    fn slot(&mut self, kind: MetricKind) -> &mut Option<Metric> {
        match kind {
            MetricKind::Block => &mut self.block,
            MetricKind::Loop => &mut self.loops,
            MetricKind::Branch => &mut self.branch,
        }
    }

    /// True iff none of block, loop or branch is present. Only key presence
    /// is checked; the contents of a present metric are not validated.
    #[must_use]
    pub fn is_unparseable(&self) -> bool {
        MetricKind::ALL.iter().all(|&k| self.get(k).is_none())
    }

    /// Count for `kind`, with missing metrics and missing counts read as 0.
    #[must_use]
    pub fn count(&self, kind: MetricKind) -> u64 {
        self.get(kind).and_then(|m| m.count).unwrap_or(0)
    }

    #[must_use]
    pub fn percent(&self, kind: MetricKind) -> Option<f64> {
        self.get(kind).and_then(|m| m.percent)
    }

    /// Aggregate tags by type. Only kinds with at least one tag get a key, so
    /// an empty or non-metric tag list yields the unparseable summary.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a Tag>,
    {
        let mut totals = [(0u64, 0u64); 3];
        for tag in tags {
            if let Some(kind) = MetricKind::from_tag_kind(&tag.kind) {
                let slot = &mut totals[kind as usize];
                slot.0 += 1;
                if tag.complete {
                    slot.1 += 1;
                }
            }
        }

        let mut summary = Self::new();
        for kind in MetricKind::ALL {
            let (total, complete) = totals[kind as usize];
            if total > 0 {
                *summary.slot(kind) = Some(Metric {
                    count: Some(total),
                    percent: percent(complete, total),
                });
            }
        }
        summary
    }

    /// Total several summaries. A kind is present when any input has it;
    /// counts are summed and the percent is weighted by each input's count.
    /// Inputs whose percent is absent add to the count but not the percent.
    pub fn combine<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a CoverageSummary>,
    {
        // (present, count, weighted count, weighted percent sum)
        let mut totals = [(false, 0u64, 0u64, 0f64); 3];
        for summary in summaries {
            for kind in MetricKind::ALL {
                let Some(metric) = summary.get(kind) else {
                    continue;
                };
                let slot = &mut totals[kind as usize];
                let count = metric.count.unwrap_or(0);
                slot.0 = true;
                slot.1 += count;
                if let Some(pct) = metric.percent {
                    slot.2 += count;
                    slot.3 += pct * count as f64;
                }
            }
        }

        let mut combined = Self::new();
        for kind in MetricKind::ALL {
            let (present, count, weight, weighted) = totals[kind as usize];
            if present {
                *combined.slot(kind) = Some(Metric {
                    count: Some(count),
                    percent: (weight > 0).then(|| weighted / weight as f64),
                });
            }
        }
        combined
    }
}
