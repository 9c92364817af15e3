//! Count and coverage cells shared by the per-procedure aggregate and the
//! index table.

use super::{percent, Element};
use crate::model::{CoverageSummary, MetricKind};

/// Header row: an optional leading column, then counts, then coverage.
pub fn header_row(leading: Option<&str>) -> Element {
    let headings = leading
        .into_iter()
        .chain(MetricKind::ALL.iter().map(|k| k.count_heading()))
        .chain(MetricKind::ALL.iter().map(|k| k.coverage_heading()));

    Element::new("tr").children(headings.map(|h| Element::new("th").text(h)))
}

/// The six data cells for a summary. An unparseable summary yields six
/// hidden sentinels; otherwise counts (missing as 0) and percentage bars.
pub fn cells(summary: &CoverageSummary) -> Vec<Element> {
    if summary.is_unparseable() {
        let counts = (0..3).map(|_| Element::new("td").class("count").child(percent::sentinel()));
        let pcts = (0..3).map(|_| Element::new("td").class("pct").child(percent::sentinel()));
        return counts.chain(pcts).collect();
    }

    let counts = MetricKind::ALL
        .iter()
        .map(|&k| Element::new("td").class("count").text(summary.count(k).to_string()));
    let pcts = MetricKind::ALL
        .iter()
        .map(|&k| Element::new("td").class("pct").child(percent::render(summary.percent(k))));
    counts.chain(pcts).collect()
}

/// Label paragraph followed by a one-row summary table.
pub fn aggregate(label: &str, summary: &CoverageSummary) -> Vec<Element> {
    vec![
        Element::new("p").class("summary").text(label),
        Element::new("table")
            .class("summary sortable")
            .child(header_row(None))
            .child(Element::new("tr").class("even").children(cells(summary))),
    ]
}
