//! Index page: one summary row per procedure.

use super::{document, footer, summary, Element};
use crate::config::ReportConfig;
use crate::model::{CoverageSummary, Procedure};
use crate::profile::{Index, Profile};

/// Row class by zero-based position.
#[must_use]
pub fn row_class(position: usize) -> &'static str {
    if position % 2 == 0 {
        "even"
    } else {
        "odd"
    }
}

fn row(
    position: usize,
    procedure: &Procedure,
    profile: &dyn Profile,
    index: &dyn Index,
    extension: &str,
) -> Element {
    let summary = profile.summary(procedure);
    let label = index.label(procedure);

    let label_cell = if summary.is_unparseable() {
        Element::new("td").class("file fail").text(label)
    } else {
        Element::new("td").class("file").child(
            Element::new("a")
                .attr("href", format!("{}{extension}", procedure.identifier))
                .text(label),
        )
    };

    Element::new("tr")
        .class(row_class(position))
        .child(label_cell)
        .children(summary::cells(&summary))
}

/// Summary table across procedures, rows in input order.
pub fn table<'a, I>(
    procedures: I,
    profile: &dyn Profile,
    index: &dyn Index,
    extension: &str,
) -> Element
where
    I: IntoIterator<Item = &'a Procedure>,
{
    Element::new("table")
        .class("summary sortable")
        .child(summary::header_row(Some("Procedure")))
        .children(
            procedures
                .into_iter()
                .enumerate()
                .map(|(k, p)| row(k, p, profile, index, extension)),
        )
}

/// Complete index document: overall aggregate, the table and a footer.
pub fn render(
    procedures: &[&Procedure],
    profile: &dyn Profile,
    index: &dyn Index,
    config: &ReportConfig,
    generated_at: &str,
) -> String {
    let summaries: Vec<CoverageSummary> =
        procedures.iter().map(|p| profile.summary(p)).collect();
    let overall = CoverageSummary::combine(&summaries);

    let mut body = summary::aggregate("All Procedures", &overall);
    body.push(table(
        procedures.iter().copied(),
        profile,
        index,
        &config.extension,
    ));
    body.push(footer(generated_at));

    document("Code Coverage", &config.stylesheet, body)
}
