//! Per-procedure report page.

use super::{document, footer, signature, summary, toc, Element};
use crate::config::ReportConfig;
use crate::model::Procedure;
use crate::profile::Profile;

/// Line-number column: one self-linking anchor per source line, numbered
/// from 1.
#[must_use]
pub fn line_anchors(count: usize) -> String {
    (1..=count)
        .map(|n| format!(r##"<a href="#L{n}" id="L{n}">{n}</a>"##))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-row listing table: signature on top, numbered source below.
/// `lines` is already-highlighted markup, one entry per source line.
pub fn listing(procedure: &Procedure, lines: &[String]) -> Element {
    Element::new("div").class("listing").child(
        Element::new("table")
            .child(
                Element::new("tr")
                    .child(Element::new("td").class("signature").raw("&nbsp;"))
                    .child(
                        Element::new("td")
                            .class("signature")
                            .raw(signature::render(procedure)),
                    ),
            )
            .child(
                Element::new("tr")
                    .child(Element::new("td").class("lines").raw(line_anchors(lines.len())))
                    .child(Element::new("td").class("code").raw(lines.join("\n"))),
            ),
    )
}

/// Compose the full page for one procedure.
pub fn render(
    procedure: &Procedure,
    profile: &dyn Profile,
    lines: &[String],
    config: &ReportConfig,
    generated_at: &str,
) -> String {
    let mut body = summary::aggregate(&procedure.name, &profile.summary(procedure));
    body.push(listing(procedure, lines));
    body.push(toc::render(profile.tags(procedure), &config.index_file));
    body.push(footer(generated_at));

    document(
        &format!("Code Coverage: {}", procedure.name),
        &config.stylesheet,
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageSummary, Tag};

    struct Fixed {
        summary: CoverageSummary,
        tags: Vec<Tag>,
    }

    impl Profile for Fixed {
        fn summary(&self, _: &Procedure) -> CoverageSummary {
            self.summary.clone()
        }

        fn tags(&self, _: &Procedure) -> &[Tag] {
            &self.tags
        }
    }

    #[test]
    fn test_line_anchors() {
        assert_eq!(line_anchors(0), "");
        assert_eq!(
            line_anchors(2),
            "<a href=\"#L1\" id=\"L1\">1</a>\n<a href=\"#L2\" id=\"L2\">2</a>"
        );
    }

    #[test]
    fn test_page_sections_in_order() {
        let proc = Procedure::new("public.f", "f", "void");
        let profile = Fixed {
            summary: CoverageSummary::new(),
            tags: vec![Tag {
                id: "7".to_string(),
                kind: "block".to_string(),
                description: "begin".to_string(),
                complete: false,
                line: Some(1),
            }],
        };
        let lines = vec!["BEGIN".to_string(), "<span class=\"tK\">END</span>".to_string()];
        let html = render(&proc, &profile, &lines, &ReportConfig::default(), "now");

        assert!(html.contains("<title>Code Coverage: f</title>"));
        assert!(html.contains(r#"href="piggly.css""#));

        let summary = html.find(r#"<p class="summary">f</p>"#).unwrap();
        let listing = html.find(r#"<div class="listing">"#).unwrap();
        let toc = html.find(r#"<div class="toc">"#).unwrap();
        let footer = html.find(r#"<div class="timestamp">"#).unwrap();
        assert!(summary < listing && listing < toc && toc < footer);

        assert!(html.contains(r#"<td class="signature">&nbsp;</td>"#));
        assert!(html.contains("<td class=\"code\">BEGIN\n<span class=\"tK\">END</span></td>"));
        assert!(html.contains(r##"id="L2">2</a></td>"##));
        assert!(html.contains(r##"<a href="#T7">begin</a>"##));
        assert!(html.contains("at now</div>"));
    }
}
