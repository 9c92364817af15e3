//! Percentage cells: a two-decimal figure beside a proportional bar.

use super::Element;

/// Value rendered when there is no data. Hidden, but lets client-side
/// table sorting place such rows together.
pub const NO_DATA: i64 = -1;

/// Hidden `-1` placeholder.
pub fn sentinel() -> Element {
    Element::new("span")
        .attr("style", "display:none")
        .text(NO_DATA.to_string())
}

/// Bar segment widths `(covered, uncovered)` at half scale, so a full bar
/// spans 50 units. Each width is truncated on its own, so the two need not
/// add up to 50.
#[must_use]
pub fn bar_widths(pct: f64) -> (u32, u32) {
    ((pct / 2.0) as u32, ((100.0 - pct) / 2.0) as u32)
}

/// `66.666` renders as `66.67%`.
#[must_use]
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.2}%")
}

/// Render a percentage, or the hidden sentinel when it is absent.
pub fn render(percent: Option<f64>) -> Element {
    let Some(pct) = percent else {
        return sentinel();
    };

    let (covered, uncovered) = bar_widths(pct);
    let graph = Element::new("table")
        .attr("align", "right")
        .class("graph")
        .child(
            Element::new("tr")
                .child(
                    Element::new("td")
                        .class("covered")
                        .attr("width", covered.to_string()),
                )
                .child(
                    Element::new("td")
                        .class("uncovered")
                        .attr("width", uncovered.to_string()),
                ),
        );

    Element::new("table").attr("align", "center").child(
        Element::new("tr")
            .child(
                Element::new("td")
                    .class("num")
                    .text(format_percent(pct))
                    .raw("&nbsp;"),
            )
            .child(Element::new("td").class("graph").child(graph)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_widths_bounds() {
        assert_eq!(bar_widths(0.0), (0, 50));
        assert_eq!(bar_widths(100.0), (50, 0));
    }

    #[test]
    fn test_bar_widths_truncate_independently() {
        assert_eq!(bar_widths(37.0), (18, 31));
        assert_eq!(bar_widths(66.666), (33, 16));
    }

    #[test]
    fn test_format_percent_two_decimals() {
        assert_eq!(format_percent(66.666), "66.67%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0), "100.00%");
    }

    #[test]
    fn test_render_absent_is_sentinel() {
        assert_eq!(
            render(None).render(),
            r#"<span style="display:none">-1</span>"#
        );
    }

    #[test]
    fn test_render_present() {
        let html = render(Some(37.0)).render();
        assert!(html.contains(r#"<td class="num">37.00%&nbsp;</td>"#));
        assert!(html.contains(r#"<td class="covered" width="18"></td>"#));
        assert!(html.contains(r#"<td class="uncovered" width="31"></td>"#));
        assert!(!html.contains("-1"));
    }
}
