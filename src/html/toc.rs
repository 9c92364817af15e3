//! Table of contents linking to every incomplete tag on a page.

use super::Element;
use crate::model::Tag;

/// Prefix of the in-page anchor for a tag, e.g. `T5`.
pub const TAG_ANCHOR_PREFIX: &str = "T";

/// Anchor id for a tag.
#[must_use]
pub fn tag_anchor(tag: &Tag) -> String {
    format!("{TAG_ANCHOR_PREFIX}{}", tag.id)
}

/// Tags not yet fully covered, in their original order.
pub fn incomplete(tags: &[Tag]) -> Vec<&Tag> {
    tags.iter().filter(|t| !t.complete).collect()
}

/// Render the index link and, when anything is incomplete, an ordered list
/// of links to the incomplete tags.
pub fn render(tags: &[Tag], index_href: &str) -> Element {
    let mut toc = Element::new("div")
        .class("toc")
        .child(Element::new("a").attr("href", index_href).text("Index"));

    let todo = incomplete(tags);
    if !todo.is_empty() {
        toc = toc.child(Element::new("ol").children(todo.into_iter().map(|t| {
            Element::new("li").class(t.kind.as_str()).child(
                Element::new("a")
                    .attr("href", format!("#{}", tag_anchor(t)))
                    .text(t.description.as_str()),
            )
        })));
    }

    toc
}
