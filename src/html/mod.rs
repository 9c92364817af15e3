//! HTML rendering for coverage reports.
//!
//! Markup is assembled with [`Element`], a small builder that collects
//! attributes and children and serializes once. Each renderer returns a
//! fragment; the page and index composers concatenate them in order.

pub mod index;
pub mod page;
pub mod percent;
pub mod signature;
pub mod summary;
pub mod toc;

use std::fmt;

use chrono::{DateTime, TimeZone};

/// Version embedded in every page footer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Escape text for use in element content or a quoted attribute value.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
enum Node {
    /// Escaped when serialized.
    Text(String),
    /// Inserted verbatim.
    Raw(String),
    Element(Element),
}

/// An HTML element with attributes and nested content.
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append pre-built markup without escaping it.
    #[must_use]
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    #[must_use]
    pub fn children(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(elements.into_iter().map(Node::Element));
        self
    }

    fn is_void(&self) -> bool {
        matches!(self.name, "link" | "meta" | "br")
    }

    /// Serialize into `out`.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        if self.is_void() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Raw(markup) => out.push_str(markup),
                Node::Element(element) => element.write_to(out),
            }
        }
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Format a wall-clock time the way the footer shows it,
/// e.g. `October 23, 2017 14:05 UTC`.
pub fn format_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("%B %d, %Y %H:%M %Z").to_string()
}

/// Footer naming the tool, its version and when the page was generated.
pub fn footer(generated_at: &str) -> Element {
    Element::new("div")
        .class("timestamp")
        .text(format!("Generated by piggly {VERSION} at {generated_at}"))
}

/// Wrap `body` in a complete document with a title and stylesheet link.
pub fn document(title: &str, stylesheet: &str, body: Vec<Element>) -> String {
    let html = Element::new("html")
        .attr("xmlns", "http://www.w3.org/1999/xhtml")
        .child(
            Element::new("head")
                .child(Element::new("title").text(title))
                .child(
                    Element::new("link")
                        .attr("rel", "stylesheet")
                        .attr("type", "text/css")
                        .attr("href", stylesheet),
                ),
        )
        .child(Element::new("body").children(body));

    let mut out = String::from("<!DOCTYPE html>\n");
    html.write_to(&mut out);
    out.push('\n');
    out
}
