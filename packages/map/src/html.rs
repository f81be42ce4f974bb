//! Minimal HTML element builder.
//!
//! Markers, popups, the legend and the fallback panel are all small,
//! fixed-structure fragments. Building them through [`Element`] keeps every
//! piece of catalog text escaped and keeps the fragments independent of the
//! map library that eventually displays them.

use std::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node in an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element.
    Element(Element),
    /// Text content, escaped on render.
    Text(String),
    /// Pre-rendered markup, inserted verbatim.
    Raw(String),
}

/// An HTML element with attributes, inline style declarations and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(String, String)>,
    styles: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Starts a new element.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute. The value is escaped on render.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Shorthand for `attr("id", ..)`.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Shorthand for `attr("class", ..)`.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Adds one inline style declaration.
    #[must_use]
    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    /// Appends escaped text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends several child elements.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Appends markup that is already rendered (e.g. a nested fragment or a
    /// script body).
    #[must_use]
    pub fn raw(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Raw(html.into()));
        self
    }

    /// Renders the element to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);

        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if !self.styles.is_empty() {
            let declarations = self
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(out, " style=\"{}\"", escape(&declarations));
        }

        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Element(element) => element.render_into(out),
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Raw(html) => out.push_str(html),
            }
        }

        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements_with_styles() {
        let html = Element::new("div")
            .class("legend")
            .style("padding", "10px")
            .style("font-size", "12px")
            .child(Element::new("span").text("Alto"))
            .render();

        assert_eq!(
            html,
            "<div class=\"legend\" style=\"padding: 10px; font-size: 12px;\"><span>Alto</span></div>"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let html = Element::new("p")
            .attr("title", "a \"quoted\" <value>")
            .text("R&D <script>")
            .render();

        assert_eq!(
            html,
            "<p title=\"a &quot;quoted&quot; &lt;value&gt;\">R&amp;D &lt;script&gt;</p>"
        );
    }

    #[test]
    fn raw_content_is_not_escaped() {
        let html = Element::new("div").raw("<b>ok</b>").render();
        assert_eq!(html, "<div><b>ok</b></div>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = Element::new("img").attr("src", "x.png").render();
        assert_eq!(html, "<img src=\"x.png\">");
    }
}
