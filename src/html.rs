//! Normalise HTML message bodies into the inline markup the extractor reads.
//!
//! Only a handful of tags carry meaning: `<b>`/`<strong>`, `<i>`/`<em>`,
//! `<u>`, `<s>`/`<strike>`/`<del>`, `<blockquote>`, `<a>` and `<br>`. Block
//! elements end a line; every other tag is dropped and its text kept.
//! Entities are decoded by the HTML parser.

use html5ever::driver::ParseOpts;
use html5ever::{parse_document, tendril::TendrilSink};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Canonical spelling every `<br>` variant is rewritten to.
pub const LINE_BREAK: &str = "<br />";

/// Convert an HTML fragment to inline markup.
///
/// Text without any `<` is returned unchanged.
///
/// # Examples
///
/// ```
/// use tagtext::normalize_html;
///
/// assert_eq!(normalize_html("<b>hi</b><br>there"), "**hi**<br />there");
/// ```
#[must_use]
pub fn normalize_html(text: &str) -> String {
    if !text.contains('<') {
        return text.to_string();
    }
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(text);
    let mut out = String::new();
    render_children(&dom.document, &mut out);
    out.trim_end_matches('\n').to_string()
}

fn render_children(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        render_node(child, out);
    }
}

fn render_node(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Document => render_children(handle, out),
        NodeData::Element { name, .. } => match &*name.local {
            "script" | "style" | "title" => {}
            "br" => out.push_str(LINE_BREAK),
            "b" | "strong" => wrap(handle, "**", out),
            "i" | "em" => wrap(handle, "_", out),
            "u" | "ins" => wrap(handle, "~", out),
            "s" | "strike" | "del" => wrap(handle, "~~", out),
            "blockquote" => quote(handle, out),
            "a" => link(handle, out),
            "p" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                render_children(handle, out);
                end_line(out);
            }
            _ => render_children(handle, out),
        },
        _ => {}
    }
}

/// Surround the element's text with `delim`, unless it is blank.
fn wrap(handle: &Handle, delim: &str, out: &mut String) {
    let mut inner = String::new();
    render_children(handle, &mut inner);
    if inner.trim().is_empty() {
        out.push_str(&inner);
        return;
    }
    out.push_str(delim);
    out.push_str(&inner);
    out.push_str(delim);
}

fn quote(handle: &Handle, out: &mut String) {
    let mut inner = String::new();
    render_children(handle, &mut inner);
    if !out.is_empty() {
        end_line(out);
    }
    for line in inner.lines().map(str::trim).filter(|l| !l.is_empty()) {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
}

/// Links become their target when the text adds nothing, else their text.
fn link(handle: &Handle, out: &mut String) {
    let mut text = String::new();
    render_children(handle, &mut text);
    let href = href(handle);
    match href {
        Some(href) if text.trim().is_empty() || text.trim() == href => out.push_str(&href),
        _ => out.push_str(&text),
    }
}

fn href(handle: &Handle) -> Option<String> {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == "href")
        .map(|attr| attr.value.to_string())
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
