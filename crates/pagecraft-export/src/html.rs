//! HTML fragments for exported elements.

use pagecraft_core::{Element, ElementKind};

/// Escape text content (`&`, `<`, `>`).
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value: text escaping plus `"`.
pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

/// Turn an element id into a legal class token.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`; a leading digit (or an
/// empty id) gets an `el-` prefix.
pub fn class_name(id: &str) -> String {
    let sanitized: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    match sanitized.chars().next() {
        Some(c) if !c.is_ascii_digit() => sanitized,
        _ => format!("el-{}", sanitized),
    }
}

/// Opening markup, content and closing markup for an element.
///
/// Bars return their closing tag separately so children can be placed
/// between the two.
pub fn element_tags(element: &Element) -> (String, String) {
    let class = class_name(&element.id);
    let content = escape_html(&element.content);
    match element.kind {
        ElementKind::Button => match element.meta.link() {
            Some(href) => {
                let target = element
                    .meta
                    .target
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| format!(" target=\"{}\"", escape_attr(t)))
                    .unwrap_or_default();
                (
                    format!(
                        "<a class=\"{}\" href=\"{}\"{}>{}",
                        class,
                        escape_attr(href),
                        target,
                        content
                    ),
                    "</a>".to_string(),
                )
            }
            None => (
                format!("<button class=\"{}\">{}", class, content),
                "</button>".to_string(),
            ),
        },
        ElementKind::Image => (
            format!(
                "<img class=\"{}\" src=\"{}\" alt=\"\" />",
                class,
                escape_attr(&element.content)
            ),
            String::new(),
        ),
        ElementKind::Text => (
            format!("<div class=\"{}\">{}", class, content),
            "</div>".to_string(),
        ),
        ElementKind::Header => (
            format!("<header class=\"{}\">{}", class, content),
            "</header>".to_string(),
        ),
        ElementKind::Footer => (
            format!("<footer class=\"{}\">{}", class, content),
            "</footer>".to_string(),
        ),
        ElementKind::Container => (format!("<div class=\"{}\">", class), "</div>".to_string()),
    }
}

/// Markup for a childless element on one line.
pub fn element_html(element: &Element) -> String {
    let (open, close) = element_tags(element);
    open + &close
}
