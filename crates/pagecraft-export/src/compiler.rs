//! Compile a page into a standalone responsive HTML document.

use crate::context::ExportContext;
use crate::css::{self, Declarations, Rule};
use crate::html::{class_name, element_html, element_tags, escape_html};
use pagecraft_core::{Breakpoint, Element, ElementKind, StyleProperty, Styles, resolve};
use std::collections::HashMap;
use std::fmt::Write;

/// Cosmetic properties emitted before the flex-centering block.
const LEADING_COSMETICS: [StyleProperty; 5] = [
    StyleProperty::Background,
    StyleProperty::Color,
    StyleProperty::Padding,
    StyleProperty::FontSize,
    StyleProperty::FontFamily,
];

/// Cosmetic properties emitted after it.
const TRAILING_COSMETICS: [StyleProperty; 2] =
    [StyleProperty::BorderRadius, StyleProperty::BoxShadow];

/// Result of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    /// Body markup.
    pub html: String,
    /// Stylesheet, including media queries.
    pub css: String,
    /// Full HTML document with the stylesheet inlined.
    pub document: String,
}

/// Elements grouped by where they are placed in the document.
struct Partition<'a> {
    headers: Vec<&'a Element>,
    roots: Vec<&'a Element>,
    footers: Vec<&'a Element>,
    children: HashMap<&'a str, Vec<&'a Element>>,
}

impl<'a> Partition<'a> {
    fn new(elements: &'a [Element]) -> Self {
        let bars: HashMap<&str, &Element> = elements
            .iter()
            .filter(|el| el.is_bar())
            .map(|el| (el.id.as_str(), el))
            .collect();

        let mut partition = Partition {
            headers: Vec::new(),
            roots: Vec::new(),
            footers: Vec::new(),
            children: HashMap::new(),
        };

        for el in elements {
            match el.kind {
                ElementKind::Header => partition.headers.push(el),
                ElementKind::Footer => partition.footers.push(el),
                _ => match el.parent_id() {
                    Some(parent) if bars.contains_key(parent) => {
                        partition.children.entry(parent).or_default().push(el);
                    }
                    Some(parent) => {
                        log::warn!(
                            "Element {} has unknown parent {}; exporting at top level",
                            el.id,
                            parent
                        );
                        partition.roots.push(el);
                    }
                    None => partition.roots.push(el),
                },
            }
        }
        partition
    }

    fn children_of(&self, bar: &Element) -> &[&'a Element] {
        self.children.get(bar.id.as_str()).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Compile `elements` into HTML and CSS.
pub fn compile(elements: &[Element], title: &str, page_height: f64) -> ExportBundle {
    compile_with(&ExportContext::new(elements).with_title(title).with_page_height(page_height))
}

/// Compile the page described by `ctx`.
pub fn compile_with(ctx: &ExportContext<'_>) -> ExportBundle {
    let partition = Partition::new(ctx.elements);
    let design_width = Breakpoint::Desktop.preview_width();

    // Document order: headers (with children), roots, footers (with children).
    let mut ordered: Vec<&Element> = Vec::with_capacity(ctx.elements.len());
    let mut body = String::new();
    body.push_str("<div class=\"page-root\">\n  <div class=\"canvas-area\">\n");
    for header in &partition.headers {
        write_bar(&mut body, *header, partition.children_of(header), &mut ordered);
    }
    for root in &partition.roots {
        let _ = writeln!(body, "    {}", element_html(root));
        ordered.push(*root);
    }
    for footer in &partition.footers {
        write_bar(&mut body, *footer, partition.children_of(footer), &mut ordered);
    }
    body.push_str("  </div>\n</div>\n");

    let mut stylesheet = css::base_stylesheet(design_width, ctx.page_height);
    for el in &ordered {
        base_rule(el).write_to(&mut stylesheet, 0);
    }

    let mut media_blocks = 0;
    for bp in Breakpoint::OVERRIDABLE {
        let rules: Vec<Rule> = ordered
            .iter()
            .filter(|el| el.responsive.has(bp))
            .map(|el| override_rule(el, bp))
            .filter(|rule| !rule.declarations.is_empty())
            .collect();
        if rules.is_empty() {
            continue;
        }
        if let Some(max_width) = bp.max_width() {
            css::write_media_block(&mut stylesheet, max_width, &rules);
            media_blocks += 1;
        }
    }

    log::debug!(
        "Exported {} elements ({} headers, {} footers, {} media blocks)",
        ordered.len(),
        partition.headers.len(),
        partition.footers.len(),
        media_blocks
    );

    let document = render_document(&ctx.title, &stylesheet, &body);
    ExportBundle {
        html: body,
        css: stylesheet,
        document,
    }
}

fn write_bar<'a>(
    out: &mut String,
    bar: &'a Element,
    children: &[&'a Element],
    ordered: &mut Vec<&'a Element>,
) {
    let (open, close) = element_tags(bar);
    ordered.push(bar);
    if children.is_empty() {
        let _ = writeln!(out, "    {}{}", open, close);
        return;
    }
    let _ = writeln!(out, "    {}", open);
    for child in children {
        let _ = writeln!(out, "      {}", element_html(child));
        ordered.push(*child);
    }
    let _ = writeln!(out, "    {}", close);
}

fn push_cosmetics(decls: &mut Declarations, styles: &Styles, props: &[StyleProperty]) {
    for prop in props {
        decls.push_style(styles, *prop);
    }
}

fn push_flex_center(decls: &mut Declarations) {
    decls
        .push("display", "flex")
        .push("align-items", "center")
        .push("justify-content", "center");
}

/// Desktop rule for an element.
fn base_rule(el: &Element) -> Rule {
    let layout = resolve(el, Breakpoint::Desktop);
    let styles = &layout.styles;
    let design_width = Breakpoint::Desktop.preview_width();
    let mut decls = Declarations::new();

    if el.is_bar() {
        match el.kind {
            ElementKind::Header if el.meta.is_sticky() => {
                decls.push("position", "sticky").push("top", "0");
            }
            ElementKind::Header => {
                decls.push("position", "relative");
            }
            _ => {
                decls.push("position", "sticky").push("bottom", "0");
            }
        }
        decls
            .push("width", "100vw")
            .push("margin-left", "calc(50% - 50vw)")
            .push("margin-right", "calc(50% - 50vw)");
    } else {
        decls
            .push("position", "absolute")
            .push("left", css::percent_of(layout.position.x, design_width))
            .push("top", format!("{}px", css::format_number(layout.position.y)));
        if let Some(width) = styles.value(StyleProperty::Width) {
            decls.push("width", css::export_width(width, design_width));
        }
    }

    decls.push_height(styles);
    push_cosmetics(&mut decls, styles, &LEADING_COSMETICS);
    push_flex_center(&mut decls);
    push_cosmetics(&mut decls, styles, &TRAILING_COSMETICS);
    decls
        .push("box-sizing", "border-box")
        .push("z-index", if el.is_bar() { "999" } else { "1" });

    if el.kind == ElementKind::Button {
        decls
            .push("cursor", "pointer")
            .push("text-decoration", "none")
            .push("border", "none");
    }

    Rule::new(class_name(&el.id), decls)
}

/// Rule inside the media block of `bp`, for an element with an override there.
///
/// Bars only get cosmetic properties; they always span the viewport.
fn override_rule(el: &Element, bp: Breakpoint) -> Rule {
    let layout = resolve(el, bp);
    let styles = &layout.styles;
    let design_width = bp.preview_width();
    let mut decls = Declarations::new();

    if !el.is_bar() {
        decls
            .push("left", css::percent_of(layout.position.x, design_width))
            .push("top", format!("{}px", css::format_number(layout.position.y)));
        if let Some(width) = styles.value(StyleProperty::Width) {
            decls.push("width", css::export_width(width, design_width));
        }
    }

    decls.push_height(styles);
    push_cosmetics(&mut decls, styles, &LEADING_COSMETICS);
    push_cosmetics(&mut decls, styles, &TRAILING_COSMETICS);

    Rule::new(class_name(&el.id), decls)
}

fn render_document(title: &str, css: &str, body: &str) -> String {
    format!(
        "<!doctype html>
<html>
  <head>
    <meta charset=\"utf-8\" />
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
    <title>{}</title>
    <style>
{}    </style>
  </head>
  <body>
{}  </body>
</html>
",
        escape_html(title),
        css,
        body
    )
}
