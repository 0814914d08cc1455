//! CSS rule building.

use pagecraft_core::{StyleProperty, Styles, px_value};
use std::fmt::Write;

/// Characters that would let a value escape its rule or the enclosing
/// `<style>` element.
const UNSAFE_CHARS: [char; 4] = ['{', '}', '<', '>'];

/// Whether `value` can be emitted as a declaration value.
///
/// A `;` is only allowed inside parentheses or quotes, as in
/// `url(data:image/png;base64,...)`.
pub fn is_safe_value(value: &str) -> bool {
    if value.contains(UNSAFE_CHARS) {
        return false;
    }
    let mut depth = 0usize;
    let mut quote = None;
    for c in value.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => return false,
                _ => {}
            },
        }
    }
    true
}

/// Format a number the way CSS expects: no trailing `.0`, no `-0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// `value` as a percentage of `design_width`.
pub fn percent_of(value: f64, design_width: f64) -> String {
    if design_width <= 0.0 {
        return "0%".to_string();
    }
    format!("{}%", format_number(value / design_width * 100.0))
}

/// Width value for export: pixel widths become a percentage of the
/// design width, anything else passes through.
pub fn export_width(width: &str, design_width: f64) -> String {
    match px_value(width) {
        Some(px) => percent_of(px, design_width),
        None => width.to_string(),
    }
}

/// Ordered declarations of one rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<(&'static str, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Empty values are skipped; malformed ones are
    /// dropped with a warning.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        let value: String = value.into();
        let value = value.trim();
        if value.is_empty() {
            return self;
        }
        if !is_safe_value(value) {
            log::warn!("Dropping malformed value for {}: {:?}", name, value);
            return self;
        }
        self.entries.push((name, value.to_string()));
        self
    }

    /// Add a style property if it has a value.
    pub fn push_style(&mut self, styles: &Styles, prop: StyleProperty) -> &mut Self {
        match styles.value(prop) {
            Some(value) => self.push(prop.css_name(), value),
            None => self,
        }
    }

    /// Height, omitted when empty or `auto`.
    pub fn push_height(&mut self, styles: &Styles) -> &mut Self {
        match styles.value(StyleProperty::Height) {
            Some(height) if height != "auto" => self.push("height", height),
            _ => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A CSS rule for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub class: String,
    pub declarations: Declarations,
}

impl Rule {
    pub fn new(class: impl Into<String>, declarations: Declarations) -> Self {
        Self {
            class: class.into(),
            declarations,
        }
    }

    /// Append the rule to `out`, indented by `indent` spaces.
    pub fn write_to(&self, out: &mut String, indent: usize) {
        let pad = " ".repeat(indent);
        let _ = writeln!(out, "{pad}.{} {{", self.class);
        for (name, value) in &self.declarations.entries {
            let _ = writeln!(out, "{pad}  {name}: {value};");
        }
        let _ = writeln!(out, "{pad}}}");
    }
}

/// Append `@media (max-width: <max_width>px)` wrapping `rules` to `out`.
pub fn write_media_block(out: &mut String, max_width: u32, rules: &[Rule]) {
    if rules.is_empty() {
        return;
    }
    let _ = writeln!(out, "@media (max-width: {max_width}px) {{");
    for rule in rules {
        rule.write_to(out, 2);
    }
    let _ = writeln!(out, "}}");
}

/// Reset and canvas rules shared by every export.
pub fn base_stylesheet(design_width: f64, page_height: f64) -> String {
    format!(
        "html, body {{
  margin: 0;
  padding: 0;
  width: 100%;
  min-height: 100%;
  overflow-x: hidden;
}}
.page-root {{
  width: 100%;
  min-height: 100vh;
  box-sizing: border-box;
}}
.canvas-area {{
  position: relative;
  width: 100%;
  max-width: {}px;
  margin: 0 auto;
  min-height: {}px;
}}
",
        format_number(design_width),
        format_number(page_height)
    )
}
