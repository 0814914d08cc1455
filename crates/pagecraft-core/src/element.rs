//! Page elements and their per-breakpoint overrides.

use crate::breakpoint::Breakpoint;
use crate::style::{StyleProperty, Styles};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Element identifier. Also used as the element's class name on export.
pub type ElementId = String;

/// Kind of element. Records without a type load as containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    #[serde(alias = "div")]
    Container,
    Text,
    Image,
    Button,
    Header,
    Footer,
}

impl ElementKind {
    /// Headers and footers span the full width and are pinned to the viewport.
    pub fn is_bar(self) -> bool {
        matches!(self, ElementKind::Header | ElementKind::Footer)
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Container => "container",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Header => "header",
            ElementKind::Footer => "footer",
        }
    }
}

/// Side data attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Link target for buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Link `target` attribute (`_blank` opens a new tab).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether a header sticks to the top while scrolling (default: yes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    /// Header or footer this element is nested in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Unknown keys, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ElementMeta {
    /// The non-empty link target, if any.
    pub fn link(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }

    pub fn opens_new_tab(&self) -> bool {
        self.target.as_deref() == Some("_blank")
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky.unwrap_or(true)
    }
}

/// Explicit layout for one breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Override {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default)]
    pub styles: Styles,
}

/// Overrides for the non-desktop breakpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Responsive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laptop: Option<Override>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<Override>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Override>,
}

impl Responsive {
    /// The override at `breakpoint`. Desktop never has one.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&Override> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Laptop => self.laptop.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Mobile => self.mobile.as_ref(),
        }
    }

    fn slot_mut(&mut self, breakpoint: Breakpoint) -> Option<&mut Option<Override>> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Laptop => Some(&mut self.laptop),
            Breakpoint::Tablet => Some(&mut self.tablet),
            Breakpoint::Mobile => Some(&mut self.mobile),
        }
    }

    /// The override at `breakpoint`, created empty if missing.
    ///
    /// Returns `None` for desktop.
    pub fn entry(&mut self, breakpoint: Breakpoint) -> Option<&mut Override> {
        self.slot_mut(breakpoint)
            .map(|slot| slot.get_or_insert_with(Override::default))
    }

    /// Drop the override at `breakpoint`, reverting it to scaled layout.
    pub fn clear(&mut self, breakpoint: Breakpoint) -> Option<Override> {
        self.slot_mut(breakpoint).and_then(Option::take)
    }

    pub fn has(&self, breakpoint: Breakpoint) -> bool {
        self.get(breakpoint).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Breakpoint::OVERRIDABLE.iter().all(|bp| !self.has(*bp))
    }
}

/// A positioned element on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Empty for records stored without an id; gestures ignore those.
    #[serde(default)]
    pub id: ElementId,
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    /// Text, button label or image URL.
    #[serde(default)]
    pub content: String,
    /// Desktop position relative to the canvas (or the parent bar).
    #[serde(default)]
    pub position: Point,
    /// Desktop styles.
    #[serde(default)]
    pub styles: Styles,
    #[serde(default)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub responsive: Responsive,
}

impl Element {
    /// Create an element with the editor's defaults for `kind`.
    ///
    /// `page_height` places new footers at the bottom of the page.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind, page_height: f64) -> Self {
        let is_bar = kind.is_bar();

        let content = match kind {
            ElementKind::Text => "Texto",
            ElementKind::Button => "Clique",
            _ => "",
        };

        let height = if is_bar {
            "80px"
        } else if kind == ElementKind::Text {
            "auto"
        } else {
            "60px"
        };
        let background = match kind {
            ElementKind::Button => "#1f2937",
            _ if is_bar => "#f1f5f9",
            _ => "transparent",
        };
        let color = if kind == ElementKind::Button { "#ffffff" } else { "#111827" };
        let font_size = match kind {
            ElementKind::Text | ElementKind::Button => "16px",
            _ => "",
        };

        let styles = Styles::new()
            .with(StyleProperty::Width, if is_bar { "100%" } else { "160px" })
            .with(StyleProperty::Height, height)
            .with(StyleProperty::Background, background)
            .with(StyleProperty::Color, color)
            .with(StyleProperty::Padding, "8px")
            .with(StyleProperty::FontSize, font_size)
            .with(StyleProperty::FontFamily, "Arial")
            .with(StyleProperty::BorderRadius, "0px")
            .with(StyleProperty::BoxShadow, "");

        let position = match kind {
            ElementKind::Header => Point::new(0.0, 0.0),
            ElementKind::Footer => Point::new(0.0, page_height - 80.0),
            _ => Point::new(20.0, 20.0),
        };

        Self {
            id: id.into(),
            kind,
            content: content.to_string(),
            position,
            styles,
            meta: ElementMeta::default(),
            responsive: Responsive::default(),
        }
    }

    pub fn is_bar(&self) -> bool {
        self.kind.is_bar()
    }

    /// Whether drag and resize gestures apply to this element.
    pub fn is_interactive(&self) -> bool {
        !self.id.is_empty() && !self.is_bar()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.meta.parent_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Write a position for `breakpoint`.
    ///
    /// Desktop writes the base position; other breakpoints write the
    /// override position, leaving the override's styles untouched.
    pub fn write_position(&mut self, breakpoint: Breakpoint, position: Point) {
        match self.responsive.entry(breakpoint) {
            Some(over) => over.position = Some(position),
            None => self.position = position,
        }
    }

    /// Write styles for `breakpoint`, property by property.
    pub fn write_styles(&mut self, breakpoint: Breakpoint, styles: &Styles) {
        match self.responsive.entry(breakpoint) {
            Some(over) => over.styles.apply(styles),
            None => self.styles.apply(styles),
        }
    }
}

/// Extract the numeric part of an id (`"c12"` → `12`).
///
/// All digits are concatenated, so `"a1b2"` yields `12`. Numbers too large
/// for a `u64` saturate to `u64::MAX`.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Hands out element ids that never collide with loaded ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCounter {
    /// `None` once the numeric range is used up.
    next: Option<u64>,
}

impl Default for IdCounter {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdCounter {
    /// Seed past the largest numeric suffix among `elements`.
    pub fn seeded_from(elements: &[Element]) -> Self {
        let max = elements
            .iter()
            .filter_map(|el| numeric_suffix(&el.id))
            .max()
            .unwrap_or(0);
        Self {
            next: max.checked_add(1),
        }
    }

    /// Allocate the next id.
    ///
    /// Once `c<u64::MAX>` is taken, ids switch to `c-<uuid>`, which carry no
    /// number the counter could hand out again.
    pub fn next_id(&mut self) -> ElementId {
        match self.next {
            Some(n) => {
                self.next = n.checked_add(1);
                format!("c{}", n)
            }
            None => format!("c-{}", Uuid::new_v4().simple()),
        }
    }

    /// The next numeric id, or `None` when the range is used up.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }

    /// Whether `other` would hand out ids this counter already could.
    pub fn is_behind(&self, other: &IdCounter) -> bool {
        match (self.next, other.next) {
            (Some(_), None) => true,
            (Some(a), Some(b)) => a < b,
            (None, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_kind() {
        let text = Element::new("c1", ElementKind::Text, 640.0);
        assert_eq!(text.content, "Texto");
        assert_eq!(text.styles.get(StyleProperty::Height), Some("auto"));
        assert_eq!(text.position, Point::new(20.0, 20.0));

        let button = Element::new("c2", ElementKind::Button, 640.0);
        assert_eq!(button.styles.get(StyleProperty::Background), Some("#1f2937"));
        assert_eq!(button.styles.get(StyleProperty::Color), Some("#ffffff"));

        let footer = Element::new("c3", ElementKind::Footer, 640.0);
        assert_eq!(footer.position, Point::new(0.0, 560.0));
        assert_eq!(footer.styles.get(StyleProperty::Width), Some("100%"));
        assert!(!footer.is_interactive());
    }

    #[test]
    fn test_legacy_div_kind() {
        let el: Element = serde_json::from_str(r#"{"id":"c4","type":"div"}"#).unwrap();
        assert_eq!(el.kind, ElementKind::Container);
        assert_eq!(el.position, Point::ZERO);
        assert!(el.styles.is_empty());
        assert!(el.responsive.is_empty());

        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "container");
    }

    #[test]
    fn test_write_position_preserves_override_styles() {
        let mut el = Element::new("c1", ElementKind::Container, 640.0);
        el.write_styles(
            Breakpoint::Tablet,
            &Styles::new().with(StyleProperty::Color, "red"),
        );
        el.write_position(Breakpoint::Tablet, Point::new(5.0, 6.0));

        let over = el.responsive.get(Breakpoint::Tablet).unwrap();
        assert_eq!(over.position, Some(Point::new(5.0, 6.0)));
        assert_eq!(over.styles.get(StyleProperty::Color), Some("red"));
        assert_eq!(el.position, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_write_position_desktop_hits_base() {
        let mut el = Element::new("c1", ElementKind::Container, 640.0);
        el.write_position(Breakpoint::Desktop, Point::new(40.0, 50.0));
        assert_eq!(el.position, Point::new(40.0, 50.0));
        assert!(el.responsive.is_empty());
    }

    #[test]
    fn test_meta_parent_and_extra() {
        let json = r#"{"parentId":"c1","sticky":false,"badge":3}"#;
        let meta: ElementMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.parent_id.as_deref(), Some("c1"));
        assert!(!meta.is_sticky());
        assert_eq!(meta.extra["badge"], 3);
        assert!(ElementMeta::default().is_sticky());
    }

    #[test]
    fn test_id_counter_seeding() {
        let elements = vec![
            Element::new("c3", ElementKind::Text, 640.0),
            Element::new("c12", ElementKind::Text, 640.0),
            Element::new("hero", ElementKind::Text, 640.0),
        ];
        let mut ids = IdCounter::seeded_from(&elements);
        assert_eq!(ids.next_id(), "c13");
        assert_eq!(ids.next_id(), "c14");

        assert_eq!(IdCounter::seeded_from(&[]).peek(), Some(1));
        assert_eq!(numeric_suffix("a1b2"), Some(12));
        assert_eq!(numeric_suffix("hero"), None);
    }

    #[test]
    fn test_id_counter_at_numeric_limit() {
        let max_id = format!("c{}", u64::MAX);
        let loaded = Element::new(max_id.as_str(), ElementKind::Text, 640.0);
        let mut ids = IdCounter::seeded_from(&[loaded]);
        assert_eq!(ids.peek(), None);
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(first.starts_with("c-"));
        assert_ne!(first, max_id);
        assert_ne!(first, second);

        let mut ids = IdCounter::seeded_from(&[Element::new(
            format!("c{}", u64::MAX - 1),
            ElementKind::Text,
            640.0,
        )]);
        assert_eq!(ids.next_id(), max_id);
        assert!(ids.next_id().starts_with("c-"));
    }

    #[test]
    fn test_id_counter_oversized_digits() {
        let long = Element::new("c123456789012345678901234567890", ElementKind::Text, 640.0);
        assert_eq!(numeric_suffix(&long.id), Some(u64::MAX));
        let mut ids = IdCounter::seeded_from(&[long]);
        assert!(ids.next_id().starts_with("c-"));
        assert!(IdCounter::default().is_behind(&ids));
        assert!(!ids.is_behind(&IdCounter::default()));
    }
}
