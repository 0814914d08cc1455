//! Sparse style records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style properties the editor edits and the exporter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Width,
    Height,
    Background,
    Color,
    Padding,
    FontSize,
    FontFamily,
    BorderRadius,
    BoxShadow,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 9] = [
        StyleProperty::Width,
        StyleProperty::Height,
        StyleProperty::Background,
        StyleProperty::Color,
        StyleProperty::Padding,
        StyleProperty::FontSize,
        StyleProperty::FontFamily,
        StyleProperty::BorderRadius,
        StyleProperty::BoxShadow,
    ];

    /// Key in stored projects (camelCase).
    pub fn key(self) -> &'static str {
        match self {
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Background => "background",
            StyleProperty::Color => "color",
            StyleProperty::Padding => "padding",
            StyleProperty::FontSize => "fontSize",
            StyleProperty::FontFamily => "fontFamily",
            StyleProperty::BorderRadius => "borderRadius",
            StyleProperty::BoxShadow => "boxShadow",
        }
    }

    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Background => "background",
            StyleProperty::Color => "color",
            StyleProperty::Padding => "padding",
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontFamily => "font-family",
            StyleProperty::BorderRadius => "border-radius",
            StyleProperty::BoxShadow => "box-shadow",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        StyleProperty::ALL.into_iter().find(|prop| prop.key() == key)
    }
}

/// A sparse set of style values.
///
/// `None` means "not set here". At a breakpoint override, only the set
/// properties replace the base ones. Properties outside [`StyleProperty`]
/// are kept in `extra` so loaded projects round-trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    /// Unknown properties, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, prop: StyleProperty) -> &Option<String> {
        match prop {
            StyleProperty::Width => &self.width,
            StyleProperty::Height => &self.height,
            StyleProperty::Background => &self.background,
            StyleProperty::Color => &self.color,
            StyleProperty::Padding => &self.padding,
            StyleProperty::FontSize => &self.font_size,
            StyleProperty::FontFamily => &self.font_family,
            StyleProperty::BorderRadius => &self.border_radius,
            StyleProperty::BoxShadow => &self.box_shadow,
        }
    }

    fn slot_mut(&mut self, prop: StyleProperty) -> &mut Option<String> {
        match prop {
            StyleProperty::Width => &mut self.width,
            StyleProperty::Height => &mut self.height,
            StyleProperty::Background => &mut self.background,
            StyleProperty::Color => &mut self.color,
            StyleProperty::Padding => &mut self.padding,
            StyleProperty::FontSize => &mut self.font_size,
            StyleProperty::FontFamily => &mut self.font_family,
            StyleProperty::BorderRadius => &mut self.border_radius,
            StyleProperty::BoxShadow => &mut self.box_shadow,
        }
    }

    /// The stored value, even if empty.
    pub fn get(&self, prop: StyleProperty) -> Option<&str> {
        self.slot(prop).as_deref()
    }

    /// The stored value if it is set and non-empty.
    pub fn value(&self, prop: StyleProperty) -> Option<&str> {
        self.get(prop).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, prop: StyleProperty, value: impl Into<String>) {
        *self.slot_mut(prop) = Some(value.into());
    }

    pub fn unset(&mut self, prop: StyleProperty) {
        *self.slot_mut(prop) = None;
    }

    /// Builder-style setter.
    pub fn with(mut self, prop: StyleProperty, value: impl Into<String>) -> Self {
        self.set(prop, value);
        self
    }

    /// Look up by stored key, including unknown properties.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        match StyleProperty::from_key(key) {
            Some(prop) => self.get(prop),
            None => self.extra.get(key).map(String::as_str),
        }
    }

    /// Set by stored key, routing unknown keys into `extra`.
    pub fn set_key(&mut self, key: &str, value: impl Into<String>) {
        match StyleProperty::from_key(key) {
            Some(prop) => self.set(prop, value),
            None => {
                self.extra.insert(key.to_string(), value.into());
            }
        }
    }

    /// Copy every property set in `over` onto `self`.
    pub fn apply(&mut self, over: &Styles) {
        for prop in StyleProperty::ALL {
            if let Some(value) = over.get(prop) {
                self.set(prop, value);
            }
        }
        for (key, value) in &over.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// `self` with `over` layered on top; `over` wins per property.
    pub fn merged(&self, over: &Styles) -> Styles {
        let mut merged = self.clone();
        merged.apply(over);
        merged
    }

    pub fn is_empty(&self) -> bool {
        StyleProperty::ALL.iter().all(|prop| self.get(*prop).is_none()) && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_override_wins() {
        let base = Styles::new()
            .with(StyleProperty::Background, "blue")
            .with(StyleProperty::Color, "black")
            .with(StyleProperty::Width, "160px");
        let over = Styles::new().with(StyleProperty::Color, "red");

        let merged = base.merged(&over);
        assert_eq!(merged.get(StyleProperty::Background), Some("blue"));
        assert_eq!(merged.get(StyleProperty::Color), Some("red"));
        assert_eq!(merged.get(StyleProperty::Width), Some("160px"));
    }

    #[test]
    fn test_empty_value_is_not_emitted() {
        let styles = Styles::new().with(StyleProperty::BoxShadow, "");
        assert_eq!(styles.get(StyleProperty::BoxShadow), Some(""));
        assert_eq!(styles.value(StyleProperty::BoxShadow), None);
        assert!(!styles.is_empty());
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let json = r#"{"width":"10px","fontSize":"16px","textAlign":"center"}"#;
        let styles: Styles = serde_json::from_str(json).unwrap();
        assert_eq!(styles.get(StyleProperty::FontSize), Some("16px"));
        assert_eq!(styles.get_key("textAlign"), Some("center"));

        let back = serde_json::to_value(&styles).unwrap();
        assert_eq!(back["textAlign"], "center");
        assert_eq!(back["fontSize"], "16px");
        assert!(back.get("height").is_none());
    }

    #[test]
    fn test_set_key_routes_known_properties() {
        let mut styles = Styles::new();
        styles.set_key("borderRadius", "4px");
        styles.set_key("letterSpacing", "1px");
        assert_eq!(styles.border_radius.as_deref(), Some("4px"));
        assert_eq!(styles.extra.get("letterSpacing").map(String::as_str), Some("1px"));
    }
}
