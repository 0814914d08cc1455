//! Effective layout of an element at a breakpoint.

use crate::breakpoint::Breakpoint;
use crate::element::Element;
use crate::style::{StyleProperty, Styles};
use crate::units::{px, px_value};
use kurbo::{Point, Rect, Size};

/// Position and styles actually in effect at one breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveLayout {
    pub position: Point,
    pub styles: Styles,
}

impl EffectiveLayout {
    /// Pixel width, if the width is pixel-valued.
    pub fn width_px(&self) -> Option<f64> {
        self.styles.get(StyleProperty::Width).and_then(px_value)
    }

    /// Pixel height, if the height is pixel-valued.
    pub fn height_px(&self) -> Option<f64> {
        self.styles.get(StyleProperty::Height).and_then(px_value)
    }

    /// Pixel size, using `fallback` per axis for non-pixel values.
    pub fn size_or(&self, fallback: Size) -> Size {
        Size::new(
            self.width_px().unwrap_or(fallback.width),
            self.height_px().unwrap_or(fallback.height),
        )
    }

    /// Bounding rectangle, using `fallback` per axis for non-pixel sizes.
    pub fn rect_or(&self, fallback: Size) -> Rect {
        Rect::from_origin_size(self.position, self.size_or(fallback))
    }
}

/// Compute the layout of `element` at `breakpoint`.
///
/// - Desktop returns the base position and styles.
/// - Without an override, x and pixel widths scale with the breakpoint's
///   preview width; y never scales.
/// - With an override, its styles win per property over the base styles
///   and its position (if any) replaces the base position, unscaled.
///
/// Call this on every pass; results are not cached.
pub fn resolve(element: &Element, breakpoint: Breakpoint) -> EffectiveLayout {
    if breakpoint.is_desktop() {
        return EffectiveLayout {
            position: element.position,
            styles: element.styles.clone(),
        };
    }

    match element.responsive.get(breakpoint) {
        None => {
            let scale = breakpoint.scale();
            let mut styles = element.styles.clone();
            if let Some(width) = styles.get(StyleProperty::Width).and_then(px_value) {
                styles.set(StyleProperty::Width, px(width * scale));
            }
            EffectiveLayout {
                position: Point::new(element.position.x * scale, element.position.y),
                styles,
            }
        }
        Some(over) => EffectiveLayout {
            position: over.position.unwrap_or(element.position),
            styles: element.styles.merged(&over.styles),
        },
    }
}
