//! Responsive breakpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed viewport classes.
///
/// `Desktop` is canonical: base positions and styles are stored for it, and
/// every other breakpoint is either scaled from it or explicitly overridden.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Laptop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Desktop,
        Breakpoint::Laptop,
        Breakpoint::Tablet,
        Breakpoint::Mobile,
    ];

    /// Breakpoints that may carry overrides, in media-query emission order.
    pub const OVERRIDABLE: [Breakpoint; 3] =
        [Breakpoint::Laptop, Breakpoint::Tablet, Breakpoint::Mobile];

    /// Stable key used in stored projects.
    pub fn key(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Laptop => "laptop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "Desktop",
            Breakpoint::Laptop => "Laptop",
            Breakpoint::Tablet => "Tablet",
            Breakpoint::Mobile => "Mobile",
        }
    }

    /// Width of the editor canvas when previewing this breakpoint.
    ///
    /// This is also the design width used to turn pixels into percentages
    /// on export.
    pub fn preview_width(self) -> f64 {
        match self {
            Breakpoint::Desktop => 1280.0,
            Breakpoint::Laptop => 1024.0,
            Breakpoint::Tablet => 768.0,
            Breakpoint::Mobile => 414.0,
        }
    }

    /// `max-width` of the media query, `None` for desktop.
    pub fn max_width(self) -> Option<u32> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Laptop => Some(1024),
            Breakpoint::Tablet => Some(768),
            Breakpoint::Mobile => Some(480),
        }
    }

    /// Horizontal scale relative to desktop.
    pub fn scale(self) -> f64 {
        self.preview_width() / Breakpoint::Desktop.preview_width()
    }

    pub fn is_desktop(self) -> bool {
        self == Breakpoint::Desktop
    }

    /// Cycle to the next narrower breakpoint (wrapping to desktop).
    pub fn next(self) -> Self {
        match self {
            Breakpoint::Desktop => Breakpoint::Laptop,
            Breakpoint::Laptop => Breakpoint::Tablet,
            Breakpoint::Tablet => Breakpoint::Mobile,
            Breakpoint::Mobile => Breakpoint::Desktop,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
