//! Unit-aware style values (`16px`, `50%`, `2rem`, `auto`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Units the editor knows how to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "rem")]
    Rem,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "vw")]
    Vw,
    #[serde(rename = "vh")]
    Vh,
    #[serde(rename = "auto")]
    Auto,
}

impl Unit {
    /// All units, in the order the property panel lists them.
    pub const ALL: [Unit; 7] = [
        Unit::Px,
        Unit::Percent,
        Unit::Rem,
        Unit::Em,
        Unit::Vw,
        Unit::Vh,
        Unit::Auto,
    ];

    /// The CSS suffix for this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::Auto => "auto",
        }
    }

    /// Look up a unit by its suffix (case-insensitive).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(suffix))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed style value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SizeValue {
    /// No value set.
    #[default]
    Empty,
    /// The `auto` keyword.
    Auto,
    /// A number with a unit.
    Length { number: f64, unit: Unit },
    /// Text that could not be parsed, kept verbatim.
    Raw { text: String, unit: Unit },
}

impl SizeValue {
    /// Parse with `px` as the unit for bare numbers and unparseable text.
    pub fn parse(value: &str) -> Self {
        Self::parse_with_default(value, Unit::Px)
    }

    /// Parse, tagging bare numbers and unparseable text with `default_unit`.
    pub fn parse_with_default(value: &str, default_unit: Unit) -> Self {
        if value.is_empty() {
            return SizeValue::Empty;
        }
        if value == "auto" {
            return SizeValue::Auto;
        }

        let trimmed = value.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic() || c == '%')
            .unwrap_or(trimmed.len());
        let (number_part, suffix) = trimmed.split_at(split);

        let number = match parse_number(number_part) {
            Some(n) => n,
            None => return Self::raw(value, default_unit),
        };

        if suffix.is_empty() {
            return SizeValue::Length { number, unit: default_unit };
        }
        match Unit::from_suffix(suffix) {
            Some(Unit::Auto) | None => Self::raw(value, default_unit),
            Some(unit) => SizeValue::Length { number, unit },
        }
    }

    fn raw(value: &str, unit: Unit) -> Self {
        SizeValue::Raw {
            text: value.to_string(),
            unit,
        }
    }

    /// The unit tag shown for this value.
    pub fn unit(&self) -> Unit {
        match self {
            SizeValue::Empty => Unit::Px,
            SizeValue::Auto => Unit::Auto,
            SizeValue::Length { unit, .. } | SizeValue::Raw { unit, .. } => *unit,
        }
    }

    /// The numeric part, if any.
    pub fn number(&self) -> Option<f64> {
        match self {
            SizeValue::Length { number, .. } => Some(*number),
            _ => None,
        }
    }

    /// Switch units. Numbers are preserved, leaving `auto` seeds `0`.
    pub fn with_unit(&self, unit: Unit) -> Self {
        if unit == Unit::Auto {
            return SizeValue::Auto;
        }
        match self {
            SizeValue::Auto => SizeValue::Length { number: 0.0, unit },
            SizeValue::Length { number, .. } => SizeValue::Length {
                number: *number,
                unit,
            },
            SizeValue::Empty => SizeValue::Empty,
            SizeValue::Raw { text, .. } => SizeValue::Raw {
                text: text.clone(),
                unit,
            },
        }
    }

    /// Replace the number, keeping the unit. `auto` stays `auto`.
    pub fn with_number(&self, number: f64) -> Self {
        match self {
            SizeValue::Auto => SizeValue::Auto,
            other => SizeValue::Length {
                number,
                unit: other.unit(),
            },
        }
    }

    /// Whether this value is strictly pixel-valued.
    pub fn is_px(&self) -> bool {
        matches!(self, SizeValue::Length { unit: Unit::Px, .. })
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeValue::Empty => Ok(()),
            SizeValue::Auto => f.write_str("auto"),
            SizeValue::Length { number, unit } => write!(f, "{}{}", number, unit),
            SizeValue::Raw { text, .. } => f.write_str(text),
        }
    }
}

impl From<&str> for SizeValue {
    fn from(value: &str) -> Self {
        SizeValue::parse(value)
    }
}

/// Format a pixel length the way the editor stores it (`"160px"`).
pub fn px(number: f64) -> String {
    SizeValue::Length {
        number,
        unit: Unit::Px,
    }
    .to_string()
}

/// The number of a strictly pixel-valued string (`"160px"` → `160.0`).
///
/// Anything else, including bare numbers and `auto`, yields `None`.
pub fn px_value(value: &str) -> Option<f64> {
    value.strip_suffix("px").and_then(parse_number)
}

/// Parse `-?\d*\.?\d+`.
fn parse_number(s: &str) -> Option<f64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let valid = match frac_part {
        Some(frac) => all_digits(int_part) && !frac.is_empty() && all_digits(frac),
        None => !int_part.is_empty() && all_digits(int_part),
    };
    if !valid {
        return None;
    }
    s.parse().ok()
}
