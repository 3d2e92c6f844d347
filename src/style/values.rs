//! Core CSS value types
//!
//! This module provides the fundamental value types used throughout style
//! and layout: lengths with units, and length-or-auto values for properties
//! that accept the `auto` keyword.
//!
//! Lengths are stored as a numeric value plus a unit. Absolute units convert
//! to pixels directly; percentages resolve against a base supplied by the
//! caller. Font-relative and viewport-relative units are recognized (the
//! media query grammar accepts them) but layout in this crate only resolves
//! absolute and percentage units.

use std::fmt;

/// A CSS length unit
///
/// # Examples
///
/// ```
/// use fastlayout::LengthUnit;
///
/// assert!(LengthUnit::Px.is_absolute());
/// assert!(LengthUnit::Percent.is_percentage());
/// assert_eq!(LengthUnit::parse("vmin"), Some(LengthUnit::Vmin));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Pixels (1px = 1/96 inch)
    Px,
    /// Points (1pt = 1/72 inch)
    Pt,
    /// Picas (1pc = 12pt)
    Pc,
    /// Inches
    In,
    /// Centimeters
    Cm,
    /// Millimeters
    Mm,
    /// Quarter-millimeters
    Q,
    /// Relative to the element's font size
    Em,
    /// Relative to the root element's font size
    Rem,
    /// Relative to the x-height of the element's font
    Ex,
    /// Relative to the advance width of the "0" glyph
    Ch,
    /// 1% of the viewport width
    Vw,
    /// 1% of the viewport height
    Vh,
    /// 1% of the smaller viewport dimension
    Vmin,
    /// 1% of the larger viewport dimension
    Vmax,
    /// Percentage of some base determined by context
    Percent,
}

impl LengthUnit {
    /// Returns true if this unit converts to pixels without any context
    pub fn is_absolute(self) -> bool {
        matches!(
            self,
            Self::Px | Self::Pt | Self::Pc | Self::In | Self::Cm | Self::Mm | Self::Q
        )
    }

    /// Returns true if this unit is relative to font metrics
    pub fn is_font_relative(self) -> bool {
        matches!(self, Self::Em | Self::Rem | Self::Ex | Self::Ch)
    }

    /// Returns true if this unit is relative to the viewport size
    pub fn is_viewport_relative(self) -> bool {
        matches!(self, Self::Vw | Self::Vh | Self::Vmin | Self::Vmax)
    }

    /// Returns true if this unit is a percentage
    pub fn is_percentage(self) -> bool {
        matches!(self, Self::Percent)
    }

    /// Returns the canonical CSS serialization of this unit
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlayout::LengthUnit;
    ///
    /// assert_eq!(LengthUnit::Px.as_str(), "px");
    /// assert_eq!(LengthUnit::Percent.as_str(), "%");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Q => "q",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Ex => "ex",
            Self::Ch => "ch",
            Self::Vw => "vw",
            Self::Vh => "vh",
            Self::Vmin => "vmin",
            Self::Vmax => "vmax",
            Self::Percent => "%",
        }
    }

    /// Parses a unit identifier as written in CSS source
    ///
    /// Matching is ASCII case-insensitive per the CSS syntax rules. `%` is
    /// not matched here: the tokenizer produces percentages as a distinct
    /// token type, never as a dimension unit.
    pub fn parse(ident: &str) -> Option<Self> {
        let unit = match () {
            _ if ident.eq_ignore_ascii_case("px") => Self::Px,
            _ if ident.eq_ignore_ascii_case("pt") => Self::Pt,
            _ if ident.eq_ignore_ascii_case("pc") => Self::Pc,
            _ if ident.eq_ignore_ascii_case("in") => Self::In,
            _ if ident.eq_ignore_ascii_case("cm") => Self::Cm,
            _ if ident.eq_ignore_ascii_case("mm") => Self::Mm,
            _ if ident.eq_ignore_ascii_case("q") => Self::Q,
            _ if ident.eq_ignore_ascii_case("em") => Self::Em,
            _ if ident.eq_ignore_ascii_case("rem") => Self::Rem,
            _ if ident.eq_ignore_ascii_case("ex") => Self::Ex,
            _ if ident.eq_ignore_ascii_case("ch") => Self::Ch,
            _ if ident.eq_ignore_ascii_case("vw") => Self::Vw,
            _ if ident.eq_ignore_ascii_case("vh") => Self::Vh,
            _ if ident.eq_ignore_ascii_case("vmin") => Self::Vmin,
            _ if ident.eq_ignore_ascii_case("vmax") => Self::Vmax,
            _ => return None,
        };
        Some(unit)
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A CSS length value with a specific unit
///
/// Represents a value that may need further resolution depending on
/// context (containing block size for percentages).
///
/// # Examples
///
/// ```
/// use fastlayout::{Length, LengthUnit};
///
/// let length = Length::px(100.0);
/// assert_eq!(length.value, 100.0);
/// assert_eq!(length.unit, LengthUnit::Px);
///
/// let percent = Length::percent(50.0);
/// assert_eq!(percent.resolve_against(200.0), Some(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// The numeric value
    pub value: f32,
    /// The unit
    pub unit: LengthUnit,
}

impl Length {
    /// Creates a new length with the given value and unit
    pub const fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Creates a length in pixels
    pub const fn px(value: f32) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Creates a percentage value
    pub const fn percent(value: f32) -> Self {
        Self::new(value, LengthUnit::Percent)
    }

    /// Converts this length to pixels
    ///
    /// For absolute units, this performs unit conversion. For relative or
    /// percentage units, this is a best-effort fallback that returns the raw
    /// numeric value; use [`Length::resolve_against`] when a percentage base
    /// is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlayout::Length;
    ///
    /// assert_eq!(Length::px(100.0).to_px(), 100.0);
    /// assert_eq!(Length::new(72.0, fastlayout::LengthUnit::Pt).to_px(), 96.0);
    /// ```
    pub fn to_px(self) -> f32 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Pt => self.value * (96.0 / 72.0), // 1pt = 1/72 inch
            LengthUnit::Pc => self.value * 16.0,          // 1pc = 12pt = 16px
            LengthUnit::In => self.value * 96.0,          // 1in = 96px
            LengthUnit::Cm => self.value * 37.795276,     // 1cm = 96px/2.54
            LengthUnit::Mm => self.value * 3.7795276,     // 1mm = 1/10 cm
            LengthUnit::Q => self.value * 0.944882,       // 1Q = 1/4 mm
            _ => self.value,
        }
    }

    /// Resolves this length to pixels using a percentage base
    ///
    /// Returns `None` when the unit cannot be resolved with the provided base
    /// (font-relative and viewport-relative units).
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlayout::Length;
    ///
    /// let length = Length::percent(50.0);
    /// assert_eq!(length.resolve_against(200.0), Some(100.0));
    ///
    /// let px_length = Length::px(100.0);
    /// assert_eq!(px_length.resolve_against(200.0), Some(100.0));
    /// ```
    pub fn resolve_against(self, percentage_base: f32) -> Option<f32> {
        match self.unit {
            LengthUnit::Percent => Some((self.value / 100.0) * percentage_base),
            _ if self.unit.is_absolute() => Some(self.to_px()),
            _ => None,
        }
    }

    /// Returns true if the numeric value is zero
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A length value or the `auto` keyword
///
/// Used for properties like `width` and `height` where `auto` means the
/// used value is computed by the layout algorithm rather than specified.
///
/// # Examples
///
/// ```
/// use fastlayout::LengthOrAuto;
///
/// let auto = LengthOrAuto::Auto;
/// assert!(auto.is_auto());
///
/// let width = LengthOrAuto::px(100.0);
/// assert_eq!(width.resolve_against(200.0), Some(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthOrAuto {
    /// The `auto` keyword
    #[default]
    Auto,
    /// An explicit length
    Length(Length),
}

impl LengthOrAuto {
    /// Creates a pixel length value
    pub const fn px(value: f32) -> Self {
        Self::Length(Length::px(value))
    }

    /// Creates a percentage value
    pub const fn percent(value: f32) -> Self {
        Self::Length(Length::percent(value))
    }

    /// Returns true if this is `auto`
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Returns the inner length, or `None` for `auto`
    pub fn length(self) -> Option<Length> {
        match self {
            Self::Auto => None,
            Self::Length(length) => Some(length),
        }
    }

    /// Resolves to pixels against a percentage base
    ///
    /// Returns `None` for `auto` and for units that need more context.
    pub fn resolve_against(self, percentage_base: f32) -> Option<f32> {
        self.length()?.resolve_against(percentage_base)
    }

    /// Resolves to pixels, substituting `default` when resolution fails
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlayout::LengthOrAuto;
    ///
    /// assert_eq!(LengthOrAuto::px(100.0).resolve_or(50.0, 0.0), 100.0);
    /// assert_eq!(LengthOrAuto::Auto.resolve_or(50.0, 0.0), 50.0);
    /// ```
    pub fn resolve_or(self, default: f32, percentage_base: f32) -> f32 {
        self.resolve_against(percentage_base).unwrap_or(default)
    }
}

impl From<Length> for LengthOrAuto {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl fmt::Display for LengthOrAuto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Length(length) => write!(f, "{}", length),
        }
    }
}
