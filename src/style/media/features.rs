//! Known media feature names and the value shapes they accept
//!
//! Feature lookup is a binary search over a sorted static table, so the
//! set of recognized features is fixed at compile time and lookup does no
//! allocation. Unknown feature names make the whole query invalid, which
//! the parser turns into `not all`.

use crate::style::values::LengthUnit;

/// The kind of value a media feature accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRequirement {
    /// A non-negative length, e.g. `min-width: 400px`
    Length,
    /// A non-negative integer, e.g. `color: 8`
    Integer,
    /// Two positive integers separated by `/`, e.g. `aspect-ratio: 16/9`
    Ratio,
    /// A keyword, e.g. `orientation: landscape`
    Ident,
    /// A positive resolution, e.g. `min-resolution: 2dppx`
    Resolution,
}

/// Recognized feature names, sorted by name for binary search
static FEATURES: &[(&str, ValueRequirement)] = &[
    ("any-hover", ValueRequirement::Ident),
    ("any-pointer", ValueRequirement::Ident),
    ("aspect-ratio", ValueRequirement::Ratio),
    ("color", ValueRequirement::Integer),
    ("color-index", ValueRequirement::Integer),
    ("device-aspect-ratio", ValueRequirement::Ratio),
    ("device-height", ValueRequirement::Length),
    ("device-width", ValueRequirement::Length),
    ("display-mode", ValueRequirement::Ident),
    ("grid", ValueRequirement::Integer),
    ("height", ValueRequirement::Length),
    ("hover", ValueRequirement::Ident),
    ("max-aspect-ratio", ValueRequirement::Ratio),
    ("max-color", ValueRequirement::Integer),
    ("max-color-index", ValueRequirement::Integer),
    ("max-device-aspect-ratio", ValueRequirement::Ratio),
    ("max-device-height", ValueRequirement::Length),
    ("max-device-width", ValueRequirement::Length),
    ("max-height", ValueRequirement::Length),
    ("max-monochrome", ValueRequirement::Integer),
    ("max-resolution", ValueRequirement::Resolution),
    ("max-width", ValueRequirement::Length),
    ("min-aspect-ratio", ValueRequirement::Ratio),
    ("min-color", ValueRequirement::Integer),
    ("min-color-index", ValueRequirement::Integer),
    ("min-device-aspect-ratio", ValueRequirement::Ratio),
    ("min-device-height", ValueRequirement::Length),
    ("min-device-width", ValueRequirement::Length),
    ("min-height", ValueRequirement::Length),
    ("min-monochrome", ValueRequirement::Integer),
    ("min-resolution", ValueRequirement::Resolution),
    ("min-width", ValueRequirement::Length),
    ("monochrome", ValueRequirement::Integer),
    ("orientation", ValueRequirement::Ident),
    ("pointer", ValueRequirement::Ident),
    ("prefers-color-scheme", ValueRequirement::Ident),
    ("prefers-contrast", ValueRequirement::Ident),
    ("prefers-reduced-motion", ValueRequirement::Ident),
    ("resolution", ValueRequirement::Resolution),
    ("scan", ValueRequirement::Ident),
    ("width", ValueRequirement::Length),
];

/// Looks up the value requirement for a feature name
///
/// The name must already be lowercased; feature names are ASCII
/// case-insensitive and the parser lowercases them on the way in.
pub fn feature_requirement(name: &str) -> Option<ValueRequirement> {
    FEATURES
        .binary_search_by(|(feature, _)| (*feature).cmp(name))
        .ok()
        .map(|index| FEATURES[index].1)
}

/// Whether a feature may appear without a value, e.g. `(color)`
///
/// Range-prefixed features compare against a threshold and are meaningless
/// without one.
pub fn allows_boolean_form(name: &str) -> bool {
    !name.starts_with("min-") && !name.starts_with("max-")
}

/// Resolution units accepted in media feature values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionUnit {
    Dpi,
    Dpcm,
    Dppx,
}

impl ResolutionUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        if unit.eq_ignore_ascii_case("dpi") {
            Some(Self::Dpi)
        } else if unit.eq_ignore_ascii_case("dpcm") {
            Some(Self::Dpcm)
        } else if unit.eq_ignore_ascii_case("dppx") {
            Some(Self::Dppx)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dpi => "dpi",
            Self::Dpcm => "dpcm",
            Self::Dppx => "dppx",
        }
    }
}

/// Whether a dimension unit is meaningful in a media feature value
///
/// Covers length units and resolution units. Dimensions carrying anything
/// else invalidate the query.
pub fn is_known_dimension_unit(unit: &str) -> bool {
    LengthUnit::parse(unit).is_some() || ResolutionUnit::parse(unit).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_table_is_sorted() {
        for pair in FEATURES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_lookup_known_features() {
        assert_eq!(feature_requirement("min-width"), Some(ValueRequirement::Length));
        assert_eq!(feature_requirement("aspect-ratio"), Some(ValueRequirement::Ratio));
        assert_eq!(feature_requirement("color"), Some(ValueRequirement::Integer));
        assert_eq!(feature_requirement("orientation"), Some(ValueRequirement::Ident));
        assert_eq!(
            feature_requirement("min-resolution"),
            Some(ValueRequirement::Resolution)
        );
    }

    #[test]
    fn test_lookup_unknown_feature() {
        assert_eq!(feature_requirement("frobnication"), None);
    }

    #[test]
    fn test_boolean_form() {
        assert!(allows_boolean_form("color"));
        assert!(allows_boolean_form("width"));
        assert!(!allows_boolean_form("min-width"));
        assert!(!allows_boolean_form("max-color-index"));
    }

    #[test]
    fn test_resolution_units() {
        assert_eq!(ResolutionUnit::parse("dppx"), Some(ResolutionUnit::Dppx));
        assert_eq!(ResolutionUnit::parse("DPI"), Some(ResolutionUnit::Dpi));
        assert_eq!(ResolutionUnit::parse("px"), None);
        assert_eq!(ResolutionUnit::Dpcm.as_str(), "dpcm");
    }

    #[test]
    fn test_known_dimension_units() {
        assert!(is_known_dimension_unit("px"));
        assert!(is_known_dimension_unit("em"));
        assert!(is_known_dimension_unit("dpi"));
        assert!(!is_known_dimension_unit("frobs"));
    }
}
