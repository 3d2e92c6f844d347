//! Media query parsing
//!
//! Turns media query list text into a structured [`MediaQuerySet`]:
//!
//! ```text
//! screen and (min-width: 400px), print
//! └─┬──┘     └────────┬───────┘  └─┬─┘
//!  type         expression       second query
//! ```
//!
//! Parsing is forgiving in the CSS manner. A malformed query never aborts
//! the list; it is replaced by the always-false query `not all`, and every
//! comma opens a fresh query. Evaluation against an environment is out of
//! scope here; callers inspect the parsed structure themselves.
//!
//! ```
//! use fastlayout::style::media::MediaQuerySet;
//!
//! let set = MediaQuerySet::parse("screen and (min-width: 400px), print");
//! assert_eq!(set.queries.len(), 2);
//! assert_eq!(set.queries[0].media_type, "screen");
//! assert_eq!(set.to_string(), "screen and (min-width: 400px), print");
//! ```
//!
//! Reference: Media Queries Level 3 <https://www.w3.org/TR/css3-mediaqueries/>

mod features;
mod parser;
mod tokenizer;

use std::fmt;

pub use features::{feature_requirement, is_known_dimension_unit, ResolutionUnit, ValueRequirement};
pub use parser::{MediaQueryParser, ParserState};
pub use tokenizer::{MediaQueryToken, MediaQueryTokenizer, NumericValueType};

use crate::style::values::{Length, LengthUnit};
use features::allows_boolean_form;

/// The optional qualifier in front of a query's media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restrictor {
    #[default]
    None,
    Not,
    Only,
}

/// A single parsed media query
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub restrictor: Restrictor,
    /// Lowercased media type; `all` when the query had none
    pub media_type: String,
    pub expressions: Vec<MediaFeatureExpression>,
}

impl MediaQuery {
    pub fn new(
        restrictor: Restrictor,
        media_type: String,
        expressions: Vec<MediaFeatureExpression>,
    ) -> Self {
        Self {
            restrictor,
            media_type,
            expressions,
        }
    }

    /// The always-false query that malformed input collapses to
    pub fn not_all() -> Self {
        Self {
            restrictor: Restrictor::Not,
            media_type: "all".to_string(),
            expressions: Vec::new(),
        }
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.restrictor {
            Restrictor::None => "",
            Restrictor::Not => "not ",
            Restrictor::Only => "only ",
        };
        if self.expressions.is_empty() {
            return write!(f, "{}{}", prefix, self.media_type);
        }
        let mut need_separator = false;
        if self.media_type != "all" || self.restrictor != Restrictor::None {
            write!(f, "{}{}", prefix, self.media_type)?;
            need_separator = true;
        }
        for expression in &self.expressions {
            if need_separator {
                write!(f, " and ")?;
            }
            write!(f, "{}", expression)?;
            need_separator = true;
        }
        Ok(())
    }
}

/// A parsed media query list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaQuerySet {
    pub queries: Vec<MediaQuery>,
}

impl MediaQuerySet {
    pub fn new(queries: Vec<MediaQuery>) -> Self {
        Self { queries }
    }

    /// Parses a comma-separated media query list
    ///
    /// Never fails; see the module docs for how malformed input degrades.
    pub fn parse(text: &str) -> Self {
        MediaQueryParser::parse(text)
    }
}

impl fmt::Display for MediaQuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, query) in self.queries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", query)?;
        }
        Ok(())
    }
}

/// One `(feature: value)` or `(feature)` term of a media query
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeatureExpression {
    /// Lowercased feature name
    pub name: String,
    /// Absent for the boolean form `(feature)`
    pub value: Option<MediaFeatureValue>,
}

impl MediaFeatureExpression {
    /// Validates a feature name against its collected value tokens
    ///
    /// Returns `None` when the feature is unknown, when the value's shape
    /// does not match what the feature accepts, or when a range-prefixed
    /// feature (`min-*` / `max-*`) has no value at all.
    pub fn create_if_valid(name: &str, values: &[MediaQueryToken]) -> Option<Self> {
        let requirement = feature_requirement(name)?;
        if values.is_empty() {
            if allows_boolean_form(name) {
                return Some(Self {
                    name: name.to_string(),
                    value: None,
                });
            }
            return None;
        }
        let value = MediaFeatureValue::from_tokens(requirement, values)?;
        Some(Self {
            name: name.to_string(),
            value: Some(value),
        })
    }
}

impl fmt::Display for MediaFeatureExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({}: {})", self.name, value),
            None => write!(f, "({})", self.name),
        }
    }
}

/// A validated media feature value
#[derive(Debug, Clone, PartialEq)]
pub enum MediaFeatureValue {
    Number { value: f64, integer: bool },
    Length(Length),
    Resolution { value: f32, unit: ResolutionUnit },
    Ratio { numerator: u32, denominator: u32 },
    Ident(String),
}

impl MediaFeatureValue {
    fn from_tokens(requirement: ValueRequirement, values: &[MediaQueryToken]) -> Option<Self> {
        match requirement {
            ValueRequirement::Length => match values {
                [MediaQueryToken::Dimension { value, unit, .. }] => {
                    let unit = LengthUnit::parse(unit)?;
                    if *value < 0.0 {
                        return None;
                    }
                    Some(Self::Length(Length::new(*value as f32, unit)))
                }
                // Zero is the one length that may omit its unit
                [MediaQueryToken::Number { value, .. }] if *value == 0.0 => {
                    Some(Self::Length(Length::px(0.0)))
                }
                _ => None,
            },
            ValueRequirement::Integer => match values {
                [MediaQueryToken::Number { value, value_type }]
                    if *value_type == NumericValueType::Integer && *value >= 0.0 =>
                {
                    Some(Self::Number {
                        value: *value,
                        integer: true,
                    })
                }
                _ => None,
            },
            ValueRequirement::Ratio => match values {
                [numerator, MediaQueryToken::Delim('/'), denominator] => {
                    Some(Self::Ratio {
                        numerator: ratio_component(numerator)?,
                        denominator: ratio_component(denominator)?,
                    })
                }
                _ => None,
            },
            ValueRequirement::Ident => match values {
                [MediaQueryToken::Ident(name)] => Some(Self::Ident(name.to_ascii_lowercase())),
                _ => None,
            },
            ValueRequirement::Resolution => match values {
                [MediaQueryToken::Dimension { value, unit, .. }] if *value > 0.0 => {
                    Some(Self::Resolution {
                        value: *value as f32,
                        unit: ResolutionUnit::parse(unit)?,
                    })
                }
                _ => None,
            },
        }
    }
}

/// A ratio component is a positive integer token
fn ratio_component(token: &MediaQueryToken) -> Option<u32> {
    match token {
        MediaQueryToken::Number { value, value_type }
            if *value_type == NumericValueType::Integer
                && *value > 0.0
                && value.fract() == 0.0
                && *value <= u32::MAX as f64 =>
        {
            Some(*value as u32)
        }
        _ => None,
    }
}

impl fmt::Display for MediaFeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{}", value),
            Self::Length(length) => write!(f, "{}", length),
            Self::Resolution { value, unit } => write!(f, "{}{}", value, unit.as_str()),
            Self::Ratio {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
            Self::Ident(name) => write!(f, "{}", name),
        }
    }
}
