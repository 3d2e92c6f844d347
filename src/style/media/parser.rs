//! Media query list parser
//!
//! A state machine driven one token at a time. Each comma at the top level
//! finishes a query and starts the next, so errors stay local: a malformed
//! query becomes `not all` and parsing resumes after the comma. Unmatched
//! parentheses and functions are skipped with a block-nesting counter so a
//! stray comma inside a block never splits the query.

use log::debug;

use super::tokenizer::{MediaQueryToken, MediaQueryTokenizer};
use super::{MediaFeatureExpression, MediaQuery, MediaQuerySet, Restrictor};
use crate::style::media::features::is_known_dimension_unit;

/// Parser states, one per syntactic position in a query
///
/// `ReadRestrictor` and `ReadMediaType` share their transition logic; the
/// distinction is only whether a `not` / `only` keyword may still appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    ReadRestrictor,
    ReadMediaType,
    ReadAnd,
    ReadFeatureStart,
    ReadFeature,
    ReadFeatureColon,
    ReadFeatureValue,
    ReadFeatureEnd,
    SkipUntilComma,
    SkipUntilParenthesis,
    Done,
}

/// Accumulates one query's worth of parsed pieces
#[derive(Default)]
struct MediaQueryData {
    restrictor: Restrictor,
    media_type: Option<String>,
    feature_name: String,
    value_list: Vec<MediaQueryToken>,
    expressions: Vec<MediaFeatureExpression>,
}

impl MediaQueryData {
    /// Validates the pending feature and its value tokens
    ///
    /// Consumes the pending name and values either way; returns whether the
    /// expression was valid.
    fn add_expression(&mut self) -> bool {
        let name = std::mem::take(&mut self.feature_name);
        let values = std::mem::take(&mut self.value_list);
        match MediaFeatureExpression::create_if_valid(&name, &values) {
            Some(expression) => {
                self.expressions.push(expression);
                true
            }
            None => false,
        }
    }

    /// Finishes the current query and resets for the next one
    fn take(&mut self) -> MediaQuery {
        let restrictor = std::mem::replace(&mut self.restrictor, Restrictor::None);
        let media_type = self.media_type.take().unwrap_or_else(|| "all".to_string());
        let expressions = std::mem::take(&mut self.expressions);
        self.feature_name.clear();
        self.value_list.clear();
        MediaQuery::new(restrictor, media_type, expressions)
    }

    fn clear(&mut self) {
        self.restrictor = Restrictor::None;
        self.media_type = None;
        self.feature_name.clear();
        self.value_list.clear();
        self.expressions.clear();
    }

    /// Whether any piece of a query has accumulated since the last reset
    fn has_content(&self) -> bool {
        self.restrictor != Restrictor::None
            || self.media_type.is_some()
            || !self.expressions.is_empty()
    }
}

pub struct MediaQueryParser {
    state: ParserState,
    data: MediaQueryData,
    queries: Vec<MediaQuery>,
    block_level: u32,
}

impl MediaQueryParser {
    fn new() -> Self {
        Self {
            state: ParserState::ReadRestrictor,
            data: MediaQueryData::default(),
            queries: Vec::new(),
            block_level: 0,
        }
    }

    /// Parses a media query list; never fails
    pub fn parse(text: &str) -> MediaQuerySet {
        let mut parser = Self::new();
        for token in MediaQueryTokenizer::tokenize(text) {
            parser.process_token(&token);
        }
        let set = parser.finish();
        debug!("parsed {} media queries from {} bytes", set.queries.len(), text.len());
        set
    }

    fn process_token(&mut self, token: &MediaQueryToken) {
        self.handle_blocks(token);
        self.update_block_level(token);
        if *token != MediaQueryToken::Whitespace {
            self.dispatch(token);
        }
    }

    /// A top-level `(` is query syntax; any other block start is an
    /// unsupported construct and the rest of the query is skipped
    fn handle_blocks(&mut self, token: &MediaQueryToken) {
        if token.is_block_start() && !(*token == MediaQueryToken::LeftParen && self.block_level == 0)
        {
            self.state = ParserState::SkipUntilParenthesis;
        }
    }

    fn update_block_level(&mut self, token: &MediaQueryToken) {
        if token.is_block_start() {
            self.block_level += 1;
        } else if token.is_block_end() {
            self.block_level = self.block_level.saturating_sub(1);
        }
    }

    fn dispatch(&mut self, token: &MediaQueryToken) {
        match self.state {
            ParserState::ReadRestrictor | ParserState::ReadMediaType => {
                self.read_restrictor_or_media_type(token)
            }
            ParserState::ReadAnd => self.read_and(token),
            ParserState::ReadFeatureStart => self.read_feature_start(token),
            ParserState::ReadFeature => self.read_feature(token),
            ParserState::ReadFeatureColon => self.read_feature_colon(token),
            ParserState::ReadFeatureValue => self.read_feature_value(token),
            ParserState::ReadFeatureEnd => self.read_feature_end(token),
            ParserState::SkipUntilComma => self.skip_until_comma(token),
            ParserState::SkipUntilParenthesis => self.skip_until_parenthesis(token),
            ParserState::Done => {}
        }
    }

    /// Enters comma recovery and lets the current token participate, so a
    /// comma that itself triggered the error still terminates the query
    fn skip_to_comma(&mut self, token: &MediaQueryToken) {
        self.state = ParserState::SkipUntilComma;
        self.skip_until_comma(token);
    }

    fn read_restrictor_or_media_type(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::LeftParen => self.state = ParserState::ReadFeature,
            MediaQueryToken::Ident(name) => {
                if self.state == ParserState::ReadRestrictor && name.eq_ignore_ascii_case("not") {
                    self.data.restrictor = Restrictor::Not;
                    self.state = ParserState::ReadMediaType;
                } else if self.state == ParserState::ReadRestrictor
                    && name.eq_ignore_ascii_case("only")
                {
                    self.data.restrictor = Restrictor::Only;
                    self.state = ParserState::ReadMediaType;
                } else if self.data.restrictor != Restrictor::None
                    && is_restrictor_or_logical_operator(name)
                {
                    // "not only", "only and" and the like
                    self.skip_to_comma(token);
                } else {
                    self.data.media_type = Some(name.to_ascii_lowercase());
                    self.state = ParserState::ReadAnd;
                }
            }
            MediaQueryToken::Eof
                if self.queries.is_empty() || self.state != ParserState::ReadRestrictor =>
            {
                self.state = ParserState::Done;
            }
            _ => self.skip_to_comma(token),
        }
    }

    fn read_and(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::Ident(name) if name.eq_ignore_ascii_case("and") => {
                self.state = ParserState::ReadFeatureStart;
            }
            MediaQueryToken::Comma if self.block_level == 0 => {
                let query = self.data.take();
                self.queries.push(query);
                self.state = ParserState::ReadRestrictor;
            }
            MediaQueryToken::Eof => self.state = ParserState::Done,
            _ => self.skip_to_comma(token),
        }
    }

    fn read_feature_start(&mut self, token: &MediaQueryToken) {
        if *token == MediaQueryToken::LeftParen {
            self.state = ParserState::ReadFeature;
        } else {
            self.skip_to_comma(token);
        }
    }

    fn read_feature(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::Ident(name) => {
                self.data.feature_name = name.to_ascii_lowercase();
                self.state = ParserState::ReadFeatureColon;
            }
            _ => self.skip_to_comma(token),
        }
    }

    fn read_feature_colon(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::Colon => self.state = ParserState::ReadFeatureValue,
            // Boolean form: the feature closes with no value
            MediaQueryToken::RightParen | MediaQueryToken::Eof => self.read_feature_end(token),
            _ => self.state = ParserState::SkipUntilParenthesis,
        }
    }

    fn read_feature_value(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::Dimension { unit, .. } if !is_known_dimension_unit(unit) => {
                self.skip_to_comma(token);
            }
            _ => {
                self.data.value_list.push(token.clone());
                self.state = ParserState::ReadFeatureEnd;
            }
        }
    }

    fn read_feature_end(&mut self, token: &MediaQueryToken) {
        match token {
            MediaQueryToken::RightParen => {
                if self.data.add_expression() {
                    self.state = ParserState::ReadAnd;
                } else {
                    self.skip_to_comma(token);
                }
            }
            // An expression is only complete once its parenthesis closes
            MediaQueryToken::Eof => self.skip_to_comma(token),
            MediaQueryToken::Delim('/') => {
                self.data.value_list.push(token.clone());
                self.state = ParserState::ReadFeatureValue;
            }
            _ => self.state = ParserState::SkipUntilParenthesis,
        }
    }

    fn skip_until_comma(&mut self, token: &MediaQueryToken) {
        let top_level_comma = *token == MediaQueryToken::Comma && self.block_level == 0;
        if top_level_comma || *token == MediaQueryToken::Eof {
            self.queries.push(MediaQuery::not_all());
            self.data.clear();
            self.state = ParserState::ReadRestrictor;
        }
    }

    fn skip_until_parenthesis(&mut self, token: &MediaQueryToken) {
        // The block counter has already seen this token, so level zero
        // means this parenthesis closed the skipped block
        if *token == MediaQueryToken::RightParen && self.block_level == 0 {
            self.state = ParserState::SkipUntilComma;
        }
    }

    /// Flushes whatever the final token left behind
    fn finish(mut self) -> MediaQuerySet {
        let terminal = matches!(
            self.state,
            ParserState::ReadAnd | ParserState::ReadRestrictor | ParserState::Done
        );
        if !terminal {
            self.queries.push(MediaQuery::not_all());
        } else if self.data.has_content() {
            let query = self.data.take();
            self.queries.push(query);
        }
        MediaQuerySet::new(self.queries)
    }
}

/// Keywords that cannot serve as a media type
fn is_restrictor_or_logical_operator(name: &str) -> bool {
    name.eq_ignore_ascii_case("not")
        || name.eq_ignore_ascii_case("only")
        || name.eq_ignore_ascii_case("and")
        || name.eq_ignore_ascii_case("or")
}
