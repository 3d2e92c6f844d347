//! Media query tokenizer
//!
//! A single-pass lexer over the text of a media query list. Each call to
//! [`MediaQueryTokenizer::next_token`] consumes one token; the stream ends
//! with [`MediaQueryToken::Eof`], after which callers must stop.
//!
//! ASCII code points dispatch through a 128-entry table of handler
//! functions; everything at U+0080 and above is uniformly an identifier
//! start. Tokenization never fails: malformed escapes decode to U+FFFD and
//! anything unclassifiable comes out as a delimiter token.
//!
//! Reference: CSS Syntax Module Level 3
//! <https://www.w3.org/TR/css-syntax-3/#tokenization>

/// Whether a numeric token carried fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericValueType {
    /// No fractional part was present
    Integer,
    /// At least one fractional digit was present
    Number,
}

/// One lexical token of a media query
///
/// # Examples
///
/// ```
/// use fastlayout::style::media::{MediaQueryToken, MediaQueryTokenizer};
///
/// let tokens = MediaQueryTokenizer::tokenize("(min-width: 400px)");
/// assert_eq!(tokens[0], MediaQueryToken::LeftParen);
/// assert_eq!(tokens[1], MediaQueryToken::Ident("min-width".to_string()));
/// assert_eq!(tokens.last(), Some(&MediaQueryToken::Eof));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MediaQueryToken {
    /// An identifier, e.g. `screen`
    Ident(String),
    /// An identifier immediately followed by `(`, e.g. `calc(`
    Function(String),
    /// A code point with no lexical role of its own
    Delim(char),
    /// A number, e.g. `400` or `1.5`
    Number {
        value: f64,
        value_type: NumericValueType,
    },
    /// A number followed by `%`
    Percentage { value: f64 },
    /// A number followed by a unit identifier, e.g. `400px`
    Dimension {
        value: f64,
        value_type: NumericValueType,
        unit: String,
    },
    /// A run of whitespace
    Whitespace,
    Colon,
    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    /// End of input
    Eof,
}

impl MediaQueryToken {
    /// Returns true for tokens that open a parenthesized block
    pub fn is_block_start(&self) -> bool {
        matches!(self, Self::LeftParen | Self::Function(_))
    }

    /// Returns true for tokens that close a parenthesized block
    pub fn is_block_end(&self) -> bool {
        matches!(self, Self::RightParen)
    }

    /// Numeric value of number, percentage, and dimension tokens
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Number { value, .. } | Self::Percentage { value } | Self::Dimension { value, .. } => {
                Some(*value)
            }
            _ => None,
        }
    }

    /// Integer/number classification of number and dimension tokens
    pub fn numeric_value_type(&self) -> Option<NumericValueType> {
        match self {
            Self::Number { value_type, .. } | Self::Dimension { value_type, .. } => Some(*value_type),
            _ => None,
        }
    }
}

type CodePointHandler = fn(&mut MediaQueryTokenizer, char) -> MediaQueryToken;

/// ASCII dispatch table: one handler per code point below U+0080
///
/// Slot 0 doubles as the end-of-input handler since the tokenizer hands a
/// NUL sentinel to the dispatcher once the input is exhausted (real NULs in
/// the input are replaced with U+FFFD up front).
static CODE_POINT_TABLE: [CodePointHandler; 128] = build_code_point_table();

const fn build_code_point_table() -> [CodePointHandler; 128] {
    let mut table: [CodePointHandler; 128] = [delimiter as CodePointHandler; 128];
    table[0] = end_of_input;
    table[b'\t' as usize] = whitespace;
    table[b'\n' as usize] = whitespace;
    table[0x0C] = whitespace;
    table[b'\r' as usize] = whitespace;
    table[b' ' as usize] = whitespace;
    table[b'(' as usize] = left_parenthesis;
    table[b')' as usize] = right_parenthesis;
    table[b'+' as usize] = plus_or_full_stop;
    table[b',' as usize] = comma;
    table[b'-' as usize] = hyphen_minus;
    table[b'.' as usize] = plus_or_full_stop;
    table[b':' as usize] = colon;
    table[b';' as usize] = semicolon;
    table[b'\\' as usize] = reverse_solidus;
    table[b'_' as usize] = name_start;
    let mut c = b'0';
    while c <= b'9' {
        table[c as usize] = ascii_digit;
        c += 1;
    }
    let mut c = b'a';
    while c <= b'z' {
        table[c as usize] = name_start;
        c += 1;
    }
    let mut c = b'A';
    while c <= b'Z' {
        table[c as usize] = name_start;
        c += 1;
    }
    table
}

fn end_of_input(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::Eof
}

fn whitespace(tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    while is_css_whitespace(tokenizer.peek(0)) {
        tokenizer.advance(1);
    }
    MediaQueryToken::Whitespace
}

fn left_parenthesis(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::LeftParen
}

fn right_parenthesis(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::RightParen
}

fn comma(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::Comma
}

fn colon(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::Colon
}

fn semicolon(_tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    MediaQueryToken::Semicolon
}

fn ascii_digit(tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    tokenizer.reconsume();
    tokenizer.consume_numeric_token()
}

fn plus_or_full_stop(tokenizer: &mut MediaQueryTokenizer, c: char) -> MediaQueryToken {
    if tokenizer.starts_number(tokenizer.offset - 1) {
        tokenizer.reconsume();
        tokenizer.consume_numeric_token()
    } else {
        MediaQueryToken::Delim(c)
    }
}

fn hyphen_minus(tokenizer: &mut MediaQueryTokenizer, c: char) -> MediaQueryToken {
    if tokenizer.starts_number(tokenizer.offset - 1) {
        tokenizer.reconsume();
        tokenizer.consume_numeric_token()
    } else if tokenizer.starts_identifier(tokenizer.offset - 1) {
        tokenizer.reconsume();
        tokenizer.consume_ident_like_token()
    } else {
        MediaQueryToken::Delim(c)
    }
}

fn name_start(tokenizer: &mut MediaQueryTokenizer, _c: char) -> MediaQueryToken {
    tokenizer.reconsume();
    tokenizer.consume_ident_like_token()
}

fn reverse_solidus(tokenizer: &mut MediaQueryTokenizer, c: char) -> MediaQueryToken {
    if tokenizer.valid_escape_at(tokenizer.offset - 1) {
        tokenizer.reconsume();
        tokenizer.consume_ident_like_token()
    } else {
        // Backslash before a newline is not an escape
        MediaQueryToken::Delim(c)
    }
}

fn delimiter(_tokenizer: &mut MediaQueryTokenizer, c: char) -> MediaQueryToken {
    MediaQueryToken::Delim(c)
}

fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_css_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (c as u32) >= 0x80
}

fn is_name(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Tokenizer state: the input as code points plus a cursor
///
/// Lookahead never goes past the end of the input; reads beyond it produce
/// a NUL sentinel, which no preprocessed input contains.
pub struct MediaQueryTokenizer {
    input: Vec<char>,
    offset: usize,
}

impl MediaQueryTokenizer {
    /// Creates a tokenizer over the given text
    ///
    /// U+0000 code points are replaced with U+FFFD so that NUL can serve as
    /// the internal end-of-input sentinel.
    pub fn new(text: &str) -> Self {
        let input = text
            .chars()
            .map(|c| if c == '\0' { '\u{FFFD}' } else { c })
            .collect();
        Self { input, offset: 0 }
    }

    /// Tokenizes the whole input, including the trailing [`MediaQueryToken::Eof`]
    pub fn tokenize(text: &str) -> Vec<MediaQueryToken> {
        let mut tokenizer = Self::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            let done = token == MediaQueryToken::Eof;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Produces the next token
    ///
    /// After an [`MediaQueryToken::Eof`] has been returned, callers must not
    /// call this again.
    pub fn next_token(&mut self) -> MediaQueryToken {
        let c = self.consume();
        if (c as u32) < 0x80 {
            CODE_POINT_TABLE[c as usize](self, c)
        } else {
            name_start(self, c)
        }
    }

    fn char_at(&self, index: usize) -> char {
        self.input.get(index).copied().unwrap_or('\0')
    }

    fn peek(&self, delta: usize) -> char {
        self.char_at(self.offset + delta)
    }

    fn consume(&mut self) -> char {
        let c = self.char_at(self.offset);
        self.offset += 1;
        c
    }

    fn advance(&mut self, count: usize) {
        self.offset += count;
    }

    fn reconsume(&mut self) {
        self.offset -= 1;
    }

    /// True if the input at `at` begins a CSS number
    fn starts_number(&self, at: usize) -> bool {
        match self.char_at(at) {
            '+' | '-' => {
                let second = self.char_at(at + 1);
                second.is_ascii_digit() || (second == '.' && self.char_at(at + 2).is_ascii_digit())
            }
            '.' => self.char_at(at + 1).is_ascii_digit(),
            c => c.is_ascii_digit(),
        }
    }

    /// True if the input at `at` begins an identifier
    fn starts_identifier(&self, at: usize) -> bool {
        match self.char_at(at) {
            '-' => is_name_start(self.char_at(at + 1)) || self.valid_escape_at(at + 1),
            c if is_name_start(c) => true,
            _ => self.valid_escape_at(at),
        }
    }

    /// True if the input at `at` is a backslash starting a valid escape
    fn valid_escape_at(&self, at: usize) -> bool {
        self.char_at(at) == '\\' && !is_css_newline(self.char_at(at + 1))
    }

    /// Decodes one escape sequence; the backslash has already been consumed
    ///
    /// One to six hex digits decode to the corresponding code point, with an
    /// optional single whitespace separator consumed afterwards. A NUL
    /// target, a surrogate, a value past U+10FFFF, or end of input all
    /// decode to U+FFFD. Any other code point escapes to itself.
    fn consume_escaped(&mut self) -> char {
        let c = self.consume();
        if c.is_ascii_hexdigit() {
            let mut value = c.to_digit(16).unwrap_or(0);
            let mut digits = 1;
            while digits < 6 && self.peek(0).is_ascii_hexdigit() {
                value = value * 16 + self.consume().to_digit(16).unwrap_or(0);
                digits += 1;
            }
            if is_css_whitespace(self.peek(0)) {
                self.advance(1);
            }
            if value == 0 {
                '\u{FFFD}'
            } else {
                char::from_u32(value).unwrap_or('\u{FFFD}')
            }
        } else if c == '\0' {
            // Backslash at end of input
            '\u{FFFD}'
        } else {
            c
        }
    }

    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            let c = self.peek(0);
            if is_name(c) {
                self.advance(1);
                name.push(c);
            } else if self.valid_escape_at(self.offset) {
                self.advance(1);
                name.push(self.consume_escaped());
            } else {
                return name;
            }
        }
    }

    fn consume_ident_like_token(&mut self) -> MediaQueryToken {
        let name = self.consume_name();
        if self.peek(0) == '(' {
            self.advance(1);
            MediaQueryToken::Function(name)
        } else {
            MediaQueryToken::Ident(name)
        }
    }

    /// Consumes a number: sign, integer part, optional fraction, optional
    /// exponent
    ///
    /// The fraction is consumed only when a digit follows the full stop, and
    /// the exponent marker only when digits follow it. The token is an
    /// integer exactly when no fractional digits were consumed.
    fn consume_number(&mut self) -> (f64, NumericValueType) {
        let start = self.offset;
        let mut value_type = NumericValueType::Integer;
        if matches!(self.peek(0), '+' | '-') {
            self.advance(1);
        }
        self.consume_digits();
        if self.peek(0) == '.' && self.peek(1).is_ascii_digit() {
            self.advance(1);
            self.consume_digits();
            value_type = NumericValueType::Number;
        }
        if matches!(self.peek(0), 'e' | 'E') {
            let digits_at = if matches!(self.peek(1), '+' | '-') { 2 } else { 1 };
            if self.peek(digits_at).is_ascii_digit() {
                self.advance(digits_at);
                self.consume_digits();
            }
        }
        let text: String = self.input[start..self.offset].iter().collect();
        (text.parse::<f64>().unwrap_or(0.0), value_type)
    }

    fn consume_digits(&mut self) {
        while self.peek(0).is_ascii_digit() {
            self.advance(1);
        }
    }

    fn consume_numeric_token(&mut self) -> MediaQueryToken {
        let (value, value_type) = self.consume_number();
        if self.starts_identifier(self.offset) {
            let unit = self.consume_name();
            MediaQueryToken::Dimension {
                value,
                value_type,
                unit,
            }
        } else if self.peek(0) == '%' {
            self.advance(1);
            MediaQueryToken::Percentage { value }
        } else {
            MediaQueryToken::Number { value, value_type }
        }
    }
}
