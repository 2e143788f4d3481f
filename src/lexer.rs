//! Tokenizer.
//!
//! Produces the full token stream up front. Interpolated strings are
//! handled with a lexical brace stack: a `}` that closes an interpolation
//! hole resumes string scanning, while a `}` that closes an ordinary brace
//! emits a plain token. Tokens carry the decoded payloads the parser needs
//! (string byte values, numeric values) alongside the verbatim source
//! slices the concrete-syntax side-table records.

use crate::cst::QuoteStyle;
use crate::escape::{is_identifier_char, is_identifier_start_char};
use crate::position::{Location, Position};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Eof,
    Name(String),
    Number {
        lexeme: String,
        value: f64,
    },
    QuotedString {
        value: Vec<u8>,
        source: String,
        style: QuoteStyle,
    },
    RawString {
        value: Vec<u8>,
        source: String,
        block_depth: u32,
    },
    /// `` `text{ `` — opens an interpolated string with at least one hole.
    InterpBegin {
        value: Vec<u8>,
    },
    /// `}text{` — between two holes.
    InterpMid {
        value: Vec<u8>,
    },
    /// `` }text` `` — after the last hole.
    InterpEnd {
        value: Vec<u8>,
    },
    /// `` `text` `` — no holes.
    InterpSimple {
        value: Vec<u8>,
        source: String,
    },

    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,

    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    Hash,
    EqEq,
    NotEq,
    LessEq,
    GreaterEq,
    Less,
    Greater,
    Equals,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Dot,
    DotDot,
    Ellipsis,
    Arrow,
    Question,
    Pipe,
    Ampersand,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    DoubleSlashEq,
    PercentEq,
    CaretEq,
    ConcatEq,

    /// A token the lexer could not form; the parser reports the message.
    Error {
        message: String,
    },
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

/// Tokenize the whole source, ending with an `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

/// Parse a numeric lexeme into its value.
///
/// Handles `0x`/`0b` prefixes and `_` digit separators; decimal forms are
/// delegated to the standard float parser.
pub fn parse_number_value(lexeme: &str) -> Option<f64> {
    let cleaned: String = lexeme.chars().filter(|&c| c != '_').collect();
    let bytes = cleaned.as_bytes();

    if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'x' {
        let mut value = 0.0f64;
        for &b in &bytes[2..] {
            let digit = (b as char).to_digit(16)?;
            value = value * 16.0 + f64::from(digit);
        }
        return Some(value);
    }

    if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'b' {
        let mut value = 0.0f64;
        for &b in &bytes[2..] {
            let digit = (b as char).to_digit(2)?;
            value = value * 2.0 + f64::from(digit);
        }
        return Some(value);
    }

    // `1.e5` is valid source but not valid for the standard parser.
    let normalized = cleaned.replace(".e", "e").replace(".E", "E");
    normalized.parse::<f64>().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BraceKind {
    InterpolatedString,
    Normal,
}

struct Lexer<'src> {
    text: &'src str,
    src: &'src [u8],
    offset: usize,
    line: u32,
    line_start: usize,
    braces: Vec<BraceKind>,
}

impl<'src> Lexer<'src> {
    fn new(text: &'src str) -> Lexer<'src> {
        Lexer {
            text,
            src: text.as_bytes(),
            offset: 0,
            line: 0,
            line_start: 0,
            braces: Vec::new(),
        }
    }

    fn peek(&self, n: usize) -> Option<u8> {
        self.src.get(self.offset + n).copied()
    }

    fn position(&self) -> Position {
        Position::new(self.line, (self.offset - self.line_start) as u32)
    }

    fn bump(&mut self) {
        if self.src.get(self.offset) == Some(&b'\n') {
            self.line += 1;
            self.line_start = self.offset + 1;
        }
        self.offset += 1;
    }

    fn token(&self, begin: Position, kind: TokenKind) -> Token {
        Token {
            kind,
            location: Location::new(begin, self.position()),
        }
    }

    fn error(&self, begin: Position, message: &str) -> Token {
        self.token(
            begin,
            TokenKind::Error {
                message: message.to_string(),
            },
        )
    }

    fn next_token(&mut self) -> Token {
        loop {
            match self.peek(0) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.bump(),
                Some(b'-') if self.peek(1) == Some(b'-') => {
                    let begin = self.position();
                    self.bump();
                    self.bump();
                    if self.peek(0) == Some(b'[') {
                        if let Some(depth) = self.long_bracket_depth() {
                            self.consume_long_bracket_opener(depth);
                            if self.scan_long_bracket_body(depth).is_none() {
                                return self.error(begin, "Unfinished long comment");
                            }
                            continue;
                        }
                    }
                    while !matches!(self.peek(0), None | Some(b'\n')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let begin = self.position();
        let Some(b) = self.peek(0) else {
            return self.token(begin, TokenKind::Eof);
        };

        match b {
            b'0'..=b'9' => self.read_number(begin),
            b'.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number(begin),
            c if is_identifier_start_char(c) => self.read_name(begin),
            b'"' | b'\'' => self.read_quoted_string(begin, b),
            b'`' => self.read_interp_section(begin, true),
            b'[' => {
                if let Some(depth) = self.long_bracket_depth() {
                    self.read_long_string(begin, depth)
                } else {
                    self.bump();
                    self.token(begin, TokenKind::LBracket)
                }
            }
            b'{' => {
                self.braces.push(BraceKind::Normal);
                self.bump();
                self.token(begin, TokenKind::LBrace)
            }
            b'}' => match self.braces.pop() {
                Some(BraceKind::InterpolatedString) => self.read_interp_section(begin, false),
                _ => {
                    self.bump();
                    self.token(begin, TokenKind::RBrace)
                }
            },
            b'=' => self.one_or_two(begin, TokenKind::Equals, b'=', TokenKind::EqEq),
            b'~' => {
                self.bump();
                if self.peek(0) == Some(b'=') {
                    self.bump();
                    self.token(begin, TokenKind::NotEq)
                } else {
                    self.error(begin, "Unexpected '~'; did you mean '~='?")
                }
            }
            b'<' => self.one_or_two(begin, TokenKind::Less, b'=', TokenKind::LessEq),
            b'>' => self.one_or_two(begin, TokenKind::Greater, b'=', TokenKind::GreaterEq),
            b'+' => self.one_or_two(begin, TokenKind::Plus, b'=', TokenKind::PlusEq),
            b'*' => self.one_or_two(begin, TokenKind::Star, b'=', TokenKind::StarEq),
            b'%' => self.one_or_two(begin, TokenKind::Percent, b'=', TokenKind::PercentEq),
            b'^' => self.one_or_two(begin, TokenKind::Caret, b'=', TokenKind::CaretEq),
            b'-' => {
                self.bump();
                match self.peek(0) {
                    Some(b'=') => {
                        self.bump();
                        self.token(begin, TokenKind::MinusEq)
                    }
                    Some(b'>') => {
                        self.bump();
                        self.token(begin, TokenKind::Arrow)
                    }
                    _ => self.token(begin, TokenKind::Minus),
                }
            }
            b'/' => {
                self.bump();
                match self.peek(0) {
                    Some(b'/') => {
                        self.bump();
                        if self.peek(0) == Some(b'=') {
                            self.bump();
                            self.token(begin, TokenKind::DoubleSlashEq)
                        } else {
                            self.token(begin, TokenKind::DoubleSlash)
                        }
                    }
                    Some(b'=') => {
                        self.bump();
                        self.token(begin, TokenKind::SlashEq)
                    }
                    _ => self.token(begin, TokenKind::Slash),
                }
            }
            b':' => self.one_or_two(begin, TokenKind::Colon, b':', TokenKind::DoubleColon),
            b'.' => {
                self.bump();
                if self.peek(0) == Some(b'.') {
                    self.bump();
                    match self.peek(0) {
                        Some(b'.') => {
                            self.bump();
                            self.token(begin, TokenKind::Ellipsis)
                        }
                        Some(b'=') => {
                            self.bump();
                            self.token(begin, TokenKind::ConcatEq)
                        }
                        _ => self.token(begin, TokenKind::DotDot),
                    }
                } else {
                    self.token(begin, TokenKind::Dot)
                }
            }
            b'(' => {
                self.bump();
                self.token(begin, TokenKind::LParen)
            }
            b')' => {
                self.bump();
                self.token(begin, TokenKind::RParen)
            }
            b']' => {
                self.bump();
                self.token(begin, TokenKind::RBracket)
            }
            b';' => {
                self.bump();
                self.token(begin, TokenKind::Semicolon)
            }
            b',' => {
                self.bump();
                self.token(begin, TokenKind::Comma)
            }
            b'#' => {
                self.bump();
                self.token(begin, TokenKind::Hash)
            }
            b'?' => {
                self.bump();
                self.token(begin, TokenKind::Question)
            }
            b'|' => {
                self.bump();
                self.token(begin, TokenKind::Pipe)
            }
            b'&' => {
                self.bump();
                self.token(begin, TokenKind::Ampersand)
            }
            _ => {
                self.bump();
                self.error(begin, "Unexpected symbol")
            }
        }
    }

    fn one_or_two(&mut self, begin: Position, one: TokenKind, second: u8, two: TokenKind) -> Token {
        self.bump();
        if self.peek(0) == Some(second) {
            self.bump();
            self.token(begin, two)
        } else {
            self.token(begin, one)
        }
    }

    fn read_name(&mut self, begin: Position) -> Token {
        let start = self.offset;
        while self.peek(0).is_some_and(is_identifier_char) {
            self.bump();
        }
        let name = &self.text[start..self.offset];

        let kind = match name {
            "and" => TokenKind::And,
            "break" => TokenKind::Break,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "elseif" => TokenKind::Elseif,
            "end" => TokenKind::End,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "in" => TokenKind::In,
            "local" => TokenKind::Local,
            "nil" => TokenKind::Nil,
            "not" => TokenKind::Not,
            "or" => TokenKind::Or,
            "repeat" => TokenKind::Repeat,
            "return" => TokenKind::Return,
            "then" => TokenKind::Then,
            "true" => TokenKind::True,
            "until" => TokenKind::Until,
            "while" => TokenKind::While,
            _ => TokenKind::Name(name.to_string()),
        };

        self.token(begin, kind)
    }

    fn read_number(&mut self, begin: Position) -> Token {
        let start = self.offset;

        if self.peek(0) == Some(b'0') && matches!(self.peek(1), Some(b'x' | b'X' | b'b' | b'B')) {
            self.bump();
            self.bump();
            while self
                .peek(0)
                .is_some_and(|c| c.is_ascii_hexdigit() || c == b'_')
            {
                self.bump();
            }
        } else {
            while self
                .peek(0)
                .is_some_and(|c| c.is_ascii_digit() || c == b'.' || c == b'_')
            {
                self.bump();
            }
            if matches!(self.peek(0), Some(b'e' | b'E')) {
                self.bump();
                if matches!(self.peek(0), Some(b'+' | b'-')) {
                    self.bump();
                }
                while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }

        // Trailing identifier characters make the whole lexeme malformed;
        // consume them so the error location covers `1x` entirely.
        let mut malformed = false;
        while self.peek(0).is_some_and(is_identifier_char) {
            malformed = true;
            self.bump();
        }

        let lexeme = &self.text[start..self.offset];
        if malformed {
            return self.error(begin, "Malformed number");
        }
        match parse_number_value(lexeme) {
            Some(value) => self.token(
                begin,
                TokenKind::Number {
                    lexeme: lexeme.to_string(),
                    value,
                },
            ),
            None => self.error(begin, "Malformed number"),
        }
    }

    fn read_quoted_string(&mut self, begin: Position, quote: u8) -> Token {
        self.bump();
        let source_start = self.offset;
        let mut value = Vec::new();

        loop {
            match self.peek(0) {
                None | Some(b'\n' | b'\r') => return self.error(begin, "Unfinished string"),
                Some(c) if c == quote => {
                    let source = self.text[source_start..self.offset].to_string();
                    self.bump();
                    let style = if quote == b'"' {
                        QuoteStyle::Double
                    } else {
                        QuoteStyle::Single
                    };
                    return self.token(
                        begin,
                        TokenKind::QuotedString {
                            value,
                            source,
                            style,
                        },
                    );
                }
                Some(b'\\') => {
                    if let Err(message) = self.read_escape(&mut value) {
                        return self.error(begin, message);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    /// Scan one section of an interpolated string, starting at the opening
    /// backtick (`opening`) or at the `}` that closed a hole.
    fn read_interp_section(&mut self, begin: Position, opening: bool) -> Token {
        self.bump();
        let source_start = self.offset;
        let mut value = Vec::new();

        loop {
            match self.peek(0) {
                None | Some(b'\n' | b'\r') => {
                    return self.error(begin, "Unfinished interpolated string");
                }
                Some(b'`') => {
                    let source = self.text[source_start..self.offset].to_string();
                    self.bump();
                    let kind = if opening {
                        TokenKind::InterpSimple { value, source }
                    } else {
                        TokenKind::InterpEnd { value }
                    };
                    return self.token(begin, kind);
                }
                Some(b'{') => {
                    self.braces.push(BraceKind::InterpolatedString);
                    self.bump();
                    let kind = if opening {
                        TokenKind::InterpBegin { value }
                    } else {
                        TokenKind::InterpMid { value }
                    };
                    return self.token(begin, kind);
                }
                Some(b'\\') => {
                    if let Err(message) = self.read_escape(&mut value) {
                        return self.error(begin, message);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn read_escape(&mut self, value: &mut Vec<u8>) -> Result<(), &'static str> {
        self.bump();
        let Some(c) = self.peek(0) else {
            return Err("Unfinished string");
        };

        match c {
            b'a' => {
                value.push(0x07);
                self.bump();
            }
            b'b' => {
                value.push(0x08);
                self.bump();
            }
            b'f' => {
                value.push(0x0c);
                self.bump();
            }
            b'n' => {
                value.push(b'\n');
                self.bump();
            }
            b'r' => {
                value.push(b'\r');
                self.bump();
            }
            b't' => {
                value.push(b'\t');
                self.bump();
            }
            b'v' => {
                value.push(0x0b);
                self.bump();
            }
            b'\\' | b'"' | b'\'' | b'`' | b'{' | b'}' => {
                value.push(c);
                self.bump();
            }
            b'\n' => {
                value.push(b'\n');
                self.bump();
            }
            b'\r' => {
                self.bump();
                if self.peek(0) == Some(b'\n') {
                    self.bump();
                }
                value.push(b'\n');
            }
            b'x' => {
                self.bump();
                let mut byte = 0u32;
                for _ in 0..2 {
                    let digit = self
                        .peek(0)
                        .and_then(|d| (d as char).to_digit(16))
                        .ok_or("Malformed escape sequence")?;
                    byte = byte * 16 + digit;
                    self.bump();
                }
                value.push(byte as u8);
            }
            b'z' => {
                self.bump();
                while matches!(self.peek(0), Some(b' ' | b'\t' | b'\r' | b'\n')) {
                    self.bump();
                }
            }
            b'0'..=b'9' => {
                let mut byte = 0u32;
                for _ in 0..3 {
                    match self.peek(0) {
                        Some(d) if d.is_ascii_digit() => {
                            byte = byte * 10 + u32::from(d - b'0');
                            self.bump();
                        }
                        _ => break,
                    }
                }
                if byte > 255 {
                    return Err("Malformed escape sequence");
                }
                value.push(byte as u8);
            }
            b'u' => {
                self.bump();
                if self.peek(0) != Some(b'{') {
                    return Err("Malformed escape sequence");
                }
                self.bump();
                let mut code = 0u32;
                let mut digits = 0;
                while let Some(d) = self.peek(0).and_then(|d| (d as char).to_digit(16)) {
                    code = code.saturating_mul(16).saturating_add(d);
                    digits += 1;
                    self.bump();
                }
                if digits == 0 || self.peek(0) != Some(b'}') {
                    return Err("Malformed escape sequence");
                }
                self.bump();
                let ch = char::from_u32(code).ok_or("Malformed escape sequence")?;
                let mut buf = [0u8; 4];
                value.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            _ => return Err("Unknown escape sequence"),
        }

        Ok(())
    }

    /// Depth of a long-bracket opener at the cursor, if one starts here.
    fn long_bracket_depth(&self) -> Option<u32> {
        if self.peek(0) != Some(b'[') {
            return None;
        }
        let mut i = 1;
        while self.peek(i) == Some(b'=') {
            i += 1;
        }
        if self.peek(i) == Some(b'[') {
            Some((i - 1) as u32)
        } else {
            None
        }
    }

    fn consume_long_bracket_opener(&mut self, depth: u32) {
        for _ in 0..depth + 2 {
            self.bump();
        }
    }

    /// Scan to the matching closer; returns the verbatim content between
    /// the brackets, or `None` if the source ends first.
    fn scan_long_bracket_body(&mut self, depth: u32) -> Option<(usize, usize)> {
        let content_start = self.offset;
        loop {
            match self.peek(0) {
                None => return None,
                Some(b']') => {
                    let mut i = 1;
                    while i <= depth as usize && self.peek(i) == Some(b'=') {
                        i += 1;
                    }
                    if i == depth as usize + 1 && self.peek(i) == Some(b']') {
                        let content_end = self.offset;
                        for _ in 0..depth + 2 {
                            self.bump();
                        }
                        return Some((content_start, content_end));
                    }
                    self.bump();
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn read_long_string(&mut self, begin: Position, depth: u32) -> Token {
        self.consume_long_bracket_opener(depth);
        let Some((start, end)) = self.scan_long_bracket_body(depth) else {
            return self.error(begin, "Unfinished long string");
        };

        let source = self.text[start..end].to_string();

        // The value skips one leading newline directly after the opener.
        let mut value = source.as_bytes();
        if value.first() == Some(&b'\r') {
            value = &value[1..];
        }
        if value.first() == Some(&b'\n') {
            value = &value[1..];
        }

        self.token(
            begin,
            TokenKind::RawString {
                value: value.to_vec(),
                source,
                block_depth: depth,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_statement() {
        assert_eq!(
            kinds("local x = 1"),
            vec![
                TokenKind::Local,
                TokenKind::Name("x".to_string()),
                TokenKind::Equals,
                TokenKind::Number {
                    lexeme: "1".to_string(),
                    value: 1.0,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_zero_based_byte_columns() {
        let tokens = tokenize("local x");
        assert_eq!(tokens[0].location.begin, Position::new(0, 0));
        assert_eq!(tokens[0].location.end, Position::new(0, 5));
        assert_eq!(tokens[1].location.begin, Position::new(0, 6));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("..= ... .. . // //= -> ~= :: <="),
            vec![
                TokenKind::ConcatEq,
                TokenKind::Ellipsis,
                TokenKind::DotDot,
                TokenKind::Dot,
                TokenKind::DoubleSlash,
                TokenKind::DoubleSlashEq,
                TokenKind::Arrow,
                TokenKind::NotEq,
                TokenKind::DoubleColon,
                TokenKind::LessEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("0xFF 0b101 1_000 .5 1e-2"),
            vec![
                TokenKind::Number {
                    lexeme: "0xFF".to_string(),
                    value: 255.0,
                },
                TokenKind::Number {
                    lexeme: "0b101".to_string(),
                    value: 5.0,
                },
                TokenKind::Number {
                    lexeme: "1_000".to_string(),
                    value: 1000.0,
                },
                TokenKind::Number {
                    lexeme: ".5".to_string(),
                    value: 0.5,
                },
                TokenKind::Number {
                    lexeme: "1e-2".to_string(),
                    value: 0.01,
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_malformed_number_location() {
        let tokens = tokenize("local 1x = 2");
        assert_eq!(
            tokens[1].kind,
            TokenKind::Error {
                message: "Malformed number".to_string(),
            }
        );
        assert_eq!(tokens[1].location.begin, Position::new(0, 6));
        assert_eq!(tokens[1].location.end, Position::new(0, 8));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r#"'a\n\065\x41'"#);
        match &tokens[0].kind {
            TokenKind::QuotedString {
                value,
                source,
                style,
            } => {
                assert_eq!(value, b"a\nAA");
                assert_eq!(source, r"a\n\065\x41");
                assert_eq!(*style, QuoteStyle::Single);
            }
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_long_string_depth_and_leading_newline() {
        let tokens = tokenize("[==[\nhi ]] there]==]");
        match &tokens[0].kind {
            TokenKind::RawString {
                value,
                source,
                block_depth,
            } => {
                assert_eq!(value, b"hi ]] there");
                assert_eq!(source, "\nhi ]] there");
                assert_eq!(*block_depth, 2);
            }
            other => panic!("expected raw string, got {other:?}"),
        }
    }

    #[test]
    fn test_interp_sections() {
        assert_eq!(
            kinds("`a{x}b{y}c`"),
            vec![
                TokenKind::InterpBegin {
                    value: b"a".to_vec(),
                },
                TokenKind::Name("x".to_string()),
                TokenKind::InterpMid {
                    value: b"b".to_vec(),
                },
                TokenKind::Name("y".to_string()),
                TokenKind::InterpEnd {
                    value: b"c".to_vec(),
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_interp_with_nested_braces() {
        assert_eq!(
            kinds("`v={ {n=1} }`"),
            vec![
                TokenKind::InterpBegin {
                    value: b"v=".to_vec(),
                },
                TokenKind::LBrace,
                TokenKind::Name("n".to_string()),
                TokenKind::Equals,
                TokenKind::Number {
                    lexeme: "1".to_string(),
                    value: 1.0,
                },
                TokenKind::RBrace,
                TokenKind::InterpEnd {
                    value: b"".to_vec(),
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a -- line comment\n--[[ long\ncomment ]] b"),
            vec![
                TokenKind::Name("a".to_string()),
                TokenKind::Name("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }
}
