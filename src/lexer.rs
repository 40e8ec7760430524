//! Lexical scanner shared by the filter and selector dialects.
//!
//! The scanner has two modes. In the default mode it recognises
//! identifiers, punctuation and the `~` escapes used inside path segments.
//! In the values mode it recognises single-quoted string literals together
//! with the `,` and `)` punctuation that separates and closes a value
//! list. The parser switches the mode explicitly around value lists: raw
//! values may contain characters (spaces, leading digits) that the default
//! mode would reject.

use crate::error::ParseError;
use std::fmt;

/// Terminal symbols of the query languages. The selector dialect uses only
/// `End`, `Identifier`, `Comma` and `Slash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    End,
    Identifier,
    LeftParenthesis,
    RightParenthesis,
    Comma,
    Semicolon,
    Slash,
    String,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symbol::End => "End",
            Symbol::Identifier => "Identifier",
            Symbol::LeftParenthesis => "LeftParenthesis",
            Symbol::RightParenthesis => "RightParenthesis",
            Symbol::Comma => "Comma",
            Symbol::Semicolon => "Semicolon",
            Symbol::Slash => "Slash",
            Symbol::String => "String",
        };
        f.write_str(name)
    }
}

/// A token returned by the scanner: the terminal symbol, its decoded text
/// and the character offset where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub symbol: Symbol,
    pub text: String,
    pub position: usize,
}

impl Token {
    fn new(symbol: Symbol, text: impl Into<String>, position: usize) -> Self {
        Self {
            symbol,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Symbol::Identifier | Symbol::String => write!(f, "{}:{}", self.symbol, self.text),
            _ => write!(f, "{}", self.symbol),
        }
    }
}

/// Scanner mode, switched by the parser around value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Identifiers, punctuation and path escapes.
    Default,
    /// Single-quoted string literals separated by commas.
    Values,
}

/// The scanner itself: a cursor over the source characters with one
/// character of pushback, which is what identifier termination needs.
pub(crate) struct Lexer {
    chars: Vec<char>,
    cursor: usize,
    mode: Mode,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            cursor: 0,
            mode: Mode::Default,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Returns the next token. Once the input is exhausted every further
    /// call returns `End`.
    pub fn fetch_token(&mut self) -> Result<Token, ParseError> {
        match self.mode {
            Mode::Default => self.fetch_default(),
            Mode::Values => self.fetch_values(),
        }
    }

    fn fetch_default(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.cursor;
        let first = match self.read_char() {
            Some(c) => c,
            None => return Ok(Token::new(Symbol::End, "", start)),
        };
        let mut lexeme = String::new();
        match first {
            ',' => return Ok(Token::new(Symbol::Comma, ",", start)),
            ';' => return Ok(Token::new(Symbol::Semicolon, ";", start)),
            '/' => return Ok(Token::new(Symbol::Slash, "/", start)),
            '(' => return Ok(Token::new(Symbol::LeftParenthesis, "(", start)),
            ')' => return Ok(Token::new(Symbol::RightParenthesis, ")", start)),
            '~' => lexeme.push(self.read_escape(start)?),
            // '@' scans verbatim, which is what lets the map-key segment
            // `@key` through without an escape.
            c if c.is_alphabetic() || c == '_' || c == '@' => lexeme.push(c),
            c => {
                return Err(ParseError::UnexpectedCharacter {
                    character: c,
                    position: start,
                });
            }
        }
        loop {
            match self.read_char() {
                Some(c) if c.is_alphanumeric() || c == '_' || c == '@' => lexeme.push(c),
                Some('~') => {
                    let escape_at = self.cursor - 1;
                    lexeme.push(self.read_escape(escape_at)?);
                }
                Some(_) => {
                    self.unread_char();
                    break;
                }
                None => break,
            }
        }
        Ok(Token::new(Symbol::Identifier, lexeme, start))
    }

    fn fetch_values(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.cursor;
        let first = match self.read_char() {
            Some(c) => c,
            None => return Ok(Token::new(Symbol::End, "", start)),
        };
        match first {
            ',' => Ok(Token::new(Symbol::Comma, ",", start)),
            ')' => Ok(Token::new(Symbol::RightParenthesis, ")", start)),
            '\'' => {
                let mut lexeme = String::new();
                loop {
                    match self.read_char() {
                        // A doubled quote is a literal quote, a single one
                        // closes the literal.
                        Some('\'') if self.peek_char() == Some('\'') => {
                            self.cursor += 1;
                            lexeme.push('\'');
                        }
                        Some('\'') => break,
                        Some(c) => lexeme.push(c),
                        None => return Err(ParseError::UnterminatedString { position: start }),
                    }
                }
                Ok(Token::new(Symbol::String, lexeme, start))
            }
            c => Err(ParseError::UnexpectedCharacter {
                character: c,
                position: start,
            }),
        }
    }

    /// Decodes the character after a `~`. `position` is the offset of the
    /// `~` itself.
    fn read_escape(&mut self, position: usize) -> Result<char, ParseError> {
        match self.read_char() {
            Some('0') => Ok('~'),
            Some('1') => Ok('/'),
            Some('a') => Ok(','),
            Some('b') => Ok('@'),
            Some(c) => Err(ParseError::UnknownEscape {
                character: c,
                position,
            }),
            // A trailing '~' decodes no character and is itself an unknown
            // escape, reported with a NUL placeholder.
            None => Err(ParseError::UnknownEscape {
                character: '\0',
                position,
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.cursor += 1;
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn read_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.cursor += 1;
        Some(c)
    }

    fn unread_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }
}

/// A one-token lookahead cursor over a [`Lexer`], shared by both dialect
/// parsers.
pub(crate) struct TokenStream {
    lexer: Lexer,
    slot: Option<Token>,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
            slot: None,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.lexer.set_mode(mode);
    }

    /// Returns the current token, fetching it from the scanner if needed.
    pub fn current(&mut self) -> Result<Token, ParseError> {
        if let Some(token) = &self.slot {
            return Ok(token.clone());
        }
        let token = self.lexer.fetch_token()?;
        self.slot = Some(token.clone());
        Ok(token)
    }

    /// Discards the current token so the next lookup fetches a fresh one.
    pub fn discard(&mut self) {
        self.slot = None;
    }

    /// Reports whether the current token has the given symbol.
    pub fn check(&mut self, symbol: Symbol) -> Result<bool, ParseError> {
        Ok(self.current()?.symbol == symbol)
    }

    /// Checks that the current token has the given symbol and discards it.
    pub fn consume(&mut self, symbol: Symbol, expected: &'static str) -> Result<Token, ParseError> {
        let token = self.current()?;
        if token.symbol != symbol {
            return Err(self.unexpected(expected));
        }
        self.slot = None;
        Ok(token)
    }

    /// Builds the error for a current token outside the expected set.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        match &self.slot {
            Some(token) if token.symbol != Symbol::End => ParseError::UnexpectedToken {
                found: token.text.clone(),
                expected,
                position: token.position,
            },
            _ => ParseError::UnexpectedEnd { expected },
        }
    }
}
