//! Recursive-descent parser for the filter expression dialect.
//!
//! The grammar:
//!
//! ```text
//! Expr   := Term (';' Term)* End
//! Term   := '(' Operator ',' Path ',' Values? ')'
//! Path   := Identifier ('/' Identifier)*
//! Values := String (',' String)*
//! ```
//!
//! The parser drives the scanner with one token of lookahead and switches
//! it into the values mode between the second comma of a term and the
//! closing parenthesis, where string literals replace identifiers.

use crate::ast::{Expr, Operator, Path, Term};
use crate::error::ParseError;
use crate::lexer::{Mode, Symbol, TokenStream};

/// Parses a filter expression into its syntax tree.
///
/// ```
/// use fieldql::{Operator, parse_expression};
///
/// let expr = parse_expression("(eq,spec/nodeId,'abc')").unwrap();
/// assert_eq!(expr.terms[0].operator, Operator::Eq);
/// assert_eq!(expr.terms[0].path.segments, vec!["spec", "nodeId"]);
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(input);
    let result = parser.parse_expr();
    if let Err(error) = &result {
        log::debug!("failed to parse filter expression '{input}': {error}");
    }
    result
}

struct Parser {
    tokens: TokenStream,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            tokens: TokenStream::new(input),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut terms = Vec::new();
        loop {
            terms.push(self.parse_term()?);
            if self.tokens.check(Symbol::Semicolon)? {
                self.tokens.discard();
                continue;
            }
            if self.tokens.check(Symbol::End)? {
                break;
            }
            return Err(self.tokens.unexpected("semicolon or end of input"));
        }
        Ok(Expr { terms })
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        self.tokens
            .consume(Symbol::LeftParenthesis, "left parenthesis")?;
        let operator = self.parse_operator()?;
        self.tokens.consume(Symbol::Comma, "comma")?;
        let path = self.parse_path()?;
        self.tokens.consume(Symbol::Comma, "comma")?;
        self.tokens.set_mode(Mode::Values);
        let values = self.parse_optional_values()?;
        self.tokens.set_mode(Mode::Default);
        self.tokens
            .consume(Symbol::RightParenthesis, "right parenthesis")?;
        Ok(Term {
            operator,
            path,
            values,
        })
    }

    fn parse_operator(&mut self) -> Result<Operator, ParseError> {
        let token = self.tokens.consume(Symbol::Identifier, "operator name")?;
        token.text.parse()
    }

    fn parse_path(&mut self) -> Result<Path, ParseError> {
        let mut segments = Vec::new();
        loop {
            segments.push(self.parse_identifier()?);
            if self.tokens.check(Symbol::Slash)? {
                self.tokens.discard();
                continue;
            }
            if self.tokens.check(Symbol::Comma)? {
                break;
            }
            return Err(self.tokens.unexpected("slash or comma"));
        }
        Ok(Path::new(segments))
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.tokens.consume(Symbol::Identifier, "identifier")?;
        Ok(token.text)
    }

    fn parse_optional_values(&mut self) -> Result<Vec<String>, ParseError> {
        if self.tokens.check(Symbol::RightParenthesis)? {
            return Ok(Vec::new());
        }
        if self.tokens.check(Symbol::String)? {
            return self.parse_values();
        }
        Err(self.tokens.unexpected("value or right parenthesis"))
    }

    fn parse_values(&mut self) -> Result<Vec<String>, ParseError> {
        let mut values = Vec::new();
        loop {
            values.push(self.parse_value()?);
            if self.tokens.check(Symbol::Comma)? {
                self.tokens.discard();
                continue;
            }
            if self.tokens.check(Symbol::RightParenthesis)? {
                break;
            }
            return Err(self.tokens.unexpected("comma or right parenthesis"));
        }
        Ok(values)
    }

    fn parse_value(&mut self) -> Result<String, ParseError> {
        let token = self.tokens.consume(Symbol::String, "string")?;
        Ok(token.text)
    }
}
