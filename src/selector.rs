//! Parser for the field selector dialect: comma-separated paths.
//!
//! ```text
//! Selector := Path (',' Path)* End
//! Path     := Identifier ('/' Identifier)*
//! ```
//!
//! The dialect shares the scanner with the filter parser but never leaves
//! the default mode, so the error surface at path boundaries is the same
//! in both dialects.

use crate::ast::Path;
use crate::error::ParseError;
use crate::lexer::{Symbol, TokenStream};

/// Parses a field selector into its list of paths.
///
/// ```
/// use fieldql::parse_selector;
///
/// let paths = parse_selector("metadata/name,spec/nodeId").unwrap();
/// assert_eq!(paths[0].segments, vec!["metadata", "name"]);
/// assert_eq!(paths[1].segments, vec!["spec", "nodeId"]);
/// ```
pub fn parse_selector(input: &str) -> Result<Vec<Path>, ParseError> {
    let mut parser = Parser::new(input);
    let result = parser.parse_paths();
    if let Err(error) = &result {
        log::debug!("failed to parse field selector '{input}': {error}");
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

    fn parse_paths(&mut self) -> Result<Vec<Path>, ParseError> {
        let mut paths = Vec::new();
        loop {
            paths.push(self.parse_path()?);
            if self.tokens.check(Symbol::Comma)? {
                self.tokens.discard();
                continue;
            }
            if self.tokens.check(Symbol::End)? {
                break;
            }
            return Err(self.tokens.unexpected("comma or end of input"));
        }
        Ok(paths)
    }

    fn parse_path(&mut self) -> Result<Path, ParseError> {
        let mut segments = Vec::new();
        loop {
            let token = self.tokens.consume(Symbol::Identifier, "identifier")?;
            segments.push(token.text);
            if self.tokens.check(Symbol::Slash)? {
                self.tokens.discard();
                continue;
            }
            break;
        }
        Ok(Path::new(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_path() {
        let paths = parse_selector("myattr").unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].segments, ["myattr"]);
    }

    #[test]
    fn parses_multiple_paths() {
        let paths = parse_selector("metadata/name,spec/nodeId,status").unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].segments, ["metadata", "name"]);
        assert_eq!(paths[1].segments, ["spec", "nodeId"]);
        assert_eq!(paths[2].segments, ["status"]);
    }

    #[test]
    fn parses_escaped_segments() {
        let paths = parse_selector("my~0attr,my~1attr,my~aattr,my~battr").unwrap();
        assert_eq!(paths[0].segments, ["my~attr"]);
        assert_eq!(paths[1].segments, ["my/attr"]);
        assert_eq!(paths[2].segments, ["my,attr"]);
        assert_eq!(paths[3].segments, ["my@attr"]);
    }

    #[test]
    fn parses_map_key_segments() {
        let paths = parse_selector("mydict/@key").unwrap();
        assert_eq!(paths[0].segments, ["mydict", "@key"]);
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant() {
        let spaced = parse_selector(" metadata / name , spec ").unwrap();
        let compact = parse_selector("metadata/name,spec").unwrap();
        assert_eq!(spaced, compact);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            parse_selector(""),
            Err(ParseError::UnexpectedEnd {
                expected: "identifier",
            })
        );
    }

    #[test]
    fn rejects_trailing_comma() {
        assert_eq!(
            parse_selector("myattr,"),
            Err(ParseError::UnexpectedEnd {
                expected: "identifier",
            })
        );
    }

    #[test]
    fn rejects_dangling_slash() {
        assert_eq!(
            parse_selector("myattr/"),
            Err(ParseError::UnexpectedEnd {
                expected: "identifier",
            })
        );
    }

    #[test]
    fn rejects_foreign_punctuation() {
        assert_eq!(
            parse_selector("my(attr"),
            Err(ParseError::UnexpectedToken {
                found: "(".to_string(),
                expected: "comma or end of input",
                position: 2,
            })
        );
    }

    #[test]
    fn rejects_unknown_escapes() {
        assert_eq!(
            parse_selector("my~qattr"),
            Err(ParseError::UnknownEscape {
                character: 'q',
                position: 2,
            })
        );
    }
}
