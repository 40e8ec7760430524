use thiserror::Error;

/// Errors produced while scanning or parsing a query expression.
///
/// Positions are zero-based character offsets into the source string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that cannot start an identifier was found in the
    /// structural part of the input.
    #[error("unexpected character '{character}' at offset {position} while expecting start of identifier")]
    UnexpectedCharacter { character: char, position: usize },

    /// A `~` was followed by a character outside the escape alphabet.
    #[error(
        "unknown escape sequence '~{character}' at offset {position}, valid escape sequences are \
         '~0' for '~', '~1' for '/', '~a' for ',' and '~b' for '@'"
    )]
    UnknownEscape { character: char, position: usize },

    /// End of input was reached before the closing quote of a string literal.
    #[error("unterminated string starting at offset {position}")]
    UnterminatedString { position: usize },

    /// The current token is outside the set the grammar allows at this point.
    #[error("unexpected token '{found}' at offset {position} while expecting {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    /// An operator name that is not in the operator table.
    #[error("unknown operator '{name}'")]
    UnknownOperator { name: String },

    /// End of input was reached while more tokens were expected.
    #[error("unexpected end of input while expecting {expected}")]
    UnexpectedEnd { expected: &'static str },
}
