//! Abstract syntax tree for filter expressions and field selectors.
//!
//! All types are plain values: construction happens in the parsers, and the
//! `Display` implementations emit the canonical textual form, so for any
//! parsed tree `parse(tree.to_string())` yields the tree back.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relational operator of a filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Cont,
    Ncont,
}

impl Operator {
    /// The canonical lowercase lexeme used in the textual form.
    pub fn lexeme(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::Nin => "nin",
            Operator::Cont => "cont",
            Operator::Ncont => "ncont",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    /// Looks the name up in the operator table. Names are matched
    /// case-insensitively; the canonical form is lowercase.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "cont" => Ok(Operator::Cont),
            "eq" => Ok(Operator::Eq),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "in" => Ok(Operator::In),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "ncont" => Ok(Operator::Ncont),
            "neq" => Ok(Operator::Neq),
            "nin" => Ok(Operator::Nin),
            _ => Err(ParseError::UnknownOperator {
                name: name.to_string(),
            }),
        }
    }
}

/// An ordered, non-empty sequence of segment strings navigating nested
/// structure, like `spec/nodeId`. Segments hold decoded text; the reserved
/// characters `~`, `/`, `,` and `@` are escaped on emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    pub segments: Vec<String>,
}

impl Path {
    /// Creates a path from its decoded segments. `segments` must not be
    /// empty.
    pub fn new(segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty(), "a path needs at least one segment");
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write_segment(f, segment)?;
        }
        Ok(())
    }
}

/// Writes one path segment with the reserved characters escaped. The
/// map-key segment `@key` passes through whole; every other `@` is escaped.
fn write_segment(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    if segment == "@key" {
        return f.write_str(segment);
    }
    for c in segment.chars() {
        match c {
            '~' => f.write_str("~0")?,
            '/' => f.write_str("~1")?,
            ',' => f.write_str("~a")?,
            '@' => f.write_str("~b")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

/// One parenthesised predicate: an operator applied to the value addressed
/// by a path, like `(eq,spec/nodeId,'abc')`.
///
/// The parser accepts any number of values, including zero; whether the
/// count fits the operator is checked by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub operator: Operator,
    pub path: Path,
    pub values: Vec<String>,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},", self.operator, self.path)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "'{}'", value.replace('\'', "''"))?;
        }
        f.write_str(")")
    }
}

/// A parsed filter expression: an ordered, non-empty conjunction of terms.
/// Order does not change the meaning but is preserved, so serialization is
/// stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    pub terms: Vec<Term>,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.terms)
    }
}

/// The search-layer counterpart of [`Expr`]: the same terms, carried by the
/// query engine while it matches stored resources. It serializes to the
/// identical canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selector {
    pub terms: Vec<Term>,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.terms)
    }
}

impl From<Expr> for Selector {
    fn from(expr: Expr) -> Self {
        Self { terms: expr.terms }
    }
}

impl From<Selector> for Expr {
    fn from(selector: Selector) -> Self {
        Self {
            terms: selector.terms,
        }
    }
}

fn write_terms(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            f.write_str(";")?;
        }
        write!(f, "{term}")?;
    }
    Ok(())
}
