//! # fieldql
//!
//! A small query language for addressing fields of structured resources
//! and filtering resource collections with relational predicates. A
//! service layer hands the textual form to [`parse_expression`] or
//! [`parse_selector`] and passes the resulting tree to its query engine;
//! the tree serializes back to the canonical text through `Display`.
//!
//! Two dialects share one scanner:
//!
//! - filter expressions, a `;`-separated conjunction of predicates:
//!   `(eq,spec/nodeId,'abc');(neq,status/phase,'Failed')`
//! - field selectors, a `,`-separated list of paths:
//!   `metadata/name,spec/nodeId`
//!
//! Path segments escape the reserved characters `~`, `/`, `,` and `@` as
//! `~0`, `~1`, `~a` and `~b`; the map-key segment `@key` passes through
//! verbatim. Values are single-quoted strings with quotes doubled.
//!
//! ```
//! use fieldql::parse_expression;
//!
//! let expr = parse_expression("(in,status/phase,'Ready','Degraded')").unwrap();
//! assert_eq!(expr.terms[0].values, vec!["Ready", "Degraded"]);
//! assert_eq!(expr.to_string(), "(in,status/phase,'Ready','Degraded')");
//! ```

pub mod ast;
pub mod error;
mod lexer;
mod parser;
mod selector;

pub use ast::{Expr, Operator, Path, Selector, Term};
pub use error::ParseError;
pub use parser::parse_expression;
pub use selector::parse_selector;
