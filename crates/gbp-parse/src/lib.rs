//! Single-pass parser for GBP-annotated C++ headers.
//!
//! The pass walks the buffer one character at a time and grows a
//! [`gbp_context::ContextTree`]. It never fails: malformed input yields a
//! partial tree, and constructs left open at end of input are force-closed
//! and reported.

use gbp_context::ContextTree;
use salsa::Accumulator as _;

mod classifier;
mod parser;

pub use parser::Parse;

/// Parses a buffer without touching the database. Unterminated constructs
/// are returned alongside the tree.
pub fn parse(text: &str) -> Parse {
    parser::Parser::new(text).run()
}

/// Parses a header, reporting unterminated constructs as warnings through
/// the [`gbp_errors::Diagnostic`] accumulator.
pub fn header(db: &dyn salsa::Database, text: &str) -> ContextTree {
    let Parse { tree, unterminated } = parse(text);
    for open in unterminated {
        gbp_errors::Diagnostic::warning(
            format!("unterminated {} reached end of input", open.kind),
            open.range,
        )
        .accumulate(db);
    }
    tree
}
