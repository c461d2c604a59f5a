//! Error types for the grammar analyzer and Earley parser.
//!
//! Four kinds, matching the taxonomy the parser is specified against:
//! a malformed grammar, a lexer that could not match somewhere, a chart
//! that never reached acceptance, and an internal invariant violation
//! during reconstruction (which should be unreachable for charts this
//! crate's own recognizer produces).

use crate::lexer::Token;
use thiserror::Error;

/// Errors raised while constructing a [`crate::grammar::Grammar`] from rule text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid grammar: {0}")]
pub struct InvalidGrammar(pub String);

/// Errors raised while parsing an input (lexing, recognition, or reconstruction).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lexer could not match at `position`; `tokens` holds everything
    /// recognized before the failure, including the synthetic error token.
    #[error("lex failure at byte {position}: no terminal or pattern matched")]
    LexFailure {
        position: usize,
        tokens: Vec<Token>,
    },

    /// The chart never reached an accepting entry: the token stream is not
    /// in the language.
    #[error("input rejected: no derivation of the start symbol covers it")]
    ParseRejected,

    /// Reconstruction could not find a predecessor matching the expected
    /// target item. This is an assertion backstop, not an expected outcome
    /// for a chart this crate's own recognizer built.
    #[error("internal error during tree reconstruction: {0}")]
    InternalError(String),
}

pub type GrammarResult<T> = std::result::Result<T, InvalidGrammar>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;
