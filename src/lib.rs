//! A general context-free parsing library.
//!
//! Given a declarative grammar and a token stream, produces one concrete
//! parse tree via an Earley chart and backpointer reconstruction. See
//! [`grammar::Grammar`] for the grammar analyzer (nullable/FIRST/FOLLOW),
//! [`earley::recognize`] for chart construction, and [`tree::reconstruct`]
//! for turning an accepting chart into a tree.
//!
//! For ambiguous grammars this returns one canonical derivation (the first
//! found under earlier-alternative-wins tie-breaking), not all of them; the
//! whole token list is held in memory, and an unparseable input is a
//! failure, not a partial tree.

pub mod cli;
pub mod earley;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod lexer;
pub mod ordered_set;
pub mod symbol;
pub mod tree;

pub use error::{GrammarResult, InvalidGrammar, ParseError, ParseResult};
pub use grammar::{Grammar, Production};
pub use lexer::{Lexer, Token};
pub use symbol::Symbol;
pub use tree::TreeNode;

/// Tokenizes `input` with `lexer` and parses it against `grammar`,
/// returning the single concrete parse tree.
pub fn parse(grammar: &Grammar, lexer: &Lexer, input: &str) -> ParseResult<TreeNode> {
    let tokens = lexer.tokenize(input)?;
    parse_tokens(grammar, &tokens)
}

/// Parses an already-tokenized input directly, for callers that
/// synthesize their own token stream instead of using [`Lexer`].
pub fn parse_tokens(grammar: &Grammar, tokens: &[Token]) -> ParseResult<TreeNode> {
    let recognition = earley::recognize(grammar, tokens)?;
    tree::reconstruct(&recognition, tokens)
}
