//! Symbol types for context-free grammars.
//!
//! Unlike a single-character grammar, symbols here are arbitrary
//! whitespace-delimited names, so a `Symbol` cannot classify itself as
//! terminal or nonterminal by inspecting its own representation — that
//! question is answered relative to a [`crate::grammar::Grammar`] (by
//! lhs-set membership). `Symbol` itself only distinguishes the two reserved
//! sentinels from ordinary names.

use std::fmt;
use std::rc::Rc;

/// Reserved name for the epsilon (empty-string) symbol.
pub const EPSILON_TEXT: &str = "#";
/// Reserved name for the end-of-input symbol.
pub const END_OF_INPUT_TEXT: &str = "$";
/// Reserved separator between alternatives in a rule.
pub const ALTERNATIVE_SEP: &str = "|";
/// Reserved marker between a rule's left- and right-hand sides.
pub const ARROW: &str = "->";

/// A grammar symbol: a named terminal or nonterminal, or one of the two
/// reserved sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// An ordinary symbol, identified by name.
    Named(Rc<str>),
    /// The empty string (`#`). Only ever appears as the sole rhs of a
    /// production.
    Epsilon,
    /// The end-of-input marker (`$`). Never appears in a production; only
    /// produced by FOLLOW-set computation and acceptance checks.
    EndOfInput,
}

impl Symbol {
    /// Builds a named symbol, interning nothing (call sites that construct
    /// many symbols from the same grammar text should share one `Rc<str>`
    /// per distinct name; see `Grammar::construct`).
    pub fn named(name: impl Into<Rc<str>>) -> Self {
        Symbol::Named(name.into())
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Symbol::EndOfInput)
    }

    /// The underlying name, for named symbols only.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Named(n) => Some(n),
            Symbol::Epsilon | Symbol::EndOfInput => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Named(n) => write!(f, "{}", n),
            Symbol::Epsilon => write!(f, "{}", EPSILON_TEXT),
            Symbol::EndOfInput => write!(f, "{}", END_OF_INPUT_TEXT),
        }
    }
}

/// Splits a whitespace-separated alternative into symbols, reusing `intern`
/// to give identical names the same `Rc<str>` allocation.
pub fn symbols_from_alternative<'a>(
    alt: &str,
    mut intern: impl FnMut(&str) -> Rc<str>,
) -> Vec<Symbol> {
    alt.split_whitespace()
        .map(|tok| {
            if tok == EPSILON_TEXT {
                Symbol::Epsilon
            } else if tok == END_OF_INPUT_TEXT {
                Symbol::EndOfInput
            } else {
                Symbol::Named(intern(tok))
            }
        })
        .collect()
}
