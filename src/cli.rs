//! CLI module for the demonstration binary.

use crate::error::{InvalidGrammar, ParseError};
use crate::grammar::Grammar;
use crate::lexer::Lexer;
use crate::parse;
use crate::tree::TreeNode;
use std::fs;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Grammar(#[from] InvalidGrammar),

    #[error(transparent)]
    Lexer(#[from] regex::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reads a grammar from `grammar_path`, parses `input` against it with a
/// literal-terminals-only lexer, and returns the reconstructed tree.
pub fn run(grammar_path: &str, input: &str) -> Result<TreeNode, CliError> {
    let text = fs::read_to_string(grammar_path)?;
    let rules: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let grammar = Grammar::construct(&rules)?;
    let lexer = Lexer::new(&grammar, std::iter::empty::<(String, String)>())?;
    parse(&grammar, &lexer, input).map_err(CliError::from)
}

pub fn print_tree(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::Leaf { symbol, raw } => println!("{indent}{symbol} {raw:?}"),
        TreeNode::Internal { production, children } => {
            println!("{indent}{production}");
            for child in children {
                print_tree(child, depth + 1);
            }
        }
    }
}
