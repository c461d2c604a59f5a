//! Concrete parse tree reconstruction.
//!
//! Walks the rightmost derivation backwards from the accepting entry,
//! implemented as a direct recursion over dotted items rather than the
//! dual-stack machine of the prose description: the chart's `(item, origin)`
//! dedup invariant makes "the pre-advance entry in column m" a single O(1)
//! lookup, so there is no need to re-derive it from predecessor links.
//! Where a predecessor choice is ambiguous (an alternative Y completion),
//! the first insertion-ordered candidate wins, matching "earlier grammar
//! alternatives win".

use crate::earley::{EntryKey, Item, Recognition};
use crate::error::ParseError;
use crate::grammar::Production;
use crate::lexer::Token;
use crate::symbol::Symbol;

/// A concrete parse tree node: a leaf (terminal lexeme or epsilon) or an
/// internal node carrying the production it was derived from and its
/// ordered children.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf { symbol: Symbol, raw: String },
    Internal {
        production: Production,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    /// The raw lexemes of this subtree's leaves, left to right.
    pub fn yield_raw(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_yield(&mut out);
        out
    }

    fn collect_yield<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TreeNode::Leaf { symbol, raw } => {
                if !symbol.is_epsilon() {
                    out.push(raw.as_str());
                }
            }
            TreeNode::Internal { children, .. } => {
                for child in children {
                    child.collect_yield(out);
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }
}

/// Reconstructs the single concrete parse tree for a successful
/// [`Recognition`], stripping the synthetic `S' -> S` augmentation.
pub fn reconstruct(recognition: &Recognition, tokens: &[Token]) -> Result<TreeNode, ParseError> {
    let root = reconstruct_reduce(recognition, tokens, recognition.accept)?;
    match root {
        TreeNode::Internal { mut children, .. } if children.len() == 1 => {
            Ok(children.pop().expect("checked len == 1"))
        }
        _ => Err(ParseError::InternalError(
            "synthetic start production did not reduce to exactly one child".to_string(),
        )),
    }
}

/// Builds the subtree for the reduce entry at arena index `idx`: walks its
/// production's rhs from the dot back to the start, resolving each symbol
/// to a leaf (terminal/epsilon) or a recursively-built nonterminal child.
fn reconstruct_reduce(
    recognition: &Recognition,
    tokens: &[Token],
    idx: usize,
) -> Result<TreeNode, ParseError> {
    let chart = &recognition.chart;
    let aug = &recognition.augmented;

    let entry = chart.entry(idx);
    let EntryKey { item, origin } = entry.key;
    let column = entry.column;
    let prod = aug.production(item.prod);

    if item.dot != prod.rhs.len() {
        return Err(ParseError::InternalError(format!(
            "reconstruction expected a reduce item, got dot {} of {}",
            item.dot,
            prod.rhs.len()
        )));
    }

    if prod.is_epsilon() {
        return Ok(TreeNode::Internal {
            production: prod.clone(),
            children: vec![TreeNode::Leaf {
                symbol: Symbol::Epsilon,
                raw: String::new(),
            }],
        });
    }

    let mut children_rev = Vec::with_capacity(prod.rhs.len());
    let mut dot = item.dot;
    let mut cur_col = column;
    let mut current_idx = idx;

    while dot > 0 {
        let y = &prod.rhs[dot - 1];

        if aug.grammar().is_terminal(y) {
            if cur_col == 0 {
                return Err(ParseError::InternalError(
                    "terminal consumption ran past the start of input".to_string(),
                ));
            }
            let token = &tokens[cur_col - 1];
            children_rev.push(TreeNode::Leaf {
                symbol: y.clone(),
                raw: token.raw.clone(),
            });
            dot -= 1;
            cur_col -= 1;
        } else {
            let predecessors = &chart.entry(current_idx).predecessors;
            let y_idx = predecessors
                .iter()
                .copied()
                .find(|&p| {
                    let pe = chart.entry(p);
                    let pprod = aug.production(pe.key.item.prod);
                    pe.key.item.dot == pprod.rhs.len() && &pprod.lhs == y
                })
                .ok_or_else(|| {
                    ParseError::InternalError(format!(
                        "no predecessor completes nonterminal {y} in the expected derivation"
                    ))
                })?;
            let child = reconstruct_reduce(recognition, tokens, y_idx)?;
            children_rev.push(child);
            cur_col = chart.entry(y_idx).key.origin;
            dot -= 1;
        }

        if dot > 0 {
            let target_key = EntryKey {
                item: Item {
                    prod: item.prod,
                    dot,
                },
                origin,
            };
            current_idx = chart.lookup(cur_col, &target_key).ok_or_else(|| {
                ParseError::InternalError(
                    "missing pre-advance chart entry during reconstruction".to_string(),
                )
            })?;
        }
    }

    children_rev.reverse();
    Ok(TreeNode::Internal {
        production: prod.clone(),
        children: children_rev,
    })
}
