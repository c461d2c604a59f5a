//! Earley chart construction.
//!
//! Builds the chart over an augmented grammar (the grammar's own
//! productions plus a synthetic `S' -> S`) and decides acceptance. Items
//! are `(production_index, dot)` pairs into the augmented production table
//! rather than owning a copy of a production's rhs, so `Item` stays `Copy`.
//! Entries live in a flat arena; predecessor links are arena indices, so
//! the chart never needs a cyclic entry graph.

use crate::error::ParseError;
use crate::grammar::{Grammar, Production};
use crate::lexer::Token;
use crate::ordered_set::OrderedSet;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// A dotted item: `rhs[dot]` is the symbol still to be matched (absent for
/// a reduce item, where `dot == rhs.len()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
}

/// The chart-level identity of an entry: an item plus the column its
/// production was predicted in. Two entries with the same key in the same
/// column are the same entry — the chart dedups on this and unions
/// predecessors on collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub item: Item,
    pub origin: usize,
}

/// An arena-resident chart entry: its key, the column it lives in, and the
/// (insertion-ordered) arena indices of entries that caused it to be added.
#[derive(Debug, Clone)]
pub struct EntryData {
    pub key: EntryKey,
    pub column: usize,
    pub predecessors: Vec<usize>,
}

#[derive(Debug, Default)]
struct Column {
    order: OrderedSet<EntryKey>,
    lookup: HashMap<EntryKey, usize>,
}

/// The Earley chart: `n + 1` insertion-ordered, deduplicated columns of
/// entries, plus the flat arena they index into.
#[derive(Debug)]
pub struct Chart {
    columns: Vec<Column>,
    arena: Vec<EntryData>,
}

impl Chart {
    fn new(num_columns: usize) -> Self {
        Self {
            columns: (0..num_columns).map(|_| Column::default()).collect(),
            arena: Vec::new(),
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn entry(&self, idx: usize) -> &EntryData {
        &self.arena[idx]
    }

    pub fn lookup(&self, column: usize, key: &EntryKey) -> Option<usize> {
        self.columns[column].lookup.get(key).copied()
    }

    /// Dedup on `(item, origin)`: a new key gets a fresh arena slot; a
    /// colliding key just augments the existing entry's predecessor set.
    fn insert(&mut self, column: usize, key: EntryKey, predecessor: Option<usize>) -> usize {
        if let Some(&idx) = self.columns[column].lookup.get(&key) {
            if let Some(p) = predecessor {
                self.arena[idx].predecessors.push(p);
            }
            return idx;
        }
        let idx = self.arena.len();
        self.arena.push(EntryData {
            key,
            column,
            predecessors: predecessor.into_iter().collect(),
        });
        self.columns[column].lookup.insert(key, idx);
        self.columns[column].order.add(key);
        idx
    }
}

/// The grammar's productions plus a synthetic start production `S' -> S`,
/// where `S'` is a name guaranteed not to collide with any nonterminal the
/// grammar already defines.
pub struct AugmentedGrammar<'g> {
    grammar: &'g Grammar,
    productions: Vec<Production>,
    pub start_index: usize,
}

impl<'g> AugmentedGrammar<'g> {
    pub fn build(grammar: &'g Grammar) -> Self {
        let mut name = format!("{}'", grammar.start_symbol());
        while grammar.is_nonterminal(&Symbol::named(name.as_str())) {
            name.push('\'');
        }
        let mut productions = grammar.productions().to_vec();
        let start_index = productions.len();
        productions.push(Production::new(
            Symbol::named(name),
            vec![grammar.start_symbol().clone()],
        ));
        Self {
            grammar,
            productions,
            start_index,
        }
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, idx: usize) -> &Production {
        &self.productions[idx]
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn accept_key(&self) -> EntryKey {
        EntryKey {
            item: Item {
                prod: self.start_index,
                dot: 1,
            },
            origin: 0,
        }
    }
}

/// The outcome of a successful recognition: the chart, the augmented
/// grammar it was built against, and the arena index of the accepting
/// entry (useful so the reconstructor doesn't have to look it up again).
pub struct Recognition<'g> {
    pub chart: Chart,
    pub augmented: AugmentedGrammar<'g>,
    pub accept: usize,
}

/// Builds the Earley chart over `tokens` and decides acceptance.
pub fn recognize<'g>(grammar: &'g Grammar, tokens: &[Token]) -> Result<Recognition<'g>, ParseError> {
    let augmented = AugmentedGrammar::build(grammar);
    let n = tokens.len();
    let mut chart = Chart::new(n + 1);

    let seed = EntryKey {
        item: Item {
            prod: augmented.start_index,
            dot: 0,
        },
        origin: 0,
    };
    chart.insert(0, seed, None);

    for k in 0..=n {
        let mut cursor = chart.columns[k].order.cursor();
        while let Some((key, next)) = chart.columns[k].order.advance(cursor).map(|(v, c)| (*v, c)) {
            cursor = next;
            let e_idx = chart.columns[k]
                .lookup
                .get(&key)
                .copied()
                .expect("key yielded by cursor must already be indexed");
            process_entry(&augmented, tokens, &mut chart, key, k, e_idx, n);
        }
        log::trace!("column {k}: {} entries", chart.columns[k].order.count());
    }

    match chart.lookup(n, &augmented.accept_key()) {
        Some(accept) => {
            log::debug!("accepted after {} columns", chart.num_columns());
            Ok(Recognition {
                chart,
                augmented,
                accept,
            })
        }
        None => {
            log::debug!("rejected: no accepting entry in column {n}");
            Err(ParseError::ParseRejected)
        }
    }
}

fn process_entry(
    aug: &AugmentedGrammar,
    tokens: &[Token],
    chart: &mut Chart,
    key: EntryKey,
    k: usize,
    e_idx: usize,
    n: usize,
) {
    let prod = aug.production(key.item.prod);

    if key.item.dot == 0 && prod.is_epsilon() {
        let advanced = EntryKey {
            item: Item {
                prod: key.item.prod,
                dot: 1,
            },
            origin: key.origin,
        };
        chart.insert(k, advanced, Some(e_idx));
        return;
    }

    if let Some(x) = prod.rhs.get(key.item.dot) {
        if aug.grammar().is_nonterminal(x) {
            for (p_idx, p) in aug.productions().iter().enumerate() {
                if &p.lhs == x {
                    let predicted = EntryKey {
                        item: Item { prod: p_idx, dot: 0 },
                        origin: k,
                    };
                    chart.insert(k, predicted, Some(e_idx));
                }
            }
        } else if k < n && x.name() == Some(tokens[k].name.as_str()) {
            let advanced = EntryKey {
                item: Item {
                    prod: key.item.prod,
                    dot: key.item.dot + 1,
                },
                origin: key.origin,
            };
            chart.insert(k + 1, advanced, Some(e_idx));
        }
        return;
    }

    // Reduce item: complete against everything waiting on `prod.lhs` in
    // the origin column. A plain forward cursor already gives us the
    // mutable-iterate behaviour needed here: when `key.origin == k`,
    // insertions this loop makes land in the very column it is walking,
    // and the cursor's forward links reach them before the loop ends.
    let a = &prod.lhs;
    let mut cursor = chart.columns[key.origin].order.cursor();
    while let Some((waiting, next)) = chart.columns[key.origin]
        .order
        .advance(cursor)
        .map(|(v, c)| (*v, c))
    {
        cursor = next;
        let waiting_prod = aug.production(waiting.item.prod);
        if waiting_prod.rhs.get(waiting.item.dot) == Some(a) {
            let advanced = EntryKey {
                item: Item {
                    prod: waiting.item.prod,
                    dot: waiting.item.dot + 1,
                },
                origin: waiting.origin,
            };
            chart.insert(k, advanced, Some(e_idx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn tok(name: &str) -> Token {
        Token::new(name, name)
    }

    #[test]
    fn accepts_matching_input() {
        let grammar = Grammar::construct(&["S -> a S b", "S -> #"]).unwrap();
        let tokens = vec![tok("a"), tok("a"), tok("b"), tok("b")];
        assert!(recognize(&grammar, &tokens).is_ok());
    }

    #[test]
    fn rejects_non_matching_input() {
        let grammar = Grammar::construct(&["S -> a b"]).unwrap();
        let tokens = vec![tok("a")];
        assert!(matches!(
            recognize(&grammar, &tokens),
            Err(ParseError::ParseRejected)
        ));
    }

    #[test]
    fn accepts_empty_input_for_nullable_start() {
        let grammar = Grammar::construct(&["S -> #"]).unwrap();
        assert!(recognize(&grammar, &[]).is_ok());
    }

    #[test]
    fn handles_left_recursion() {
        let grammar = Grammar::construct(&["S -> S a", "S -> a"]).unwrap();
        let tokens = vec![tok("a"), tok("a"), tok("a")];
        assert!(recognize(&grammar, &tokens).is_ok());
    }
}
