//! Nullable/FIRST/FOLLOW computation by fixed-point iteration.
//!
//! Operates on raw production lists rather than a built [`crate::grammar::Grammar`]
//! because the grammar itself is constructed from these results — see
//! `Grammar::construct`.

use crate::grammar::Production;
use crate::ordered_set::OrderedSet;
use crate::symbol::Symbol;
use std::collections::HashMap;

pub type FirstSets = HashMap<Symbol, OrderedSet<Symbol>>;
pub type FollowSets = HashMap<Symbol, OrderedSet<Symbol>>;

/// N is nullable iff some alternative of N consists entirely of `#` or
/// already-nullable symbols. `#` itself is not a member of the returned set.
pub fn compute_nullable(productions: &[Production]) -> OrderedSet<Symbol> {
    let mut nullable: OrderedSet<Symbol> = OrderedSet::new();
    loop {
        let mut changed = false;
        for prod in productions {
            if nullable.contains(&prod.lhs) {
                continue;
            }
            let all_nullable = prod
                .rhs
                .iter()
                .all(|s| matches!(s, Symbol::Epsilon) || nullable.contains(s));
            if all_nullable {
                nullable.add(prod.lhs.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    nullable
}

/// FIRST(X) terminals only (epsilon stripped), reading from whatever state
/// `first` holds so far — used both mid fixed-point (on FIRST) and once FIRST
/// has converged (on FOLLOW).
fn first_terms_of(sym: &Symbol, nonterminals: &OrderedSet<Symbol>, first: &FirstSets) -> Vec<Symbol> {
    if nonterminals.contains(sym) {
        first
            .get(sym)
            .map(|s| {
                s.iter()
                    .filter(|t| !matches!(t, Symbol::Epsilon))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    } else if matches!(sym, Symbol::Epsilon) {
        Vec::new()
    } else {
        vec![sym.clone()]
    }
}

/// Walks a symbol string left to right, returning (terminals contributed,
/// whether the whole string is nullable). This is FIRST-of-a-string, used
/// both to fold a production's rhs into FIRST(lhs) and to compute FIRST(beta)
/// during FOLLOW.
fn first_of_sequence(seq: &[Symbol], nonterminals: &OrderedSet<Symbol>, first: &FirstSets) -> (Vec<Symbol>, bool) {
    let mut terms = Vec::new();
    for sym in seq {
        let sym_nullable = matches!(sym, Symbol::Epsilon) || {
            nonterminals.contains(sym)
                && first
                    .get(sym)
                    .is_some_and(|s| s.contains(&Symbol::Epsilon))
        };
        terms.extend(first_terms_of(sym, nonterminals, first));
        if !sym_nullable {
            return (terms, false);
        }
    }
    (terms, true)
}

/// FIRST(X) for every nonterminal X, by fixed-point iteration over productions.
pub fn compute_first_sets(
    productions: &[Production],
    nonterminals: &OrderedSet<Symbol>,
    _nullable: &OrderedSet<Symbol>,
) -> FirstSets {
    let mut first: FirstSets = HashMap::new();
    for nt in nonterminals.iter() {
        first.insert(nt.clone(), OrderedSet::new());
    }

    loop {
        let mut changed = false;
        for prod in productions {
            let (terms, derives_epsilon) = first_of_sequence(&prod.rhs, nonterminals, &first);
            let entry = first.get_mut(&prod.lhs).expect("lhs is a nonterminal");
            for t in terms {
                if entry.add(t) {
                    changed = true;
                }
            }
            if derives_epsilon && entry.add(Symbol::Epsilon) {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    first
}

/// FOLLOW(N) for every nonterminal N, by fixed-point iteration over
/// productions walked right to left.
pub fn compute_follow_sets(
    productions: &[Production],
    nonterminals: &OrderedSet<Symbol>,
    start_symbol: &Symbol,
    nullable: &OrderedSet<Symbol>,
    first_sets: &FirstSets,
) -> FollowSets {
    let mut follow: FollowSets = HashMap::new();
    for nt in nonterminals.iter() {
        follow.insert(nt.clone(), OrderedSet::new());
    }
    follow
        .get_mut(start_symbol)
        .expect("start symbol is a nonterminal")
        .add(Symbol::EndOfInput);

    loop {
        let mut changed = false;
        for prod in productions {
            let mut trailer: Vec<Symbol> = follow
                .get(&prod.lhs)
                .expect("lhs is a nonterminal")
                .iter()
                .cloned()
                .collect();

            for sym in prod.rhs.iter().rev() {
                if matches!(sym, Symbol::Epsilon) {
                    continue;
                }
                if nonterminals.contains(sym) {
                    let entry = follow.get_mut(sym).expect("nonterminal has a FOLLOW set");
                    for t in &trailer {
                        if entry.add(t.clone()) {
                            changed = true;
                        }
                    }
                }
                let is_nullable = nullable.contains(sym);
                let first_terms = first_terms_of(sym, nonterminals, first_sets);
                if is_nullable {
                    for t in first_terms {
                        if !trailer.contains(&t) {
                            trailer.push(t);
                        }
                    }
                } else {
                    trailer = first_terms;
                }
            }
        }
        if !changed {
            break;
        }
    }

    follow
}
