//! Grammar module for context-free grammars.
//!
//! Parses a textual grammar (`LHS -> ALT1 | ALT2 | ...` per rule), canonicalises
//! it into ordered productions, and computes the derived sets (nullable,
//! FIRST, FOLLOW) that the Earley recognizer needs.

use crate::error::InvalidGrammar;
use crate::first_follow::{self, FirstSets, FollowSets};
use crate::ordered_set::OrderedSet;
use crate::symbol::{symbols_from_alternative, Symbol, ALTERNATIVE_SEP, ARROW};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A production rule: `lhs -> rhs`, where `rhs` is `[Symbol::Epsilon]` for
/// an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self.rhs.as_slice(), [Symbol::Epsilon])
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// A context-free grammar: productions in source order plus the derived
/// nonterminal/terminal sets, nullable set, and FIRST/FOLLOW tables.
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    nonterminals: OrderedSet<Symbol>,
    terminals: OrderedSet<Symbol>,
    symbols: OrderedSet<Symbol>,
    start_symbol: Symbol,
    nullable: OrderedSet<Symbol>,
    first_sets: FirstSets,
    follow_sets: FollowSets,
}

impl Grammar {
    /// Parses and validates a grammar from rule text, one rule per entry,
    /// then computes nullable/FIRST/FOLLOW by fixed-point iteration.
    pub fn construct<S: AsRef<str>>(rules: &[S]) -> Result<Self, InvalidGrammar> {
        let mut interned: HashMap<String, Rc<str>> = HashMap::new();
        let mut intern = move |name: &str| -> Rc<str> {
            if let Some(existing) = interned.get(name) {
                return existing.clone();
            }
            let rc: Rc<str> = Rc::from(name);
            interned.insert(name.to_string(), rc.clone());
            rc
        };

        let mut productions = Vec::new();
        let mut nonterminals: OrderedSet<Symbol> = OrderedSet::new();
        let mut symbols: OrderedSet<Symbol> = OrderedSet::new();

        for rule in rules {
            let rule = rule.as_ref();
            if rule.matches(ARROW).count() != 1 {
                return Err(InvalidGrammar(format!(
                    "rule must contain exactly one `->`: {rule:?}"
                )));
            }
            let (lhs_str, rhs_str) = rule.split_once(ARROW).expect("checked above");
            let lhs_str = lhs_str.trim();
            if lhs_str.is_empty() || lhs_str == "$" || lhs_str == ALTERNATIVE_SEP {
                return Err(InvalidGrammar(format!(
                    "invalid left-hand side in rule: {rule:?}"
                )));
            }
            let lhs = Symbol::Named(intern(lhs_str));
            nonterminals.add(lhs.clone());
            symbols.add(lhs.clone());

            for alt in rhs_str.split(ALTERNATIVE_SEP) {
                let alt = alt.trim();
                if alt.is_empty() {
                    return Err(InvalidGrammar(format!(
                        "empty alternative in rule: {rule:?}"
                    )));
                }
                let rhs = symbols_from_alternative(alt, &mut intern);
                if rhs.is_empty() {
                    return Err(InvalidGrammar(format!(
                        "empty alternative in rule: {rule:?}"
                    )));
                }
                if rhs.contains(&Symbol::EndOfInput) {
                    return Err(InvalidGrammar(format!(
                        "`$` is forbidden in a production: {rule:?}"
                    )));
                }
                if rhs.contains(&Symbol::Epsilon) && rhs.len() > 1 {
                    return Err(InvalidGrammar(format!(
                        "`#` must be the sole symbol of an alternative: {rule:?}"
                    )));
                }
                for sym in &rhs {
                    if matches!(sym, Symbol::Named(_)) {
                        symbols.add(sym.clone());
                    }
                }
                productions.push(Production::new(lhs.clone(), rhs));
            }
        }

        if productions.is_empty() {
            return Err(InvalidGrammar("grammar has no productions".to_string()));
        }

        let start_symbol = productions[0].lhs.clone();

        let mut terminals: OrderedSet<Symbol> = OrderedSet::new();
        for prod in &productions {
            for sym in &prod.rhs {
                if let Symbol::Named(_) = sym {
                    if !nonterminals.contains(sym) {
                        terminals.add(sym.clone());
                    }
                }
            }
        }

        let nullable = first_follow::compute_nullable(&productions);
        let first_sets = first_follow::compute_first_sets(&productions, &nonterminals, &nullable);
        let follow_sets = first_follow::compute_follow_sets(
            &productions,
            &nonterminals,
            &start_symbol,
            &nullable,
            &first_sets,
        );

        Ok(Self {
            productions,
            nonterminals,
            terminals,
            symbols,
            start_symbol,
            nullable,
            first_sets,
            follow_sets,
        })
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Alternatives of `nonterm` in original rule order.
    pub fn rules_for(&self, nonterm: &Symbol) -> impl Iterator<Item = &Production> {
        self.productions.iter().filter(move |p| &p.lhs == nonterm)
    }

    pub fn nonterms(&self) -> &OrderedSet<Symbol> {
        &self.nonterminals
    }

    pub fn terms(&self) -> &OrderedSet<Symbol> {
        &self.terminals
    }

    /// Every symbol (terminal or nonterminal) appearing anywhere in the
    /// grammar, in first-occurrence order (productions scanned top to
    /// bottom, each rhs left to right, lhs counted first). Excludes the
    /// reserved sentinels `#`/`$`, which are not grammar symbols.
    pub fn symbols(&self) -> &OrderedSet<Symbol> {
        &self.symbols
    }

    pub fn is_nonterminal(&self, sym: &Symbol) -> bool {
        self.nonterminals.contains(sym)
    }

    pub fn is_terminal(&self, sym: &Symbol) -> bool {
        self.terminals.contains(sym)
    }

    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn nullable_set(&self) -> &OrderedSet<Symbol> {
        &self.nullable
    }

    pub fn is_nullable(&self, sym: &Symbol) -> bool {
        matches!(sym, Symbol::Epsilon) || self.nullable.contains(sym)
    }

    pub fn first_sets(&self) -> &FirstSets {
        &self.first_sets
    }

    pub fn follow_sets(&self) -> &FollowSets {
        &self.follow_sets
    }

    pub fn first(&self, sym: &Symbol) -> Option<&OrderedSet<Symbol>> {
        self.first_sets.get(sym)
    }

    pub fn follow(&self, sym: &Symbol) -> Option<&OrderedSet<Symbol>> {
        self.follow_sets.get(sym)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in &self.productions {
            writeln!(f, "{}", prod)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_rule_with_surrounding_whitespace() {
        assert!(Grammar::construct(&["S -> a"]).is_ok());
        assert!(Grammar::construct(&[" S -> a "]).is_ok());
        assert!(Grammar::construct(&["S->a"]).is_ok());
    }

    #[test]
    fn rejects_empty_rule_set() {
        let rules: &[&str] = &[];
        assert!(Grammar::construct(rules).is_err());
    }

    #[test]
    fn rejects_dollar_in_rhs() {
        assert!(Grammar::construct(&["S -> $"]).is_err());
    }

    #[test]
    fn rejects_trailing_empty_alternative() {
        assert!(Grammar::construct(&["S -> a |"]).is_err());
    }

    #[test]
    fn rejects_epsilon_mixed_with_other_symbols() {
        assert!(Grammar::construct(&["S -> # a"]).is_err());
    }

    #[test]
    fn rejects_double_arrow() {
        assert!(Grammar::construct(&["S ->->"]).is_err());
    }

    #[test]
    fn rejects_missing_rhs() {
        assert!(Grammar::construct(&["S ->"]).is_err());
    }

    #[test]
    fn rejects_empty_lhs() {
        assert!(Grammar::construct(&[" -> a"]).is_err());
    }

    #[test]
    fn rejects_rule_with_no_arrow() {
        assert!(Grammar::construct(&["S"]).is_err());
    }

    #[test]
    fn first_production_lhs_is_start_symbol() {
        let g = Grammar::construct(&["S -> A", "A -> a"]).unwrap();
        assert_eq!(g.start_symbol(), &Symbol::named("S"));
    }

    #[test]
    fn terminals_exclude_nonterminals_and_sentinels() {
        let g = Grammar::construct(&["S -> A a", "A -> #"]).unwrap();
        assert!(g.is_terminal(&Symbol::named("a")));
        assert!(!g.is_terminal(&Symbol::named("A")));
        assert!(g.is_nonterminal(&Symbol::named("A")));
    }

    #[test]
    fn symbols_covers_terms_and_nonterms_in_first_occurrence_order() {
        let g = Grammar::construct(&["S -> A b", "A -> a | #"]).unwrap();
        let names: Vec<_> = g.symbols().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["S", "A", "b", "a"]);
        for sym in g.nonterms().iter() {
            assert!(g.symbols().contains(sym));
        }
        for sym in g.terms().iter() {
            assert!(g.symbols().contains(sym));
        }
        assert!(!g.symbols().contains(&Symbol::Epsilon));
    }
}
