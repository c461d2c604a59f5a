//! FIRST/FOLLOW computation against a worked example grammar:
//!
//!   S -> A B C | s
//!   A -> # | a
//!   B -> A A | b
//!   C -> C B | c S d

use cfg_earley::{Grammar, Symbol};
use std::collections::HashSet;

fn names(symbols: impl IntoIterator<Item = impl Into<String>>) -> HashSet<String> {
    symbols.into_iter().map(Into::into).collect()
}

fn example_grammar() -> Grammar {
    Grammar::construct(&[
        "S -> A B C | s",
        "A -> # | a",
        "B -> A A | b",
        "C -> C B | c S d",
    ])
    .unwrap()
}

fn first_names(grammar: &Grammar, nt: &str) -> HashSet<String> {
    grammar
        .first(&Symbol::named(nt))
        .unwrap()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn follow_names(grammar: &Grammar, nt: &str) -> HashSet<String> {
    grammar
        .follow(&Symbol::named(nt))
        .unwrap()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn first_sets_match_worked_example() {
    let grammar = example_grammar();
    assert_eq!(first_names(&grammar, "S"), names(["a", "b", "c", "s"]));
    assert_eq!(first_names(&grammar, "A"), names(["a", "#"]));
    assert_eq!(first_names(&grammar, "B"), names(["a", "b", "#"]));
    assert_eq!(first_names(&grammar, "C"), names(["c"]));
}

#[test]
fn follow_sets_match_worked_example() {
    let grammar = example_grammar();
    assert_eq!(follow_names(&grammar, "S"), names(["$", "d"]));
    assert_eq!(follow_names(&grammar, "A"), names(["a", "c", "b", "$", "d"]));
    assert_eq!(follow_names(&grammar, "B"), names(["c", "a", "b", "$", "d"]));
    assert_eq!(follow_names(&grammar, "C"), names(["$", "b", "a", "d"]));
}

#[test]
fn nullable_equivalence_holds() {
    let grammar = example_grammar();
    for nt in ["S", "A", "B", "C"] {
        let sym = Symbol::named(nt);
        assert_eq!(
            grammar.nullable_set().contains(&sym),
            grammar.first(&sym).unwrap().contains(&Symbol::Epsilon),
            "nullable/{nt} disagrees with epsilon in FIRST({nt})"
        );
    }
}

#[test]
fn start_symbol_follow_always_contains_end_of_input() {
    let grammar = Grammar::construct(&["S -> a S | a"]).unwrap();
    assert!(grammar
        .follow(grammar.start_symbol())
        .unwrap()
        .contains(&Symbol::EndOfInput));
}
