//! End-to-end parse scenarios covering nullable derivations, ambiguity
//! tie-breaking, rejection, lex failure, and determinism.

use cfg_earley::{parse_tokens, Grammar, Lexer, ParseError, Token};

fn tok(name: &str) -> Token {
    Token::new(name, name)
}

fn tokens(names: &[&str]) -> Vec<Token> {
    names.iter().map(|n| tok(n)).collect()
}

#[test]
fn nested_nullable_grammar_accepts_and_yield_matches_input() {
    let grammar = Grammar::construct(&[
        "S -> A S | #",
        "A -> a B",
        "B -> b C b",
        "C -> c C | #",
    ])
    .unwrap();
    let w = tokens(&["a", "b", "c", "c", "b", "a", "b", "b"]);
    let tree = parse_tokens(&grammar, &w).expect("input is in the language");
    assert_eq!(tree.yield_raw(), vec!["a", "b", "c", "c", "b", "a", "b", "b"]);
}

#[test]
fn nullable_start_symbol_accepts_empty_token_stream() {
    let grammar = Grammar::construct(&[
        "S -> A S | #",
        "A -> a B",
        "B -> b C b",
        "C -> c C | #",
    ])
    .unwrap();
    let tree = parse_tokens(&grammar, &[]).expect("empty input derives S -> #");
    assert!(tree.yield_raw().is_empty());
}

#[test]
fn dangling_else_grammar_accepts() {
    let grammar = Grammar::construct(&["S -> A S | #", "A -> if A | if A else A | ;"]).unwrap();
    let w = tokens(&["if", "if", ";", "else", ";"]);
    let tree = parse_tokens(&grammar, &w).expect("input is in the language");
    assert_eq!(tree.yield_raw(), vec!["if", "if", ";", "else", ";"]);
}

#[test]
fn mismatched_token_stream_is_rejected() {
    let grammar = Grammar::construct(&["S -> A B | #", "A -> A num | num", "B -> abc | id | #"])
        .unwrap();
    let w = tokens(&["num", "id", "num"]);
    assert!(matches!(
        parse_tokens(&grammar, &w),
        Err(ParseError::ParseRejected)
    ));
}

#[test]
fn lexer_failure_on_unlexable_terminal() {
    let grammar = Grammar::construct(&["S -> A B | #", "A -> A num | num", "B -> abc | id | #"])
        .unwrap();
    let lexer = Lexer::new(
        &grammar,
        [
            ("num".to_string(), r"[0-9]+".to_string()),
            ("id".to_string(), r"[a-zA-Z]+".to_string()),
        ],
    )
    .unwrap();
    let err = lexer.tokenize("4 #").unwrap_err();
    match err {
        ParseError::LexFailure { position, .. } => assert_eq!(position, 2),
        other => panic!("expected LexFailure, got {other:?}"),
    }
}

#[test]
fn parse_is_deterministic_across_runs() {
    let grammar = Grammar::construct(&["S -> A S | #", "A -> if A | if A else A | ;"]).unwrap();
    let w = tokens(&["if", "if", ";", "else", ";"]);
    let first = parse_tokens(&grammar, &w).unwrap();
    let second = parse_tokens(&grammar, &w).unwrap();
    assert_eq!(first, second);
}

#[test]
fn left_recursive_arithmetic_grammar_parses_via_lexer() {
    let grammar = Grammar::construct(&[
        "E -> E plus T | T",
        "T -> T star F | F",
        "F -> lparen E rparen | id",
    ])
    .unwrap();
    let lexer = Lexer::new(
        &grammar,
        [
            ("id".to_string(), r"[a-z]+".to_string()),
            ("plus".to_string(), r"\+".to_string()),
            ("star".to_string(), r"\*".to_string()),
            ("lparen".to_string(), r"\(".to_string()),
            ("rparen".to_string(), r"\)".to_string()),
        ],
    )
    .unwrap();
    let tree = cfg_earley::parse(&grammar, &lexer, "i + i * ( i + i )").unwrap();
    assert_eq!(
        tree.yield_raw(),
        vec!["i", "+", "i", "*", "(", "i", "+", "i", ")"]
    );
}
