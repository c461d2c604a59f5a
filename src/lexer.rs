//! Longest-match tokenizer: the one concrete lexer this crate ships behind
//! the contract the recognizer is specified against (`(name, raw)` token
//! pairs, literal terminals winning ties against regex patterns).
//!
//! Input is split on whitespace into words; within a word, at every
//! position the scanner considers every grammar terminal not covered by a
//! supplied pattern (matched literally) and every supplied pattern (matched
//! by regex, anchored to the position). Literal matches beat pattern
//! matches of equal length; among equal-priority matches the longest wins.
//! A position with no match at all yields a synthetic empty-name token for
//! the offending character and the tokenizer keeps going, recording only
//! the first failure.

use crate::error::ParseError;
use crate::grammar::Grammar;
use regex::Regex;
use std::collections::HashSet;

/// One lexed unit: `name` identifies a grammar terminal (or is empty for a
/// synthetic failure token); `raw` is the surface text consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub raw: String,
}

impl Token {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.name.is_empty()
    }
}

/// A longest-match lexer over a grammar's literal terminals plus an
/// ordered list of regex patterns.
pub struct Lexer<'g> {
    grammar: &'g Grammar,
    patterns: Vec<(String, Regex)>,
}

impl<'g> Lexer<'g> {
    /// `patterns` is an ordered list of `(token_name, regex)`; patterns are
    /// anchored to the current scan position automatically (callers should
    /// not prefix them with `^`).
    pub fn new(
        grammar: &'g Grammar,
        patterns: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .into_iter()
            .map(|(name, pattern)| {
                Regex::new(&format!("^(?:{pattern})")).map(|re| (name, re))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { grammar, patterns })
    }

    fn literal_terminals(&self) -> impl Iterator<Item = &str> {
        let pattern_names: HashSet<&str> = self.patterns.iter().map(|(n, _)| n.as_str()).collect();
        self.grammar.terms().iter().filter_map(move |t| {
            t.name().filter(|n| !pattern_names.contains(n))
        })
    }

    /// Tokenizes `input`. Returns the full token list on success; on the
    /// first unmatched position records it and keeps lexing, returning
    /// `LexFailure` with the partial (including synthetic failure) tokens.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut first_failure: Option<usize> = None;

        for (word_start, word) in words_with_offsets(input) {
            let mut pos = 0usize;
            while pos < word.len() {
                let remaining = &word[pos..];
                match self.best_match(remaining) {
                    Some((len, name)) => {
                        log::trace!("lexed {name:?} = {:?} at {}", &remaining[..len], word_start + pos);
                        tokens.push(Token::new(name, &remaining[..len]));
                        pos += len;
                    }
                    None => {
                        if first_failure.is_none() {
                            first_failure = Some(word_start + pos);
                        }
                        let ch_len = remaining.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
                        log::debug!("no terminal or pattern matches at byte {}", word_start + pos);
                        tokens.push(Token::new("", &remaining[..ch_len]));
                        pos += ch_len;
                    }
                }
            }
        }

        match first_failure {
            Some(position) => Err(ParseError::LexFailure { position, tokens }),
            None => {
                log::debug!("lexed {} tokens", tokens.len());
                Ok(tokens)
            }
        }
    }

    /// Longest match at the start of `remaining`, literal terminals
    /// breaking ties against patterns of equal length.
    fn best_match(&self, remaining: &str) -> Option<(usize, &str)> {
        let mut best: Option<(usize, &str)> = None;

        for name in self.literal_terminals() {
            if !name.is_empty() && remaining.starts_with(name) {
                let len = name.len();
                if best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, name));
                }
            }
        }

        for (name, re) in &self.patterns {
            if let Some(m) = re.find(remaining) {
                let len = m.end();
                if len > 0 && best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, name.as_str()));
                }
            }
        }

        best
    }
}

/// Splits `input` on whitespace, yielding `(byte_offset, word)` pairs.
fn words_with_offsets(input: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut idx = 0;
    while idx < input.len() {
        let mut chars = input[idx..].char_indices();
        match chars.next() {
            Some((_, c)) if c.is_whitespace() => {
                idx += c.len_utf8();
                continue;
            }
            None => break,
            _ => {}
        }
        let start = idx;
        loop {
            match input[idx..].chars().next() {
                Some(c) if !c.is_whitespace() => idx += c.len_utf8(),
                _ => break,
            }
        }
        words.push((start, &input[start..idx]));
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn literal_terminal_beats_pattern_of_equal_length() {
        let grammar = Grammar::construct(&["S -> while | id"]).unwrap();
        let lexer = Lexer::new(&grammar, [("id".to_string(), "[a-z]+".to_string())]).unwrap();
        let tokens = lexer.tokenize("while").unwrap();
        assert_eq!(tokens, vec![Token::new("while", "while")]);
    }

    #[test]
    fn longest_match_wins_among_patterns() {
        let grammar = Grammar::construct(&["S -> a"]).unwrap();
        let lexer = Lexer::new(
            &grammar,
            [
                ("short".to_string(), "a".to_string()),
                ("long".to_string(), "ab".to_string()),
            ],
        )
        .unwrap();
        let tokens = lexer.tokenize("ab").unwrap();
        assert_eq!(tokens, vec![Token::new("long", "ab")]);
    }

    #[test]
    fn unmatched_character_yields_failure_and_continues() {
        let grammar = Grammar::construct(&["S -> a"]).unwrap();
        let lexer = Lexer::new(&grammar, []).unwrap();
        let err = lexer.tokenize("a#").unwrap_err();
        match err {
            ParseError::LexFailure { position, tokens } => {
                assert_eq!(position, 1);
                assert_eq!(tokens, vec![Token::new("a", "a"), Token::new("", "#")]);
            }
            other => panic!("expected LexFailure, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_separated_words_round_trip() {
        let grammar = Grammar::construct(&["S -> a b"]).unwrap();
        let lexer = Lexer::new(&grammar, []).unwrap();
        let tokens = lexer.tokenize("  a   b ").unwrap();
        let raw: String = tokens.iter().map(|t| t.raw.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(raw, "a b");
    }
}
