//! A thin demonstration binary for the Earley parsing library.
//!
//! Reads a grammar from a file, an input string from the next argument,
//! and prints the reconstructed parse tree (or the failure that prevented
//! one). Not exercised by the crate's own test suite — see `tests/` for
//! the behavioral coverage.

use cfg_earley::cli;
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let (grammar_path, input) = match (args.next(), args.next()) {
        (Some(g), Some(i)) => (g, i),
        _ => {
            eprintln!("usage: cfg_earley <grammar-file> <input>");
            process::exit(2);
        }
    };

    match cli::run(&grammar_path, &input) {
        Ok(tree) => cli::print_tree(&tree, 0),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
