//! # Glint
//!
//! This binary runs a Glint source file: lex, parse, compile, then execute
//! the resulting bytecode on a fresh VM that prints to standard output.
extern crate glint;

mod cli;

use cli::Cli;

use std::fs;

fn main() {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            println!("Error: {e}");
            return;
        }
    };

    if let Err(e) = glint::run(&source) {
        println!("Error: {e}");
    }
}
