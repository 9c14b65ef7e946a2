//! Glint is a small imperative scripting language: a source-to-bytecode
//! front end (lexer, parser, compiler) and a stack-based virtual machine
//! that executes the resulting bytecode.

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod vm;

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::error::Error;
use crate::vm::Value;

/// Run a complete Glint program from source, returning whatever `__main__`
/// or `main` returned (or [`Value::Null`] if neither produced a value).
///
/// This drives the whole pipeline described in the crate root docs: lex,
/// parse, compile, then execute on a fresh [`vm::Vm`] that writes `print`
/// output to `out`.
pub fn run_with_output(source: &str, out: Rc<RefCell<dyn Write>>) -> Result<Value, Error> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse(tokens)?;
    let (functions, uses) = compiler::compile(&program)?;
    let mut vm = vm::Vm::new(functions, uses, out);
    Ok(vm.run()?)
}

/// Convenience wrapper that prints to the process's standard output, used
/// by the `glint` binary.
pub fn run(source: &str) -> Result<Value, Error> {
    run_with_output(source, Rc::new(RefCell::new(std::io::stdout())))
}
