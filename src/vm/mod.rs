//! Bytecode to running program: a stack-based interpreter over the
//! instruction streams the compiler produces.
//!
//! One operand stack is shared across every frame (pushed onto by the
//! current instruction, read by whichever frame is on top of the explicit
//! call stack); a `CALL`'s result becomes visible to the caller the moment
//! `call_function` returns, so nested calls and built-in re-entrancy never
//! need special-casing in the dispatch loop.

mod binary;
mod builtins;
mod error;
mod gui;
mod value;

pub use error::RuntimeError;
pub use value::Value;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::compiler::{self, Const, Functions, Instruction};

pub type RunResult<T> = Result<T, RuntimeError>;

/// One user-function activation: its instruction stream (shared, never
/// mutated, hence the `Rc`), its local variable environment, and the
/// instruction pointer into `code`.
struct Frame {
    code: Rc<Vec<Instruction>>,
    env: HashMap<String, Value>,
    ip: usize,
}

/// The virtual machine. Deliberately not `Send`/`Sync`: built-ins may hold
/// `Rc`/`RefCell` host state (see [`gui`]), and the execution model is
/// single-threaded by design (spec-level concurrency model), so there is
/// no reason to pay for synchronization this interpreter never needs.
pub struct Vm {
    functions: HashMap<String, (Vec<String>, Vec<String>, Rc<Vec<Instruction>>)>,
    uses: Vec<String>,
    stack: Vec<Value>,
    globals: HashMap<String, Value>,
    builtins: HashMap<String, builtins::BuiltinFn>,
    call_stack: Vec<Frame>,
    out: Rc<RefCell<dyn Write>>,
}

impl Vm {
    /// Builds a VM from a compiled function table and the program's `use`
    /// directives, registers `print`, then runs every matching extension
    /// registrar. A `use` naming an extension this build doesn't ship logs
    /// a non-fatal warning and leaves the VM runnable.
    pub fn new(functions: Functions, uses: Vec<String>, out: Rc<RefCell<dyn Write>>) -> Self {
        let functions = functions
            .into_iter()
            .map(|(name, (params, locals, code))| (name, (params, locals, Rc::new(code))))
            .collect();

        let mut vm = Self {
            functions,
            uses,
            stack: vec![],
            globals: HashMap::new(),
            builtins: HashMap::new(),
            call_stack: vec![],
            out,
        };

        vm.builtins.insert("print".to_string(), builtins::print_builtin());

        let mut registry = builtins::registry();
        for module in vm.uses.clone() {
            match registry.remove(module.as_str()) {
                Some(registrar) => registrar.register(&mut vm),
                None => log::warn!("no extension registered for `use {module}`"),
            }
        }

        vm
    }

    /// Runs `__main__` (the program's top-level statements) if present,
    /// then a user-defined `main` if present, returning `main`'s result
    /// (or null if there is no `main`). Both run when both exist — see
    /// the crate's design notes on why this surprising order is
    /// preserved.
    pub fn run(&mut self) -> RunResult<Value> {
        if self.functions.contains_key(compiler::MAIN) {
            self.call_function(compiler::MAIN, vec![])?;
        }
        if self.functions.contains_key("main") {
            return self.call_function("main", vec![]);
        }
        Ok(Value::Null)
    }

    /// Calls a built-in or user function by name. Built-ins are tried
    /// first, so a script can never shadow one by declaring a same-named
    /// function — the built-in always wins.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> RunResult<Value> {
        if let Some(builtin) = self.builtins.get(name).cloned() {
            return builtin(self, args);
        }

        let Some((params, locals, code)) = self.functions.get(name).cloned() else {
            return Err(RuntimeError::new(format!("Undefined function {name}")));
        };

        if args.len() != params.len() {
            return Err(RuntimeError::new(format!(
                "Function {name} expected {} args, got {}",
                params.len(),
                args.len()
            )));
        }

        let mut env: HashMap<String, Value> = params.into_iter().zip(args).collect();
        for local in locals {
            env.entry(local).or_insert(Value::Null);
        }
        self.call_stack.push(Frame { code, env, ip: 0 });
        let result = self.exec_frame();
        self.call_stack.pop();
        result
    }

    fn pop_operand(&mut self) -> RunResult<Value> {
        self.stack.pop().ok_or_else(|| RuntimeError::new("stack underflow"))
    }

    /// Runs the frame currently on top of `call_stack` to completion (a
    /// `Return`) or exhaustion (falls off the end, yielding null). The
    /// frame's position is re-read from `call_stack` every iteration
    /// rather than held across the loop, so a nested `CALL` — including
    /// one a built-in makes by re-entering `call_function` — can push and
    /// pop frames freely without this loop holding a stale reference.
    fn exec_frame(&mut self) -> RunResult<Value> {
        loop {
            let frame_index = self.call_stack.len() - 1;
            let code = Rc::clone(&self.call_stack[frame_index].code);
            let ip = self.call_stack[frame_index].ip;

            let Some(instr) = code.get(ip) else {
                return Ok(Value::Null);
            };
            self.call_stack[frame_index].ip = ip + 1;

            match instr.clone() {
                Instruction::PushConst(c) => self.stack.push(const_to_value(c)),

                Instruction::LoadVar(name) => {
                    let value = self.call_stack[frame_index]
                        .env
                        .get(&name)
                        .or_else(|| self.globals.get(&name))
                        .cloned()
                        .ok_or_else(|| RuntimeError::new(format!("Undefined variable {name}")))?;
                    self.stack.push(value);
                }

                Instruction::StoreVar(name) => {
                    let value = self.pop_operand()?;
                    let frame = &mut self.call_stack[frame_index];
                    if frame.env.contains_key(&name) {
                        frame.env.insert(name, value);
                    } else {
                        self.globals.insert(name, value);
                    }
                }

                Instruction::Pop => {
                    self.pop_operand()?;
                }

                Instruction::Binary(op) => {
                    let b = self.pop_operand()?;
                    let a = self.pop_operand()?;
                    self.stack.push(binary::apply(op, a, b)?);
                }

                Instruction::JumpIfFalse(target) => {
                    let cond = self.pop_operand()?;
                    if !cond.is_truthy() {
                        self.call_stack[frame_index].ip = target;
                    }
                }

                Instruction::Jump(target) => {
                    self.call_stack[frame_index].ip = target;
                }

                Instruction::Call(name, argc) => {
                    let mut args = Vec::with_capacity(argc);
                    for _ in 0..argc {
                        args.push(self.pop_operand()?);
                    }
                    args.reverse();
                    let result = self.call_function(&name, args)?;
                    self.stack.push(result);
                }

                Instruction::Return => {
                    let value = self.pop_operand()?;
                    return Ok(value);
                }
            }
        }
    }
}

fn const_to_value(c: Const) -> Value {
    match c {
        Const::Number(n) => Value::Number(n),
        Const::Str(s) => Value::Str(s),
        Const::Bool(b) => Value::Bool(b),
        Const::Null => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn run_source(source: &str) -> (Value, String) {
        let program = parse(lex(source).unwrap()).unwrap();
        let (functions, uses) = compile(&program).unwrap();
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut vm = Vm::new(functions, uses, out.clone());
        let result = vm.run().unwrap();
        let printed = String::from_utf8(out.borrow().clone()).unwrap();
        (result, printed)
    }

    #[test]
    fn factorial() {
        let (_, out) = run_source(
            "fn fact(n) { if (n < 2) { return 1; } return n * fact(n - 1); } fn main() { print(fact(5)); }",
        );
        assert_eq!(out, "120\n");
    }

    #[test]
    fn while_loop_prints_counter() {
        let (_, out) = run_source("let x = 0; while (x < 3) { print(x); x = x + 1; }");
        assert_eq!(out, "0\n1\n2\n");
    }

    #[test]
    fn string_equality() {
        let (_, out) = run_source(r#"fn main() { print("a" == "a"); print("a" != "b"); }"#);
        assert_eq!(out, "true\ntrue\n");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        let program = parse(lex("fn main() { print(undefined_name); }").unwrap()).unwrap();
        let (functions, uses) = compile(&program).unwrap();
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut vm = Vm::new(functions, uses, out);
        let err = vm.run().unwrap_err();
        assert_eq!(err.message, "Undefined variable undefined_name");
    }

    #[test]
    fn arity_mismatch_is_a_runtime_error() {
        let program = parse(lex("fn f(x) { return x + 1; } fn main() { print(f(1, 2)); }").unwrap()).unwrap();
        let (functions, uses) = compile(&program).unwrap();
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut vm = Vm::new(functions, uses, out);
        let err = vm.run().unwrap_err();
        assert_eq!(err.message, "Function f expected 1 args, got 2");
    }

    #[test]
    fn assignment_to_unbound_name_creates_a_global() {
        let (_, out) = run_source(
            "fn bump() { counter = counter + 1; } fn main() { counter = 0; bump(); bump(); print(counter); }",
        );
        assert_eq!(out, "3\n");
    }

    #[test]
    fn let_in_function_shadows_global_for_that_frame() {
        let (_, out) = run_source(
            "fn f() { let x = 99; print(x); } fn main() { x = 1; f(); print(x); }",
        );
        assert_eq!(out, "99\n1\n");
    }

    #[test]
    fn unknown_use_is_non_fatal() {
        let program = parse(lex("use nope; fn main() { print(1); }").unwrap()).unwrap();
        let (functions, uses) = compile(&program).unwrap();
        let out = Rc::new(RefCell::new(Vec::new()));
        let mut vm = Vm::new(functions, uses, out.clone());
        vm.run().unwrap();
        assert_eq!(String::from_utf8(out.borrow().clone()).unwrap(), "1\n");
    }
}
