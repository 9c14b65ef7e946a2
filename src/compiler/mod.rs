//! AST to bytecode, by a single linear pass with forward-jump backpatching.
//!
//! Each function (including the synthetic `__main__` that collects the
//! program's top-level statements) compiles to a flat `Vec<Instruction>`.
//! `if`/`while` emit a jump with a placeholder target, remember the
//! instruction's index, keep compiling, and only once the jump's
//! destination is known does the compiler go back and overwrite the
//! placeholder — there is no separate fixup pass.

mod error;

pub use error::CompileError;

use std::collections::HashMap;

use crate::ast::{Expression, Operator, Program, Statement};

pub type CompileResult<T> = Result<T, CompileError>;

/// The name of the synthetic function holding a program's top-level
/// statements. Run before any user-defined `main`, exactly like a module's
/// top-level code runs before anything calls into it.
pub const MAIN: &str = "__main__";

/// A compiled function: its parameter names, the names `let` introduces
/// anywhere in its body (computed once, at compile time, so the VM can
/// seed a fresh frame's locals before running a single instruction — see
/// the scoping discussion in `DESIGN.md`), and its instruction stream.
pub type CompiledFunction = (Vec<String>, Vec<String>, Vec<Instruction>);

/// All compiled functions, keyed by name.
pub type Functions = HashMap<String, CompiledFunction>;

/// A literal operand baked into the bytecode by `PushConst`.
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
}

/// A single bytecode instruction. Jump targets are absolute indices into
/// the same function's instruction stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    PushConst(Const),
    LoadVar(String),
    StoreVar(String),
    Pop,
    Binary(Operator),
    Jump(usize),
    JumpIfFalse(usize),
    Call(String, usize),
    Return,
}

/// Compile a parsed program into its function table and `use` list.
pub fn compile(program: &Program) -> CompileResult<(Functions, Vec<String>)> {
    let mut functions = Functions::new();

    for def in &program.functions {
        if def.name == MAIN {
            return Err(CompileError::new(format!(
                "function '{MAIN}' is reserved for the program's top-level statements and cannot be declared"
            )));
        }
        if functions.contains_key(&def.name) {
            return Err(CompileError::new(format!(
                "function '{}' is defined more than once",
                def.name
            )));
        }
        let body = compile_body(&def.body);
        let locals = collect_locals(&def.body);
        functions.insert(def.name.clone(), (def.params.clone(), locals, body));
    }

    let main_body = compile_body(&program.statements);
    let main_locals = collect_locals(&program.statements);
    functions.insert(MAIN.to_string(), (vec![], main_locals, main_body));

    Ok((functions, program.uses.clone()))
}

/// Compile a block's statements, appending a trailing `return null` so
/// every function ends on an explicit `Return` whether or not the source
/// had one.
fn compile_body(statements: &[Statement]) -> Vec<Instruction> {
    let mut code = vec![];
    for stmt in statements {
        compile_stmt(stmt, &mut code);
    }
    code.push(Instruction::PushConst(Const::Null));
    code.push(Instruction::Return);
    code
}

/// Every name a `let` introduces anywhere in a function body, including
/// inside nested `if`/`while` blocks, in declaration order with duplicates
/// dropped. The VM seeds a fresh frame's locals with these (as `null`)
/// before running a single instruction, so the first `StoreVar` for one of
/// these names always lands in that frame's env rather than globals — see
/// `DESIGN.md` for why `StoreVar` alone can't tell `let` and plain
/// assignment apart.
fn collect_locals(statements: &[Statement]) -> Vec<String> {
    let mut locals = vec![];
    collect_locals_into(statements, &mut locals);
    locals
}

fn collect_locals_into(statements: &[Statement], locals: &mut Vec<String>) {
    for stmt in statements {
        match stmt {
            Statement::VarDecl(decl) => {
                if !locals.contains(&decl.name) {
                    locals.push(decl.name.clone());
                }
            }
            Statement::If(stmt) => {
                collect_locals_into(&stmt.then_body, locals);
                collect_locals_into(&stmt.else_body, locals);
            }
            Statement::While(stmt) => collect_locals_into(&stmt.body, locals),
            Statement::Assign(_) | Statement::Return(_) | Statement::Expression(_) => {}
        }
    }
}

fn compile_stmt(stmt: &Statement, code: &mut Vec<Instruction>) {
    match stmt {
        Statement::VarDecl(decl) => {
            compile_expr(&decl.expr, code);
            code.push(Instruction::StoreVar(decl.name.clone()));
        }
        Statement::Assign(assign) => {
            compile_expr(&assign.expr, code);
            code.push(Instruction::StoreVar(assign.name.clone()));
        }
        Statement::If(stmt) => compile_if(stmt, code),
        Statement::While(stmt) => compile_while(stmt, code),
        Statement::Return(expr) => {
            compile_expr(expr, code);
            code.push(Instruction::Return);
        }
        Statement::Expression(expr) => {
            compile_expr(expr, code);
            code.push(Instruction::Pop);
        }
    }
}

fn compile_if(stmt: &crate::ast::If, code: &mut Vec<Instruction>) {
    compile_expr(&stmt.cond, code);

    let jump_false_index = code.len();
    code.push(Instruction::JumpIfFalse(usize::MAX));

    for s in &stmt.then_body {
        compile_stmt(s, code);
    }

    if stmt.else_body.is_empty() {
        let after_then = code.len();
        code[jump_false_index] = Instruction::JumpIfFalse(after_then);
        return;
    }

    let jump_end_index = code.len();
    code.push(Instruction::Jump(usize::MAX));

    let else_start = code.len();
    code[jump_false_index] = Instruction::JumpIfFalse(else_start);

    for s in &stmt.else_body {
        compile_stmt(s, code);
    }

    let after_else = code.len();
    code[jump_end_index] = Instruction::Jump(after_else);
}

fn compile_while(stmt: &crate::ast::While, code: &mut Vec<Instruction>) {
    let loop_start = code.len();
    compile_expr(&stmt.cond, code);

    let jump_exit_index = code.len();
    code.push(Instruction::JumpIfFalse(usize::MAX));

    for s in &stmt.body {
        compile_stmt(s, code);
    }
    code.push(Instruction::Jump(loop_start));

    let after_loop = code.len();
    code[jump_exit_index] = Instruction::JumpIfFalse(after_loop);
}

fn compile_expr(expr: &Expression, code: &mut Vec<Instruction>) {
    match expr {
        Expression::Number(n) => code.push(Instruction::PushConst(Const::Number(*n))),
        Expression::String(s) => code.push(Instruction::PushConst(Const::Str(s.clone()))),
        Expression::Bool(b) => code.push(Instruction::PushConst(Const::Bool(*b))),
        Expression::Var(name) => code.push(Instruction::LoadVar(name.clone())),
        Expression::BinaryOp(op) => {
            compile_expr(&op.left, code);
            compile_expr(&op.right, code);
            code.push(Instruction::Binary(op.op));
        }
        Expression::Call(call) => {
            for arg in &call.args {
                compile_expr(arg, code);
            }
            code.push(Instruction::Call(call.func.clone(), call.args.len()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse;

    fn compile_source(source: &str) -> (Functions, Vec<String>) {
        compile(&parse(lex(source).unwrap()).unwrap()).unwrap()
    }

    #[test]
    fn if_without_else_patches_single_jump() {
        let (functions, _) = compile_source("if (true) { 1; }");
        let (_, _, code) = &functions[MAIN];
        let Instruction::JumpIfFalse(target) = code[1] else {
            panic!("expected a JumpIfFalse at index 1, got {:?}", code[1]);
        };
        assert_eq!(code[target - 1], Instruction::Pop);
    }

    #[test]
    fn if_with_else_patches_both_jumps() {
        let (functions, _) = compile_source("if (true) { 1; } else { 2; }");
        let (_, _, code) = &functions[MAIN];
        let Instruction::JumpIfFalse(else_start) = code[1] else {
            panic!("expected JumpIfFalse");
        };
        let Instruction::Jump(after_else) = code[else_start - 1] else {
            panic!("expected an unconditional Jump ending the then-branch");
        };
        assert_eq!(after_else, code.len() - 2); // before the trailing null-return
    }

    #[test]
    fn while_jumps_back_to_condition() {
        let (functions, _) = compile_source("while (true) { 1; }");
        let (_, _, code) = &functions[MAIN];
        let last_body_index = code.len() - 3; // before the synthesized null-return
        assert_eq!(code[last_body_index], Instruction::Jump(0));
    }

    #[test]
    fn duplicate_function_definition_is_a_compile_error() {
        let program = parse(lex("fn f() { } fn f() { }").unwrap()).unwrap();
        assert!(compile(&program).is_err());
    }

    #[test]
    fn user_defined_dunder_main_is_a_compile_error() {
        let program = parse(lex("fn __main__() { }").unwrap()).unwrap();
        assert!(compile(&program).is_err());
    }

    #[test]
    fn every_function_ends_with_return() {
        let (functions, _) = compile_source("fn f() { let x = 1; }");
        let (_, _, code) = &functions["f"];
        assert_eq!(code.last(), Some(&Instruction::Return));
    }

    #[test]
    fn locals_are_collected_from_nested_blocks() {
        let (functions, _) =
            compile_source("fn f(n) { if (n > 0) { let x = 1; } else { let y = 2; } while (n > 0) { let z = 3; } }");
        let (_, locals, _) = &functions["f"];
        assert_eq!(locals, &vec!["x".to_string(), "y".to_string(), "z".to_string()]);
    }
}
