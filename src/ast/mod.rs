//! Typed representation of a Glint program, produced by the parser and
//! consumed exclusively by the compiler.
mod expression;
mod function_def;
mod operator;
mod program;
mod statement;

pub use expression::{BinaryOp, Call, Expression};
pub use function_def::FunctionDef;
pub use operator::Operator;
pub use program::Program;
pub use statement::{Assign, If, Statement, VarDecl, While};
