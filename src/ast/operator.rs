use std::fmt::{self, Display, Formatter};

/// The closed set of binary operators. Parsed into here once and consumed
/// by both the compiler (to pick an opcode) and, transitively, nothing
/// else — the VM never sees operator tags, only the opcodes they lowered
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Mul,
    Div,
    Gt,
    Lt,
    Gte,
    Lte,
    EqEq,
    Neq,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::EqEq => "==",
            Operator::Neq => "!=",
        };
        write!(f, "{s}")
    }
}
