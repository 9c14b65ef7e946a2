use crate::ast::Operator;
use crate::vm::{RuntimeError, Value};

/// Apply a binary operator to two already-popped operands (`a` below `b`
/// on the operand stack, i.e. `a op b`).
pub fn apply(op: Operator, a: Value, b: Value) -> Result<Value, RuntimeError> {
    match op {
        Operator::Plus => add(a, b),
        Operator::Minus => arith(a, b, "-", |x, y| Ok(x - y)),
        Operator::Mul => arith(a, b, "*", |x, y| Ok(x * y)),
        Operator::Div => arith(a, b, "/", |x, y| {
            if y == 0.0 {
                Err(RuntimeError::new("division by zero"))
            } else {
                Ok(x / y)
            }
        }),
        Operator::Gt => compare(a, b, ">", |x, y| x > y),
        Operator::Lt => compare(a, b, "<", |x, y| x < y),
        Operator::Gte => compare(a, b, ">=", |x, y| x >= y),
        Operator::Lte => compare(a, b, "<=", |x, y| x <= y),
        Operator::EqEq => Ok(Value::Bool(a == b)),
        Operator::Neq => Ok(Value::Bool(a != b)),
    }
}

/// `+` additionally supports string concatenation, the one other operand
/// combination that comes up in practice for an untyped `a + b`.
fn add(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Number(x + y)),
        (Value::Str(x), Value::Str(y)) => Ok(Value::Str(x + &y)),
        (a, b) => Err(type_error("+", &a, &b)),
    }
}

fn arith(
    a: Value,
    b: Value,
    symbol: &str,
    f: impl FnOnce(f64, f64) -> Result<f64, RuntimeError>,
) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => f(*x, *y).map(Value::Number),
        _ => Err(type_error(symbol, &a, &b)),
    }
}

fn compare(a: Value, b: Value, symbol: &str, f: impl FnOnce(f64, f64) -> bool) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Number(x), Value::Number(y)) => Ok(Value::Bool(f(*x, *y))),
        _ => Err(type_error(symbol, &a, &b)),
    }
}

fn type_error(op: &str, a: &Value, b: &Value) -> RuntimeError {
    RuntimeError::new(format!(
        "unsupported operand types for '{op}': '{}' and '{}'",
        a.type_name(),
        b.type_name()
    ))
}
