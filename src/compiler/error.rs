use std::fmt::{self, Display, Formatter};

/// Raised for the handful of mistakes this compiler can catch without
/// running the program — a function redefinition, or a user function
/// declared under the reserved `__main__` name. Anything that depends on
/// a value (an undefined variable, a call to a name that isn't a
/// function, an arity mismatch) is a [`crate::vm::RuntimeError`] instead,
/// since names aren't resolved until the VM runs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompileError {}
