use std::cell::RefCell;
use std::rc::Rc;

use glint::error::Error;
use glint::vm::Value;

/// Runs a complete program and returns its result value alongside
/// everything `print` wrote, so a test can assert on either.
pub fn run(source: &str) -> Result<(Value, String), Error> {
    let out = Rc::new(RefCell::new(Vec::new()));
    let result = glint::run_with_output(source, out.clone())?;
    let printed = String::from_utf8(out.borrow().clone()).expect("print output is valid utf8");
    Ok((result, printed))
}
