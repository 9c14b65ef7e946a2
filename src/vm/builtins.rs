use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::vm::{RuntimeError, Value, Vm};

/// A registered built-in: a host callable taking the already-unboxed
/// arguments and the VM handle (so it can re-enter `call_function`, as the
/// GUI extension's button callback does).
pub type BuiltinFn = Rc<dyn Fn(&mut Vm, Vec<Value>) -> Result<Value, RuntimeError>>;

/// A module registrar, looked up by the name a `use` directive names.
/// Invoked once, synchronously, at VM startup; may insert any number of
/// entries into `vm.builtins`.
pub trait Registrar {
    fn register(&self, vm: &mut Vm);
}

/// The registrars this build ships, keyed by module name. Only `"gui"`
/// exists today; an unrecognized `use` name is a non-fatal diagnostic, not
/// an error.
pub fn registry() -> HashMap<&'static str, Box<dyn Registrar>> {
    let mut registrars: HashMap<&'static str, Box<dyn Registrar>> = HashMap::new();
    registrars.insert("gui", Box::new(crate::vm::gui::GuiRegistrar));
    registrars
}

/// `print` is always available, independent of `uses` — the one built-in
/// the VM registers unconditionally at construction.
pub fn print_builtin() -> BuiltinFn {
    Rc::new(|vm: &mut Vm, args: Vec<Value>| {
        let rendered = args.iter().map(Value::to_string).collect::<Vec<_>>().join(" ");
        let mut out = vm.out.borrow_mut();
        writeln!(out, "{rendered}").map_err(|e| RuntimeError::new(format!("print: {e}")))?;
        Ok(Value::Null)
    })
}
