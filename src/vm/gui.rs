//! A headless stand-in for the optional GUI extension described in the
//! built-in extension interface: a window that collects labels and
//! buttons instead of drawing them, so the re-entrancy contract (a
//! built-in calling back into `Vm::call_function` from a host event) can
//! be exercised without a real toolkit dependency.

use std::cell::RefCell;
use std::rc::Rc;

use crate::vm::builtins::{BuiltinFn, Registrar};
use crate::vm::{RuntimeError, Value, Vm};

/// A window's accumulated content: the labels it was given and the
/// pending click callbacks registered for its buttons, in the order
/// `gui_label`/`gui_button` were called.
#[derive(Debug, Default)]
pub struct GuiWindow {
    pub title: String,
    pub labels: Vec<String>,
    pub buttons: Vec<(String, String)>, // (button text, callback function name)
}

impl GuiWindow {
    fn new(title: String) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    /// Simulates a click on the `index`th button by re-entering the VM
    /// with the callback it was registered with. There is no real event
    /// loop driving this — a host (or a test) calls it directly.
    pub fn click(&self, vm: &mut Vm, index: usize) -> Result<Value, RuntimeError> {
        let (_, callback) = self
            .buttons
            .get(index)
            .ok_or_else(|| RuntimeError::new(format!("no button at index {index}")))?;
        vm.call_function(callback, vec![])
    }
}

pub struct GuiRegistrar;

impl Registrar for GuiRegistrar {
    fn register(&self, vm: &mut Vm) {
        vm.builtins.insert("gui_app".to_string(), gui_app());
        vm.builtins.insert("gui_label".to_string(), gui_label());
        vm.builtins.insert("gui_button".to_string(), gui_button());
    }
}

fn window_arg(value: &Value, builtin: &str) -> Result<Rc<RefCell<GuiWindow>>, RuntimeError> {
    match value {
        Value::Host(host) => host
            .clone()
            .downcast::<RefCell<GuiWindow>>()
            .map_err(|_| RuntimeError::new(format!("{builtin}: argument is not a GUI window"))),
        other => Err(RuntimeError::new(format!(
            "{builtin}: expected a GUI window, got {}",
            other.type_name()
        ))),
    }
}

/// `gui_app(title, builder_name)` — creates a window, calls
/// `builder_name(win)` so the script can populate it, then "shows" it
/// (here: a no-op, since there is no real event loop to run).
fn gui_app() -> BuiltinFn {
    Rc::new(|vm: &mut Vm, args: Vec<Value>| {
        let [title, builder] = take_args(args, "gui_app")?;
        let title = title.to_string();
        let builder_name = match builder {
            Value::Str(name) => name,
            other => return Err(RuntimeError::new(format!("gui_app: builder name must be a string, got {}", other.type_name()))),
        };

        let window = Rc::new(RefCell::new(GuiWindow::new(title)));

        if let Err(e) = vm.call_function(&builder_name, vec![Value::Host(window)]) {
            log::error!("error in GUI builder function: {e}");
        }

        Ok(Value::Null)
    })
}

/// `gui_label(win, text)` — appends a label to the window.
fn gui_label() -> BuiltinFn {
    Rc::new(|_vm: &mut Vm, args: Vec<Value>| {
        let [win, text] = take_args(args, "gui_label")?;
        let window = window_arg(&win, "gui_label")?;
        window.borrow_mut().labels.push(text.to_string());
        Ok(Value::Null)
    })
}

/// `gui_button(win, text, callback_name)` — registers a button whose
/// click re-enters the callback via [`GuiWindow::click`].
fn gui_button() -> BuiltinFn {
    Rc::new(|_vm: &mut Vm, args: Vec<Value>| {
        let [win, text, callback] = take_args(args, "gui_button")?;
        let window = window_arg(&win, "gui_button")?;
        let callback_name = match callback {
            Value::Str(name) => name,
            other => {
                return Err(RuntimeError::new(format!(
                    "gui_button: callback name must be a string, got {}",
                    other.type_name()
                )))
            }
        };
        window.borrow_mut().buttons.push((text.to_string(), callback_name));
        Ok(Value::Null)
    })
}

fn take_args<const N: usize>(args: Vec<Value>, builtin: &str) -> Result<[Value; N], RuntimeError> {
    args.try_into()
        .map_err(|got: Vec<Value>| RuntimeError::new(format!("{builtin}: expected {N} args, got {}", got.len())))
}
