//! Guard against accidental navigation while a workout is in progress.
//!
//! Browsers do not allow an asynchronous confirmation during `beforeunload`,
//! so the guard raises the unconditional leave-page warning instead.

use std::{cell::Cell, rc::Rc};

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::BeforeUnloadEvent;

const UNLOAD_WARNING: &str = "You have an active workout that is not saved.";

pub struct UnloadGuard {
    active: Rc<Cell<bool>>,
    // keeps the registered listener alive for the lifetime of the page
    _listener: Closure<dyn FnMut(BeforeUnloadEvent)>,
}

impl UnloadGuard {
    /// Registers a `beforeunload` listener that vetoes navigation while the
    /// guard is marked active.
    pub fn register() -> Result<Self, String> {
        let active = Rc::new(Cell::new(false));
        let flag = Rc::clone(&active);
        let listener = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(move |event: BeforeUnloadEvent| {
            if flag.get() {
                event.prevent_default();
                event.set_return_value(UNLOAD_WARNING);
            }
        });
        web_sys::window()
            .ok_or_else(|| String::from("no window"))?
            .add_event_listener_with_callback("beforeunload", listener.as_ref().unchecked_ref())
            .map_err(|err| format!("{err:?}"))?;
        Ok(Self {
            active,
            _listener: listener,
        })
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}
