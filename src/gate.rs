use std::cell::Cell;
use std::rc::Rc;

/// Decides whether interactive controls are exposed to the caller. Not a
/// security boundary; numeric behavior never depends on it.
pub trait AccessGate {
    fn is_authorized(&self) -> bool;
}

/// Flag-backed gate. Clones share the flag, so the front end can keep a
/// handle for lock/unlock while the controller owns another.
#[derive(Debug, Clone)]
pub struct StaticGate {
    unlocked: Rc<Cell<bool>>,
}

impl StaticGate {
    pub fn new(unlocked: bool) -> Self {
        Self {
            unlocked: Rc::new(Cell::new(unlocked)),
        }
    }

    pub fn set_unlocked(&self, unlocked: bool) {
        self.unlocked.set(unlocked);
    }

    pub fn toggle(&self) -> bool {
        let next = !self.unlocked.get();
        self.unlocked.set(next);
        next
    }
}

impl Default for StaticGate {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AccessGate for StaticGate {
    fn is_authorized(&self) -> bool {
        self.unlocked.get()
    }
}
