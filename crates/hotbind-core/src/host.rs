// Hotbind Host Window
// Per-thread slot for the global window-equivalent target

use std::cell::RefCell;
use std::rc::Rc;

use crate::target::TargetHandle;

thread_local! {
    static WINDOW: RefCell<Option<TargetHandle>> = const { RefCell::new(None) };
}

/// Install the window that binders without an explicit target attach to.
///
/// UI event delivery is single-threaded, so the slot is per thread; binders
/// on a thread without a window attach nowhere unless given a target.
pub fn set_window(window: TargetHandle) {
    WINDOW.with(|slot| *slot.borrow_mut() = Some(window));
}

/// Remove the installed window, returning it
pub fn clear_window() -> Option<TargetHandle> {
    WINDOW.with(|slot| slot.borrow_mut().take())
}

/// The installed window, if any
pub fn window() -> Option<TargetHandle> {
    WINDOW.with(|slot| slot.borrow().as_ref().map(Rc::clone))
}
