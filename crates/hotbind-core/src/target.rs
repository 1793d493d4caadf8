// Hotbind Event Targets
// Host objects a keyboard listener can be attached to

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::event::{EventKind, KeyboardEvent};

/// A registered listener. Removal matches on `Rc` identity.
pub type Listener = Rc<dyn Fn(&KeyboardEvent)>;

/// Something that accepts keyboard listeners, like a window or element.
pub trait EventTarget {
    /// Register `listener` for events of `kind`
    fn add_listener(&self, kind: EventKind, listener: Listener);

    /// Unregister a listener previously added for `kind`.
    ///
    /// Implementations must treat an unknown listener as a no-op.
    fn remove_listener(&self, kind: EventKind, listener: &Listener);
}

/// Shared handle to a host target
pub type TargetHandle = Rc<dyn EventTarget>;

/// Pointer identity of two target handles, ignoring vtables
pub fn same_target(a: &TargetHandle, b: &TargetHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Pointer identity of two listeners, ignoring vtables
pub fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A reference cell holding a target that may not exist yet or may change.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<RefCell<Option<TargetHandle>>>);

impl NodeRef {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell already holding `target`
    pub fn with(target: TargetHandle) -> Self {
        Self(Rc::new(RefCell::new(Some(target))))
    }

    /// Current value of the cell
    pub fn get(&self) -> Option<TargetHandle> {
        self.0.borrow().clone()
    }

    pub fn set(&self, target: TargetHandle) {
        *self.0.borrow_mut() = Some(target);
    }

    pub fn clear(&self) {
        *self.0.borrow_mut() = None;
    }

    /// Whether both handles refer to the same cell
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("populated", &self.0.borrow().is_some())
            .finish()
    }
}

/// Where a binder attaches its listener
#[derive(Clone)]
pub enum Target {
    /// A target used as-is
    Direct(TargetHandle),
    /// A cell read when the binder activates
    Cell(NodeRef),
}

impl Target {
    /// Read the target as of now. An empty cell resolves to `None`.
    pub fn resolve(&self) -> Option<TargetHandle> {
        match self {
            Target::Direct(target) => Some(Rc::clone(target)),
            Target::Cell(cell) => cell.get(),
        }
    }

    /// Identity comparison used to decide whether a binder must re-subscribe.
    ///
    /// A cell is compared by the cell itself, not by what it currently holds.
    pub fn same_as(&self, other: &Target) -> bool {
        match (self, other) {
            (Target::Direct(a), Target::Direct(b)) => same_target(a, b),
            (Target::Cell(a), Target::Cell(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<TargetHandle> for Target {
    fn from(target: TargetHandle) -> Self {
        Target::Direct(target)
    }
}

impl From<NodeRef> for Target {
    fn from(cell: NodeRef) -> Self {
        Target::Cell(cell)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Direct(target) => f
                .debug_tuple("Direct")
                .field(&Rc::as_ptr(target).cast::<()>())
                .finish(),
            Target::Cell(cell) => f.debug_tuple("Cell").field(cell).finish(),
        }
    }
}
