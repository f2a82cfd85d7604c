//! A host application that runs entirely in the current call stack.

use std::cell::RefCell;
use std::rc::Rc;

use estuary_core::host::HostApplication;
use estuary_core::widget::NativeHandle;
use tracing::debug;

/// Host that builds the UI immediately and parks the root widget instead of
/// entering a toolkit event loop.
///
/// Cloning shares the root slot, so a caller can keep one handle, pass the
/// other to the launcher, and inspect the tree once `run` returns.
#[derive(Clone, Default)]
pub struct HeadlessHost {
    root: Rc<RefCell<Option<NativeHandle>>>,
}

impl HeadlessHost {
    /// Creates a host with an empty root slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root widget produced by the last `run`, if any.
    #[must_use]
    pub fn root(&self) -> Option<NativeHandle> {
        self.root.borrow().clone()
    }
}

impl HostApplication for HeadlessHost {
    fn run(self, create: Box<dyn FnOnce() -> NativeHandle>) {
        let root = create();
        debug!(
            type_name = root.borrow().type_name(),
            "headless host captured root widget"
        );
        *self.root.borrow_mut() = Some(root);
    }
}

impl core::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("has_root", &self.root.borrow().is_some())
            .finish()
    }
}
