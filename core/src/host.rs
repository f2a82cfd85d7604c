//! Interface boundary to the two external collaborators: the host toolkit's
//! application lifecycle and the reactive framework that drives the tree.

use std::rc::Rc;

use crate::node::ViewNode;
use crate::widget::NativeHandle;

/// The native toolkit's application entry point.
///
/// Implementations invoke `create` when the host is ready to display UI; the
/// returned widget becomes the toolkit's root container.
pub trait HostApplication {
    /// Starts the host application, deferring UI construction to `create`.
    fn run(self, create: Box<dyn FnOnce() -> NativeHandle>);
}

/// The reactive framework's mount surface.
///
/// The framework receives a detached placeholder node and patches its view
/// tree into it; everything below the placeholder flows through the document
/// factories and the node model.
pub trait ReactiveApp {
    /// Mounts the framework's root view onto `target`.
    fn mount(&mut self, target: &Rc<ViewNode>);
}
