//! In-memory backend for the Estuary node-tree adapter.
//!
//! Provides a complete native toolkit that lives on the heap: widgets record
//! every property, style, and structural operation applied to them, and the
//! [`HeadlessHost`] runs the application lifecycle without an event loop.
//! Useful for demos and for exercising the synchronizer under test.

pub mod host;
pub mod outline;
pub mod register;
pub mod widgets;

pub use host::HeadlessHost;
pub use outline::outline;
pub use register::register_widgets;
pub use widgets::{ActionBar, ContentHost, LayoutPane, Leaf, PropertyBag};
