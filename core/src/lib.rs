//! Node-tree / native-tree synchronization core.
//!
//! Bridges a reactive virtual-node-tree framework to a native UI toolkit whose
//! widgets form their own retained object tree with heterogeneous
//! child-management rules. The framework issues generic tree mutations against
//! the [`document`] factories and the [`node::ViewNode`] model; the
//! synchronizer translates each structural mutation into the correct native
//! operation for whatever widget owns that subtree, keeping the shadow tree
//! and the native tree consistent at all times.
//!
//! The native toolkit is consumed through the capability protocol in
//! [`widget`]; backends declare, per widget, which of the three
//! child-management variants it speaks (ordered, single-slot, named-slot).

pub mod document;
pub mod error;
pub mod host;
pub mod meta;
pub mod node;
pub mod registry;
mod sync;
pub mod widget;

pub use document::{Document, document, init_document, try_document};
pub use error::{BoxError, DomError, TreeError};
pub use host::{HostApplication, ReactiveApp};
pub use meta::{ModelBinding, ViewMeta};
pub use node::{NodeKind, ViewNode};
pub use registry::{
    normalize_tag_name, register_element, register_element_with_meta, view_meta, widget_constructor,
};
pub use widget::{
    Container, EventHandler, NamedSlotContainer, NativeHandle, NativeWidget, OrderedContainer,
    SingleSlotContainer, Value, WidgetCtor, WidgetResolver,
};
