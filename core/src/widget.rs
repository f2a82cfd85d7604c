//! The native widget capability protocol consumed by the synchronizer.
//!
//! The native toolkit is not defined here; backends implement [`NativeWidget`]
//! for their widget types and declare, through [`NativeWidget::container`],
//! which child-management protocol each widget speaks. The synchronizer
//! dispatches on that declared variant instead of probing concrete types.

use core::any::Any;
use core::fmt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::BoxError;
use crate::node::ViewNode;

/// Shared handle to a native widget instance.
pub type NativeHandle = Rc<RefCell<dyn NativeWidget>>;

/// Constructor producing a fresh native widget instance.
///
/// An element invokes its constructor exactly once, at construction time.
pub type WidgetCtor = Rc<dyn Fn() -> NativeHandle>;

/// Deferred widget-module resolver stored in the registry.
///
/// Re-invoked on every resolution so hot-swapped widget modules take effect
/// without re-registration.
pub type WidgetResolver = Rc<dyn Fn() -> Result<WidgetCtor, BoxError>>;

/// Callback attached to a widget event.
pub type EventHandler = Rc<dyn Fn(Value)>;

/// Dynamically-typed property value assigned to native widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Floating point value.
    Number(f64),
    /// Integer value.
    Int(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// The child-management protocol a native widget declares for itself.
///
/// The three variants are mutually exclusive; a widget that manages no
/// children at all declares [`Container::None`].
pub enum Container<'a> {
    /// Indexed multi-child container (layouts).
    Ordered(&'a mut dyn OrderedContainer),
    /// One primary `content` slot plus an auxiliary set of non-rendering
    /// view children (content views, pages).
    SingleSlot(&'a mut dyn SingleSlotContainer),
    /// Named-slot container keyed by the child widget's concrete type name
    /// (action bars).
    NamedSlot(&'a mut dyn NamedSlotContainer),
    /// The widget manages no children through the tree.
    None,
}

impl fmt::Debug for Container<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ordered(_) => "Container::Ordered",
            Self::SingleSlot(_) => "Container::SingleSlot",
            Self::NamedSlot(_) => "Container::NamedSlot",
            Self::None => "Container::None",
        })
    }
}

/// Indexed child-container protocol.
pub trait OrderedContainer {
    /// Number of native children currently attached.
    fn child_count(&self) -> usize;
    /// Returns the child at `index`, if any.
    fn child_at(&self, index: usize) -> Option<NativeHandle>;
    /// Inserts `child` at `index` (indices past the end append).
    fn insert_at(&mut self, index: usize, child: NativeHandle);
    /// Removes and returns the child at `index`.
    fn remove_at(&mut self, index: usize) -> Option<NativeHandle>;
}

/// Single primary `content` slot plus auxiliary view children.
pub trait SingleSlotContainer {
    /// The current primary content, if any.
    fn content(&self) -> Option<NativeHandle>;
    /// Replaces the primary content (`None` clears it).
    fn set_content(&mut self, content: Option<NativeHandle>);
    /// Attaches a non-rendering view child at the given position.
    fn add_view_child(&mut self, child: NativeHandle, index: Option<usize>);
    /// Detaches a previously attached view child.
    fn remove_view_child(&mut self, child: &NativeHandle);
}

/// Named-slot add protocol keyed by the child's runtime type name.
pub trait NamedSlotContainer {
    /// Places `child` into the slot selected by `type_name`.
    fn add_child_by_type_name(&mut self, type_name: &str, child: NativeHandle);
}

/// A native widget instance owned by an element or comment node.
pub trait NativeWidget: Any {
    /// Concrete runtime type name, used as the key for named-slot placement.
    fn type_name(&self) -> &'static str;

    /// Declares which child-management protocol this widget implements.
    fn container(&mut self) -> Container<'_> {
        Container::None
    }

    /// Assigns a property directly on the widget.
    fn set_property(&mut self, key: &str, value: Value) -> Result<(), BoxError>;

    /// Applies a structural attribute (style shorthand, row/column counts,
    /// font-attribute strings) through the toolkit-specific entry point.
    ///
    /// Defaults to plain property assignment for widgets without a dedicated
    /// structural channel.
    fn apply_xml_attribute(&mut self, key: &str, value: &Value) -> Result<(), BoxError> {
        self.set_property(key, value.clone())
    }

    /// Writes one property of the widget's native style object.
    fn set_style(&mut self, property: &str, value: &str) {
        let _ = (property, value);
    }

    /// Attaches an event listener.
    fn add_listener(&mut self, event: &str, handler: EventHandler) {
        let _ = (event, handler);
    }

    /// Detaches the listeners registered for `event`.
    fn remove_listener(&mut self, event: &str) {
        let _ = event;
    }

    /// Stores a back-reference to the owning shadow-tree node for reverse
    /// lookup. Bound once, right after element construction.
    fn bind_owner(&mut self, owner: Weak<ViewNode>) {
        let _ = owner;
    }
}
