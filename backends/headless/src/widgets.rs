//! In-memory widget implementations covering every capability class.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use estuary_core::error::BoxError;
use estuary_core::node::ViewNode;
use estuary_core::widget::{
    Container, EventHandler, NamedSlotContainer, NativeHandle, NativeWidget, OrderedContainer,
    SingleSlotContainer, Value, WidgetCtor,
};

/// Property, style, and listener storage shared by all headless widgets.
pub struct PropertyBag {
    type_name: &'static str,
    properties: HashMap<String, Value>,
    xml_attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    listeners: HashMap<String, Vec<EventHandler>>,
    owner: Weak<ViewNode>,
}

impl PropertyBag {
    fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: HashMap::new(),
            xml_attributes: HashMap::new(),
            styles: HashMap::new(),
            listeners: HashMap::new(),
            owner: Weak::new(),
        }
    }

    /// Concrete runtime type name of the widget.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Reads back a plain property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Reads back a structural attribute.
    #[must_use]
    pub fn xml_attribute(&self, key: &str) -> Option<&str> {
        self.xml_attributes.get(key).map(String::as_str)
    }

    /// Reads back a style property.
    #[must_use]
    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Whether any listener is attached for `event`.
    #[must_use]
    pub fn has_listener(&self, event: &str) -> bool {
        self.listeners.get(event).is_some_and(|handlers| !handlers.is_empty())
    }

    /// The shadow-tree node owning this widget, if still alive.
    #[must_use]
    pub fn owner(&self) -> Option<Rc<ViewNode>> {
        self.owner.upgrade()
    }

    fn set_property(&mut self, key: &str, value: Value) -> Result<(), BoxError> {
        self.properties.insert(key.into(), value);
        Ok(())
    }

    fn apply_xml_attribute(&mut self, key: &str, value: &Value) -> Result<(), BoxError> {
        self.xml_attributes.insert(key.into(), value.to_string());
        Ok(())
    }

    fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.into(), value.into());
    }

    fn add_listener(&mut self, event: &str, handler: EventHandler) {
        self.listeners.entry(event.into()).or_default().push(handler);
    }

    fn remove_listener(&mut self, event: &str) {
        self.listeners.remove(event);
    }

    fn bind_owner(&mut self, owner: Weak<ViewNode>) {
        self.owner = owner;
    }
}

impl core::fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyBag")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties.len())
            .finish_non_exhaustive()
    }
}

macro_rules! delegate_to_bag {
    () => {
        fn type_name(&self) -> &'static str {
            self.bag.type_name()
        }

        fn set_property(&mut self, key: &str, value: Value) -> Result<(), BoxError> {
            self.bag.set_property(key, value)
        }

        fn apply_xml_attribute(&mut self, key: &str, value: &Value) -> Result<(), BoxError> {
            self.bag.apply_xml_attribute(key, value)
        }

        fn set_style(&mut self, property: &str, value: &str) {
            self.bag.set_style(property, value);
        }

        fn add_listener(&mut self, event: &str, handler: EventHandler) {
            self.bag.add_listener(event, handler);
        }

        fn remove_listener(&mut self, event: &str) {
            self.bag.remove_listener(event);
        }

        fn bind_owner(&mut self, owner: Weak<ViewNode>) {
            self.bag.bind_owner(owner);
        }
    };
}

/// A widget with no child management: labels, buttons, form controls.
#[derive(Debug)]
pub struct Leaf {
    /// Shared widget state.
    pub bag: PropertyBag,
}

impl Leaf {
    /// Constructor producing fresh leaves with the given runtime type name.
    #[must_use]
    pub fn ctor(type_name: &'static str) -> WidgetCtor {
        Rc::new(move || {
            Rc::new(RefCell::new(Self {
                bag: PropertyBag::new(type_name),
            })) as NativeHandle
        })
    }
}

impl NativeWidget for Leaf {
    delegate_to_bag!();
}

/// An ordered multi-child container: the layout family.
pub struct LayoutPane {
    /// Shared widget state.
    pub bag: PropertyBag,
    children: Vec<NativeHandle>,
    remove_at_calls: Vec<usize>,
}

impl LayoutPane {
    /// Constructor producing fresh panes with the given runtime type name.
    #[must_use]
    pub fn ctor(type_name: &'static str) -> WidgetCtor {
        Rc::new(move || {
            Rc::new(RefCell::new(Self {
                bag: PropertyBag::new(type_name),
                children: Vec::new(),
                remove_at_calls: Vec::new(),
            })) as NativeHandle
        })
    }

    /// Current native children in order.
    #[must_use]
    pub fn children(&self) -> &[NativeHandle] {
        &self.children
    }

    /// Every `remove_at` index observed, in call order.
    #[must_use]
    pub fn remove_at_calls(&self) -> &[usize] {
        &self.remove_at_calls
    }
}

impl OrderedContainer for LayoutPane {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<NativeHandle> {
        self.children.get(index).cloned()
    }

    fn insert_at(&mut self, index: usize, child: NativeHandle) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    fn remove_at(&mut self, index: usize) -> Option<NativeHandle> {
        if index >= self.children.len() {
            return None;
        }
        self.remove_at_calls.push(index);
        Some(self.children.remove(index))
    }
}

impl NativeWidget for LayoutPane {
    delegate_to_bag!();

    fn container(&mut self) -> Container<'_> {
        Container::Ordered(self)
    }
}

/// A single-slot content container with auxiliary view children: content
/// views, scroll views, pages.
pub struct ContentHost {
    /// Shared widget state.
    pub bag: PropertyBag,
    content: Option<NativeHandle>,
    view_children: Vec<NativeHandle>,
}

impl ContentHost {
    /// Constructor producing fresh hosts with the given runtime type name.
    #[must_use]
    pub fn ctor(type_name: &'static str) -> WidgetCtor {
        Rc::new(move || {
            Rc::new(RefCell::new(Self {
                bag: PropertyBag::new(type_name),
                content: None,
                view_children: Vec::new(),
            })) as NativeHandle
        })
    }

    /// The auxiliary non-rendering children.
    #[must_use]
    pub fn view_children(&self) -> &[NativeHandle] {
        &self.view_children
    }
}

impl SingleSlotContainer for ContentHost {
    fn content(&self) -> Option<NativeHandle> {
        self.content.clone()
    }

    fn set_content(&mut self, content: Option<NativeHandle>) {
        self.content = content;
    }

    fn add_view_child(&mut self, child: NativeHandle, index: Option<usize>) {
        let index = index.unwrap_or(self.view_children.len()).min(self.view_children.len());
        self.view_children.insert(index, child);
    }

    fn remove_view_child(&mut self, child: &NativeHandle) {
        self.view_children.retain(|existing| !Rc::ptr_eq(existing, child));
    }
}

impl NativeWidget for ContentHost {
    delegate_to_bag!();

    fn container(&mut self) -> Container<'_> {
        Container::SingleSlot(self)
    }
}

/// A named-slot container: the action-bar family, which accepts children by
/// their runtime type (navigation button, action item).
pub struct ActionBar {
    /// Shared widget state.
    pub bag: PropertyBag,
    slots: Vec<(String, NativeHandle)>,
}

impl ActionBar {
    /// Constructor producing fresh action bars.
    #[must_use]
    pub fn ctor(type_name: &'static str) -> WidgetCtor {
        Rc::new(move || {
            Rc::new(RefCell::new(Self {
                bag: PropertyBag::new(type_name),
                slots: Vec::new(),
            })) as NativeHandle
        })
    }

    /// Slot assignments in placement order.
    #[must_use]
    pub fn slots(&self) -> &[(String, NativeHandle)] {
        &self.slots
    }
}

impl NamedSlotContainer for ActionBar {
    fn add_child_by_type_name(&mut self, type_name: &str, child: NativeHandle) {
        self.slots.push((type_name.into(), child));
    }
}

impl NativeWidget for ActionBar {
    delegate_to_bag!();

    fn container(&mut self) -> Container<'_> {
        Container::NamedSlot(self)
    }
}

impl core::fmt::Debug for LayoutPane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LayoutPane")
            .field("bag", &self.bag)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for ContentHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentHost")
            .field("bag", &self.bag)
            .field("has_content", &self.content.is_some())
            .field("view_children", &self.view_children.len())
            .finish_non_exhaustive()
    }
}

impl core::fmt::Debug for ActionBar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionBar")
            .field("bag", &self.bag)
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}
