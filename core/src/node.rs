//! The shadow node tree mirrored onto the native widget tree.
//!
//! [`ViewNode`] is the toolkit-independent node the reactive framework builds
//! through the document factories. Structural mutations keep the owned child
//! list and the doubly-linked sibling index consistent, then hand the change to
//! the synchronizer which applies it to the native tree.

use core::fmt;
use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::{DomError, TreeError};
use crate::meta::ViewMeta;
use crate::registry::{self, normalize_tag_name};
use crate::sync;
use crate::widget::{EventHandler, NativeHandle, Value};

/// Attribute names routed through the toolkit-specific structural channel
/// instead of plain property assignment.
pub const XML_ATTRIBUTES: [&str; 4] = ["style", "rows", "columns", "fontAttributes"];

/// Tag backing comment nodes; must be registered by the integration.
pub const COMMENT_TAG: &str = "comment";

/// Tag backing the synthetic document root element.
pub const DOCUMENT_TAG: &str = "document";

/// Discriminates the node type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The singleton tree root.
    Document,
    /// A node owning exactly one native widget.
    Element,
    /// An element-like non-rendering marker, tracked positionally by
    /// containers that support view children.
    Comment,
    /// Plain text content; owns no native widget.
    Text,
}

impl NodeKind {
    /// Stable numeric discriminator (Document = 9, Element = 1, Comment = 8,
    /// Text = 3).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Document => 9,
            Self::Element => 1,
            Self::Comment => 8,
            Self::Text => 3,
        }
    }
}

/// A node in the shadow tree.
///
/// Children are owned in insertion order; parent and sibling links are weak
/// back-references kept consistent with the child list after every mutation.
pub struct ViewNode {
    kind: NodeKind,
    tag_name: String,
    native: Option<NativeHandle>,
    meta: OnceCell<Rc<ViewMeta>>,
    parent: RefCell<Weak<ViewNode>>,
    child_nodes: RefCell<Vec<Rc<ViewNode>>>,
    prev_sibling: RefCell<Weak<ViewNode>>,
    next_sibling: RefCell<Weak<ViewNode>>,
    text: RefCell<String>,
}

impl ViewNode {
    fn bare(kind: NodeKind, tag_name: String, native: Option<NativeHandle>, text: String) -> Self {
        Self {
            kind,
            tag_name,
            native,
            meta: OnceCell::new(),
            parent: RefCell::new(Weak::new()),
            child_nodes: RefCell::new(Vec::new()),
            prev_sibling: RefCell::new(Weak::new()),
            next_sibling: RefCell::new(Weak::new()),
            text: RefCell::new(text),
        }
    }

    fn with_widget(kind: NodeKind, tag_name: &str, text: String) -> Result<Rc<Self>, DomError> {
        let tag_name = normalize_tag_name(tag_name);
        let ctor = registry::widget_constructor(&tag_name)?;
        let widget = ctor();
        let node = Rc::new(Self::bare(kind, tag_name, Some(widget.clone()), text));
        widget.borrow_mut().bind_owner(Rc::downgrade(&node));
        Ok(node)
    }

    /// Creates an element node, resolving `tag_name` through the registry and
    /// instantiating its native widget.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownTag`] or [`DomError::WidgetLoad`] when the
    /// tag cannot be resolved to a widget constructor.
    pub fn element(tag_name: &str) -> Result<Rc<Self>, DomError> {
        Self::with_widget(NodeKind::Element, tag_name, String::new())
    }

    /// Creates a comment node backed by the placeholder widget registered
    /// under [`COMMENT_TAG`].
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownTag`] or [`DomError::WidgetLoad`] when the
    /// placeholder tag cannot be resolved.
    pub fn comment(text: impl Into<String>) -> Result<Rc<Self>, DomError> {
        Self::with_widget(NodeKind::Comment, COMMENT_TAG, text.into())
    }

    /// Creates a text node. Owns no native widget and never participates in
    /// native structural mutation.
    #[must_use]
    pub fn text_node(content: impl Into<String>) -> Rc<Self> {
        let node = Self::bare(NodeKind::Text, String::new(), None, content.into());
        let meta = Rc::new(ViewMeta {
            skip_add_to_dom: true,
            ..ViewMeta::default()
        });
        node.meta.set(meta).expect("meta cell is empty at construction");
        Rc::new(node)
    }

    pub(crate) fn document_node() -> Rc<Self> {
        Rc::new(Self::bare(NodeKind::Document, DOCUMENT_TAG.into(), None, String::new()))
    }

    /// The node's kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Normalized tag name (empty for text nodes).
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The owning parent, if attached.
    #[must_use]
    pub fn parent_node(&self) -> Option<Rc<Self>> {
        self.parent.borrow().upgrade()
    }

    /// Snapshot of the child list in tree order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<Rc<Self>> {
        self.child_nodes.borrow().clone()
    }

    /// First child, if any.
    #[must_use]
    pub fn first_child(&self) -> Option<Rc<Self>> {
        self.child_nodes.borrow().first().cloned()
    }

    /// Last child, if any.
    #[must_use]
    pub fn last_child(&self) -> Option<Rc<Self>> {
        self.child_nodes.borrow().last().cloned()
    }

    /// Previous sibling, if any.
    #[must_use]
    pub fn prev_sibling(&self) -> Option<Rc<Self>> {
        self.prev_sibling.borrow().upgrade()
    }

    /// Next sibling, if any.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Rc<Self>> {
        self.next_sibling.borrow().upgrade()
    }

    /// The native widget owned by this node (absent for text and document
    /// nodes).
    #[must_use]
    pub fn native_widget(&self) -> Option<NativeHandle> {
        self.native.clone()
    }

    /// Text content of a text or comment node.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Placement/binding metadata for this node's tag, resolved from the
    /// registry on first access and cached on the node.
    #[must_use]
    pub fn meta(&self) -> Rc<ViewMeta> {
        self.meta
            .get_or_init(|| registry::view_meta(&self.tag_name))
            .clone()
    }

    fn ensure_insertable(self: &Rc<Self>, child: &Rc<Self>) -> Result<(), TreeError> {
        match child.parent_node() {
            Some(parent) if Rc::ptr_eq(&parent, self) => Err(TreeError::AlreadyChild),
            Some(_) => Err(TreeError::ForeignParent),
            None => Ok(()),
        }
    }

    /// Appends `child` after the current last child and mirrors the insertion
    /// onto the native tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ForeignParent`] or [`TreeError::AlreadyChild`] for
    /// invalid arguments, or [`DomError::Attribute`] if a text-content update
    /// is rejected by the native widget.
    pub fn append_child(self: &Rc<Self>, child: &Rc<Self>) -> Result<(), DomError> {
        self.ensure_insertable(child)?;

        *child.parent.borrow_mut() = Rc::downgrade(self);
        if let Some(last) = self.last_child() {
            *child.prev_sibling.borrow_mut() = Rc::downgrade(&last);
            *last.next_sibling.borrow_mut() = Rc::downgrade(child);
        }
        self.child_nodes.borrow_mut().push(child.clone());

        let index = self.child_nodes.borrow().len() - 1;
        sync::insert_child(self, child, Some(index));

        if child.kind == NodeKind::Text {
            self.refresh_text()?;
        }
        Ok(())
    }

    /// Inserts `child` immediately before `reference` and mirrors the
    /// insertion onto the native tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ForeignReference`] when `reference` is not a child
    /// of this node, [`TreeError::ForeignParent`] / [`TreeError::AlreadyChild`]
    /// for an invalid `child`, or [`DomError::Attribute`] if a text-content
    /// update is rejected by the native widget.
    pub fn insert_before(self: &Rc<Self>, child: &Rc<Self>, reference: &Rc<Self>) -> Result<(), DomError> {
        let index = self
            .child_nodes
            .borrow()
            .iter()
            .position(|node| Rc::ptr_eq(node, reference))
            .ok_or(TreeError::ForeignReference)?;
        self.ensure_insertable(child)?;

        *child.parent.borrow_mut() = Rc::downgrade(self);
        *child.next_sibling.borrow_mut() = Rc::downgrade(reference);
        if let Some(prev) = reference.prev_sibling() {
            *child.prev_sibling.borrow_mut() = Rc::downgrade(&prev);
            *prev.next_sibling.borrow_mut() = Rc::downgrade(child);
        } else {
            *child.prev_sibling.borrow_mut() = Weak::new();
        }
        *reference.prev_sibling.borrow_mut() = Rc::downgrade(child);
        self.child_nodes.borrow_mut().insert(index, child.clone());

        sync::insert_child(self, child, Some(index));

        if child.kind == NodeKind::Text {
            self.refresh_text()?;
        }
        Ok(())
    }

    /// Detaches `child` from this node and mirrors the removal onto the native
    /// tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Detached`] or [`TreeError::ForeignParent`] for
    /// invalid arguments, or [`DomError::Attribute`] if the text-content reset
    /// is rejected by the native widget.
    pub fn remove_child(self: &Rc<Self>, child: &Rc<Self>) -> Result<(), DomError> {
        let parent = child.parent_node().ok_or(TreeError::Detached)?;
        if !Rc::ptr_eq(&parent, self) {
            return Err(TreeError::ForeignParent.into());
        }

        let prev = child.prev_sibling();
        let next = child.next_sibling();
        if let Some(prev) = &prev {
            *prev.next_sibling.borrow_mut() = next.as_ref().map_or_else(Weak::new, Rc::downgrade);
        }
        if let Some(next) = &next {
            *next.prev_sibling.borrow_mut() = prev.as_ref().map_or_else(Weak::new, Rc::downgrade);
        }
        *child.parent.borrow_mut() = Weak::new();
        *child.prev_sibling.borrow_mut() = Weak::new();
        *child.next_sibling.borrow_mut() = Weak::new();
        self.child_nodes.borrow_mut().retain(|node| !Rc::ptr_eq(node, child));

        sync::remove_child(self, child);

        if child.kind == NodeKind::Text && self.native.is_some() {
            self.set_text("")?;
        }
        Ok(())
    }

    /// Re-derives this node's text content from its text-node children (tree
    /// order) and pushes it through [`ViewNode::set_text`].
    fn refresh_text(self: &Rc<Self>) -> Result<(), DomError> {
        if self.native.is_none() {
            return Ok(());
        }
        let combined: String = self
            .child_nodes
            .borrow()
            .iter()
            .filter(|node| node.kind == NodeKind::Text)
            .map(|node| node.text.borrow().clone())
            .collect();
        self.set_text(&combined)
    }

    /// Applies an attribute to the native widget.
    ///
    /// Names in [`XML_ATTRIBUTES`] go through the toolkit's structural
    /// attribute entry point; everything else is direct property assignment.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Attribute`] naming the tag and key when the widget
    /// rejects the assignment or the node owns no widget.
    pub fn set_attribute(&self, key: &str, value: Value) -> Result<(), DomError> {
        let Some(widget) = &self.native else {
            return Err(DomError::Attribute {
                tag: self.tag_name.clone(),
                key: key.into(),
                source: "node owns no native widget".into(),
            });
        };
        let result = if XML_ATTRIBUTES.contains(&key) {
            widget.borrow_mut().apply_xml_attribute(key, &value)
        } else {
            widget.borrow_mut().set_property(key, value)
        };
        result.map_err(|source| DomError::Attribute {
            tag: self.tag_name.clone(),
            key: key.into(),
            source,
        })
    }

    /// Writes one style property on the native widget.
    ///
    /// Blank or whitespace-only values mean "no style change" and are ignored
    /// (the common unset-by-clearing pattern). Properties ending in `Align`
    /// are renamed to the toolkit's `Alignment` spelling before forwarding.
    pub fn set_style(&self, property: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let Some(widget) = &self.native else { return };
        if property.ends_with("Align") {
            widget.borrow_mut().set_style(&format!("{property}ment"), value);
        } else {
            widget.borrow_mut().set_style(property, value);
        }
    }

    /// Sets the node's text content.
    ///
    /// Text nodes store the content and delegate upward so the parent
    /// re-derives its combined text; element-like nodes assign the `text`
    /// attribute on their widget.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::Attribute`] when the widget rejects the `text`
    /// assignment.
    pub fn set_text(self: &Rc<Self>, text: &str) -> Result<(), DomError> {
        if self.kind == NodeKind::Text {
            *self.text.borrow_mut() = text.into();
            if let Some(parent) = self.parent_node() {
                parent.refresh_text()?;
            }
            return Ok(());
        }
        self.set_attribute("text", Value::from(text))
    }

    /// Attaches an event listener on the native widget. No-op for nodes
    /// without a widget.
    pub fn add_event_listener(&self, event: &str, handler: EventHandler) {
        if let Some(widget) = &self.native {
            widget.borrow_mut().add_listener(event, handler);
        }
    }

    /// Detaches the listeners registered for `event` on the native widget.
    pub fn remove_event_listener(&self, event: &str) {
        if let Some(widget) = &self.native {
            widget.borrow_mut().remove_listener(event);
        }
    }
}

impl fmt::Debug for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("kind", &self.kind)
            .field("tag_name", &self.tag_name)
            .field("children", &self.child_nodes.borrow().len())
            .finish_non_exhaustive()
    }
}
