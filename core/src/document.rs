//! Document shim: factory operations and the process-wide singleton.
//!
//! The reactive framework builds the shadow tree exclusively through these
//! factories; none of them touch the native tree. The singleton is bound once
//! at startup and never re-created. It lives in thread-local storage because
//! the node tree itself is `Rc`-based and confined to one logical caller.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::DomError;
use crate::node::{NodeKind, ViewNode};

/// The document: tree root plus the four factory operations.
#[derive(Debug)]
pub struct Document {
    node: Rc<ViewNode>,
    document_element: Rc<ViewNode>,
}

impl Document {
    /// Creates a document with its synthetic root element.
    ///
    /// # Errors
    ///
    /// Fails when the `document` placeholder tag is not registered.
    pub fn new() -> Result<Rc<Self>, DomError> {
        Ok(Rc::new(Self {
            node: ViewNode::document_node(),
            document_element: ViewNode::element(crate::node::DOCUMENT_TAG)?,
        }))
    }

    /// The document node itself (kind [`NodeKind::Document`]).
    #[must_use]
    pub fn as_node(&self) -> &Rc<ViewNode> {
        &self.node
    }

    /// The synthetic root element.
    #[must_use]
    pub fn document_element(&self) -> &Rc<ViewNode> {
        &self.document_element
    }

    /// Creates an element for `tag_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnknownTag`] or [`DomError::WidgetLoad`] when the
    /// tag cannot be resolved.
    pub fn create_element(&self, tag_name: &str) -> Result<Rc<ViewNode>, DomError> {
        ViewNode::element(tag_name)
    }

    /// Creates a namespaced element; the namespace and tag are joined with
    /// `:` before resolution.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Document::create_element`].
    pub fn create_element_ns(&self, namespace: &str, tag_name: &str) -> Result<Rc<ViewNode>, DomError> {
        ViewNode::element(&format!("{namespace}:{tag_name}"))
    }

    /// Creates a comment node.
    ///
    /// # Errors
    ///
    /// Fails when the `comment` placeholder tag is not registered.
    pub fn create_comment(&self, text: impl Into<String>) -> Result<Rc<ViewNode>, DomError> {
        ViewNode::comment(text)
    }

    /// Creates a text node. Never fails; text nodes own no widget.
    #[must_use]
    pub fn create_text_node(&self, content: impl Into<String>) -> Rc<ViewNode> {
        ViewNode::text_node(content)
    }
}

thread_local! {
    static DOCUMENT: OnceCell<Rc<Document>> = const { OnceCell::new() };
}

/// Binds the document singleton.
///
/// Call once at startup, after the element table is registered.
///
/// # Errors
///
/// Returns [`DomError::DocumentInitialized`] on a second call — there is no
/// reinitialization path — or the construction error when the placeholder
/// tags are missing.
pub fn init_document() -> Result<Rc<Document>, DomError> {
    DOCUMENT.with(|slot| {
        if slot.get().is_some() {
            return Err(DomError::DocumentInitialized);
        }
        let document = Document::new()?;
        let _ = slot.set(document.clone());
        Ok(document)
    })
}

/// Returns the bound document singleton.
///
/// # Panics
///
/// Panics when the document has not been initialized; call [`init_document`]
/// after registering the element table.
#[must_use]
pub fn document() -> Rc<Document> {
    try_document().expect("document is not initialized; call init_document() after registering elements")
}

/// Returns the bound document singleton, or `None` before initialization.
#[must_use]
pub fn try_document() -> Option<Rc<Document>> {
    DOCUMENT.with(|slot| slot.get().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::registry::register_element;
    use crate::widget::{NativeHandle, NativeWidget, Value, WidgetCtor};
    use std::cell::RefCell;

    struct Null(&'static str);

    impl NativeWidget for Null {
        fn type_name(&self) -> &'static str {
            self.0
        }

        fn set_property(&mut self, _key: &str, _value: Value) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn null_ctor(name: &'static str) -> WidgetCtor {
        Rc::new(move || Rc::new(RefCell::new(Null(name))) as NativeHandle)
    }

    fn register_placeholders() {
        register_element("document", || Ok(null_ctor("ProxyContainer"))).unwrap();
        register_element("comment", || Ok(null_ctor("Placeholder"))).unwrap();
        register_element("label", || Ok(null_ctor("Label"))).unwrap();
        register_element("svg:rect", || Ok(null_ctor("Rect"))).unwrap();
    }

    #[test]
    fn factories_produce_expected_kinds() {
        register_placeholders();
        let document = Document::new().unwrap();

        assert_eq!(document.as_node().kind(), NodeKind::Document);
        assert_eq!(document.document_element().kind(), NodeKind::Element);
        assert_eq!(document.create_element("Label").unwrap().kind(), NodeKind::Element);

        let comment = document.create_comment("marker").unwrap();
        assert_eq!(comment.kind(), NodeKind::Comment);
        assert_eq!(comment.text(), "marker");

        let text = document.create_text_node("hi");
        assert_eq!(text.kind(), NodeKind::Text);
        assert!(text.native_widget().is_none());
    }

    #[test]
    fn create_element_ns_joins_namespace_and_tag() {
        register_placeholders();
        let document = Document::new().unwrap();
        let rect = document.create_element_ns("svg", "rect").unwrap();
        assert_eq!(rect.tag_name(), "svg:rect");
    }

    #[test]
    fn singleton_binds_once() {
        register_placeholders();
        assert!(try_document().is_none());

        let bound = init_document().unwrap();
        assert!(Rc::ptr_eq(&bound, &document()));

        let err = init_document().unwrap_err();
        assert!(matches!(err, DomError::DocumentInitialized));
        assert!(Rc::ptr_eq(&bound, &document()));
    }

    #[test]
    fn document_requires_placeholder_registration() {
        let err = Document::new().unwrap_err();
        assert!(matches!(err, DomError::UnknownTag(tag) if tag == "document"));
    }
}
