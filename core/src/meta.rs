//! Per-tag placement and binding metadata.

/// The default two-way-binding property/event pair for a widget type.
///
/// A slider binds `value`/`valueChange`, a switch binds `checked`/`checkedChange`,
/// and so on. Template compilers consult this pair when expanding `v-model`-style
/// bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBinding {
    /// Property written by the binding.
    pub prop: String,
    /// Event the binding listens for.
    pub event: String,
}

impl ModelBinding {
    /// Creates a binding pair from a property and event name.
    pub fn new(prop: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            event: event.into(),
        }
    }
}

/// Describes how a tag participates in structural placement and two-way binding.
///
/// The parser-facing flags (`is_unary_tag`, `can_be_left_open`, `tag_namespace`)
/// are consumed by an external template compiler; the core stores them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewMeta {
    /// The node exists in the shadow tree but must never be attached to or
    /// detached from the native tree (document root, page nodes, detached
    /// placeholders).
    pub skip_add_to_dom: bool,
    /// The tag never has children in template source.
    pub is_unary_tag: bool,
    /// The tag may be left unclosed in template source.
    pub can_be_left_open: bool,
    /// Namespace prefix used by the template compiler.
    pub tag_namespace: String,
    /// Default two-way-binding pair for this widget type.
    pub model: ModelBinding,
}

impl Default for ViewMeta {
    fn default() -> Self {
        Self {
            skip_add_to_dom: false,
            is_unary_tag: false,
            can_be_left_open: false,
            tag_namespace: String::new(),
            model: ModelBinding::new("text", "textChange"),
        }
    }
}
