//! Error types surfaced by the node tree and registry.
//!
//! Everything here is reported synchronously to the immediate caller; the core
//! never retries or recovers internally.

use thiserror::Error;

/// Boxed error used to carry toolkit-specific failure causes across the
/// widget protocol boundary.
pub type BoxError = Box<dyn std::error::Error>;

/// Errors produced by the registry, the document factories, and attribute
/// application.
#[derive(Debug, Error)]
pub enum DomError {
    /// A second registration arrived for an already-registered tag name.
    /// Registration happens at startup, so this is a fatal configuration error.
    #[error("element `{0}` is already registered")]
    DuplicateTag(String),
    /// The tag has no registry entry at instantiation time.
    #[error("no known widget for element `{0}`")]
    UnknownTag(String),
    /// The registered resolver failed to produce a widget constructor.
    #[error("could not load widget for `{tag}`: {source}")]
    WidgetLoad {
        /// Normalized tag name whose resolver failed.
        tag: String,
        /// Underlying cause reported by the resolver.
        source: BoxError,
    },
    /// The native widget rejected a property assignment.
    #[error("`{tag}` rejected attribute `{key}`: {source}")]
    Attribute {
        /// Normalized tag name of the owning element.
        tag: String,
        /// The attribute key that failed to apply.
        key: String,
        /// Underlying cause reported by the widget.
        source: BoxError,
    },
    /// A structural mutation was called with an invalid node argument.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// `init_document` was called after the document singleton was bound.
    #[error("document is already initialized")]
    DocumentInitialized,
}

/// Invalid node arguments to `append_child` / `insert_before` / `remove_child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node is already attached to a different parent.
    #[error("node already has a different parent")]
    ForeignParent,
    /// The node is already a child of this parent.
    #[error("node is already a child of this parent")]
    AlreadyChild,
    /// The reference node is not a child of this parent.
    #[error("reference node has a different parent")]
    ForeignReference,
    /// The node has no parent to be removed from.
    #[error("node has no parent")]
    Detached,
}
