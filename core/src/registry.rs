//! Tag registry: normalized tag name → widget resolver + metadata.
//!
//! The registry is populated once at startup by the surrounding integration
//! (a fixed table of `register_element` calls) and consulted lazily by element
//! construction. Resolver results are deliberately not cached: every element
//! instantiation re-invokes the resolver, so hot-swapped widget modules take
//! effect immediately.
//!
//! Storage is thread-local. The node tree is `Rc`-based and the design assumes
//! one logical caller per process, so the registry is confined to the tree's
//! thread along with everything else.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{BoxError, DomError};
use crate::meta::ViewMeta;
use crate::widget::{WidgetCtor, WidgetResolver};

struct Entry {
    resolver: WidgetResolver,
    meta: Rc<ViewMeta>,
}

thread_local! {
    static REGISTRY: RefCell<HashMap<String, Entry>> = RefCell::new(HashMap::new());
    static DEFAULT_META: Rc<ViewMeta> = Rc::new(ViewMeta::default());
}

/// Normalizes a tag name by stripping hyphens and lowercasing.
///
/// `"native-list-view"`, `"NativeListView"`, and `"nativelistview"` all
/// normalize to the same key.
#[must_use]
pub fn normalize_tag_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Registers a tag with default metadata.
///
/// # Errors
///
/// Returns [`DomError::DuplicateTag`] if the normalized name is already
/// registered; the first registration stays active.
pub fn register_element(
    name: &str,
    resolver: impl Fn() -> Result<WidgetCtor, BoxError> + 'static,
) -> Result<(), DomError> {
    register_element_with_meta(name, resolver, ViewMeta::default())
}

/// Registers a tag with explicit metadata.
///
/// # Errors
///
/// Returns [`DomError::DuplicateTag`] if the normalized name is already
/// registered; the first registration stays active.
pub fn register_element_with_meta(
    name: &str,
    resolver: impl Fn() -> Result<WidgetCtor, BoxError> + 'static,
    meta: ViewMeta,
) -> Result<(), DomError> {
    let key = normalize_tag_name(name);
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        if registry.contains_key(&key) {
            return Err(DomError::DuplicateTag(key.clone()));
        }
        registry.insert(
            key,
            Entry {
                resolver: Rc::new(resolver),
                meta: Rc::new(meta),
            },
        );
        Ok(())
    })
}

/// Resolves the widget constructor for a tag by invoking its stored resolver.
///
/// # Errors
///
/// Returns [`DomError::UnknownTag`] when the tag has no registry entry, or
/// [`DomError::WidgetLoad`] wrapping the cause when the resolver fails.
pub fn widget_constructor(name: &str) -> Result<WidgetCtor, DomError> {
    let key = normalize_tag_name(name);
    let resolver = REGISTRY
        .with(|registry| registry.borrow().get(&key).map(|entry| entry.resolver.clone()))
        .ok_or_else(|| DomError::UnknownTag(key.clone()))?;
    resolver().map_err(|source| DomError::WidgetLoad { tag: key, source })
}

/// Returns the metadata registered for a tag, or the library default when the
/// tag is unregistered.
///
/// Metadata lookup never fails: unregistered tags may still appear as
/// structural placeholders, and only widget resolution can error.
#[must_use]
pub fn view_meta(name: &str) -> Rc<ViewMeta> {
    let key = normalize_tag_name(name);
    REGISTRY
        .with(|registry| registry.borrow().get(&key).map(|entry| entry.meta.clone()))
        .unwrap_or_else(|| DEFAULT_META.with(Rc::clone))
}
