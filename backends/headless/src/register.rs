//! The element table: the load-time vocabulary of supported tags.
//!
//! This table is data, not logic. Each entry pairs a tag name with a deferred
//! widget resolver and, where needed, placement/binding metadata overrides.

use estuary_core::error::DomError;
use estuary_core::meta::{ModelBinding, ViewMeta};
use estuary_core::registry::{register_element, register_element_with_meta};

use crate::widgets::{ActionBar, ContentHost, LayoutPane, Leaf};

fn skip() -> ViewMeta {
    ViewMeta {
        skip_add_to_dom: true,
        ..ViewMeta::default()
    }
}

fn model(prop: &str, event: &str) -> ViewMeta {
    ViewMeta {
        model: ModelBinding::new(prop, event),
        ..ViewMeta::default()
    }
}

/// Registers the full headless widget vocabulary.
///
/// Call exactly once at startup, before the document singleton is bound.
///
/// # Errors
///
/// Returns [`DomError::DuplicateTag`] when called twice.
pub fn register_widgets() -> Result<(), DomError> {
    // layout containers
    register_element("AbsoluteLayout", || Ok(LayoutPane::ctor("AbsoluteLayout")))?;
    register_element("DockLayout", || Ok(LayoutPane::ctor("DockLayout")))?;
    register_element("GridLayout", || Ok(LayoutPane::ctor("GridLayout")))?;
    register_element("StackLayout", || Ok(LayoutPane::ctor("StackLayout")))?;
    register_element("FlexboxLayout", || Ok(LayoutPane::ctor("FlexboxLayout")))?;
    register_element("WrapLayout", || Ok(LayoutPane::ctor("WrapLayout")))?;
    register_element("ProxyViewContainer", || Ok(LayoutPane::ctor("ProxyViewContainer")))?;

    // single-slot content containers
    register_element("ContentView", || Ok(ContentHost::ctor("ContentView")))?;
    register_element("ScrollView", || Ok(ContentHost::ctor("ScrollView")))?;
    register_element_with_meta("Page", || Ok(ContentHost::ctor("Page")), skip())?;

    // action-bar family
    register_element("ActionBar", || Ok(ActionBar::ctor("ActionBar")))?;
    register_element("ActionItem", || Ok(Leaf::ctor("ActionItem")))?;
    register_element("NavigationButton", || Ok(Leaf::ctor("NavigationButton")))?;

    // text and media
    register_element("Label", || Ok(Leaf::ctor("Label")))?;
    register_element("Button", || Ok(Leaf::ctor("Button")))?;
    register_element("TextField", || Ok(Leaf::ctor("TextField")))?;
    register_element("TextView", || Ok(Leaf::ctor("TextView")))?;
    register_element("HtmlView", || Ok(Leaf::ctor("HtmlView")))?;
    register_element("WebView", || Ok(Leaf::ctor("WebView")))?;
    register_element("Image", || Ok(Leaf::ctor("Image")))?;
    register_element("img", || Ok(Leaf::ctor("Image")))?;
    register_element("FormattedString", || Ok(Leaf::ctor("FormattedString")))?;
    register_element("Span", || Ok(Leaf::ctor("Span")))?;

    // form controls, with their two-way-binding pairs
    register_element("ActivityIndicator", || Ok(Leaf::ctor("ActivityIndicator")))?;
    register_element("Progress", || Ok(Leaf::ctor("Progress")))?;
    register_element("SearchBar", || Ok(Leaf::ctor("SearchBar")))?;
    register_element_with_meta("DatePicker", || Ok(Leaf::ctor("DatePicker")), model("date", "dateChange"))?;
    register_element_with_meta("TimePicker", || Ok(Leaf::ctor("TimePicker")), model("time", "timeChange"))?;
    register_element_with_meta(
        "ListPicker",
        || Ok(Leaf::ctor("ListPicker")),
        model("selectedIndex", "selectedIndexChange"),
    )?;
    register_element_with_meta(
        "SegmentedBar",
        || Ok(Leaf::ctor("SegmentedBar")),
        model("selectedIndex", "selectedIndexChange"),
    )?;
    register_element("SegmentedBarItem", || Ok(Leaf::ctor("SegmentedBarItem")))?;
    register_element_with_meta("Slider", || Ok(Leaf::ctor("Slider")), model("value", "valueChange"))?;
    register_element_with_meta("Switch", || Ok(Leaf::ctor("Switch")), model("checked", "checkedChange"))?;

    // item containers
    register_element("ListView", || Ok(Leaf::ctor("ListView")))?;
    register_element("Repeater", || Ok(Leaf::ctor("Repeater")))?;
    register_element_with_meta(
        "TabView",
        || Ok(Leaf::ctor("TabView")),
        model("selectedIndex", "selectedIndexChange"),
    )?;
    register_element_with_meta("TabViewItem", || Ok(Leaf::ctor("TabViewItem")), skip())?;

    // structural placeholders
    register_element("Placeholder", || Ok(Leaf::ctor("Placeholder")))?;
    register_element("Comment", || Ok(Leaf::ctor("Placeholder")))?;
    register_element_with_meta("Document", || Ok(LayoutPane::ctor("ProxyViewContainer")), skip())?;
    register_element_with_meta(
        "DetachedContainer",
        || Ok(LayoutPane::ctor("ProxyViewContainer")),
        skip(),
    )?;
    register_element_with_meta("DetachedText", || Ok(Leaf::ctor("Placeholder")), skip())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estuary_core::registry::view_meta;

    #[test]
    fn table_registers_binding_overrides() {
        register_widgets().unwrap();
        assert_eq!(view_meta("switch").model, ModelBinding::new("checked", "checkedChange"));
        assert_eq!(view_meta("Slider").model, ModelBinding::new("value", "valueChange"));
        assert_eq!(
            view_meta("unregistered-tag").model,
            ModelBinding::new("text", "textChange")
        );
    }

    #[test]
    fn page_and_placeholders_skip_the_native_tree() {
        register_widgets().unwrap();
        assert!(view_meta("page").skip_add_to_dom);
        assert!(view_meta("document").skip_add_to_dom);
        assert!(view_meta("detached-container").skip_add_to_dom);
        assert!(!view_meta("comment").skip_add_to_dom);
    }

    #[test]
    fn second_registration_pass_is_rejected() {
        register_widgets().unwrap();
        assert!(register_widgets().is_err());
    }
}
