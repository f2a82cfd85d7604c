//! Text rendering of a headless widget tree, for demos and test diagnostics.

use std::fmt::Write as _;

use estuary_core::widget::{NativeHandle, SingleSlotContainer as _};

use crate::widgets::{ActionBar, ContentHost, LayoutPane};

/// Renders the native tree rooted at `root` as an indented outline.
///
/// One line per widget, children indented two spaces, named slots prefixed
/// with their slot name.
#[must_use]
pub fn outline(root: &NativeHandle) -> String {
    let mut out = String::new();
    render(root, 0, None, &mut out);
    out
}

fn render(handle: &NativeHandle, depth: usize, slot: Option<&str>, out: &mut String) {
    let widget = handle.borrow();
    for _ in 0..depth {
        out.push_str("  ");
    }
    match slot {
        Some(name) => {
            let _ = writeln!(out, "{name}: {}", widget.type_name());
        }
        None => {
            let _ = writeln!(out, "{}", widget.type_name());
        }
    }

    let any = &*widget as &dyn core::any::Any;
    if let Some(pane) = any.downcast_ref::<LayoutPane>() {
        for child in pane.children() {
            render(child, depth + 1, None, out);
        }
    } else if let Some(host) = any.downcast_ref::<ContentHost>() {
        if let Some(content) = host.content() {
            render(&content, depth + 1, None, out);
        }
        for child in host.view_children() {
            render(child, depth + 1, Some("view"), out);
        }
    } else if let Some(bar) = any.downcast_ref::<ActionBar>() {
        for (name, child) in bar.slots() {
            render(child, depth + 1, Some(name), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{ContentHost, LayoutPane, Leaf};
    use estuary_core::widget::Container;

    #[test]
    fn nested_tree_renders_with_indentation() {
        let page = ContentHost::ctor("Page")();
        let stack = LayoutPane::ctor("StackLayout")();
        let label = Leaf::ctor("Label")();

        {
            let mut widget = stack.borrow_mut();
            let Container::Ordered(list) = widget.container() else {
                panic!("stack must be ordered");
            };
            list.insert_at(0, label);
        }
        {
            let mut widget = page.borrow_mut();
            let Container::SingleSlot(slot) = widget.container() else {
                panic!("page must be single-slot");
            };
            slot.set_content(Some(stack));
        }

        assert_eq!(outline(&page), "Page\n  StackLayout\n    Label\n");
    }
}
