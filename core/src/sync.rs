//! Native tree synchronizer.
//!
//! Translates a structural mutation on the shadow tree into the equivalent
//! native operation, dispatching on the child-management protocol the parent
//! widget declares. Nodes whose meta marks them `skip_add_to_dom`, and parents
//! without a native widget, never touch the native tree.

use std::rc::Rc;

use tracing::debug;

use crate::node::{NodeKind, ViewNode};
use crate::widget::{Container, NativeHandle, OrderedContainer};

fn index_of(container: &dyn OrderedContainer, widget: &NativeHandle) -> Option<usize> {
    (0..container.child_count())
        .find(|index| container.child_at(*index).is_some_and(|child| Rc::ptr_eq(&child, widget)))
}

/// Mirrors an insertion at `index` (tail append when `None`) onto the native
/// tree.
pub(crate) fn insert_child(parent: &Rc<ViewNode>, child: &Rc<ViewNode>, index: Option<usize>) {
    if child.meta().skip_add_to_dom {
        return;
    }
    let Some(parent_widget) = parent.native_widget() else {
        debug!(parent = parent.tag_name(), child = child.tag_name(), "parent owns no native widget; skipping insert");
        return;
    };
    let Some(child_widget) = child.native_widget() else {
        return;
    };

    let mut parent_widget = parent_widget.borrow_mut();
    match parent_widget.container() {
        Container::Ordered(container) => {
            // Reorders arrive as plain inserts of an already-attached child;
            // express the move as remove-then-reinsert.
            if let Some(current) = index_of(container, &child_widget) {
                container.remove_at(current);
            }
            match index {
                Some(index) => container.insert_at(index, child_widget.clone()),
                None => container.insert_at(container.child_count(), child_widget.clone()),
            }
        }
        Container::SingleSlot(container) => {
            if child.kind() == NodeKind::Comment {
                container.add_view_child(child_widget.clone(), index);
            } else {
                container.set_content(Some(child_widget.clone()));
            }
        }
        Container::NamedSlot(container) => {
            let type_name = child_widget.borrow().type_name();
            container.add_child_by_type_name(type_name, child_widget.clone());
        }
        Container::None => {
            debug!(parent = parent.tag_name(), child = child.tag_name(), "parent widget declares no container protocol; insert dropped");
        }
    }
}

/// Mirrors a removal onto the native tree.
pub(crate) fn remove_child(parent: &Rc<ViewNode>, child: &Rc<ViewNode>) {
    if child.meta().skip_add_to_dom {
        return;
    }
    let Some(parent_widget) = parent.native_widget() else {
        return;
    };
    let Some(child_widget) = child.native_widget() else {
        return;
    };

    let mut parent_widget = parent_widget.borrow_mut();
    match parent_widget.container() {
        Container::Ordered(container) => {
            if let Some(current) = index_of(container, &child_widget) {
                container.remove_at(current);
            }
        }
        Container::SingleSlot(container) => {
            if container.content().is_some_and(|content| Rc::ptr_eq(&content, &child_widget)) {
                container.set_content(None);
            }
            if child.kind() == NodeKind::Comment {
                container.remove_view_child(&child_widget);
            }
        }
        Container::NamedSlot(_) => {
            debug!(parent = parent.tag_name(), child = child.tag_name(), "named-slot container has no removal path");
        }
        Container::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::meta::ViewMeta;
    use crate::registry::{register_element, register_element_with_meta};
    use crate::widget::{NativeWidget, SingleSlotContainer, NamedSlotContainer, Value, WidgetCtor};
    use std::cell::RefCell;

    /// Records every indexed operation so tests can assert exact call traces.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        InsertAt(usize),
        RemoveAt(usize),
    }

    #[derive(Default)]
    struct Pane {
        children: Vec<NativeHandle>,
        ops: Vec<Op>,
    }

    impl OrderedContainer for Pane {
        fn child_count(&self) -> usize {
            self.children.len()
        }

        fn child_at(&self, index: usize) -> Option<NativeHandle> {
            self.children.get(index).cloned()
        }

        fn insert_at(&mut self, index: usize, child: NativeHandle) {
            let index = index.min(self.children.len());
            self.ops.push(Op::InsertAt(index));
            self.children.insert(index, child);
        }

        fn remove_at(&mut self, index: usize) -> Option<NativeHandle> {
            if index >= self.children.len() {
                return None;
            }
            self.ops.push(Op::RemoveAt(index));
            Some(self.children.remove(index))
        }
    }

    impl NativeWidget for Pane {
        fn type_name(&self) -> &'static str {
            "Pane"
        }

        fn container(&mut self) -> Container<'_> {
            Container::Ordered(self)
        }

        fn set_property(&mut self, _key: &str, _value: Value) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Host {
        content: Option<NativeHandle>,
        view_children: Vec<NativeHandle>,
    }

    impl SingleSlotContainer for Host {
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

    impl NativeWidget for Host {
        fn type_name(&self) -> &'static str {
            "Host"
        }

        fn container(&mut self) -> Container<'_> {
            Container::SingleSlot(self)
        }

        fn set_property(&mut self, _key: &str, _value: Value) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Bar {
        slots: Vec<(String, NativeHandle)>,
    }

    impl NamedSlotContainer for Bar {
        fn add_child_by_type_name(&mut self, type_name: &str, child: NativeHandle) {
            self.slots.push((type_name.into(), child));
        }
    }

    impl NativeWidget for Bar {
        fn type_name(&self) -> &'static str {
            "Bar"
        }

        fn container(&mut self) -> Container<'_> {
            Container::NamedSlot(self)
        }

        fn set_property(&mut self, _key: &str, _value: Value) -> Result<(), BoxError> {
            Ok(())
        }
    }

    struct Leaf(&'static str);

    impl NativeWidget for Leaf {
        fn type_name(&self) -> &'static str {
            self.0
        }

        fn set_property(&mut self, _key: &str, _value: Value) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn leaf_ctor(name: &'static str) -> WidgetCtor {
        Rc::new(move || Rc::new(RefCell::new(Leaf(name))) as NativeHandle)
    }

    fn register_toolkit() {
        register_element("pane", || Ok(Rc::new(|| Rc::new(RefCell::new(Pane::default())) as NativeHandle))).unwrap();
        register_element("host", || Ok(Rc::new(|| Rc::new(RefCell::new(Host::default())) as NativeHandle))).unwrap();
        register_element("bar", || Ok(Rc::new(|| Rc::new(RefCell::new(Bar::default())) as NativeHandle))).unwrap();
        register_element("label", || Ok(leaf_ctor("Label"))).unwrap();
        register_element("action-item", || Ok(leaf_ctor("ActionItem"))).unwrap();
        register_element("comment", || Ok(leaf_ctor("Placeholder"))).unwrap();
        register_element_with_meta(
            "page",
            || Ok(leaf_ctor("Page")),
            ViewMeta {
                skip_add_to_dom: true,
                ..ViewMeta::default()
            },
        )
        .unwrap();
    }

    fn with_pane<R>(node: &ViewNode, inspect: impl FnOnce(&Pane) -> R) -> R {
        let widget = node.native_widget().unwrap();
        let widget = widget.borrow();
        inspect((&*widget as &dyn core::any::Any).downcast_ref::<Pane>().unwrap())
    }

    fn with_host<R>(node: &ViewNode, inspect: impl FnOnce(&Host) -> R) -> R {
        let widget = node.native_widget().unwrap();
        let widget = widget.borrow();
        inspect((&*widget as &dyn core::any::Any).downcast_ref::<Host>().unwrap())
    }

    #[test]
    fn ordered_parent_mirrors_shadow_order() {
        register_toolkit();
        let pane = ViewNode::element("pane").unwrap();
        let a = ViewNode::element("label").unwrap();
        let b = ViewNode::element("label").unwrap();
        let c = ViewNode::element("label").unwrap();

        pane.append_child(&a).unwrap();
        pane.append_child(&c).unwrap();
        pane.insert_before(&b, &c).unwrap();

        with_pane(&pane, |widget| {
            assert_eq!(widget.children.len(), 3);
            for (child, node) in widget.children.iter().zip([&a, &b, &c]) {
                assert!(Rc::ptr_eq(child, &node.native_widget().unwrap()));
            }
        });
    }

    #[test]
    fn removal_uses_single_remove_at_and_shifts_indices() {
        register_toolkit();
        let pane = ViewNode::element("pane").unwrap();
        let first = ViewNode::element("label").unwrap();
        let second = ViewNode::element("label").unwrap();
        pane.append_child(&first).unwrap();
        pane.append_child(&second).unwrap();

        pane.remove_child(&first).unwrap();

        with_pane(&pane, |widget| {
            let removals: Vec<_> = widget
                .ops
                .iter()
                .filter(|op| matches!(op, Op::RemoveAt(_)))
                .collect();
            assert_eq!(removals, [&Op::RemoveAt(0)]);
            assert_eq!(widget.children.len(), 1);
            assert!(Rc::ptr_eq(&widget.children[0], &second.native_widget().unwrap()));
        });
    }

    #[test]
    fn remove_then_append_equals_insert_at_tail() {
        register_toolkit();
        let pane = ViewNode::element("pane").unwrap();
        let a = ViewNode::element("label").unwrap();
        let b = ViewNode::element("label").unwrap();
        let c = ViewNode::element("label").unwrap();
        for node in [&a, &b, &c] {
            pane.append_child(node).unwrap();
        }

        pane.remove_child(&a).unwrap();
        pane.append_child(&a).unwrap();

        with_pane(&pane, |widget| {
            let order: Vec<_> = widget.children.iter().map(Rc::as_ptr).collect();
            let expected: Vec<_> = [&b, &c, &a]
                .iter()
                .map(|node| Rc::as_ptr(&node.native_widget().unwrap()))
                .collect();
            assert_eq!(order, expected);
        });
    }

    #[test]
    fn single_slot_content_and_comment_channel_stay_independent() {
        register_toolkit();
        let host = ViewNode::element("host").unwrap();
        let marker = ViewNode::comment("if-anchor").unwrap();
        let body = ViewNode::element("label").unwrap();

        host.append_child(&marker).unwrap();
        host.append_child(&body).unwrap();

        with_host(&host, |widget| {
            assert!(Rc::ptr_eq(&widget.content.clone().unwrap(), &body.native_widget().unwrap()));
            assert_eq!(widget.view_children.len(), 1);
        });

        // removing the marker leaves the primary content untouched
        host.remove_child(&marker).unwrap();
        with_host(&host, |widget| {
            assert!(widget.content.is_some());
            assert!(widget.view_children.is_empty());
        });

        host.remove_child(&body).unwrap();
        with_host(&host, |widget| assert!(widget.content.is_none()));
    }

    #[test]
    fn single_slot_content_is_replaced_by_later_children() {
        register_toolkit();
        let host = ViewNode::element("host").unwrap();
        let first = ViewNode::element("label").unwrap();
        let second = ViewNode::element("label").unwrap();

        host.append_child(&first).unwrap();
        host.append_child(&second).unwrap();

        with_host(&host, |widget| {
            assert!(Rc::ptr_eq(&widget.content.clone().unwrap(), &second.native_widget().unwrap()));
        });

        // removing the superseded child must not clear the new content
        host.remove_child(&first).unwrap();
        with_host(&host, |widget| assert!(widget.content.is_some()));
    }

    #[test]
    fn named_slot_parent_keys_by_child_type_name() {
        register_toolkit();
        let bar = ViewNode::element("bar").unwrap();
        let item = ViewNode::element("action-item").unwrap();

        bar.append_child(&item).unwrap();

        let widget = bar.native_widget().unwrap();
        let widget = widget.borrow();
        let bar_widget = (&*widget as &dyn core::any::Any).downcast_ref::<Bar>().unwrap();
        assert_eq!(bar_widget.slots.len(), 1);
        assert_eq!(bar_widget.slots[0].0, "ActionItem");
    }

    #[test]
    fn skip_add_to_dom_never_touches_native_parent() {
        register_toolkit();
        let pane = ViewNode::element("pane").unwrap();
        let page = ViewNode::element("page").unwrap();

        pane.append_child(&page).unwrap();
        with_pane(&pane, |widget| assert!(widget.ops.is_empty()));

        pane.remove_child(&page).unwrap();
        with_pane(&pane, |widget| assert!(widget.ops.is_empty()));
        assert!(page.parent_node().is_none());
    }

    #[test]
    fn leaf_parent_swallows_insert() {
        register_toolkit();
        let label = ViewNode::element("label").unwrap();
        let child = ViewNode::element("label").unwrap();

        // falls through every container class; shadow tree still updates
        label.append_child(&child).unwrap();
        assert!(Rc::ptr_eq(&child.parent_node().unwrap(), &label));
    }
}
