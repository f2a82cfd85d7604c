//! End-to-end demo: builds a small page against the headless backend and
//! prints the resulting native tree.

use std::cell::RefCell;
use std::rc::Rc;

use estuary::{DomError, ReactiveApp, ViewNode, document, launch, logging};
use estuary_headless::{HeadlessHost, outline, register_widgets};
use tracing::info;

struct DemoApp {
    page: Rc<RefCell<Option<Rc<ViewNode>>>>,
}

impl ReactiveApp for DemoApp {
    fn mount(&mut self, target: &Rc<ViewNode>) {
        let page = build(target).expect("demo tree should build");
        *self.page.borrow_mut() = Some(page);
    }
}

fn build(target: &Rc<ViewNode>) -> Result<Rc<ViewNode>, DomError> {
    let doc = document();

    let page = doc.create_element("page")?;
    let stack = doc.create_element("stack-layout")?;
    stack.set_attribute("orientation", "vertical".into())?;

    let label = doc.create_element("label")?;
    label.set_text("Hello from the shadow tree")?;
    label.set_style("color", "teal");

    let toggle = doc.create_element("switch")?;
    toggle.set_attribute("checked", true.into())?;
    toggle.add_event_listener(
        "checkedChange",
        Rc::new(|value| {
            info!(%value, "switch toggled");
        }),
    );

    stack.append_child(&label)?;
    stack.append_child(&toggle)?;
    page.append_child(&stack)?;
    target.append_child(&page)?;
    Ok(page)
}

fn main() -> Result<(), DomError> {
    logging::init();
    register_widgets()?;

    let page = Rc::new(RefCell::new(None));
    launch(
        DemoApp {
            page: Rc::clone(&page),
        },
        HeadlessHost::new(),
    )?;

    let page = page.borrow();
    let widget = page
        .as_ref()
        .and_then(|node| node.native_widget())
        .expect("demo page owns a widget");
    println!("{}", outline(&widget));
    Ok(())
}
