//! Application launch glue: wires a reactive app, the document singleton, and
//! a host toolkit together.

use std::rc::Rc;

use estuary_core::document::{document, init_document, try_document};
use estuary_core::error::DomError;
use estuary_core::host::{HostApplication, ReactiveApp};
use estuary_core::registry::widget_constructor;
use tracing::info;

/// Mount point tag handed to the reactive app.
const MOUNT_TAG: &str = "placeholder";
/// Tag of the widget installed as the toolkit's root container.
const ROOT_TAG: &str = "page";

/// Launches `app` inside `host`.
///
/// Binds the document singleton (creating it on first launch), hands the app a
/// detached placeholder node to mount into, and starts the host with a root
/// page widget. Widget resolution happens before the host takes over, so
/// misconfigured registries fail here rather than inside the toolkit's
/// callback.
///
/// # Errors
///
/// Returns an error when the `document`, `placeholder`, or `page` tags are
/// missing from the registry or their widgets fail to load.
pub fn launch(mut app: impl ReactiveApp + 'static, host: impl HostApplication) -> Result<(), DomError> {
    if try_document().is_none() {
        init_document()?;
    }
    let mount = document().create_element(MOUNT_TAG)?;
    document().document_element().append_child(&mount)?;

    let root_ctor = widget_constructor(ROOT_TAG)?;
    info!(mount = MOUNT_TAG, root = ROOT_TAG, "launching application");

    host.run(Box::new(move || {
        app.mount(&mount);
        root_ctor()
    }));
    Ok(())
}
