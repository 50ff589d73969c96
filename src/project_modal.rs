use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::Dom;

const FALLBACK_TITLE: &str = "Project";
const OPEN_CLASS: &str = "open";

/// Show/hide behavior for a dialog element.
pub trait DialogControl<D: Dom> {
    fn show(&self, dom: &D, dialog: &D::Node);
    fn hide(&self, dom: &D, dialog: &D::Node);
}

/// A real `<dialog>`: `showModal()` / `close()`.
pub struct NativeDialog;

impl<D: Dom> DialogControl<D> for NativeDialog {
    fn show(&self, dom: &D, dialog: &D::Node) {
        dom.show_dialog(dialog);
    }

    fn hide(&self, dom: &D, dialog: &D::Node) {
        dom.close_dialog(dialog);
    }
}

/// Any other element: an `open` class the stylesheet reacts to.
pub struct ClassToggleDialog;

impl<D: Dom> DialogControl<D> for ClassToggleDialog {
    fn show(&self, dom: &D, dialog: &D::Node) {
        dom.add_class(dialog, OPEN_CLASS);
    }

    fn hide(&self, dom: &D, dialog: &D::Node) {
        dom.remove_class(dialog, OPEN_CLASS);
    }
}

/// Picks the strategy once, from the element's capabilities.
pub fn dialog_control_for<D: Dom>(dom: &D, dialog: &D::Node) -> Box<dyn DialogControl<D>> {
    if dom.supports_dialog(dialog) {
        Box::new(NativeDialog)
    } else {
        Box::new(ClassToggleDialog)
    }
}

struct Dialog<D: Dom> {
    node: D::Node,
    control: Box<dyn DialogControl<D>>,
}

pub struct ProjectModal<D: Dom> {
    dom: Rc<D>,
    titles: BTreeMap<String, String>,
    dialog: Option<Dialog<D>>,
}

impl<D: Dom> ProjectModal<D> {
    pub fn mount(dom: Rc<D>, titles: BTreeMap<String, String>) -> Self {
        let dialog = dom.by_id("modal").map(|node| {
            let control = dialog_control_for(&*dom, &node);
            Dialog { node, control }
        });
        if dialog.is_none() {
            tracing::debug!("project modal: no #modal element");
        }
        Self {
            dom,
            titles,
            dialog,
        }
    }

    pub fn title_for(&self, key: &str) -> &str {
        self.titles
            .get(key)
            .map_or(FALLBACK_TITLE, String::as_str)
    }

    pub fn open_modal(&self, key: &str) {
        if let Some(title) = self.dom.by_id("m-title") {
            self.dom.set_text(&title, self.title_for(key));
        }
        if let Some(body) = self.dom.by_id("m-body") {
            let content = self
                .dom
                .by_id(&format!("tpl-{key}"))
                .map(|template| self.dom.inner_html(&template))
                .unwrap_or_default();
            self.dom.set_inner_html(&body, &content);
        }
        if let Some(dialog) = &self.dialog {
            dialog.control.show(&self.dom, &dialog.node);
        }
    }

    pub fn close_modal(&self) {
        if let Some(dialog) = &self.dialog {
            dialog.control.hide(&self.dom, &dialog.node);
        }
    }
}
