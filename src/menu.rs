use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Dom, ListenOptions, ListenTarget};

const OPEN_CLASS: &str = "open";

pub struct MobileMenu<D: Dom> {
    dom: Rc<D>,
    button: D::Node,
    panel: D::Node,
    open: Cell<bool>,
}

impl<D: Dom> MobileMenu<D> {
    pub fn mount(dom: Rc<D>) -> Option<Rc<Self>> {
        let (Some(button), Some(panel)) = (dom.by_id("menuToggle"), dom.by_id("primaryLinks"))
        else {
            tracing::debug!("menu: toggle or panel missing");
            return None;
        };
        let menu = Rc::new(Self {
            dom: Rc::clone(&dom),
            button: button.clone(),
            panel: panel.clone(),
            open: Cell::new(false),
        });
        menu.render();

        let toggler = Rc::clone(&menu);
        dom.listen(
            ListenTarget::Node(button),
            "click",
            ListenOptions::default(),
            Box::new(move |_| toggler.toggle()),
        );
        for item in dom.query_all(Some(&panel), "a, button") {
            let closer = Rc::clone(&menu);
            dom.listen(
                ListenTarget::Node(item),
                "click",
                ListenOptions::default(),
                Box::new(move |_| closer.close()),
            );
        }
        Some(menu)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        self.open.set(!self.open.get());
        self.render();
    }

    pub fn close(&self) {
        if self.open.replace(false) {
            self.render();
        }
    }

    fn render(&self) {
        let open = self.open.get();
        self.dom.toggle_class(&self.panel, OPEN_CLASS, open);
        self.dom
            .set_attribute(&self.button, "aria-expanded", if open { "true" } else { "false" });
    }
}
