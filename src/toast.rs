use std::rc::Rc;

use crate::clock::Clock;
use crate::dom::Dom;

const TOAST_STYLE: [(&str, &str); 11] = [
    ("position", "fixed"),
    ("bottom", "18px"),
    ("left", "50%"),
    ("transform", "translateX(-50%)"),
    (
        "background",
        "linear-gradient(135deg, var(--brand, #a7f3d0), var(--brand-2, #93c5fd))",
    ),
    ("color", "#0b0c10"),
    ("padding", "10px 14px"),
    ("border-radius", "999px"),
    ("box-shadow", "var(--shadow, 0 10px 30px rgba(0,0,0,.15))"),
    ("z-index", "1000"),
    ("pointer-events", "none"),
];

pub struct Toaster<D: Dom, C: Clock> {
    dom: Rc<D>,
    clock: Rc<C>,
    duration_ms: u32,
}

impl<D: Dom, C: Clock> Toaster<D, C> {
    pub fn new(dom: Rc<D>, clock: Rc<C>, duration_ms: u32) -> Self {
        Self {
            dom,
            clock,
            duration_ms,
        }
    }

    /// Shows `message` as plain text and removes it after the configured
    /// duration. Overlapping toasts are not merged.
    pub fn toast(&self, message: &str) {
        let (Some(body), Some(bubble)) = (self.dom.body(), self.dom.create_element("div")) else {
            return;
        };
        self.dom.set_text(&bubble, message);
        for (property, value) in TOAST_STYLE {
            self.dom.set_style(&bubble, property, value);
        }
        self.dom.append_child(&body, &bubble);

        let dom = Rc::clone(&self.dom);
        self.clock.set_timeout(
            self.duration_ms,
            Box::new(move || dom.remove(&bubble)),
        );
    }
}
