use std::rc::Rc;

use crate::dom::{Dom, Intersection, Observe};

const REVEAL_SELECTOR: &str = ".reveal";
const VISIBLE_CLASS: &str = "visible";

/// Marks `.reveal` elements visible the first time enough of them scrolls
/// into view, then stops watching them.
pub struct RevealOnScroll<D: Dom> {
    dom: Rc<D>,
    threshold: f64,
}

impl<D: Dom> RevealOnScroll<D> {
    pub fn mount(dom: Rc<D>, threshold: f64) -> Option<Rc<Self>> {
        let targets = dom.query_all(None, REVEAL_SELECTOR);
        if targets.is_empty() {
            tracing::debug!("reveal: nothing to observe");
            return None;
        }
        let reveal = Rc::new(Self {
            dom: Rc::clone(&dom),
            threshold,
        });
        let handler = Rc::clone(&reveal);
        dom.observe_intersections(
            &targets,
            threshold,
            Box::new(move |entry| handler.on_intersection(entry)),
        );
        tracing::debug!("reveal: observing {} elements", targets.len());
        Some(reveal)
    }

    pub fn on_intersection(&self, entry: &Intersection<D::Node>) -> Observe {
        if !entry.is_intersecting || entry.ratio < self.threshold {
            return Observe::Keep;
        }
        self.dom.add_class(&entry.target, VISIBLE_CLASS);
        Observe::Unobserve
    }
}
