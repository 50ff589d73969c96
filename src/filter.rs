use std::rc::Rc;

use crate::dom::{Dom, ListenOptions, ListenTarget};

pub const ALL: &str = "all";
const ACTIVE_CLASS: &str = "active";

/// Whether a card tagged with the whitespace-delimited `tags` is shown for
/// filter `key`.
pub fn card_matches(tags: &str, key: &str) -> bool {
    key == ALL || tags.split_whitespace().any(|tag| tag == key)
}

pub struct ProjectFilter<D: Dom> {
    dom: Rc<D>,
    grid: D::Node,
    buttons: Vec<D::Node>,
}

impl<D: Dom> ProjectFilter<D> {
    pub fn mount(dom: Rc<D>) -> Option<Rc<Self>> {
        let Some(grid) = dom.by_id("projectGrid") else {
            tracing::debug!("filter: no project grid");
            return None;
        };
        let buttons = dom.query_all(None, ".filter");
        let filter = Rc::new(Self {
            dom: Rc::clone(&dom),
            grid,
            buttons: buttons.clone(),
        });
        for button in buttons {
            let handler = Rc::clone(&filter);
            let clicked = button.clone();
            dom.listen(
                ListenTarget::Node(button),
                "click",
                ListenOptions::default(),
                Box::new(move |_| handler.select(&clicked)),
            );
        }
        Some(filter)
    }

    pub fn select(&self, button: &D::Node) {
        for other in &self.buttons {
            self.dom.remove_class(other, ACTIVE_CLASS);
        }
        self.dom.add_class(button, ACTIVE_CLASS);
        let key = self
            .dom
            .attribute(button, "data-filter")
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| ALL.to_string());
        self.apply(&key);
    }

    pub fn apply(&self, key: &str) {
        let cards = self.dom.query_all(Some(&self.grid), ".project");
        tracing::debug!("filter: {key} over {} cards", cards.len());
        for card in cards {
            let tags = self.dom.attribute(&card, "data-tags").unwrap_or_default();
            let display = if card_matches(&tags, key) { "flex" } else { "none" };
            self.dom.set_style(&card, "display", display);
        }
    }
}
