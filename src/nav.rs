use std::rc::Rc;

use crate::dom::{Dom, ListenOptions, ListenTarget};

const NAV_LINK_SELECTOR: &str = ".nav .links a";
const ACTIVE_CLASS: &str = "active";

/// Index of the last section whose top is at or above `position`, falling
/// back to the first section. `None` only when there are no sections.
pub fn current_section(offsets: &[f64], position: f64) -> Option<usize> {
    if offsets.is_empty() {
        return None;
    }
    let current = offsets
        .iter()
        .enumerate()
        .filter(|(_, top)| **top <= position)
        .map(|(index, _)| index)
        .last()
        .unwrap_or(0);
    Some(current)
}

struct NavLink<N> {
    link: N,
    /// Index into `sections`, `None` when the anchor has no target.
    section: Option<usize>,
}

pub struct NavHighlighter<D: Dom> {
    dom: Rc<D>,
    links: Vec<NavLink<D::Node>>,
    sections: Vec<D::Node>,
    offset: f64,
}

impl<D: Dom> NavHighlighter<D> {
    pub fn mount(dom: Rc<D>, offset: f64) -> Option<Rc<Self>> {
        let mut sections: Vec<(String, D::Node)> = Vec::new();
        let mut links = Vec::new();
        for link in dom.query_all(None, NAV_LINK_SELECTOR) {
            let Some(target) = dom
                .attribute(&link, "href")
                .and_then(|href| href.strip_prefix('#').map(str::to_string))
            else {
                continue;
            };
            let section = match sections.iter().position(|(id, _)| *id == target) {
                Some(index) => Some(index),
                None => dom.by_id(&target).map(|node| {
                    sections.push((target, node));
                    sections.len() - 1
                }),
            };
            links.push(NavLink { link, section });
        }
        if sections.is_empty() {
            tracing::debug!("nav: no in-page sections to track");
            return None;
        }

        let highlighter = Rc::new(Self {
            dom: Rc::clone(&dom),
            links,
            sections: sections.into_iter().map(|(_, node)| node).collect(),
            offset,
        });
        highlighter.refresh();

        for (event, options) in [
            ("scroll", ListenOptions::passive()),
            ("resize", ListenOptions::default()),
        ] {
            let handler = Rc::clone(&highlighter);
            dom.listen(
                ListenTarget::Window,
                event,
                options,
                Box::new(move |_| handler.refresh()),
            );
        }
        tracing::debug!("nav: tracking {} sections", highlighter.sections.len());
        Some(highlighter)
    }

    /// Offsets are read live so layout shifts are picked up.
    pub fn refresh(&self) {
        let offsets: Vec<f64> = self
            .sections
            .iter()
            .map(|section| self.dom.offset_top(section))
            .collect();
        let position = self.dom.scroll_y() + self.offset;
        let current = current_section(&offsets, position);
        for entry in &self.links {
            let active = current.is_some() && entry.section == current;
            self.dom.toggle_class(&entry.link, ACTIVE_CLASS, active);
        }
    }
}
