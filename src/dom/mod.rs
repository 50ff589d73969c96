//! Page adapter.
//!
//! Components never touch `web_sys` directly. They go through [`Dom`], which
//! the browser build implements over the live document ([`web::WebDom`]) and
//! the test build implements in memory ([`fake::FakeDom`]).

#[cfg(test)]
pub mod fake;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum ListenTarget<N> {
    Window,
    Node(N),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    pub passive: bool,
    pub prevent_default: bool,
}

impl ListenOptions {
    pub fn passive() -> Self {
        Self {
            passive: true,
            prevent_default: false,
        }
    }

    pub fn prevent_default() -> Self {
        Self {
            passive: false,
            prevent_default: true,
        }
    }
}

/// The parts of a dispatched event the components care about.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent<N> {
    pub target: Option<N>,
    pub key: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Returned by intersection handlers to keep or drop a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observe {
    Keep,
    Unobserve,
}

pub type EventHandler<N> = Box<dyn FnMut(&DomEvent<N>)>;
pub type IntersectionHandler<N> = Box<dyn FnMut(&Intersection<N>) -> Observe>;

pub trait Dom: 'static {
    type Node: Clone + PartialEq + 'static;

    fn root(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    fn by_id(&self, id: &str) -> Option<Self::Node>;
    /// Matches `selector` against the descendants of `scope`, or the whole
    /// document when `scope` is `None`. Results are in document order.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    fn text(&self, node: &Self::Node) -> String;
    /// Sets literal text content. Never parsed as markup.
    fn set_text(&self, node: &Self::Node, text: &str);
    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn remove(&self, node: &Self::Node);

    fn active_element(&self) -> Option<Self::Node>;
    /// Returns `false` when the node can no longer take focus.
    fn focus(&self, node: &Self::Node) -> bool;

    fn scroll_y(&self) -> f64;
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn scroll_into_view(&self, node: &Self::Node);
    fn open_window(&self, url: &str, target: &str);

    fn supports_dialog(&self, node: &Self::Node) -> bool;
    fn show_dialog(&self, node: &Self::Node);
    fn close_dialog(&self, node: &Self::Node);

    fn listen(
        &self,
        target: ListenTarget<Self::Node>,
        event: &str,
        options: ListenOptions,
        handler: EventHandler<Self::Node>,
    );

    /// Observes `targets` for viewport intersection at `threshold`. Targets
    /// for which the handler returns [`Observe::Unobserve`] are dropped.
    fn observe_intersections(
        &self,
        targets: &[Self::Node],
        threshold: f64,
        handler: IntersectionHandler<Self::Node>,
    );
}
