//! In-memory page used by the unit tests.
//!
//! Supports the selector subset the components use: comma-separated
//! alternatives of descendant chains built from `tag`, `#id` and `.class`.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{
    Dom, DomEvent, EventHandler, Intersection, IntersectionHandler, ListenOptions, ListenTarget,
    Observe,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Default)]
struct FakeNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    html: String,
    style: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    offset_top: f64,
    focusable: bool,
    dialog: bool,
    dialog_open: bool,
}

type SharedHandler = Rc<RefCell<EventHandler<NodeId>>>;
type SharedObserver = Rc<RefCell<IntersectionHandler<NodeId>>>;

struct Listener {
    target: ListenTarget<NodeId>,
    event: String,
    options: ListenOptions,
    handler: SharedHandler,
}

struct Observer {
    threshold: f64,
    targets: Vec<NodeId>,
    handler: SharedObserver,
}

pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    active: Cell<Option<NodeId>>,
    scroll_y: Cell<f64>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<Observer>>,
    opened: RefCell<Vec<(String, String)>>,
    scrolled_into_view: RefCell<Vec<NodeId>>,
}

const ROOT: usize = 0;
const BODY: usize = 1;

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let root = FakeNode {
            tag: "html".into(),
            children: vec![BODY],
            focusable: true,
            ..FakeNode::default()
        };
        let body = FakeNode {
            tag: "body".into(),
            parent: Some(ROOT),
            focusable: true,
            ..FakeNode::default()
        };
        Self {
            nodes: RefCell::new(vec![root, body]),
            active: Cell::new(Some(NodeId(BODY))),
            scroll_y: Cell::new(0.0),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            scrolled_into_view: RefCell::new(Vec::new()),
        }
    }

    pub fn body_id(&self) -> NodeId {
        NodeId(BODY)
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(ROOT)
    }

    /// Appends an element described as `tag#id.class.class` under `parent`.
    pub fn append(&self, parent: NodeId, selector: &str) -> NodeId {
        let compound = Compound::parse(selector);
        let node = FakeNode {
            tag: compound.tag.unwrap_or_else(|| "div".into()),
            id: compound.id,
            classes: compound.classes,
            parent: Some(parent.0),
            focusable: true,
            ..FakeNode::default()
        };
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.len();
        nodes.push(node);
        nodes[parent.0].children.push(index);
        NodeId(index)
    }

    pub fn with_attribute(&self, node: NodeId, name: &str, value: &str) -> NodeId {
        self.set_attribute(&node, name, value);
        node
    }

    pub fn set_offset_top(&self, node: NodeId, top: f64) {
        self.nodes.borrow_mut()[node.0].offset_top = top;
    }

    pub fn set_focusable(&self, node: NodeId, focusable: bool) {
        self.nodes.borrow_mut()[node.0].focusable = focusable;
    }

    pub fn set_html(&self, node: NodeId, html: &str) {
        self.nodes.borrow_mut()[node.0].html = html.to_string();
    }

    pub fn make_dialog(&self, node: NodeId) {
        self.nodes.borrow_mut()[node.0].dialog = true;
    }

    pub fn dialog_open(&self, node: NodeId) -> bool {
        self.nodes.borrow()[node.0].dialog_open
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0]
            .children
            .iter()
            .copied()
            .map(NodeId)
            .collect()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = node.0;
        loop {
            if current == ROOT {
                return true;
            }
            match nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub fn opened_windows(&self) -> Vec<(String, String)> {
        self.opened.borrow().clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.scrolled_into_view.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|observer| observer.targets.contains(&node))
    }

    /// Dispatches a bubbling click on `node`. Returns whether any listener
    /// prevented the default action.
    pub fn click(&self, node: NodeId) -> bool {
        let mut path = vec![node];
        {
            let nodes = self.nodes.borrow();
            let mut current = nodes[node.0].parent;
            while let Some(parent) = current {
                path.push(NodeId(parent));
                current = nodes[parent].parent;
            }
        }
        let mut prevented = false;
        for hop in path {
            prevented |= self.dispatch(&ListenTarget::Node(hop), "click", Some(node), None);
        }
        prevented
    }

    pub fn key_down(&self, key: &str) {
        self.dispatch(&ListenTarget::Window, "keydown", None, Some(key));
    }

    pub fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y);
        self.dispatch(&ListenTarget::Window, "scroll", None, None);
    }

    pub fn resize(&self) {
        self.dispatch(&ListenTarget::Window, "resize", None, None);
    }

    /// Reports `node` at `ratio` visibility to every observer watching it.
    pub fn intersect(&self, node: NodeId, ratio: f64) {
        let handlers: Vec<SharedObserver> = self
            .observers
            .borrow()
            .iter()
            .filter(|observer| observer.targets.contains(&node))
            .map(|observer| Rc::clone(&observer.handler))
            .collect();
        for handler in handlers {
            let entry = Intersection {
                target: node,
                is_intersecting: ratio > 0.0,
                ratio,
            };
            let next = (*handler.borrow_mut())(&entry);
            if next == Observe::Unobserve {
                for observer in self.observers.borrow_mut().iter_mut() {
                    if Rc::ptr_eq(&observer.handler, &handler) {
                        observer.targets.retain(|target| *target != node);
                    }
                }
            }
        }
    }

    pub fn observer_threshold(&self) -> Option<f64> {
        self.observers
            .borrow()
            .first()
            .map(|observer| observer.threshold)
    }

    fn dispatch(
        &self,
        target: &ListenTarget<NodeId>,
        event: &str,
        origin: Option<NodeId>,
        key: Option<&str>,
    ) -> bool {
        let matching: Vec<(ListenOptions, SharedHandler)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.target == *target && listener.event == event)
            .map(|listener| (listener.options, Rc::clone(&listener.handler)))
            .collect();
        let dom_event = DomEvent {
            target: origin,
            key: key.map(str::to_string),
        };
        let mut prevented = false;
        for (options, handler) in matching {
            prevented |= options.prevent_default;
            (*handler.borrow_mut())(&dom_event);
        }
        prevented
    }

    fn matches_chain(&self, node: usize, chain: &[Compound]) -> bool {
        let nodes = self.nodes.borrow();
        let Some((last, ancestors)) = chain.split_last() else {
            return false;
        };
        if !last.matches(&nodes[node]) {
            return false;
        }
        let mut pending = ancestors.iter().rev().peekable();
        let mut current = nodes[node].parent;
        while let Some(compound) = pending.peek() {
            let Some(index) = current else {
                return false;
            };
            if compound.matches(&nodes[index]) {
                pending.next();
            }
            current = nodes[index].parent;
        }
        true
    }

    fn descendants(&self, start: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = nodes[start].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(nodes[index].children.iter().rev().copied());
        }
        out
    }
}

#[derive(Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(selector: &str) -> Self {
        let mut compound = Compound::default();
        let mut kind = ' ';
        let mut current = String::new();
        let flush = |kind: char, value: &mut String, compound: &mut Compound| {
            if value.is_empty() {
                return;
            }
            let taken = std::mem::take(value);
            match kind {
                '#' => compound.id = Some(taken),
                '.' => compound.classes.push(taken),
                _ => compound.tag = Some(taken),
            }
        };
        for ch in selector.chars() {
            if ch == '#' || ch == '.' {
                flush(kind, &mut current, &mut compound);
                kind = ch;
            } else {
                current.push(ch);
            }
        }
        flush(kind, &mut current, &mut compound);
        compound
    }

    fn matches(&self, node: &FakeNode) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != node.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_ref() != Some(id) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| node.classes.contains(class))
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        Some(NodeId(ROOT))
    }

    fn body(&self) -> Option<NodeId> {
        Some(NodeId(BODY))
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(ROOT)
            .into_iter()
            .find(|index| self.nodes.borrow()[*index].id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let chains: Vec<Vec<Compound>> = selector
            .split(',')
            .map(|alternative| {
                alternative
                    .split_whitespace()
                    .map(Compound::parse)
                    .collect()
            })
            .collect();
        let start = scope.map_or(ROOT, |scope| scope.0);
        self.descendants(start)
            .into_iter()
            .filter(|index| {
                chains
                    .iter()
                    .any(|chain| self.matches_chain(*index, chain))
            })
            .map(NodeId)
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .classes
            .iter()
            .any(|existing| existing == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0]
            .classes
            .retain(|existing| existing != class);
    }

    fn text(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[node.0].text = text.to_string();
        nodes[node.0].html.clear();
    }

    fn inner_html(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].html.clone()
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[node.0].html = html.to_string();
        nodes[node.0].text.clear();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode {
            tag: tag.to_string(),
            focusable: true,
            ..FakeNode::default()
        });
        Some(NodeId(nodes.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.remove(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent.0);
        nodes[parent.0].children.push(child.0);
    }

    fn remove(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent].children.retain(|child| *child != node.0);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.get()
    }

    fn focus(&self, node: &NodeId) -> bool {
        if !self.nodes.borrow()[node.0].focusable || !self.is_attached(*node) {
            return false;
        }
        self.active.set(Some(*node));
        true
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.nodes.borrow()[node.0].offset_top
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.scrolled_into_view.borrow_mut().push(*node);
    }

    fn open_window(&self, url: &str, target: &str) {
        self.opened
            .borrow_mut()
            .push((url.to_string(), target.to_string()));
    }

    fn supports_dialog(&self, node: &NodeId) -> bool {
        self.nodes.borrow()[node.0].dialog
    }

    fn show_dialog(&self, node: &NodeId) {
        self.nodes.borrow_mut()[node.0].dialog_open = true;
    }

    fn close_dialog(&self, node: &NodeId) {
        self.nodes.borrow_mut()[node.0].dialog_open = false;
    }

    fn listen(
        &self,
        target: ListenTarget<NodeId>,
        event: &str,
        options: ListenOptions,
        handler: EventHandler<NodeId>,
    ) {
        self.listeners.borrow_mut().push(Listener {
            target,
            event: event.to_string(),
            options,
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn observe_intersections(
        &self,
        targets: &[NodeId],
        threshold: f64,
        handler: IntersectionHandler<NodeId>,
    ) {
        self.observers.borrow_mut().push(Observer {
            threshold,
            targets: targets.to_vec(),
            handler: Rc::new(RefCell::new(handler)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn descendant_selectors_respect_ancestry() {
        let dom = FakeDom::new();
        let nav = dom.append(dom.body_id(), "nav.nav");
        let links = dom.append(nav, "div.links");
        let inside = dom.append(links, "a");
        let outside = dom.append(dom.body_id(), "a");

        assert_eq!(dom.query_all(None, ".nav .links a"), vec![inside]);
        assert_eq!(dom.query_all(None, "a"), vec![inside, outside]);
    }

    #[test]
    fn scoped_queries_only_see_descendants() {
        let dom = FakeDom::new();
        let panel = dom.append(dom.body_id(), "div#primaryLinks");
        let link = dom.append(panel, "a");
        let button = dom.append(panel, "button");
        dom.append(dom.body_id(), "button");

        assert_eq!(dom.query_all(Some(&panel), "a, button"), vec![link, button]);
    }

    #[test]
    fn clicks_bubble_to_ancestors() {
        let dom = FakeDom::new();
        let outer = dom.append(dom.body_id(), "div");
        let inner = dom.append(outer, "span");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        dom.listen(
            ListenTarget::Node(outer),
            "click",
            ListenOptions::default(),
            Box::new(move |event| sink.borrow_mut().push(event.target)),
        );

        dom.click(inner);

        assert_eq!(*seen.borrow(), vec![Some(inner)]);
    }
}
