use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Element, HtmlDialogElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions,
};

use super::{
    Dom, DomEvent, EventHandler, Intersection, IntersectionHandler, ListenOptions, ListenTarget,
    Observe,
};

pub struct WebDom {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }
}

fn log_js_error(context: &str, err: &JsValue) {
    tracing::debug!("dom: {context} failed: {err:?}");
}

fn to_dom_event(event: &web_sys::Event) -> DomEvent<Element> {
    DomEvent {
        target: event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok()),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                log_js_error("query_selector_all", &err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log_js_error("set_attribute", &err);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            log_js_error("class_list.add", &err);
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            log_js_error("class_list.remove", &err);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.style().set_property(property, value) {
            log_js_error("style.set_property", &err);
        }
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document
            .create_element(tag)
            .map_err(|err| log_js_error("create_element", &err))
            .ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            log_js_error("append_child", &err);
        }
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&self, node: &Element) -> bool {
        if !node.is_connected() {
            return false;
        }
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return false;
        };
        element.focus().is_ok()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn open_window(&self, url: &str, target: &str) {
        if let Err(err) = self.window.open_with_url_and_target(url, target) {
            log_js_error("window.open", &err);
        }
    }

    fn supports_dialog(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlDialogElement>().is_some()
    }

    fn show_dialog(&self, node: &Element) {
        if let Some(dialog) = node.dyn_ref::<HtmlDialogElement>() {
            if let Err(err) = dialog.show_modal() {
                log_js_error("dialog.showModal", &err);
            }
        }
    }

    fn close_dialog(&self, node: &Element) {
        if let Some(dialog) = node.dyn_ref::<HtmlDialogElement>() {
            dialog.close();
        }
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        event: &str,
        options: ListenOptions,
        mut handler: EventHandler<Element>,
    ) {
        let prevent_default = options.prevent_default;
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if prevent_default {
                event.prevent_default();
            }
            handler(&to_dom_event(&event));
        }) as Box<dyn FnMut(web_sys::Event)>);

        let listener_options = AddEventListenerOptions::new();
        listener_options.set_passive(options.passive);
        let result = match &target {
            ListenTarget::Window => self
                .window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &listener_options,
                ),
            ListenTarget::Node(node) => node
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &listener_options,
                ),
        };
        if let Err(err) = result {
            log_js_error("add_event_listener", &err);
            return;
        }
        // Listeners live as long as the page.
        closure.forget();
    }

    fn observe_intersections(
        &self,
        targets: &[Element],
        threshold: f64,
        mut handler: IntersectionHandler<Element>,
    ) {
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let next = handler(&Intersection {
                        target: target.clone(),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });
                    if next == Observe::Unobserve {
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    log_js_error("IntersectionObserver::new", &err);
                    return;
                }
            };
        for target in targets {
            observer.observe(target);
        }
        closure.forget();
    }
}
