//! Certificate viewer.
//!
//! The viewer is a single `#certModal` element shown either as a small
//! non-blocking popup or as a centered modal with scroll lock. Closing plays
//! an exit transition: the `closing` class goes on immediately and the
//! viewer is torn down after a short delay.
//!
//! Every open or close cancels the close still pending from an earlier call,
//! so a stale teardown can never hide a viewer that was reopened meanwhile.

use std::cell::RefCell;
use std::rc::Rc;

use crate::clock::{Clock, TimerId};
use crate::config::SiteConfig;
use crate::dom::{Dom, ListenOptions, ListenTarget};

const DEFAULT_TITLE: &str = "Certificate";
const OPEN_CLASS: &str = "open";
const CLOSING_CLASS: &str = "closing";
const POPUP_CLASS: &str = "popup";
const BODY_LOCK_CLASS: &str = "body-lock";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Presentation {
    #[default]
    Popup,
    Modal,
}

impl Presentation {
    /// Anything other than `"popup"` (or no mode at all) is a modal.
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode {
            None | Some("popup") => Presentation::Popup,
            Some(_) => Presentation::Modal,
        }
    }

    pub fn is_popup(self) -> bool {
        self == Presentation::Popup
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Open(Presentation),
    Closing(Presentation),
}

struct ViewerState<N> {
    phase: Phase,
    presentation: Presentation,
    restore_focus: Option<N>,
    pending_close: Option<TimerId>,
}

struct Parts<N> {
    viewer: N,
    image: Option<N>,
    title: Option<N>,
    issuer: Option<N>,
    open_full: Option<N>,
}

pub struct CertificateViewer<D: Dom, C: Clock> {
    dom: Rc<D>,
    clock: Rc<C>,
    parts: Parts<D::Node>,
    popup_close_ms: u32,
    modal_close_ms: u32,
    state: RefCell<ViewerState<D::Node>>,
}

impl<D: Dom, C: Clock> CertificateViewer<D, C> {
    pub fn mount(dom: Rc<D>, clock: Rc<C>, config: &SiteConfig) -> Option<Rc<Self>> {
        let Some(viewer) = dom.by_id("certModal") else {
            tracing::debug!("certificates: no #certModal element");
            return None;
        };
        let presentation = if dom.has_class(&viewer, POPUP_CLASS) {
            Presentation::Popup
        } else {
            Presentation::Modal
        };
        let parts = Parts {
            image: dom.by_id("certImg"),
            title: dom.by_id("certTitle"),
            issuer: dom.by_id("certOrg"),
            open_full: dom.by_id("openFull"),
            viewer: viewer.clone(),
        };
        let cert = Rc::new(Self {
            dom: Rc::clone(&dom),
            clock,
            parts,
            popup_close_ms: config.close_delay_ms(true),
            modal_close_ms: config.close_delay_ms(false),
            state: RefCell::new(ViewerState {
                phase: Phase::Closed,
                presentation,
                restore_focus: None,
                pending_close: None,
            }),
        });

        let backdrop = Rc::clone(&cert);
        dom.listen(
            ListenTarget::Node(viewer),
            "click",
            ListenOptions::default(),
            Box::new(move |event| {
                if event.target.as_ref() == Some(&backdrop.parts.viewer) {
                    backdrop.on_backdrop_click();
                }
            }),
        );
        let escape = Rc::clone(&cert);
        dom.listen(
            ListenTarget::Window,
            "keydown",
            ListenOptions::default(),
            Box::new(move |event| {
                if event.key.as_deref() == Some("Escape") && escape.is_open() {
                    escape.close_cert();
                }
            }),
        );
        Some(cert)
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// True from open until the close transition completes.
    pub fn is_open(&self) -> bool {
        self.phase() != Phase::Closed
    }

    pub fn open_cert(
        &self,
        src: Option<&str>,
        title: Option<&str>,
        issuer: Option<&str>,
        presentation: Presentation,
    ) {
        let Some(image) = &self.parts.image else {
            tracing::debug!("certificates: no #certImg element");
            return;
        };
        let dom = &self.dom;
        let viewer = &self.parts.viewer;
        let src = src.unwrap_or_default();
        let title = title.filter(|title| !title.is_empty()).unwrap_or(DEFAULT_TITLE);
        let issuer = issuer.unwrap_or_default();

        self.cancel_pending_close();
        {
            let mut state = self.state.borrow_mut();
            // A reopen during the exit transition keeps the original focus target.
            if state.phase == Phase::Closed {
                state.restore_focus = dom.active_element();
            }
            state.phase = Phase::Open(presentation);
            state.presentation = presentation;
        }

        dom.set_attribute(image, "src", src);
        dom.set_attribute(image, "alt", &format!("{title} – {issuer}"));
        if let Some(node) = &self.parts.title {
            dom.set_text(node, title);
        }
        if let Some(node) = &self.parts.issuer {
            dom.set_text(node, issuer);
        }
        if let Some(node) = &self.parts.open_full {
            dom.set_attribute(node, "href", if src.is_empty() { "#" } else { src });
        }

        dom.remove_class(viewer, CLOSING_CLASS);
        dom.toggle_class(viewer, POPUP_CLASS, presentation.is_popup());
        dom.add_class(viewer, OPEN_CLASS);
        dom.set_attribute(viewer, "aria-hidden", "false");

        // A modal reopened as a popup mid-exit still carries the lock.
        if let Some(body) = dom.body() {
            dom.toggle_class(&body, BODY_LOCK_CLASS, !presentation.is_popup());
        }
        if let Some(close) = dom.query(Some(viewer), ".modal-close") {
            dom.focus(&close);
        }
    }

    /// Starts the exit transition; teardown runs after the presentation's
    /// close delay. Repeated calls restart the delay.
    pub fn close_cert(self: &Rc<Self>) {
        self.cancel_pending_close();
        let presentation = {
            let mut state = self.state.borrow_mut();
            let presentation = state.presentation;
            if state.phase != Phase::Closed {
                state.phase = Phase::Closing(presentation);
            }
            presentation
        };
        self.dom.add_class(&self.parts.viewer, CLOSING_CLASS);

        let delay = if presentation.is_popup() {
            self.popup_close_ms
        } else {
            self.modal_close_ms
        };
        let viewer = Rc::clone(self);
        let id = self
            .clock
            .set_timeout(delay, Box::new(move || viewer.finish_close()));
        self.state.borrow_mut().pending_close = Some(id);
    }

    fn finish_close(&self) {
        let restore_focus = {
            let mut state = self.state.borrow_mut();
            state.pending_close = None;
            state.phase = Phase::Closed;
            state.restore_focus.take()
        };
        let dom = &self.dom;
        let viewer = &self.parts.viewer;
        dom.remove_class(viewer, OPEN_CLASS);
        dom.remove_class(viewer, CLOSING_CLASS);
        dom.set_attribute(viewer, "aria-hidden", "true");
        if let Some(body) = dom.body() {
            dom.remove_class(&body, BODY_LOCK_CLASS);
        }
        if let Some(image) = &self.parts.image {
            dom.set_attribute(image, "src", "");
        }
        if let Some(node) = restore_focus {
            if !dom.focus(&node) {
                tracing::debug!("certificates: previous focus target is gone");
            }
        }
    }

    fn on_backdrop_click(self: &Rc<Self>) {
        let modal = matches!(self.phase(), Phase::Open(Presentation::Modal));
        if modal {
            self.close_cert();
        }
    }

    fn cancel_pending_close(&self) {
        if let Some(id) = self.state.borrow_mut().pending_close.take() {
            self.clock.clear_timeout(id);
        }
    }
}
