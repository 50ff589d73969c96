use std::rc::Rc;

use crate::clock::Clock;
use crate::config::PLACEHOLDER_RESUME_URL;
use crate::dom::{Dom, ListenOptions, ListenTarget};
use crate::toast::Toaster;

pub const CONTACT_HINT: &str = "Scroll to Contact section for the download link";
pub const PLACEHOLDER_NOTICE: &str = "Add your real resume.pdf beside index.html";

/// Wires `#resumeBtn` and `#resumeDownload`. Either may be absent.
pub fn bind<D: Dom, C: Clock>(dom: &Rc<D>, toaster: &Rc<Toaster<D, C>>, resume_url: &str) {
    if let Some(button) = dom.by_id("resumeBtn") {
        let page = Rc::clone(dom);
        let toaster = Rc::clone(toaster);
        dom.listen(
            ListenTarget::Node(button),
            "click",
            ListenOptions::default(),
            Box::new(move |_| {
                toaster.toast(CONTACT_HINT);
                if let Some(contact) = page.by_id("contact") {
                    page.scroll_into_view(&contact);
                }
            }),
        );
    }

    if let Some(download) = dom.by_id("resumeDownload") {
        let page = Rc::clone(dom);
        let toaster = Rc::clone(toaster);
        let url = resume_url.to_string();
        dom.listen(
            ListenTarget::Node(download),
            "click",
            ListenOptions::prevent_default(),
            Box::new(move |_| {
                if url == PLACEHOLDER_RESUME_URL {
                    toaster.toast(PLACEHOLDER_NOTICE);
                }
                page.open_window(&url, "_blank");
            }),
        );
    }
}
