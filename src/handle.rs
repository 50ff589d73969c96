//! Browser entry point and the `window.portfolio` handle used by inline
//! `onclick` attributes.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::clock::BrowserClock;
use crate::config::SiteConfig;
use crate::dom::web::WebDom;
use crate::logging;
use crate::storage::LocalStorage;

const HANDLE_NAME: &str = "portfolio";

#[wasm_bindgen]
pub struct Portfolio {
    app: App<WebDom, BrowserClock>,
}

#[wasm_bindgen]
impl Portfolio {
    #[wasm_bindgen(js_name = openModal)]
    pub fn open_modal(&self, key: Option<String>) {
        self.app.open_modal(key.as_deref().unwrap_or_default());
    }

    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) {
        self.app.close_modal();
    }

    #[wasm_bindgen(js_name = openCert)]
    pub fn open_cert(
        &self,
        src: Option<String>,
        title: Option<String>,
        org: Option<String>,
        mode: Option<String>,
    ) {
        self.app.open_cert(
            src.as_deref(),
            title.as_deref(),
            org.as_deref(),
            mode.as_deref(),
        );
    }

    #[wasm_bindgen(js_name = closeCert)]
    pub fn close_cert(&self) {
        self.app.close_cert();
    }

    pub fn toast(&self, message: JsValue) {
        self.app.toast(&display_text(&message));
    }
}

/// String conversion as `textContent` does it: `null` and `undefined` become
/// empty, everything else goes through JS `ToString`.
fn display_text(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if value.is_null() || value.is_undefined() {
        return String::new();
    }
    js_sys::Array::of1(value).join("").into()
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(dom) = WebDom::new() else {
        return;
    };
    let dom = Rc::new(dom);
    let (config, config_error) = match SiteConfig::load(&*dom) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    };
    logging::init(&config.log_level);
    if let Some(err) = config_error {
        tracing::warn!("config: {err}, using defaults");
    }

    let app = App::mount(
        Rc::clone(&dom),
        Rc::new(BrowserClock::default()),
        Box::new(LocalStorage),
        config,
    );
    let handle = JsValue::from(Portfolio { app });
    if let Err(err) = js_sys::Reflect::set(dom.window(), &JsValue::from_str(HANDLE_NAME), &handle) {
        tracing::warn!("handle: could not expose window.{HANDLE_NAME}: {err:?}");
    }
}
