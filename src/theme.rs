//! Light/dark theme preference.
//!
//! The applied theme lives in the root element's `data-theme` attribute and
//! is persisted under [`STORAGE_KEY`]. When storage is refused the choice is
//! kept in memory for the rest of the session.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Dom, ListenOptions, ListenTarget};
use crate::storage::PreferenceStorage;

pub const STORAGE_KEY: &str = "theme";
const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub struct ThemeStore<D: Dom> {
    dom: Rc<D>,
    storage: Box<dyn PreferenceStorage>,
    session: Cell<Option<Theme>>,
}

impl<D: Dom> ThemeStore<D> {
    pub fn new(dom: Rc<D>, storage: Box<dyn PreferenceStorage>) -> Self {
        Self {
            dom,
            storage,
            session: Cell::new(None),
        }
    }

    /// Applies the stored preference, if any. Runs before anything else so
    /// the page never paints in the wrong theme.
    pub fn apply_stored(&self) {
        if let Some(theme) = self.get_theme() {
            self.apply(theme);
        }
    }

    /// A choice made this session wins over storage, which may have refused
    /// the write.
    pub fn get_theme(&self) -> Option<Theme> {
        if let Some(theme) = self.session.get() {
            return Some(theme);
        }
        match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).or_else(|| {
                tracing::debug!("theme: ignoring stored value {raw:?}");
                None
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("theme: {err}, no stored preference");
                None
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.apply(theme);
        self.session.set(Some(theme));
        if let Err(err) = self.storage.set(STORAGE_KEY, theme.as_str()) {
            tracing::warn!("theme: {err}, preference kept for this session only");
        }
    }

    /// The theme currently on the page, light when unset.
    pub fn applied(&self) -> Theme {
        self.dom
            .root()
            .and_then(|root| self.dom.attribute(&root, THEME_ATTRIBUTE))
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    pub fn toggle(&self) -> Theme {
        let next = self.applied().flipped();
        self.set_theme(next);
        next
    }

    fn apply(&self, theme: Theme) {
        if let Some(root) = self.dom.root() {
            self.dom.set_attribute(&root, THEME_ATTRIBUTE, theme.as_str());
        }
    }

    pub fn bind_toggle(self: &Rc<Self>) {
        let Some(button) = self.dom.by_id("themeToggle") else {
            tracing::debug!("theme: no toggle control");
            return;
        };
        let store = Rc::clone(self);
        self.dom.listen(
            ListenTarget::Node(button),
            "click",
            ListenOptions::default(),
            Box::new(move |_| {
                store.toggle();
            }),
        );
    }
}
