use std::rc::Rc;

use crate::certificate::{CertificateViewer, Presentation};
use crate::clock::Clock;
use crate::config::SiteConfig;
use crate::dom::Dom;
use crate::filter::ProjectFilter;
use crate::menu::MobileMenu;
use crate::nav::NavHighlighter;
use crate::project_modal::ProjectModal;
use crate::resume;
use crate::reveal::RevealOnScroll;
use crate::storage::PreferenceStorage;
use crate::theme::ThemeStore;
use crate::toast::Toaster;

/// Everything the page script owns, built once at startup. Components whose
/// elements are missing are `None` and their entry points do nothing.
pub struct App<D: Dom, C: Clock> {
    config: SiteConfig,
    theme: Rc<ThemeStore<D>>,
    toaster: Rc<Toaster<D, C>>,
    projects: ProjectModal<D>,
    certificates: Option<Rc<CertificateViewer<D, C>>>,
    filter: Option<Rc<ProjectFilter<D>>>,
    nav: Option<Rc<NavHighlighter<D>>>,
    menu: Option<Rc<MobileMenu<D>>>,
    reveal: Option<Rc<RevealOnScroll<D>>>,
}

impl<D: Dom, C: Clock> App<D, C> {
    pub fn mount(
        dom: Rc<D>,
        clock: Rc<C>,
        storage: Box<dyn PreferenceStorage>,
        config: SiteConfig,
    ) -> Self {
        let theme = Rc::new(ThemeStore::new(Rc::clone(&dom), storage));
        theme.apply_stored();
        theme.bind_toggle();

        render_year(&*dom, &*clock);

        let toaster = Rc::new(Toaster::new(
            Rc::clone(&dom),
            Rc::clone(&clock),
            config.toast_duration_ms,
        ));
        let filter = ProjectFilter::mount(Rc::clone(&dom));
        let reveal = RevealOnScroll::mount(Rc::clone(&dom), config.reveal_threshold);
        let projects = ProjectModal::mount(Rc::clone(&dom), config.project_titles.clone());
        resume::bind(&dom, &toaster, &config.resume_url);
        let certificates = CertificateViewer::mount(Rc::clone(&dom), clock, &config);
        let nav = NavHighlighter::mount(Rc::clone(&dom), config.nav_offset);
        let menu = MobileMenu::mount(dom);

        tracing::debug!("app: mounted");
        Self {
            config,
            theme,
            toaster,
            projects,
            certificates,
            filter,
            nav,
            menu,
            reveal,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn theme(&self) -> &ThemeStore<D> {
        &self.theme
    }

    pub fn filter(&self) -> Option<&ProjectFilter<D>> {
        self.filter.as_deref()
    }

    pub fn nav(&self) -> Option<&NavHighlighter<D>> {
        self.nav.as_deref()
    }

    pub fn menu(&self) -> Option<&MobileMenu<D>> {
        self.menu.as_deref()
    }

    pub fn reveal(&self) -> Option<&RevealOnScroll<D>> {
        self.reveal.as_deref()
    }

    pub fn open_modal(&self, key: &str) {
        self.projects.open_modal(key);
    }

    pub fn close_modal(&self) {
        self.projects.close_modal();
    }

    pub fn open_cert(
        &self,
        src: Option<&str>,
        title: Option<&str>,
        issuer: Option<&str>,
        mode: Option<&str>,
    ) {
        if let Some(viewer) = &self.certificates {
            viewer.open_cert(src, title, issuer, Presentation::from_mode(mode));
        }
    }

    pub fn close_cert(&self) {
        if let Some(viewer) = &self.certificates {
            viewer.close_cert();
        }
    }

    pub fn toast(&self, message: &str) {
        self.toaster.toast(message);
    }
}

fn render_year<D: Dom, C: Clock>(dom: &D, clock: &C) {
    if let Some(node) = dom.by_id("year") {
        dom.set_text(&node, &clock.current_year().to_string());
    }
}
