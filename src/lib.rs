//! # portfolio-site
//!
//! Client-side behavior for a static portfolio page, compiled to WebAssembly:
//! theme persistence, project filtering, reveal-on-scroll, project and
//! certificate dialogs, toasts and navigation highlighting.
//!
//! Components talk to the page only through [`dom::Dom`] and to timers only
//! through [`clock::Clock`], so everything except the browser bindings runs
//! under plain `cargo test`.

pub mod app;
pub mod certificate;
pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod filter;
#[cfg(target_arch = "wasm32")]
pub mod handle;
pub mod logging;
pub mod menu;
pub mod nav;
pub mod project_modal;
pub mod resume;
pub mod reveal;
pub mod storage;
pub mod theme;
pub mod toast;
