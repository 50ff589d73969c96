use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dom::Dom;
use crate::error::ConfigError;

pub const CONFIG_ELEMENT_ID: &str = "site-config";
pub const PLACEHOLDER_RESUME_URL: &str = "resume.pdf";

const DEFAULT_NAV_OFFSET: f64 = 120.0;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.12;
const DEFAULT_TOAST_DURATION_MS: u32 = 2200;
const DEFAULT_POPUP_CLOSE_MS: u32 = 200;
const DEFAULT_MODAL_CLOSE_MS: u32 = 180;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub resume_url: String,
    pub nav_offset: f64,
    pub reveal_threshold: f64,
    pub toast_duration_ms: u32,
    pub popup_close_ms: u32,
    pub modal_close_ms: u32,
    pub project_titles: BTreeMap<String, String>,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            resume_url: PLACEHOLDER_RESUME_URL.to_string(),
            nav_offset: DEFAULT_NAV_OFFSET,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            popup_close_ms: DEFAULT_POPUP_CLOSE_MS,
            modal_close_ms: DEFAULT_MODAL_CLOSE_MS,
            project_titles: default_project_titles(),
            log_level: "info".to_string(),
        }
    }
}

fn default_project_titles() -> BTreeMap<String, String> {
    [
        ("portfolio", "Personal Portfolio"),
        ("attendance", "Student Attendance Manager"),
        ("nxtwave", "NxtWave Clone"),
    ]
    .into_iter()
    .map(|(key, title)| (key.to_string(), title.to_string()))
    .collect()
}

impl SiteConfig {
    /// Reads the inline `#site-config` JSON block. A missing block yields the
    /// defaults; a malformed one is an error the caller may downgrade.
    pub fn load<D: Dom>(dom: &D) -> Result<Self, ConfigError> {
        let Some(node) = dom.by_id(CONFIG_ELEMENT_ID) else {
            return Ok(Self::default());
        };
        let raw = dom.text(&node);
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: SiteConfig = serde_json::from_str(raw)?;
        Ok(parsed.normalized())
    }

    fn normalized(mut self) -> Self {
        if !self.nav_offset.is_finite() || self.nav_offset < 0.0 {
            self.nav_offset = DEFAULT_NAV_OFFSET;
        }
        self.reveal_threshold = if self.reveal_threshold.is_finite() {
            self.reveal_threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_REVEAL_THRESHOLD
        };
        let mut titles = default_project_titles();
        titles.append(&mut self.project_titles);
        self.project_titles = titles;
        if self.resume_url.trim().is_empty() {
            self.resume_url = PLACEHOLDER_RESUME_URL.to_string();
        }
        self
    }

    pub fn close_delay_ms(&self, popup: bool) -> u32 {
        if popup {
            self.popup_close_ms
        } else {
            self.modal_close_ms
        }
    }
}
