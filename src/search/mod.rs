//! Search-box autocomplete: debounced query gate, suggestion fetch/render cycle,
//! keyboard navigation and the multi-instance registry.
//!
//! Widgets never touch a DOM. Every visible change is sent to the host as a
//! [`WidgetEffect`] over an unbounded channel; the host applies it to the
//! element named by `instance`.
use reqwest::Url;
use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::urls::SiteUrls;

pub mod navigator;
pub mod registry;
pub mod render;
pub mod widget;

pub use navigator::{Key, KeyboardNavigator};
pub use registry::{AutocompleteRegistry, InputBinding};
pub use render::{Dropdown, PriceBlock, SuggestionItem};
pub use widget::AutocompleteWidget;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the suggestion box content; `Dropdown::Hidden` also hides it.
    Render(Dropdown),
    /// Mark row `index` active and scroll it into view.
    Highlight(usize),
    Navigate(Url),
    /// Remove focus from the input.
    Blur,
    /// Put focus back on the input.
    FocusInput,
    /// The markup had no suggestion box for this input; create one with this id.
    CreateContainer { container_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEffect {
    pub instance: String,
    pub effect: Effect,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_chars: usize,
    pub max_suggestions: usize,
    pub placeholder_image: String,
    pub urls: SiteUrls,
}

impl SearchSettings {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            debounce: cfg.debounce(),
            min_chars: cfg.search.min_chars,
            max_suggestions: cfg.search.max_suggestions,
            placeholder_image: cfg.search.placeholder_image.clone(),
            urls: cfg.site_urls()?,
        })
    }
}
