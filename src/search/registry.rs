use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use super::navigator::Key;
use super::widget::AutocompleteWidget;
use super::{Effect, SearchSettings, WidgetEffect};
use crate::api::StorefrontApi;

/// A search input found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    pub input_id: String,
    /// Id of the existing suggestion box, if the markup has one.
    pub container_id: Option<String>,
}

impl InputBinding {
    pub fn new(input_id: impl Into<String>) -> Self {
        Self {
            input_id: input_id.into(),
            container_id: None,
        }
    }

    pub fn with_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }
}

/// Independent autocomplete widgets for every matching input on a page.
///
/// Keyboard events are routed to whichever input last received input or focus.
pub struct AutocompleteRegistry {
    api: Arc<dyn StorefrontApi>,
    settings: Arc<SearchSettings>,
    effects: mpsc::UnboundedSender<WidgetEffect>,
    widgets: HashMap<String, AutocompleteWidget>,
    active: Option<String>,
}

impl AutocompleteRegistry {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        settings: SearchSettings,
    ) -> (Self, mpsc::UnboundedReceiver<WidgetEffect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registry = Self {
            api,
            settings: Arc::new(settings),
            effects: tx,
            widgets: HashMap::new(),
            active: None,
        };
        (registry, rx)
    }

    /// Bind one input. Rebinding an id keeps the existing widget.
    pub fn bind(&mut self, binding: InputBinding) -> &AutocompleteWidget {
        let InputBinding {
            input_id,
            container_id,
        } = binding;
        let api = &self.api;
        let settings = &self.settings;
        let effects = &self.effects;
        self.widgets.entry(input_id.clone()).or_insert_with(|| {
            let container_id = match container_id {
                Some(id) => id,
                None => {
                    let id = format!("{input_id}-suggestions");
                    debug!(input = %input_id, container = %id, "creating suggestion container");
                    let _ = effects.send(WidgetEffect {
                        instance: input_id.clone(),
                        effect: Effect::CreateContainer {
                            container_id: id.clone(),
                        },
                    });
                    id
                }
            };
            AutocompleteWidget::new(
                input_id.clone(),
                container_id,
                Arc::clone(api),
                Arc::clone(settings),
                effects.clone(),
            )
        })
    }

    pub fn bind_all(&mut self, bindings: impl IntoIterator<Item = InputBinding>) {
        for binding in bindings {
            self.bind(binding);
        }
    }

    pub fn get(&self, input_id: &str) -> Option<&AutocompleteWidget> {
        self.widgets.get(input_id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn activate(&mut self, input_id: &str) -> Option<AutocompleteWidget> {
        let widget = self.widgets.get(input_id)?.clone();
        self.active = Some(input_id.to_string());
        Some(widget)
    }

    /// Returns `false` for an unbound input.
    pub async fn handle_input(&mut self, input_id: &str, raw: &str) -> bool {
        match self.activate(input_id) {
            Some(widget) => {
                widget.handle_input(raw).await;
                true
            }
            None => false,
        }
    }

    pub async fn handle_focus(&mut self, input_id: &str) -> bool {
        match self.activate(input_id) {
            Some(widget) => {
                widget.handle_focus().await;
                true
            }
            None => false,
        }
    }

    /// Route a key to the active input.
    pub async fn handle_key(&self, key: Key) -> bool {
        match self.active.as_deref().and_then(|id| self.widgets.get(id)) {
            Some(widget) => widget.handle_key(key).await,
            None => false,
        }
    }

    pub async fn handle_hover(&mut self, input_id: &str, index: usize) {
        if let Some(widget) = self.activate(input_id) {
            widget.handle_hover(index).await;
        }
    }

    pub async fn handle_click(&mut self, input_id: &str, index: usize) {
        if let Some(widget) = self.activate(input_id) {
            widget.handle_click(index).await;
        }
    }

    pub async fn handle_submit(&mut self, input_id: &str) {
        if let Some(widget) = self.activate(input_id) {
            widget.handle_submit().await;
        }
    }

    /// Close every dropdown except the one belonging to `inside`.
    pub async fn handle_click_outside(&self, inside: Option<&str>) {
        for (id, widget) in &self.widgets {
            if Some(id.as_str()) != inside {
                widget.close().await;
            }
        }
    }
}
