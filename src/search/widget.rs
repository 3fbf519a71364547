use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use super::navigator::{Key, KeyboardNavigator};
use super::render::Dropdown;
use super::{Effect, SearchSettings, WidgetEffect};
use crate::api::StorefrontApi;

#[derive(Default)]
struct WidgetState {
    query: String,
    /// Bumped for every scheduled or issued query; responses for older values are dropped.
    generation: u64,
    pending: Option<JoinHandle<()>>,
    navigator: KeyboardNavigator,
    dropdown: Dropdown,
}

impl WidgetState {
    fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

/// Autocomplete state for one search input.
#[derive(Clone)]
pub struct AutocompleteWidget {
    instance: String,
    container_id: String,
    api: Arc<dyn StorefrontApi>,
    settings: Arc<SearchSettings>,
    effects: mpsc::UnboundedSender<WidgetEffect>,
    state: Arc<Mutex<WidgetState>>,
}

impl AutocompleteWidget {
    pub fn new(
        instance: impl Into<String>,
        container_id: impl Into<String>,
        api: Arc<dyn StorefrontApi>,
        settings: Arc<SearchSettings>,
        effects: mpsc::UnboundedSender<WidgetEffect>,
    ) -> Self {
        Self {
            instance: instance.into(),
            container_id: container_id.into(),
            api,
            settings,
            effects,
            state: Arc::new(Mutex::new(WidgetState::default())),
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub async fn dropdown(&self) -> Dropdown {
        self.state.lock().await.dropdown.clone()
    }

    /// `-1` when no row is focused.
    pub async fn focus_index(&self) -> isize {
        self.state.lock().await.navigator.index()
    }

    pub async fn query(&self) -> String {
        self.state.lock().await.query.clone()
    }

    fn emit(&self, effect: Effect) {
        let _ = self.effects.send(WidgetEffect {
            instance: self.instance.clone(),
            effect,
        });
    }

    fn qualifies(&self, query: &str) -> bool {
        query.chars().count() >= self.settings.min_chars
    }

    /// Keystroke handler: hide below the threshold, otherwise show loading and
    /// schedule one fetch after the debounce delay.
    pub async fn handle_input(&self, raw: &str) {
        let query = raw.trim().to_string();
        let mut state = self.state.lock().await;
        state.query = query.clone();
        state.cancel_pending();

        if !self.qualifies(&query) {
            self.close_locked(&mut state);
            return;
        }

        state.navigator.reset();
        state.dropdown = Dropdown::Loading;
        self.emit(Effect::Render(Dropdown::Loading));

        let generation = state.generation;
        let widget = self.clone();
        let delay = self.settings.debounce;
        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            widget.fetch_suggestions(query, generation).await;
        }));
    }

    /// Refetch immediately when the input regains focus with a usable query.
    pub async fn handle_focus(&self) {
        let mut state = self.state.lock().await;
        let query = state.query.clone();
        if !self.qualifies(&query) {
            return;
        }
        state.cancel_pending();
        let generation = state.generation;
        let widget = self.clone();
        state.pending = Some(tokio::spawn(async move {
            widget.fetch_suggestions(query, generation).await;
        }));
    }

    #[instrument(skip(self), fields(instance = %self.instance))]
    async fn fetch_suggestions(&self, query: String, generation: u64) {
        let settings = &self.settings;
        let dropdown = match self.api.autocomplete(&query, settings.max_suggestions).await {
            Ok(resp) if resp.success => Dropdown::from_suggestions(
                &query,
                &resp.suggestions,
                settings.max_suggestions,
                &settings.urls,
                &settings.placeholder_image,
            ),
            Ok(_) => Dropdown::NoResults,
            Err(err) => {
                warn!(?err, "error fetching suggestions");
                Dropdown::Error
            }
        };

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(generation, current = state.generation, "discarding stale suggestions");
            return;
        }
        state.navigator.reset();
        state.dropdown = dropdown.clone();
        self.emit(Effect::Render(dropdown));
    }

    /// Returns `true` when the key was consumed (the host should prevent its default).
    pub async fn handle_key(&self, key: Key) -> bool {
        let mut state = self.state.lock().await;
        let len = state.dropdown.item_count();
        if len == 0 {
            return false;
        }

        match key {
            Key::ArrowDown => {
                if let Some(index) = state.navigator.next(len) {
                    self.emit(Effect::Highlight(index));
                }
                true
            }
            Key::ArrowUp => {
                if let Some(index) = state.navigator.prev(len) {
                    self.emit(Effect::Highlight(index));
                }
                true
            }
            Key::Enter => {
                let target = state
                    .navigator
                    .focused()
                    .and_then(|index| state.dropdown.target(index))
                    .cloned();
                match target {
                    Some(url) => self.emit(Effect::Navigate(url)),
                    None => self.perform_search(&state.query),
                }
                true
            }
            Key::Escape => {
                state.cancel_pending();
                self.close_locked(&mut state);
                self.emit(Effect::Blur);
                true
            }
            Key::Other => false,
        }
    }

    /// Pointer entered row `index`.
    pub async fn handle_hover(&self, index: usize) {
        let mut state = self.state.lock().await;
        let len = state.dropdown.item_count();
        if state.navigator.set(index, len) {
            self.emit(Effect::Highlight(index));
        }
    }

    pub async fn handle_click(&self, index: usize) {
        let state = self.state.lock().await;
        if let Some(url) = state.dropdown.target(index) {
            self.emit(Effect::Navigate(url.clone()));
        }
    }

    /// Search button click or form submit.
    pub async fn handle_submit(&self) {
        let state = self.state.lock().await;
        self.perform_search(&state.query);
    }

    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.cancel_pending();
        self.close_locked(&mut state);
    }

    fn close_locked(&self, state: &mut WidgetState) {
        state.navigator.reset();
        state.dropdown = Dropdown::Hidden;
        self.emit(Effect::Render(Dropdown::Hidden));
    }

    fn perform_search(&self, query: &str) {
        if query.is_empty() {
            self.emit(Effect::FocusInput);
            return;
        }
        self.emit(Effect::Navigate(self.settings.urls.search(query)));
    }
}
