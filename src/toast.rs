use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::html::escape_html;

pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// Dismissible notification appended to `.message-container`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    pub dismiss_after: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn with_dismiss_after(mut self, after: Duration) -> Self {
        self.dismiss_after = after;
        self
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="message-toast {}" role="alert" data-toast-id="{}">
    <div class="message-body">{}</div>
    <button type="button" class="close-button" aria-label="Close" title="Close">&times;</button>
</div>"#,
            self.kind.as_str(),
            self.id,
            escape_html(&self.message)
        )
    }
}

/// What a button handler wants the page to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast(Toast),
    /// Blocking `alert()`.
    Alert(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Toast(t) => &t.message,
            Notice::Alert(m) => m,
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        match self {
            Notice::Toast(t) => Some(t),
            Notice::Alert(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_escapes_message_and_sets_kind() {
        let toast = Toast::error("<b>nope</b>");
        let html = toast.render();
        assert!(html.contains(r#"class="message-toast error""#));
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
        assert!(html.contains(&toast.id.to_string()));
    }

    #[test]
    fn toasts_dismiss_after_five_seconds_by_default() {
        let toast = Toast::success("ok");
        assert_eq!(toast.dismiss_after, Duration::from_secs(5));
        let toast = toast.with_dismiss_after(Duration::from_secs(2));
        assert_eq!(toast.dismiss_after, Duration::from_secs(2));
    }

    #[test]
    fn each_toast_gets_its_own_id() {
        assert_ne!(Toast::success("a").id, Toast::success("a").id);
    }
}
