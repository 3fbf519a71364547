//! Checkout bank-account verification.
use tracing::{info, instrument, warn};

use crate::api::StorefrontApi;
use crate::html::escape_html;
use crate::model::Bank;

pub const ACCOUNT_NUMBER_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTone {
    Muted,
    Success,
    Danger,
}

impl LabelTone {
    pub fn class(&self) -> &'static str {
        match self {
            LabelTone::Muted => "text-muted",
            LabelTone::Success => "text-success",
            LabelTone::Danger => "text-danger",
        }
    }
}

/// Content of `#account_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLabel {
    pub text: String,
    pub tone: LabelTone,
}

impl AccountLabel {
    pub fn verifying() -> Self {
        Self {
            text: "Verifying...".into(),
            tone: LabelTone::Muted,
        }
    }

    fn verified(name: String) -> Self {
        Self {
            text: name,
            tone: LabelTone::Success,
        }
    }

    fn invalid() -> Self {
        Self {
            text: "Invalid account details".into(),
            tone: LabelTone::Danger,
        }
    }

    fn error() -> Self {
        Self {
            text: "Error verifying account".into(),
            tone: LabelTone::Danger,
        }
    }
}

/// An account number verification can be attempted with.
pub fn is_complete_account_number(value: &str) -> bool {
    value.len() == ACCOUNT_NUMBER_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Bank select, hidden bank-name field and account-name label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankForm {
    banks: Vec<Bank>,
    selected: Option<String>,
    bank_name: String,
    account_number: String,
    label: Option<AccountLabel>,
}

impl BankForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the bank list. On failure the select keeps only its placeholder.
    #[instrument(skip_all)]
    pub async fn load_banks(&mut self, api: &dyn StorefrontApi) -> usize {
        match api.banks().await {
            Ok(list) if list.status => {
                self.banks = list.banks;
                info!(count = self.banks.len(), "loaded banks");
            }
            Ok(_) => {
                warn!("bank list request reported failure");
                self.banks.clear();
            }
            Err(err) => {
                warn!(?err, "failed to load banks");
                self.banks.clear();
            }
        }
        self.banks.len()
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// `<option>` markup for the select, led by the "Select Bank" placeholder.
    pub fn render_options(&self) -> String {
        let mut html = String::from(r#"<option value="">Select Bank</option>"#);
        for bank in &self.banks {
            let selected = if self.selected.as_deref() == Some(bank.code.as_str()) {
                " selected"
            } else {
                ""
            };
            html.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&bank.code),
                selected,
                escape_html(&bank.name)
            ));
        }
        html
    }

    /// Select a bank by code; the empty code selects the placeholder.
    pub fn select_bank(&mut self, code: &str) {
        match self.banks.iter().find(|b| b.code == code) {
            Some(bank) => {
                self.selected = Some(bank.code.clone());
                self.bank_name = bank.name.clone();
            }
            None => {
                self.selected = None;
                self.bank_name = if code.is_empty() {
                    "Select Bank".into()
                } else {
                    String::new()
                };
            }
        }
    }

    pub fn selected_bank(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Value for the hidden `#bank_name` field.
    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn set_account_number(&mut self, value: &str) {
        self.account_number = value.trim().to_string();
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn label(&self) -> Option<&AccountLabel> {
        self.label.as_ref()
    }

    pub fn ready_to_verify(&self) -> bool {
        self.selected.is_some() && is_complete_account_number(&self.account_number)
    }

    /// Verify the current bank/account pair. Returns `None` without a request
    /// when the pair is incomplete.
    #[instrument(skip_all, fields(bank = ?self.selected))]
    pub async fn verify(&mut self, api: &dyn StorefrontApi) -> Option<&AccountLabel> {
        if !self.ready_to_verify() {
            return None;
        }
        let bank_code = self.selected.clone().unwrap_or_default();
        self.label = Some(AccountLabel::verifying());

        let label = match api.verify_account(&bank_code, &self.account_number).await {
            Ok(result) if result.status => {
                info!("account verified");
                AccountLabel::verified(result.account_name.unwrap_or_default())
            }
            Ok(_) => AccountLabel::invalid(),
            Err(err) => {
                warn!(?err, "account verification failed");
                AccountLabel::error()
            }
        };
        self.label = Some(label);
        self.label.as_ref()
    }
}
