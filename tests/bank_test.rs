mod common;

use common::{server_error, RecordingApi};
use storefront_widgets::bank::{BankForm, LabelTone};
use storefront_widgets::model::{AccountVerification, Bank, BankList};

async fn form_with_banks(api: &RecordingApi) -> BankForm {
    api.push_banks(Ok(BankList {
        status: true,
        banks: vec![
            Bank {
                code: "044".into(),
                name: "Access Bank".into(),
            },
            Bank {
                code: "058".into(),
                name: "Guaranty Trust Bank".into(),
            },
        ],
    }))
    .await;
    let mut form = BankForm::new();
    assert_eq!(form.load_banks(api).await, 2);
    form
}

#[tokio::test]
async fn verified_account_shows_name() {
    let api = RecordingApi::new();
    let mut form = form_with_banks(&api).await;
    api.push_verification(Ok(AccountVerification {
        status: true,
        account_name: Some("ADA OKAFOR".into()),
    }))
    .await;

    form.select_bank("058");
    form.set_account_number(" 0123456789 ");
    let label = form.verify(&api).await.cloned().expect("verified");

    assert_eq!(label.text, "ADA OKAFOR");
    assert_eq!(label.tone, LabelTone::Success);
    assert_eq!(form.bank_name(), "Guaranty Trust Bank");
    assert_eq!(
        api.verify_calls.lock().await.clone(),
        vec![("058".to_string(), "0123456789".to_string())]
    );
}

#[tokio::test]
async fn rejected_and_failed_verifications_are_labelled() {
    let api = RecordingApi::new();
    let mut form = form_with_banks(&api).await;
    api.push_verification(Ok(AccountVerification::default())).await;
    api.push_verification(Err(server_error())).await;
    form.select_bank("044");
    form.set_account_number("0123456789");

    let label = form.verify(&api).await.cloned().expect("label");
    assert_eq!((label.text.as_str(), label.tone), ("Invalid account details", LabelTone::Danger));

    let label = form.verify(&api).await.cloned().expect("label");
    assert_eq!((label.text.as_str(), label.tone), ("Error verifying account", LabelTone::Danger));
}

#[tokio::test]
async fn incomplete_input_sends_nothing() {
    let api = RecordingApi::new();
    let mut form = form_with_banks(&api).await;

    form.set_account_number("0123456789");
    assert!(form.verify(&api).await.is_none());

    form.select_bank("044");
    form.set_account_number("01234");
    assert!(form.verify(&api).await.is_none());
    assert!(form.label().is_none());
    assert!(api.verify_calls.lock().await.is_empty());
}

#[tokio::test]
async fn failed_bank_list_leaves_placeholder_only() {
    let api = RecordingApi::new();
    api.push_banks(Err(server_error())).await;
    let mut form = BankForm::new();

    assert_eq!(form.load_banks(&api).await, 0);
    assert_eq!(form.render_options(), r#"<option value="">Select Bank</option>"#);

    form.select_bank("");
    assert_eq!(form.selected_bank(), None);
    assert_eq!(form.bank_name(), "Select Bank");
}
