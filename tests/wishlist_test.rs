mod common;

use common::{server_error, RecordingApi};
use storefront_widgets::api::ApiError;
use storefront_widgets::model::WishlistResponse;
use storefront_widgets::toast::{Notice, ToastKind, GENERIC_FAILURE};
use storefront_widgets::wishlist::WishlistButton;

fn success(message: Option<&str>) -> WishlistResponse {
    WishlistResponse {
        success: true,
        message: message.map(str::to_string),
    }
}

#[tokio::test]
async fn adding_uses_default_message() {
    let api = RecordingApi::new();
    api.push_wishlist(Ok(success(None))).await;
    let mut button = WishlistButton::new("15", "/wishlist/toggle/", false);

    let notice = button.toggle(&api).await;

    assert!(button.is_in_wishlist());
    assert!(button.label_html().contains("Remove from Wishlist"));
    let toast = notice.toast().expect("toast");
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Success, "Added to wishlist"));

    let calls = api.wishlist_calls.lock().await.clone();
    assert_eq!(calls[0].0, "/wishlist/toggle/");
    assert_eq!(calls[0].1.product_id, "15");
}

#[tokio::test]
async fn removing_prefers_server_message() {
    let api = RecordingApi::new();
    api.push_wishlist(Ok(success(Some("Gone from your list")))).await;
    let mut button = WishlistButton::new("15", "/wishlist/toggle/", true);

    let notice = button.toggle(&api).await;

    assert!(!button.is_in_wishlist());
    assert!(button.label_html().contains("Add to Wishlist"));
    let toast = notice.toast().expect("toast");
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Error, "Gone from your list"));
}

#[tokio::test]
async fn unsuccessful_response_keeps_state() {
    let api = RecordingApi::new();
    api.push_wishlist(Ok(WishlistResponse::default())).await;
    let mut button = WishlistButton::new("15", "/wishlist/toggle/", false);

    let notice = button.toggle(&api).await;

    assert!(!button.is_in_wishlist());
    assert_eq!(notice.message(), "Something went wrong.");
}

#[tokio::test]
async fn malformed_response_alerts_and_failed_request_toasts() {
    let api = RecordingApi::new();
    api.push_wishlist(Err(ApiError::Decode("expected value".into()))).await;
    api.push_wishlist(Err(server_error())).await;
    let mut button = WishlistButton::new("15", "/wishlist/toggle/", false);

    assert_eq!(button.toggle(&api).await, Notice::Alert(GENERIC_FAILURE.into()));

    let notice = button.toggle(&api).await;
    let toast = notice.toast().expect("toast");
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Error, GENERIC_FAILURE));
    assert!(!button.is_in_wishlist());
}
