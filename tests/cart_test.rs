mod common;

use common::{server_error, RecordingApi};
use storefront_widgets::cart::{CartButton, CartCounter, QuantityControl, ADD_LABEL_HTML};
use storefront_widgets::model::{CartRequest, CartResponse};
use storefront_widgets::toast::{Notice, ToastKind, GENERIC_FAILURE};

fn ok(message: &str, cart_count: Option<u64>) -> CartResponse {
    CartResponse {
        success: true,
        message: Some(message.into()),
        cart_count,
    }
}

fn button(in_cart: bool) -> CartButton {
    CartButton::new("42", "/add_to_cart/", "/remove_from_cart/", in_cart)
}

#[tokio::test]
async fn add_flips_button_and_updates_counter() {
    let api = RecordingApi::new();
    api.push_cart(Ok(ok("Added to cart", Some(7)))).await;
    let mut counter = CartCounter::new(6);
    let mut button = button(false);

    let outcome = button.toggle(&api).await;
    counter.apply(&outcome);

    assert!(button.is_in_cart());
    assert_eq!(button.label_html(), "Remove from Cart");
    assert_eq!(button.class_list(), "addcart-button in-cart");
    assert_eq!(counter.text(), "7");
    let toast = outcome.notice.toast().expect("toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Added to cart");

    let calls = api.cart_calls.lock().await.clone();
    assert_eq!(
        calls,
        vec![(
            "/add_to_cart/".to_string(),
            CartRequest {
                product_id: "42".into(),
                product_qty: None
            }
        )]
    );
}

#[tokio::test]
async fn remove_posts_to_remove_endpoint_with_error_styled_toast() {
    let api = RecordingApi::new();
    api.push_cart(Ok(ok("Removed from cart", Some(0)))).await;
    let mut button = button(true);

    let outcome = button.toggle(&api).await;

    assert!(!button.is_in_cart());
    assert_eq!(button.label_html(), ADD_LABEL_HTML);
    assert_eq!(outcome.cart_count, Some(0));
    assert_eq!(outcome.notice.toast().map(|t| t.kind), Some(ToastKind::Error));
    assert_eq!(api.cart_calls.lock().await[0].0, "/remove_from_cart/");
}

#[tokio::test]
async fn rejected_toggle_keeps_state() {
    let api = RecordingApi::new();
    api.push_cart(Ok(CartResponse {
        success: false,
        message: Some("Out of stock".into()),
        cart_count: Some(99),
    }))
    .await;
    let mut counter = CartCounter::new(3);
    let mut button = button(false);

    let outcome = button.toggle(&api).await;
    counter.apply(&outcome);

    assert!(!button.is_in_cart());
    assert_eq!(counter.count(), 3);
    let toast = outcome.notice.toast().expect("toast");
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Error, "Out of stock"));
}

#[tokio::test]
async fn failed_request_alerts() {
    let api = RecordingApi::new();
    api.push_cart(Err(server_error())).await;
    let mut button = button(false);

    let outcome = button.toggle(&api).await;

    assert!(!button.is_in_cart());
    assert_eq!(outcome.notice, Notice::Alert(GENERIC_FAILURE.into()));
    assert_eq!(outcome.cart_count, None);
}

#[tokio::test]
async fn quantity_never_posts_below_one() {
    let api = RecordingApi::new();
    let mut control = QuantityControl::new("42", "/update_cart/", 1);

    assert!(control.decrement(&api).await.is_none());
    assert_eq!(control.quantity(), 1);
    assert!(api.cart_calls.lock().await.is_empty());
}

#[tokio::test]
async fn quantity_change_posts_new_value() {
    let api = RecordingApi::new();
    api.push_cart(Ok(ok("Cart updated", Some(4)))).await;
    api.push_cart(Ok(ok("Cart updated", Some(2)))).await;
    let mut control = QuantityControl::new("42", "/update_cart/", 3);

    let outcome = control.increment(&api).await.expect("posted");
    assert_eq!(control.quantity(), 4);
    assert_eq!(outcome.cart_count, Some(4));

    control.set(&api, 0).await.expect("posted");
    assert_eq!(control.quantity(), 1);

    let sent: Vec<Option<u32>> = api
        .cart_calls
        .lock()
        .await
        .iter()
        .map(|(url, req)| {
            assert_eq!(url, "/update_cart/");
            req.product_qty
        })
        .collect();
    assert_eq!(sent, vec![Some(4), Some(1)]);
}

#[tokio::test]
async fn failed_quantity_update_reverts() {
    let api = RecordingApi::new();
    api.push_cart(Err(server_error())).await;
    api.push_cart(Ok(CartResponse {
        success: false,
        message: None,
        cart_count: None,
    }))
    .await;
    let mut control = QuantityControl::new("42", "/update_cart/", 2);

    let outcome = control.increment(&api).await.expect("posted");
    assert_eq!(control.quantity(), 2);
    assert!(matches!(outcome.notice, Notice::Alert(_)));

    let outcome = control.decrement(&api).await.expect("posted");
    assert_eq!(control.quantity(), 2);
    assert_eq!(outcome.notice.message(), GENERIC_FAILURE);
}
