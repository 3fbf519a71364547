//! Cart add/remove toggling and quantity controls.
use tracing::{info, instrument, warn};

use crate::api::{ApiError, StorefrontApi};
use crate::model::{CartRequest, CartResponse};
use crate::toast::{Notice, Toast, GENERIC_FAILURE};

pub const ADD_LABEL_HTML: &str =
    r#"Add <span class="add-icon bg-light-gray"><i class="fa-solid fa-plus"></i></span>"#;
pub const REMOVE_LABEL: &str = "Remove from Cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOutcome {
    pub notice: Notice,
    /// New value for `#cart-counter`, when the server sent one.
    pub cart_count: Option<u64>,
}

impl CartOutcome {
    fn alert() -> Self {
        Self {
            notice: Notice::Alert(GENERIC_FAILURE.to_string()),
            cart_count: None,
        }
    }
}

/// `#cart-counter` badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartCounter {
    count: u64,
}

impl CartCounter {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    pub fn apply(&mut self, outcome: &CartOutcome) {
        if let Some(count) = outcome.cart_count {
            self.count = count;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn text(&self) -> String {
        self.count.to_string()
    }
}

/// `.addcart-button` bound to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartButton {
    pub product_id: String,
    pub add_url: String,
    pub remove_url: String,
    in_cart: bool,
}

impl CartButton {
    pub fn new(
        product_id: impl Into<String>,
        add_url: impl Into<String>,
        remove_url: impl Into<String>,
        in_cart: bool,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            add_url: add_url.into(),
            remove_url: remove_url.into(),
            in_cart,
        }
    }

    pub fn is_in_cart(&self) -> bool {
        self.in_cart
    }

    pub fn label_html(&self) -> &'static str {
        if self.in_cart {
            REMOVE_LABEL
        } else {
            ADD_LABEL_HTML
        }
    }

    pub fn class_list(&self) -> &'static str {
        if self.in_cart {
            "addcart-button in-cart"
        } else {
            "addcart-button"
        }
    }

    /// Where the next click posts.
    pub fn endpoint(&self) -> &str {
        if self.in_cart {
            &self.remove_url
        } else {
            &self.add_url
        }
    }

    /// Post add or remove and flip state only on server-reported success.
    #[instrument(skip(self, api), fields(product_id = %self.product_id, in_cart = self.in_cart))]
    pub async fn toggle(&mut self, api: &dyn StorefrontApi) -> CartOutcome {
        let request = CartRequest {
            product_id: self.product_id.clone(),
            product_qty: None,
        };
        let was_in_cart = self.in_cart;
        let result = api.post_cart(self.endpoint(), &request).await;

        match result {
            Ok(CartResponse {
                success: true,
                message,
                cart_count,
            }) => {
                self.in_cart = !was_in_cart;
                let message = message.unwrap_or_default();
                let toast = if was_in_cart {
                    Toast::error(message)
                } else {
                    Toast::success(message)
                };
                info!(now_in_cart = self.in_cart, ?cart_count, "cart updated");
                CartOutcome {
                    notice: Notice::Toast(toast),
                    cart_count,
                }
            }
            Ok(CartResponse { message, .. }) => CartOutcome {
                notice: Notice::Toast(Toast::error(message.unwrap_or_default())),
                cart_count: None,
            },
            Err(err) => failure(err),
        }
    }
}

fn failure(err: ApiError) -> CartOutcome {
    warn!(?err, "cart request failed");
    CartOutcome::alert()
}

/// Increment/decrement control for a cart line; quantity never drops below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityControl {
    pub product_id: String,
    pub update_url: String,
    quantity: u32,
}

impl QuantityControl {
    pub fn new(product_id: impl Into<String>, update_url: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            update_url: update_url.into(),
            quantity: quantity.max(1),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub async fn increment(&mut self, api: &dyn StorefrontApi) -> Option<CartOutcome> {
        self.set(api, self.quantity.saturating_add(1)).await
    }

    pub async fn decrement(&mut self, api: &dyn StorefrontApi) -> Option<CartOutcome> {
        self.set(api, self.quantity.saturating_sub(1)).await
    }

    /// Clamp to 1 and post when the value changed. Returns `None` for a no-op.
    /// A failed update restores the previous quantity.
    #[instrument(skip(self, api), fields(product_id = %self.product_id))]
    pub async fn set(&mut self, api: &dyn StorefrontApi, quantity: u32) -> Option<CartOutcome> {
        let quantity = quantity.max(1);
        if quantity == self.quantity {
            return None;
        }
        let previous = self.quantity;
        self.quantity = quantity;

        let request = CartRequest {
            product_id: self.product_id.clone(),
            product_qty: Some(quantity),
        };
        let outcome = match api.post_cart(&self.update_url, &request).await {
            Ok(CartResponse {
                success: true,
                message,
                cart_count,
            }) => CartOutcome {
                notice: Notice::Toast(Toast::success(
                    message.unwrap_or_else(|| "Cart updated".to_string()),
                )),
                cart_count,
            },
            Ok(CartResponse { message, .. }) => {
                self.quantity = previous;
                CartOutcome {
                    notice: Notice::Toast(Toast::error(
                        message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                    )),
                    cart_count: None,
                }
            }
            Err(err) => {
                self.quantity = previous;
                failure(err)
            }
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_endpoint_follows_state() {
        let b = CartButton::new("7", "/add_to_cart/", "/remove_from_cart/", false);
        assert_eq!(b.endpoint(), "/add_to_cart/");
        assert_eq!(b.label_html(), ADD_LABEL_HTML);
        assert_eq!(b.class_list(), "addcart-button");

        let b = CartButton::new("7", "/add_to_cart/", "/remove_from_cart/", true);
        assert_eq!(b.endpoint(), "/remove_from_cart/");
        assert_eq!(b.label_html(), "Remove from Cart");
        assert_eq!(b.class_list(), "addcart-button in-cart");
    }

    #[test]
    fn counter_only_changes_when_count_present() {
        let mut counter = CartCounter::new(3);
        counter.apply(&CartOutcome {
            notice: Notice::Alert("x".into()),
            cart_count: None,
        });
        assert_eq!(counter.text(), "3");
        counter.apply(&CartOutcome {
            notice: Notice::Toast(Toast::success("ok")),
            cart_count: Some(7),
        });
        assert_eq!(counter.text(), "7");
    }

    #[test]
    fn quantity_starts_at_least_one() {
        assert_eq!(QuantityControl::new("1", "/update_cart/", 0).quantity(), 1);
    }
}
