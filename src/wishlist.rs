use tracing::{instrument, warn};

use crate::api::StorefrontApi;
use crate::model::{WishlistRequest, WishlistResponse};
use crate::toast::{Notice, Toast, GENERIC_FAILURE};

/// `.wishlist-button` bound to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistButton {
    pub product_id: String,
    pub url: String,
    in_wishlist: bool,
}

impl WishlistButton {
    pub fn new(product_id: impl Into<String>, url: impl Into<String>, in_wishlist: bool) -> Self {
        Self {
            product_id: product_id.into(),
            url: url.into(),
            in_wishlist,
        }
    }

    pub fn is_in_wishlist(&self) -> bool {
        self.in_wishlist
    }

    pub fn label_html(&self) -> &'static str {
        if self.in_wishlist {
            r#"<i data-feather="heart"></i> <span>Remove from Wishlist</span>"#
        } else {
            r#"<i data-feather="heart"></i> <span>Add to Wishlist</span>"#
        }
    }

    #[instrument(skip(self, api), fields(product_id = %self.product_id))]
    pub async fn toggle(&mut self, api: &dyn StorefrontApi) -> Notice {
        let request = WishlistRequest {
            product_id: self.product_id.clone(),
        };
        match api.post_wishlist(&self.url, &request).await {
            Ok(WishlistResponse {
                success: true,
                message,
            }) => {
                self.in_wishlist = !self.in_wishlist;
                if self.in_wishlist {
                    Notice::Toast(Toast::success(
                        message.unwrap_or_else(|| "Added to wishlist".to_string()),
                    ))
                } else {
                    Notice::Toast(Toast::error(
                        message.unwrap_or_else(|| "Removed from wishlist".to_string()),
                    ))
                }
            }
            Ok(WishlistResponse { message, .. }) => Notice::Toast(Toast::error(
                message.unwrap_or_else(|| "Something went wrong.".to_string()),
            )),
            Err(err) if err.is_malformed() => {
                warn!(?err, "malformed wishlist response");
                Notice::Alert(GENERIC_FAILURE.to_string())
            }
            Err(err) => {
                warn!(?err, "wishlist request failed");
                Notice::Toast(Toast::error(GENERIC_FAILURE))
            }
        }
    }
}
