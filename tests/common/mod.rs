#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use storefront_widgets::api::{ApiError, StorefrontApi};
use storefront_widgets::model::{
    AccountVerification, AutocompleteResponse, BankList, Banner, BannerSlot, CartRequest,
    CartResponse, ItemId, ProductRef, Suggestion, SuggestionKind, WishlistRequest,
    WishlistResponse,
};
use storefront_widgets::search::{Dropdown, Effect, SearchSettings, WidgetEffect};
use storefront_widgets::urls::SiteUrls;

pub type Reply<T> = (Duration, Result<T, ApiError>);

/// Scripted storefront that records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingApi {
    autocomplete: Arc<Mutex<VecDeque<Reply<AutocompleteResponse>>>>,
    banners: Arc<Mutex<HashMap<BannerSlot, Reply<Vec<Banner>>>>>,
    banks: Arc<Mutex<VecDeque<Result<BankList, ApiError>>>>,
    verifications: Arc<Mutex<VecDeque<Result<AccountVerification, ApiError>>>>,
    carts: Arc<Mutex<VecDeque<Result<CartResponse, ApiError>>>>,
    wishlists: Arc<Mutex<VecDeque<Result<WishlistResponse, ApiError>>>>,
    pub autocomplete_calls: Arc<Mutex<Vec<(String, usize)>>>,
    pub banner_calls: Arc<Mutex<Vec<BannerSlot>>>,
    pub verify_calls: Arc<Mutex<Vec<(String, String)>>>,
    pub cart_calls: Arc<Mutex<Vec<(String, CartRequest)>>>,
    pub wishlist_calls: Arc<Mutex<Vec<(String, WishlistRequest)>>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_autocomplete(&self, delay: Duration, reply: Result<AutocompleteResponse, ApiError>) {
        self.autocomplete.lock().await.push_back((delay, reply));
    }

    pub async fn set_banners(&self, slot: BannerSlot, delay: Duration, reply: Result<Vec<Banner>, ApiError>) {
        self.banners.lock().await.insert(slot, (delay, reply));
    }

    pub async fn push_banks(&self, reply: Result<BankList, ApiError>) {
        self.banks.lock().await.push_back(reply);
    }

    pub async fn push_verification(&self, reply: Result<AccountVerification, ApiError>) {
        self.verifications.lock().await.push_back(reply);
    }

    pub async fn push_cart(&self, reply: Result<CartResponse, ApiError>) {
        self.carts.lock().await.push_back(reply);
    }

    pub async fn push_wishlist(&self, reply: Result<WishlistResponse, ApiError>) {
        self.wishlists.lock().await.push_back(reply);
    }

    pub async fn autocomplete_queries(&self) -> Vec<String> {
        self.autocomplete_calls
            .lock()
            .await
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }
}

#[async_trait]
impl StorefrontApi for RecordingApi {
    async fn banks(&self) -> Result<BankList, ApiError> {
        self.banks
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(BankList::default()))
    }

    async fn verify_account(
        &self,
        bank_code: &str,
        account_number: &str,
    ) -> Result<AccountVerification, ApiError> {
        self.verify_calls
            .lock()
            .await
            .push((bank_code.to_string(), account_number.to_string()));
        self.verifications
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(AccountVerification::default()))
    }

    async fn banners(&self, slot: BannerSlot) -> Result<Vec<Banner>, ApiError> {
        self.banner_calls.lock().await.push(slot);
        let reply = self.banners.lock().await.remove(&slot);
        match reply {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(Vec::new()),
        }
    }

    async fn autocomplete(&self, query: &str, size: usize) -> Result<AutocompleteResponse, ApiError> {
        self.autocomplete_calls
            .lock()
            .await
            .push((query.to_string(), size));
        let reply = self.autocomplete.lock().await.pop_front();
        match reply {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(AutocompleteResponse::default()),
        }
    }

    async fn post_cart(&self, endpoint: &str, request: &CartRequest) -> Result<CartResponse, ApiError> {
        self.cart_calls
            .lock()
            .await
            .push((endpoint.to_string(), request.clone()));
        self.carts
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(CartResponse::default()))
    }

    async fn post_wishlist(
        &self,
        endpoint: &str,
        request: &WishlistRequest,
    ) -> Result<WishlistResponse, ApiError> {
        self.wishlist_calls
            .lock()
            .await
            .push((endpoint.to_string(), request.clone()));
        self.wishlists
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(WishlistResponse::default()))
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "boom".into(),
    }
}

pub fn settings() -> SearchSettings {
    SearchSettings {
        debounce: Duration::from_millis(300),
        min_chars: 2,
        max_suggestions: 5,
        placeholder_image: "/static/placeholder.jpg".into(),
        urls: SiteUrls::new(Url::parse("https://shop.example/").unwrap(), "/search/", "/detail/"),
    }
}

pub fn product(id: i64, slug: &str, name: &str, price: f64) -> Suggestion {
    Suggestion {
        kind: SuggestionKind::Product,
        text: name.to_string(),
        product: ProductRef {
            id: Some(ItemId::Number(id)),
            slug: slug.to_string(),
            name: name.to_string(),
            price: Some(price),
            ..Default::default()
        },
    }
}

pub fn found(suggestions: Vec<Suggestion>) -> AutocompleteResponse {
    AutocompleteResponse {
        success: true,
        suggestions,
    }
}

pub fn banner(id: i64, title: &str, order: i32) -> Banner {
    Banner {
        id: ItemId::Number(id),
        title: title.to_string(),
        subtitle: None,
        description: None,
        image: format!("/media/banners/{id}.jpg"),
        discount_title: None,
        discount_text: None,
        order,
    }
}

/// Next render that is not the loading indicator.
pub async fn next_render(rx: &mut mpsc::UnboundedReceiver<WidgetEffect>) -> (String, Dropdown) {
    loop {
        let fx = rx.recv().await.expect("effect channel closed");
        match fx.effect {
            Effect::Render(Dropdown::Loading) => continue,
            Effect::Render(dropdown) => return (fx.instance, dropdown),
            _ => continue,
        }
    }
}

/// Everything already queued on the channel.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<WidgetEffect>) -> Vec<WidgetEffect> {
    let mut out = Vec::new();
    while let Ok(fx) = rx.try_recv() {
        out.push(fx);
    }
    out
}
