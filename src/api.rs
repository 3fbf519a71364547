use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ConfigError};
use crate::model::{
    AccountVerification, AutocompleteResponse, BankList, Banner, BannerSlot, CartRequest,
    CartResponse, WishlistRequest, WishlistResponse,
};

const BANKS_PATH: &str = "api/get-banks/";
const VERIFY_ACCOUNT_PATH: &str = "api/verify-bank-account/";
const BANNERS_PATH: &str = "api/banners/";
const AUTOCOMPLETE_PATH: &str = "api/search/autocomplete/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to reach storefront: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("storefront returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid storefront response: {0}")]
    Decode(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid endpoint {0}")]
    Endpoint(String),
}

impl ApiError {
    /// The response arrived but could not be understood.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}

/// Server API used by every widget.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    async fn banks(&self) -> Result<BankList, ApiError>;

    async fn verify_account(
        &self,
        bank_code: &str,
        account_number: &str,
    ) -> Result<AccountVerification, ApiError>;

    async fn banners(&self, slot: BannerSlot) -> Result<Vec<Banner>, ApiError>;

    async fn autocomplete(&self, query: &str, size: usize)
        -> Result<AutocompleteResponse, ApiError>;

    async fn post_cart(
        &self,
        endpoint: &str,
        request: &CartRequest,
    ) -> Result<CartResponse, ApiError>;

    async fn post_wishlist(
        &self,
        endpoint: &str,
        request: &WishlistRequest,
    ) -> Result<WishlistResponse, ApiError>;
}

#[derive(Clone)]
pub struct HttpStorefrontApi {
    http: Client,
    base_url: Url,
    csrf_token: String,
    timeout: Duration,
}

impl fmt::Debug for HttpStorefrontApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStorefrontApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpStorefrontApi {
    pub fn new(base_url: Url, csrf_token: String, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent("storefront-widgets/0.1")
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url,
            csrf_token,
            timeout,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let base_url = cfg.base_url()?;
        Self::new(base_url, cfg.api.csrf_token.clone(), cfg.request_timeout())
            .map_err(|_| ConfigError::Invalid("failed to build HTTP client"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::Endpoint(path.to_string()))
    }

    pub fn build_get(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Request, ApiError> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        self.http
            .request(Method::GET, url)
            .header("Content-Type", "application/json")
            .build()
            .map_err(ApiError::Transport)
    }

    pub fn build_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Request, ApiError> {
        let url = self.endpoint(path)?;
        self.http
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-CSRFToken", &self.csrf_token)
            .json(body)
            .build()
            .map_err(ApiError::Transport)
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, ApiError> {
        debug!(method=%request.method(), url=%request.url(), "sending storefront request");
        let res = self
            .http
            .execute(request)
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ApiError::Timeout(self.timeout)
                } else {
                    ApiError::Transport(err)
                }
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "storefront returned an error status");
            return Err(ApiError::Status { status, body });
        }

        let body = res.text().await.map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn banks(&self) -> Result<BankList, ApiError> {
        let request = self.build_get(BANKS_PATH, &[])?;
        self.execute(request).await
    }

    async fn verify_account(
        &self,
        bank_code: &str,
        account_number: &str,
    ) -> Result<AccountVerification, ApiError> {
        let request = self.build_get(
            VERIFY_ACCOUNT_PATH,
            &[("bank_code", bank_code), ("account_number", account_number)],
        )?;
        self.execute(request).await
    }

    async fn banners(&self, slot: BannerSlot) -> Result<Vec<Banner>, ApiError> {
        let request = self.build_get(BANNERS_PATH, &[("type", slot.as_str())])?;
        self.execute(request).await
    }

    async fn autocomplete(
        &self,
        query: &str,
        size: usize,
    ) -> Result<AutocompleteResponse, ApiError> {
        let size = size.to_string();
        let request = self.build_get(AUTOCOMPLETE_PATH, &[("q", query), ("size", &size)])?;
        self.execute(request).await
    }

    async fn post_cart(
        &self,
        endpoint: &str,
        request: &CartRequest,
    ) -> Result<CartResponse, ApiError> {
        let request = self.build_post(endpoint, request)?;
        self.execute(request).await
    }

    async fn post_wishlist(
        &self,
        endpoint: &str,
        request: &WishlistRequest,
    ) -> Result<WishlistResponse, ApiError> {
        let request = self.build_post(endpoint, request)?;
        self.execute(request).await
    }
}
