use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the storefront hands out as either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    #[default]
    Product,
    Category,
    Brand,
    Tag,
    #[serde(other)]
    Other,
}

/// One autocomplete match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    #[serde(rename = "type", default)]
    pub kind: SuggestionKind,
    pub text: String,
    pub product: ProductRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub product_media: Vec<ProductMedia>,
}

impl ProductRef {
    /// First media image, if any.
    pub fn image(&self) -> Option<&str> {
        self.product_media
            .first()
            .and_then(|m| m.image.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductMedia {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AutocompleteResponse {
    pub success: bool,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// Carousel slot a banner belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BannerSlot {
    Main,
    Side,
}

impl BannerSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerSlot::Main => "Main",
            BannerSlot::Side => "Side",
        }
    }

    /// Case-insensitive parse of `main`/`side`.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("main") {
            Some(BannerSlot::Main)
        } else if value.eq_ignore_ascii_case("side") {
            Some(BannerSlot::Side)
        } else {
            None
        }
    }
}

impl fmt::Display for BannerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Banner {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    #[serde(default)]
    pub discount_title: Option<String>,
    #[serde(default)]
    pub discount_text: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bank {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankList {
    pub status: bool,
    #[serde(default)]
    pub banks: Vec<Bank>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountVerification {
    pub status: bool,
    #[serde(default)]
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartRequest {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_qty: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistRequest {
    pub product_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
