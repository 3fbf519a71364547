//! Typed dropdown view-model for the autocomplete widget and its HTML renderer.
use reqwest::Url;

use crate::html::{escape_html, format_price, highlight_match};
use crate::model::Suggestion;
use crate::urls::SiteUrls;

/// Price column of a suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceBlock {
    None,
    Single(String),
    Discounted { original: String, discounted: String },
}

impl PriceBlock {
    pub fn from_prices(price: Option<f64>, discounted: Option<f64>) -> Self {
        // the index stores a missing price as 0
        let price = price.filter(|p| *p != 0.0).map(format_price);
        let discounted = discounted.filter(|p| *p != 0.0).map(format_price);
        match (price, discounted) {
            (Some(original), Some(discounted)) if discounted != original => {
                PriceBlock::Discounted { original, discounted }
            }
            (Some(original), _) => PriceBlock::Single(original),
            (None, _) => PriceBlock::None,
        }
    }

    fn render(&self) -> String {
        match self {
            PriceBlock::None => r#"<div class="fw-bold"></div>"#.to_string(),
            PriceBlock::Single(price) => format!(r#"<div class="fw-bold">{price}</div>"#),
            PriceBlock::Discounted { original, discounted } => format!(
                r#"<div class="text-danger fw-bold">{discounted}</div>
                <div class="text-muted small text-decoration-line-through">{original}</div>"#
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionItem {
    pub product_id: Option<String>,
    pub slug: String,
    pub text: String,
    /// Escaped title with the query wrapped in `<strong>`.
    pub title_html: String,
    pub name: String,
    pub image: String,
    pub category: Option<String>,
    pub price: PriceBlock,
    pub target: Url,
}

impl SuggestionItem {
    pub fn from_suggestion(
        suggestion: &Suggestion,
        query: &str,
        urls: &SiteUrls,
        placeholder: &str,
    ) -> Self {
        let product = &suggestion.product;
        let product_id = product.id.as_ref().map(ToString::to_string);
        let target = match product_id {
            Some(_) => urls.product(&product.slug),
            None => urls.search(&suggestion.text),
        };
        Self {
            product_id,
            slug: product.slug.clone(),
            text: suggestion.text.clone(),
            title_html: highlight_match(&suggestion.text, query),
            name: product.name.clone(),
            image: product.image().unwrap_or(placeholder).to_string(),
            category: product.category.as_ref().map(|c| c.name.clone()),
            price: PriceBlock::from_prices(product.price, product.discounted_price),
            target,
        }
    }

    fn render(&self, placeholder: &str) -> String {
        let id_attrs = match &self.product_id {
            Some(id) => format!(
                r#" data-product-id="{}" data-product-slug="{}""#,
                escape_html(id),
                escape_html(&self.slug)
            ),
            None => String::new(),
        };
        let category = self
            .category
            .as_deref()
            .map(|name| {
                format!(
                    r#"<div class="suggestion-category text-muted small">{}</div>"#,
                    escape_html(name)
                )
            })
            .unwrap_or_default();

        format!(
            r#"
    <div class="suggestion-item"{id_attrs} data-query="{query}">
        <div class="d-flex align-items-center p-2">
            <img src="{image}" alt="{alt}" class="suggestion-image me-3" onerror="this.onerror=null;this.src='{placeholder}'">
            <div class="flex-grow-1">
                <div class="suggestion-title">{title}</div>
                {category}
            </div>
            <div class="suggestion-price text-end">
                {price}
            </div>
        </div>
    </div>"#,
            query = escape_html(&self.text),
            image = escape_html(&self.image),
            alt = escape_html(&self.name),
            placeholder = escape_html(placeholder),
            title = self.title_html,
            price = self.price.render(),
        )
    }
}

/// Everything the suggestion box can display.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dropdown {
    #[default]
    Hidden,
    Loading,
    NoResults,
    Error,
    Results {
        query: String,
        items: Vec<SuggestionItem>,
        view_all: Url,
    },
}

impl Dropdown {
    /// Build the result set for `query`, capped at `max` rows.
    pub fn from_suggestions(
        query: &str,
        suggestions: &[Suggestion],
        max: usize,
        urls: &SiteUrls,
        placeholder: &str,
    ) -> Self {
        if suggestions.is_empty() {
            return Dropdown::NoResults;
        }
        let items = suggestions
            .iter()
            .take(max)
            .map(|s| SuggestionItem::from_suggestion(s, query, urls, placeholder))
            .collect();
        Dropdown::Results {
            query: query.to_string(),
            items,
            view_all: urls.search(query),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Dropdown::Hidden)
    }

    /// Number of navigable `.suggestion-item` rows, the trailing view-all row included.
    pub fn item_count(&self) -> usize {
        match self {
            Dropdown::Results { items, .. } => items.len() + 1,
            _ => 0,
        }
    }

    /// Navigation target of the row at `index`.
    pub fn target(&self, index: usize) -> Option<&Url> {
        match self {
            Dropdown::Results {
                items, view_all, ..
            } => match index.cmp(&items.len()) {
                std::cmp::Ordering::Less => items.get(index).map(|item| &item.target),
                std::cmp::Ordering::Equal => Some(view_all),
                std::cmp::Ordering::Greater => None,
            },
            _ => None,
        }
    }

    /// Inner HTML for the suggestion box; `Hidden` renders empty (box gets `display: none`).
    pub fn render(&self, placeholder: &str) -> String {
        match self {
            Dropdown::Hidden => String::new(),
            Dropdown::Loading => r#"
    <div class="p-3 text-center text-muted">
        <div class="spinner-border spinner-border-sm me-2" role="status">
            <span class="visually-hidden">Loading...</span>
        </div>
        Searching...
    </div>"#
                .to_string(),
            Dropdown::NoResults => r#"
    <div class="p-3 text-center text-muted">
        <i data-feather="search"></i>
        <div class="mt-2">No results found</div>
    </div>"#
                .to_string(),
            Dropdown::Error => r#"
    <div class="p-3 text-center text-danger">
        <i data-feather="alert-circle"></i>
        <div class="mt-2">Something went wrong. Please try again.</div>
    </div>"#
                .to_string(),
            Dropdown::Results { query, items, .. } => {
                let rows: String = items.iter().map(|item| item.render(placeholder)).collect();
                let query = escape_html(query);
                format!(
                    r#"<div class="suggestions-list">{rows}
    <div class="suggestion-item view-all" data-query="{query}">
        <div class="p-2 text-center text-primary">
            <i data-feather="search"></i> View all results for "{query}"
        </div>
    </div>
</div>"#
                )
            }
        }
    }
}
