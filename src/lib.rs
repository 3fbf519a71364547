//! Headless storefront widgets: autocomplete, banner carousels, cart and
//! wishlist buttons, sale countdowns and checkout bank verification.
pub mod api;
pub mod bank;
pub mod carousel;
pub mod cart;
pub mod config;
pub mod countdown;
pub mod html;
pub mod model;
pub mod search;
pub mod toast;
pub mod urls;
pub mod wishlist;
