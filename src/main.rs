use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use storefront_widgets::api::{HttpStorefrontApi, StorefrontApi};
use storefront_widgets::bank::BankForm;
use storefront_widgets::carousel::{
    load_carousel, Autoplay, Carousel, CarouselEvent, CarouselLoad, FallbackBanners,
};
use storefront_widgets::cart::CartButton;
use storefront_widgets::config::{self, Config};
use storefront_widgets::countdown::{Countdown, CountdownTimer};
use storefront_widgets::model::BannerSlot;
use storefront_widgets::search::{AutocompleteWidget, Dropdown, Effect, Key, SearchSettings};
use storefront_widgets::toast::Notice;
use storefront_widgets::wishlist::WishlistButton;

#[derive(Debug, Parser)]
#[command(author, version, about = "Drive storefront widgets against a live API")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the example configuration
    ExampleConfig,
    /// Run one autocomplete query and print the rendered dropdown
    Suggest {
        query: String,
        /// Key names to replay against the dropdown, e.g. ArrowDown,Enter
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Load a carousel slot (main|side) and print its slides
    Banners {
        slot: String,
        /// Number of autoplay advances to print
        #[arg(long, default_value_t = 0)]
        autoplay_ticks: usize,
    },
    /// List banks
    Banks,
    /// Verify a bank account
    Verify {
        bank_code: String,
        account_number: String,
    },
    /// Print countdown ticks for a sale window
    Countdown {
        start: String,
        end: String,
        #[arg(long, default_value_t = 1)]
        ticks: usize,
    },
    /// Toggle a product's cart state
    CartToggle {
        product_id: String,
        #[arg(long, default_value = "/add_to_cart/")]
        add_url: String,
        #[arg(long, default_value = "/remove_from_cart/")]
        remove_url: String,
        #[arg(long)]
        in_cart: bool,
    },
    /// Toggle a product's wishlist state
    WishlistToggle {
        product_id: String,
        #[arg(long, default_value = "/wishlist/toggle/")]
        url: String,
        #[arg(long)]
        in_wishlist: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    if let Command::ExampleConfig = args.command {
        print!("{}", config::example());
        return Ok(());
    }

    let cfg = config::load(Some(args.config.as_path()))
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let api: Arc<dyn StorefrontApi> = Arc::new(HttpStorefrontApi::from_config(&cfg)?);
    info!(base_url = %cfg.api.base_url, "storefront client ready");

    match args.command {
        Command::ExampleConfig => {}
        Command::Suggest { query, keys } => suggest(&cfg, api, &query, &keys).await?,
        Command::Banners {
            slot,
            autoplay_ticks,
        } => {
            let slot = BannerSlot::parse(&slot).ok_or_else(|| anyhow!("unknown slot {slot}"))?;
            match load_carousel(api.as_ref(), slot, FallbackBanners::builtin(), cfg.carousel_timeout()).await {
                CarouselLoad::Ready(carousel) => {
                    println!("{} slides ({:?})", carousel.len(), carousel.source());
                    println!("{}", carousel.render_slides());
                    println!("{}", carousel.render_indicators());
                    if autoplay_ticks > 0 && carousel.autoplays() {
                        autoplay(carousel, cfg.autoplay_interval(), autoplay_ticks).await;
                    }
                }
                CarouselLoad::StaticFallback => println!("static fallback banners shown"),
                CarouselLoad::Empty => println!("no banners"),
            }
        }
        Command::Banks => {
            let mut form = BankForm::new();
            form.load_banks(api.as_ref()).await;
            for bank in form.banks() {
                println!("{}\t{}", bank.code, bank.name);
            }
        }
        Command::Verify {
            bank_code,
            account_number,
        } => {
            let mut form = BankForm::new();
            form.load_banks(api.as_ref()).await;
            form.select_bank(&bank_code);
            form.set_account_number(&account_number);
            match form.verify(api.as_ref()).await {
                Some(label) => println!("{} ({})", label.text, label.tone.class()),
                None => println!("need a known bank and a 10-digit account number"),
            }
        }
        Command::Countdown { start, end, ticks } => {
            let countdown = Countdown::parse(&start, &end)?;
            let (task, mut rx) = CountdownTimer::spawn(countdown);
            let mut seen = 0;
            while let Some(view) = rx.recv().await {
                println!(
                    "{}: {}d {}h {}m {}s",
                    view.headline(),
                    view.days,
                    view.hours,
                    view.minutes,
                    view.seconds
                );
                seen += 1;
                if seen >= ticks {
                    break;
                }
            }
            task.abort();
        }
        Command::CartToggle {
            product_id,
            add_url,
            remove_url,
            in_cart,
        } => {
            let mut button = CartButton::new(product_id, add_url, remove_url, in_cart);
            let outcome = button.toggle(api.as_ref()).await;
            print_notice(&cfg, &outcome.notice);
            if let Some(count) = outcome.cart_count {
                println!("cart count: {count}");
            }
            println!("button: {}", button.label_html());
        }
        Command::WishlistToggle {
            product_id,
            url,
            in_wishlist,
        } => {
            let mut button = WishlistButton::new(product_id, url, in_wishlist);
            let notice = button.toggle(api.as_ref()).await;
            print_notice(&cfg, &notice);
            println!("button: {}", button.label_html());
        }
    }

    Ok(())
}

async fn autoplay(carousel: Carousel, interval: Duration, ticks: usize) {
    let (autoplay, mut events) = Autoplay::spawn(carousel, interval);
    for _ in 0..ticks {
        match events.recv().await {
            Some(CarouselEvent::SlideChanged { index, transform }) => {
                println!("slide {index} ({transform})");
            }
            None => break,
        }
    }
    autoplay.shutdown().await;
}

async fn suggest(
    cfg: &Config,
    api: Arc<dyn StorefrontApi>,
    query: &str,
    keys: &[String],
) -> Result<()> {
    let settings = Arc::new(SearchSettings::from_config(cfg)?);
    let placeholder = settings.placeholder_image.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let widget = AutocompleteWidget::new("search-input", "suggestions", api, settings, tx);
    widget.handle_input(query).await;

    while let Some(fx) = rx.recv().await {
        match fx.effect {
            Effect::Render(Dropdown::Loading) => continue,
            Effect::Render(dropdown) => {
                if dropdown.is_visible() {
                    println!("{}", dropdown.render(&placeholder));
                } else {
                    println!("dropdown hidden");
                }
                break;
            }
            other => info!(?other, "ignoring effect"),
        }
    }

    for name in keys {
        let consumed = widget.handle_key(Key::from_name(name)).await;
        println!("{name}: consumed={consumed}");
        while let Ok(fx) = rx.try_recv() {
            match fx.effect {
                Effect::Highlight(index) => println!("  highlight row {index}"),
                Effect::Navigate(url) => println!("  navigate to {url}"),
                other => println!("  {other:?}"),
            }
        }
    }
    Ok(())
}

fn print_notice(cfg: &Config, notice: &Notice) {
    match notice {
        Notice::Toast(toast) => {
            let toast = toast.clone().with_dismiss_after(cfg.toast_duration());
            println!("{}", toast.render());
        }
        Notice::Alert(message) => println!("ALERT: {message}"),
    }
}
