//! Promotional banner carousels: loading with fallback, slide state, and autoplay.
use once_cell::sync::Lazy;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{info, instrument, warn};

use crate::api::StorefrontApi;
use crate::html::escape_html;
use crate::model::{Banner, BannerSlot, ItemId};

const SHOP_PATH: &str = "/shop/";
const MAIN_IMAGE_FALLBACK: &str = "/static/frontend/assets/images/banners/clothes.jpg";
const SIDE_IMAGE_FALLBACK: &str = "/static/frontend/assets/images/banners/appliances.jpg";

static BUILTIN_FALLBACK: Lazy<FallbackBanners> = Lazy::new(|| FallbackBanners {
    main: vec![Banner {
        id: ItemId::from("fallback-main-1"),
        title: "Stay home & get your orders delivered to your".into(),
        subtitle: Some("Doorstep".into()),
        description: Some("Best comfy wears to match your style.".into()),
        image: MAIN_IMAGE_FALLBACK.into(),
        discount_title: Some("Exclusive offer".into()),
        discount_text: Some("30% Off".into()),
        order: 0,
    }],
    side: vec![
        Banner {
            id: ItemId::from("fallback-side-1"),
            title: "Electronics Deals".into(),
            subtitle: None,
            description: Some("Upgrade your home with our awesome products".into()),
            image: SIDE_IMAGE_FALLBACK.into(),
            discount_title: Some("OFF".into()),
            discount_text: Some("45%".into()),
            order: 0,
        },
        Banner {
            id: ItemId::from("fallback-side-2"),
            title: "Awoof deals".into(),
            subtitle: Some("Jewelry Market".into()),
            description: Some("Start your daily shopping with some Jewelry products".into()),
            image: "/static/frontend/assets/images/banners/jewelry.jpg".into(),
            discount_title: None,
            discount_text: None,
            order: 1,
        },
    ],
});

/// Local banners shown when the remote source fails or is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackBanners {
    pub main: Vec<Banner>,
    pub side: Vec<Banner>,
}

impl FallbackBanners {
    pub fn builtin() -> &'static FallbackBanners {
        &BUILTIN_FALLBACK
    }

    pub fn for_slot(&self, slot: BannerSlot) -> &[Banner] {
        match slot {
            BannerSlot::Main => &self.main,
            BannerSlot::Side => &self.side,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerSource {
    Remote,
    Fallback,
}

/// Visibility of the dynamic carousel wrapper vs. the static backup markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub carousel_wrapper_visible: bool,
    pub static_banners_visible: bool,
}

impl PageLayout {
    pub fn dynamic() -> Self {
        Self {
            carousel_wrapper_visible: true,
            static_banners_visible: false,
        }
    }

    pub fn static_fallback() -> Self {
        Self {
            carousel_wrapper_visible: false,
            static_banners_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    slot: BannerSlot,
    slides: Vec<Banner>,
    current: usize,
    source: BannerSource,
}

impl Carousel {
    /// Slides are ordered by `Banner::order`.
    pub fn new(slot: BannerSlot, mut banners: Vec<Banner>, source: BannerSource) -> Self {
        banners.sort_by_key(|b| b.order);
        Self {
            slot,
            slides: banners,
            current: 0,
            source,
        }
    }

    pub fn slot(&self) -> BannerSlot {
        self.slot
    }

    pub fn source(&self) -> BannerSource {
        self.source
    }

    pub fn slides(&self) -> &[Banner] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> usize {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if !self.slides.is_empty() {
            self.current = (self.current + self.slides.len() - 1) % self.slides.len();
        }
        self.current
    }

    /// Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> usize {
        if index < self.slides.len() {
            self.current = index;
        }
        self.current
    }

    /// CSS transform for the slide track.
    pub fn transform(&self) -> String {
        if self.current == 0 {
            return "translateX(0%)".to_string();
        }
        format!("translateX(-{}%)", self.current * 100)
    }

    pub fn shows_controls(&self) -> bool {
        self.slides.len() > 1
    }

    pub fn autoplays(&self) -> bool {
        self.slides.len() > 1
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        if self.slides.len() <= 1 {
            return Vec::new();
        }
        (0..self.slides.len())
            .map(|index| Indicator {
                index,
                active: index == self.current,
            })
            .collect()
    }

    pub fn render_slides(&self) -> String {
        self.slides
            .iter()
            .map(|banner| match self.slot {
                BannerSlot::Main => render_main_slide(banner),
                BannerSlot::Side => render_side_slide(banner),
            })
            .collect()
    }

    pub fn render_indicators(&self) -> String {
        self.indicators()
            .iter()
            .map(|i| {
                format!(
                    r#"<div class="indicator{}" data-index="{}"></div>"#,
                    if i.active { " active" } else { "" },
                    i.index
                )
            })
            .collect()
    }
}

fn render_main_slide(banner: &Banner) -> String {
    let discount = match (&banner.discount_title, &banner.discount_text) {
        (Some(_), text) => format!(
            "<h6><span>{}</span></h6>",
            escape_html(text.as_deref().unwrap_or_default())
        ),
        (None, _) => String::new(),
    };
    let subtitle = banner
        .subtitle
        .as_deref()
        .map(|s| format!(r#"<span class="daily">{}</span>"#, escape_html(s)))
        .unwrap_or_default();
    let description = banner
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="w-75 d-none d-sm-block">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="carousel-slide" data-banner-id="{id}">
    <a href="{SHOP_PATH}">
        <div class="home-contain h-100">
            <div class="h-100">
                <img src="{image}" class="bg-img" alt="{title}" onerror="this.onerror=null;this.src='{MAIN_IMAGE_FALLBACK}'">
            </div>
            <div class="home-detail p-center-left w-75">
                <div>
                    {discount}
                    <h1 class="text-uppercase">{title} {subtitle}</h1>
                    {description}
                </div>
            </div>
        </div>
    </a>
</div>"#,
        id = escape_html(&banner.id.to_string()),
        image = escape_html(&banner.image),
        title = escape_html(&banner.title),
    )
}

fn render_side_slide(banner: &Banner) -> String {
    let discount = banner
        .discount_text
        .as_deref()
        .map(|d| {
            format!(
                r#"<h2 class="mt-0 text-danger">{} <span class="discount text-title"></span></h2>"#,
                escape_html(d)
            )
        })
        .unwrap_or_default();
    let title_class = if banner.discount_text.is_some() {
        "theme-color"
    } else {
        "mt-0 theme-color fw-bold"
    };
    let subtitle = banner
        .subtitle
        .as_deref()
        .map(|s| format!(r#"<h4 class="text-danger">{}</h4>"#, escape_html(s)))
        .unwrap_or_default();
    let description = banner
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="organic">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="carousel-slide" data-banner-id="{id}">
    <a href="{SHOP_PATH}">
        <div class="home-contain">
            <img src="{image}" class="bg-img" alt="{title}" onerror="this.onerror=null;this.src='{SIDE_IMAGE_FALLBACK}'">
            <div class="home-detail p-center-left home-p-sm w-75">
                <div>
                    {discount}
                    <h3 class="{title_class}">{title}</h3>
                    {subtitle}
                    {description}
                </div>
            </div>
        </div>
    </a>
</div>"#,
        id = escape_html(&banner.id.to_string()),
        image = escape_html(&banner.image),
        title = escape_html(&banner.title),
    )
}

/// Outcome of loading one carousel slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselLoad {
    Ready(Carousel),
    /// Main slot with nothing to show: reveal the static backup markup.
    StaticFallback,
    /// Side slot with nothing to show.
    Empty,
}

impl CarouselLoad {
    pub fn carousel(&self) -> Option<&Carousel> {
        match self {
            CarouselLoad::Ready(c) => Some(c),
            _ => None,
        }
    }
}

/// Fetch banners for `slot`, falling back to the local list on failure,
/// timeout, or an empty response.
#[instrument(skip(api, fallback))]
pub async fn load_carousel(
    api: &dyn StorefrontApi,
    slot: BannerSlot,
    fallback: &FallbackBanners,
    timeout: Duration,
) -> CarouselLoad {
    let fetched = match tokio::time::timeout(timeout, api.banners(slot)).await {
        Ok(Ok(banners)) if !banners.is_empty() => Some(banners),
        Ok(Ok(_)) => {
            warn!("no banners returned from API, using fallback");
            None
        }
        Ok(Err(err)) => {
            warn!(?err, "error fetching banners, using fallback");
            None
        }
        Err(_) => {
            warn!(?timeout, "banner fetch timed out, using fallback");
            None
        }
    };

    let (banners, source) = match fetched {
        Some(banners) => (banners, BannerSource::Remote),
        None => (fallback.for_slot(slot).to_vec(), BannerSource::Fallback),
    };

    if banners.is_empty() {
        warn!("no banners available");
        return match slot {
            BannerSlot::Main => CarouselLoad::StaticFallback,
            BannerSlot::Side => CarouselLoad::Empty,
        };
    }

    if source == BannerSource::Fallback {
        info!(%slot, "using fallback banners");
    }
    CarouselLoad::Ready(Carousel::new(slot, banners, source))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCarousels {
    pub main: CarouselLoad,
    pub side: CarouselLoad,
    pub layout: PageLayout,
}

/// Load the main and side carousels concurrently.
pub async fn load_page_carousels(
    api: &dyn StorefrontApi,
    fallback: &FallbackBanners,
    timeout: Duration,
) -> PageCarousels {
    let (main, side) = futures::join!(
        load_carousel(api, BannerSlot::Main, fallback, timeout),
        load_carousel(api, BannerSlot::Side, fallback, timeout),
    );
    let layout = if main == CarouselLoad::StaticFallback {
        PageLayout::static_fallback()
    } else {
        PageLayout::dynamic()
    };
    PageCarousels { main, side, layout }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Prev,
    GoTo(usize),
    PointerEnter,
    PointerLeave,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEvent {
    SlideChanged { index: usize, transform: String },
}

/// Handle to a running autoplay task that owns the carousel.
pub struct Autoplay {
    commands: mpsc::UnboundedSender<CarouselCommand>,
    task: JoinHandle<Carousel>,
}

impl Autoplay {
    /// Spawn the autoplay loop. Advances every `interval` unless paused by
    /// hover; manual navigation restarts the interval.
    pub fn spawn(
        carousel: Carousel,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<CarouselEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_autoplay(carousel, interval, cmd_rx, event_tx));
        (
            Self {
                commands: cmd_tx,
                task,
            },
            event_rx,
        )
    }

    pub fn send(&self, command: CarouselCommand) {
        let _ = self.commands.send(command);
    }

    pub fn next(&self) {
        self.send(CarouselCommand::Next);
    }

    pub fn prev(&self) {
        self.send(CarouselCommand::Prev);
    }

    pub fn go_to(&self, index: usize) {
        self.send(CarouselCommand::GoTo(index));
    }

    pub fn pointer_enter(&self) {
        self.send(CarouselCommand::PointerEnter);
    }

    pub fn pointer_leave(&self) {
        self.send(CarouselCommand::PointerLeave);
    }

    /// Stop the loop and hand back the carousel in its final state.
    pub async fn shutdown(self) -> Option<Carousel> {
        self.send(CarouselCommand::Shutdown);
        self.task.await.ok()
    }
}

async fn run_autoplay(
    mut carousel: Carousel,
    interval: Duration,
    mut commands: mpsc::UnboundedReceiver<CarouselCommand>,
    events: mpsc::UnboundedSender<CarouselEvent>,
) -> Carousel {
    let mut paused = false;
    let mut deadline = Instant::now() + interval;

    let emit = |carousel: &Carousel| {
        let _ = events.send(CarouselEvent::SlideChanged {
            index: carousel.current(),
            transform: carousel.transform(),
        });
    };

    loop {
        let running = carousel.autoplays() && !paused;
        tokio::select! {
            _ = sleep_until(deadline), if running => {
                carousel.next();
                emit(&carousel);
                deadline = Instant::now() + interval;
            }
            command = commands.recv() => {
                match command {
                    None | Some(CarouselCommand::Shutdown) => break,
                    Some(CarouselCommand::Next) => {
                        carousel.next();
                        emit(&carousel);
                        deadline = Instant::now() + interval;
                    }
                    Some(CarouselCommand::Prev) => {
                        carousel.prev();
                        emit(&carousel);
                        deadline = Instant::now() + interval;
                    }
                    Some(CarouselCommand::GoTo(index)) => {
                        carousel.go_to(index);
                        emit(&carousel);
                        deadline = Instant::now() + interval;
                    }
                    Some(CarouselCommand::PointerEnter) => paused = true,
                    Some(CarouselCommand::PointerLeave) => {
                        paused = false;
                        deadline = Instant::now() + interval;
                    }
                }
            }
        }
    }
    carousel
}
