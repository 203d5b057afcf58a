//! Page-level data loads and the state they leave behind.
//!
//! Every network failure stops here and becomes page state; nothing is
//! retried.

pub mod tracker;

pub use tracker::{LoadTicket, LoadTracker};

use crate::detail::PropertyDetailView;
use crate::listings::{ListingsApi, ListingsQuery, MarketSide};
use crate::models::{ListingType, Property};
use crate::search::{self, FilterCriteria, TextQuery};
use tracing::{info, warn};

pub const LISTINGS_UNAVAILABLE: &str = "Unable to load properties right now.";
pub const HOME_UNAVAILABLE: &str = "Unable to load listings right now.";
pub const PROPERTY_NOT_FOUND: &str = "Property not found.";

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// User-facing message
    Failed(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DetailState {
    Loading,
    NotFound,
    Ready(Box<PropertyDetailView>),
}

impl DetailState {
    pub fn view(&self) -> Option<&PropertyDetailView> {
        match self {
            DetailState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Page state plus the tracker deciding whether a finished load may land
#[derive(Debug)]
pub struct Page<S> {
    state: S,
    tracker: LoadTracker,
}

impl<S> Page<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            tracker: LoadTracker::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Handle for tearing the page down from elsewhere
    pub fn tracker(&self) -> LoadTracker {
        self.tracker.clone()
    }

    /// Enter `loading` and take a ticket for the load about to run
    pub fn begin(&mut self, loading: S) -> LoadTicket {
        self.state = loading;
        self.tracker.begin()
    }

    /// Keep `state` only if `ticket` is still current
    pub fn commit(&mut self, ticket: &LoadTicket, state: S) -> bool {
        let committed = ticket.commit(&mut self.state, state);
        if !committed {
            info!("Discarding result of a superseded page load");
        }
        committed
    }

    pub fn teardown(&self) {
        self.tracker.invalidate();
    }
}

/// Listings of one type with the subset currently shown
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub listing_type: ListingType,
    pub all: Vec<Property>,
    pub visible: Vec<Property>,
    pub text: Option<TextQuery>,
    pub criteria: FilterCriteria,
}

impl Catalog {
    /// Catalog of `all` with form defaults; a text query narrows the
    /// initial results straight away
    pub fn new(listing_type: ListingType, all: Vec<Property>, text: Option<TextQuery>) -> Self {
        let visible = search::search(&all, text.as_ref());
        Self {
            listing_type,
            all,
            visible,
            text,
            criteria: FilterCriteria::defaults_for(listing_type),
        }
    }

    /// Re-filter from the full set with new form criteria
    pub fn apply(&mut self, criteria: FilterCriteria) {
        self.visible = search::apply(&self.all, &criteria, self.text.as_ref());
        self.criteria = criteria;
    }
}

/// Home page: featured listings, or the first few when none are featured
pub async fn load_featured(api: &dyn ListingsApi, per_page: u32) -> PageState<Vec<Property>> {
    match api.fetch_listings(&ListingsQuery::first_page(per_page)).await {
        Ok(listings) => {
            let featured = search::featured_or_first(&listings);
            info!("Home page showing {} listings", featured.len());
            PageState::Ready(featured)
        }
        Err(err) => {
            warn!("Failed to load home page listings: {}", err);
            PageState::Failed(HOME_UNAVAILABLE.to_string())
        }
    }
}

/// Buy or rent page.
///
/// Only rent pages take a free-text query from the URL; buy pages ignore it.
pub async fn load_catalog(
    api: &dyn ListingsApi,
    listing_type: ListingType,
    per_page: u32,
    text: Option<TextQuery>,
) -> PageState<Catalog> {
    let side = match listing_type {
        ListingType::Sale => MarketSide::Buy,
        ListingType::Rent => MarketSide::Rent,
    };
    let query = ListingsQuery::first_page(per_page).side(side);

    match api.fetch_listings(&query).await {
        Ok(listings) => {
            let listings = search::of_type(listings, listing_type);
            let text = match listing_type {
                ListingType::Rent => text,
                ListingType::Sale => None,
            };
            info!("Loaded {} {} listings", listings.len(), listing_type);
            PageState::Ready(Catalog::new(listing_type, listings, text))
        }
        Err(err) => {
            warn!("Failed to load {} listings: {}", listing_type, err);
            PageState::Failed(LISTINGS_UNAVAILABLE.to_string())
        }
    }
}

/// Detail page for the id taken from the route, with similar listings.
///
/// A missing id and a failed fetch both end in [`DetailState::NotFound`];
/// a failed similar-listings fetch only leaves that panel empty.
pub async fn load_detail(api: &dyn ListingsApi, id: Option<&str>, similar_per_page: u32) -> DetailState {
    let Some(id) = id.filter(|id| !id.is_empty()) else {
        return DetailState::NotFound;
    };

    let listing = match api.fetch_listing(id).await {
        Ok(listing) => listing,
        Err(err) => {
            warn!("Failed to load listing {}: {}", id, err);
            return DetailState::NotFound;
        }
    };

    let mut view = PropertyDetailView::new(listing);
    load_similar(api, &mut view, similar_per_page).await;
    DetailState::Ready(Box::new(view))
}

/// Fill the similar-listings panel; failures leave it empty
pub async fn load_similar(api: &dyn ListingsApi, view: &mut PropertyDetailView, per_page: u32) {
    match api.fetch_listings(&ListingsQuery::first_page(per_page)).await {
        Ok(listings) => view.set_similar_from(&listings),
        Err(err) => {
            warn!("Failed to load similar listings: {}", err);
            view.similar.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::MockListings;
    use crate::models::Category;
    use crate::search::CategoryFilter;

    fn ids(listings: &[Property]) -> Vec<&str> {
        listings.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_home_prefers_featured() {
        let api = MockListings::demo();
        let state = load_featured(&api, 12).await;
        assert_eq!(ids(state.ready().unwrap()), vec!["demo-1", "demo-4"]);
    }

    #[tokio::test]
    async fn test_home_failure_message() {
        let api = MockListings::failing(500);
        let state = load_featured(&api, 12).await;
        assert_eq!(state, PageState::Failed(HOME_UNAVAILABLE.to_string()));
    }

    #[tokio::test]
    async fn test_buy_catalog_keeps_sales_only() {
        let api = MockListings::demo();
        let state = load_catalog(&api, ListingType::Sale, 50, TextQuery::parse("condo")).await;
        let catalog = state.ready().unwrap();

        assert_eq!(ids(&catalog.all), vec!["demo-1", "demo-2"]);
        assert_eq!(catalog.visible, catalog.all);
        assert_eq!(catalog.text, None);
    }

    #[tokio::test]
    async fn test_rent_catalog_applies_query_then_filters() {
        let api = MockListings::demo();
        let mut state = load_catalog(&api, ListingType::Rent, 50, TextQuery::parse("Bengaluru")).await;
        let catalog = state.ready_mut().unwrap();

        assert_eq!(ids(&catalog.all), vec!["demo-3", "demo-4", "demo-5"]);
        assert_eq!(ids(&catalog.visible), vec!["demo-3", "demo-5"]);

        catalog.apply(FilterCriteria {
            bedrooms: 2,
            ..FilterCriteria::for_rent()
        });
        assert_eq!(ids(&catalog.visible), vec!["demo-3"]);

        catalog.apply(FilterCriteria {
            category: CategoryFilter::Only(Category::Villa),
            ..FilterCriteria::for_rent()
        });
        assert!(catalog.visible.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_message() {
        let api = MockListings::failing(503);
        let state = load_catalog(&api, ListingType::Rent, 50, None).await;
        assert_eq!(state, PageState::Failed(LISTINGS_UNAVAILABLE.to_string()));
    }

    #[tokio::test]
    async fn test_detail_with_similar() {
        let api = MockListings::demo();
        let state = load_detail(&api, Some("demo-3"), 12).await;
        let view = state.view().unwrap();

        assert_eq!(view.listing.images.len(), 2);
        assert_eq!(ids(&view.similar), vec!["demo-5"]);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let api = MockListings::demo();
        assert!(matches!(load_detail(&api, None, 12).await, DetailState::NotFound));
        assert!(matches!(
            load_detail(&api, Some("missing"), 12).await,
            DetailState::NotFound
        ));
    }

    #[tokio::test]
    async fn test_torn_down_page_ignores_late_result() {
        let api = MockListings::demo();
        let mut page = Page::new(PageState::<Catalog>::Loading);
        let handle = page.tracker();

        let ticket = page.begin(PageState::Loading);
        let loaded = load_catalog(&api, ListingType::Sale, 50, None).await;
        handle.invalidate();

        assert!(!page.commit(&ticket, loaded));
        assert!(page.state().is_loading());
    }

    #[tokio::test]
    async fn test_latest_load_wins() {
        let api = MockListings::demo();
        let mut page = Page::new(PageState::<Vec<Property>>::Loading);

        let stale = page.begin(PageState::Loading);
        let fresh = page.begin(PageState::Loading);

        let first = load_featured(&api, 12).await;
        let second = load_featured(&api, 1).await;

        assert!(page.commit(&fresh, second));
        assert!(!page.commit(&stale, first));
        assert_eq!(ids(page.state().ready().unwrap()), vec!["demo-1"]);
    }
}
