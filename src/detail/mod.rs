pub mod mortgage;

pub use mortgage::{monthly_payment, MortgageForm};

use crate::error::Result;
use crate::listings::ListingsApi;
use crate::models::{Enquiry, ListingDetail, Property};
use serde_json::Value;
use tracing::{info, warn};

/// Most similar listings shown under a property
pub const SIMILAR_LIMIT: usize = 3;

/// Circular position in an image gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// Gallery of `len` images; an empty gallery behaves as a single slot
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = if self.index + 1 >= self.len { 0 } else { self.index + 1 };
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
        self.index
    }

    /// Jump to a thumbnail; out-of-range picks clamp to the last image
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.len - 1);
        self.index
    }

    /// "2 / 5" style position label
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.len)
    }
}

/// Up to [`SIMILAR_LIMIT`] other listings with the same type and category
pub fn similar_listings(all: &[Property], current: &Property) -> Vec<Property> {
    all.iter()
        .filter(|listing| {
            listing.id != current.id
                && listing.listing_type == current.listing_type
                && listing.category == current.category
        })
        .take(SIMILAR_LIMIT)
        .cloned()
        .collect()
}

/// Derived state of the property detail page
#[derive(Debug, Clone)]
pub struct PropertyDetailView {
    pub listing: ListingDetail,
    pub carousel: Carousel,
    pub similar: Vec<Property>,
    pub mortgage: MortgageForm,
}

impl PropertyDetailView {
    pub fn new(listing: ListingDetail) -> Self {
        let carousel = Carousel::new(listing.images.len());
        Self {
            listing,
            carousel,
            similar: Vec::new(),
            mortgage: MortgageForm::default(),
        }
    }

    /// Swap in a freshly loaded listing; the gallery restarts only when the
    /// id changes
    pub fn replace_listing(&mut self, listing: ListingDetail) {
        let same_listing = listing.summary.id == self.listing.summary.id;
        let index = self.carousel.index();
        self.carousel = Carousel::new(listing.images.len());
        if same_listing {
            self.carousel.select(index);
        }
        self.listing = listing;
    }

    pub fn current_image(&self) -> &str {
        self.listing
            .images
            .get(self.carousel.index())
            .map(String::as_str)
            .unwrap_or(&self.listing.summary.image)
    }

    /// Pick similar listings out of a freshly fetched collection
    pub fn set_similar_from(&mut self, all: &[Property]) {
        self.similar = similar_listings(all, &self.listing.summary);
    }

    /// Monthly payment for the current mortgage form, priced off this listing
    pub fn monthly_payment(&self) -> Option<f64> {
        self.mortgage.monthly_payment(self.listing.summary.price)
    }
}

/// Contact-agent form on the detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl EnquiryForm {
    pub fn to_enquiry(&self, listing_id: &str) -> Enquiry {
        Enquiry {
            listing_id: listing_id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
        }
    }

    /// Send the enquiry; the form is cleared on success and kept on failure
    /// so it can be resubmitted
    pub async fn submit(&mut self, api: &dyn ListingsApi, listing_id: &str) -> Result<Value> {
        match api.create_enquiry(&self.to_enquiry(listing_id)).await {
            Ok(ack) => {
                info!("Enquiry sent for listing {}", listing_id);
                *self = Self::default();
                Ok(ack)
            }
            Err(err) => {
                warn!("Unable to send enquiry for listing {}: {}", listing_id, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::normalize::normalize_detail;
    use crate::listings::MockListings;
    use crate::models::{Category, ListingType};
    use crate::search::tests::listing;
    use serde_json::json;

    #[test]
    fn test_next_wraps_around() {
        let mut carousel = Carousel::new(3);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.previous(), 2);
        assert_eq!(carousel.position_label(), "3 / 3");
    }

    #[test]
    fn test_single_image_stays_put() {
        let mut carousel = Carousel::new(1);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.previous(), 0);

        let mut empty = Carousel::new(0);
        assert_eq!(empty.next(), 0);
    }

    #[test]
    fn test_select_clamps() {
        let mut carousel = Carousel::new(4);
        assert_eq!(carousel.select(2), 2);
        assert_eq!(carousel.select(10), 3);
    }

    #[test]
    fn test_similar_listings_keep_order_and_limit() {
        let current = listing("1", ListingType::Sale, Category::Villa, 1.0, 3);
        let all = vec![
            listing("2", ListingType::Sale, Category::Villa, 1.0, 3),
            current.clone(),
            listing("3", ListingType::Rent, Category::Villa, 1.0, 3),
            listing("4", ListingType::Sale, Category::House, 1.0, 3),
            listing("5", ListingType::Sale, Category::Villa, 1.0, 3),
            listing("6", ListingType::Sale, Category::Villa, 1.0, 3),
            listing("7", ListingType::Sale, Category::Villa, 1.0, 3),
        ];

        let ids: Vec<String> = similar_listings(&all, &current)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["2", "5", "6"]);
    }

    #[test]
    fn test_view_resets_gallery_for_new_listing() {
        let first = normalize_detail(&json!({ "id": "1", "images": ["a", "b", "c"] }));
        let mut view = PropertyDetailView::new(first.clone());
        view.carousel.next();
        view.carousel.next();
        assert_eq!(view.current_image(), "c");

        view.replace_listing(first);
        assert_eq!(view.carousel.index(), 2);

        let second = normalize_detail(&json!({ "id": "2", "images": ["x", "y"] }));
        view.replace_listing(second);
        assert_eq!(view.carousel.index(), 0);
        assert_eq!(view.current_image(), "x");
    }

    #[test]
    fn test_view_mortgage_defaults_to_listing_price() {
        let detail = normalize_detail(&json!({ "id": "1", "price": 300000 }));
        let view = PropertyDetailView::new(detail);
        let payment = view.monthly_payment().unwrap();
        assert!((payment - 1896.20).abs() < 0.01);
    }

    fn filled_form() -> EnquiryForm {
        EnquiryForm {
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            phone: "999".to_string(),
            message: "Can I visit on Sunday?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_enquiry_success_clears_form() {
        let api = MockListings::demo();
        let mut form = filled_form();

        form.submit(&api, "demo-1").await.unwrap();

        assert_eq!(form, EnquiryForm::default());
        let sent = api.enquiries();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].listing_id, "demo-1");
        assert_eq!(sent[0].message, "Can I visit on Sunday?");
    }

    #[tokio::test]
    async fn test_enquiry_failure_keeps_form() {
        let api = MockListings::failing(502);
        let mut form = filled_form();

        let err = form.submit(&api, "demo-1").await.unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert_eq!(form, filled_form());
    }

    #[test]
    fn test_enquiry_form_maps_listing_id() {
        let form = EnquiryForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "555".to_string(),
            message: "Is parking included?".to_string(),
        };
        let body = serde_json::to_value(form.to_enquiry("42")).unwrap();
        assert_eq!(
            body,
            json!({
                "listing_id": "42",
                "name": "Asha",
                "email": "asha@example.com",
                "phone": "555",
                "message": "Is parking included?"
            })
        );
    }
}
