use crate::error::{ApiError, Result};
use crate::listings::normalize::{normalize, normalize_detail, normalize_site_properties};
use crate::listings::traits::ListingsApi;
use crate::listings::types::ListingsQuery;
use crate::models::{Enquiry, ListingDetail, Property, SiteProperties};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use tracing::info;

/// In-memory listings backend serving raw records through the normalizer
pub struct MockListings {
    records: Vec<Value>,
    site: Value,
    failure: Option<u16>,
    enquiries: Mutex<Vec<Enquiry>>,
}

impl MockListings {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records,
            site: Value::Null,
            failure: None,
            enquiries: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `status`
    pub fn failing(status: u16) -> Self {
        Self {
            failure: Some(status),
            ..Self::with_records(Vec::new())
        }
    }

    pub fn with_site(mut self, site: Value) -> Self {
        self.site = site;
        self
    }

    /// Enquiries received so far
    pub fn enquiries(&self) -> Vec<Enquiry> {
        self.enquiries
            .lock()
            .map(|enquiries| enquiries.clone())
            .unwrap_or_default()
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        match self.failure {
            Some(status) => Err(ApiError::Http { operation, status }),
            None => Ok(()),
        }
    }

    /// Sample records in the shapes the live API has been seen to send
    pub fn demo() -> Self {
        info!("📋 Using built-in demo listings");

        Self::with_records(vec![
            json!({
                "id": "demo-1",
                "title": "Sunlit Family House",
                "price": 8_500_000,
                "address": "14 Palm Grove",
                "city": "Pune",
                "state": "MH",
                "bedrooms": 4,
                "bathrooms": 3,
                "sqft": 2400,
                "type": "sale",
                "category": "house",
                "featured": true,
                "images": ["https://images.example.com/demo-1a.jpg", "https://images.example.com/demo-1b.jpg"],
                "features": "[\"Garden\",\"Solar panels\"]",
                "amenities": "Clubhouse, Gym",
                "parking": 2,
                "updated_at": "2024-05-06T10:00:00Z"
            }),
            json!({
                "id": "demo-2",
                "name": "Harbour View Apartment",
                "price": "4200000",
                "location": "Marine Drive, Mumbai",
                "bedrooms": "2",
                "bathrooms": "2",
                "area": "1100",
                "listing_type": "Sale",
                "property_type": "Apartment",
                "image_url": "https://images.example.com/demo-2.jpg"
            }),
            json!({
                "id": "demo-3",
                "title": "Garden Condo",
                "price": 3500,
                "city": "Bengaluru",
                "bedrooms": 2,
                "bathrooms": 1,
                "sqft": 950,
                "type": "rent",
                "category": "condo",
                "images": "https://images.example.com/demo-3a.jpg, https://images.example.com/demo-3b.jpg",
                "status": "available"
            }),
            json!({
                "id": "demo-4",
                "title": "Hillside Villa",
                "price": 9500,
                "city": "Goa",
                "bedrooms": 5,
                "bathrooms": 4,
                "sqft": 4100,
                "type": "RENT",
                "category": "villa",
                "featured": 1,
                "summary": "Private pool and sea views"
            }),
            json!({
                "id": "demo-5",
                "title": "Compact City Condo",
                "price": 2800,
                "city": "Bengaluru",
                "bedrooms": 1,
                "bathrooms": 1,
                "sqft": 600,
                "type": "rent",
                "category": "condo"
            }),
        ])
        .with_site(json!({
            "id": "site",
            "address": "221 Residency Road, Bengaluru",
            "contact": "+91 80 0000 0000",
            "instagram": "https://instagram.com/example"
        }))
    }
}

#[async_trait]
impl ListingsApi for MockListings {
    async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Property>> {
        self.check("fetch listings")?;

        let listings = self.records.iter().map(normalize);
        let listings: Vec<Property> = if query.per_page > 0 {
            let page = query.page.max(1) as usize;
            let per_page = query.per_page as usize;
            listings.skip((page - 1) * per_page).take(per_page).collect()
        } else {
            listings.collect()
        };
        Ok(listings)
    }

    async fn fetch_listing(&self, id: &str) -> Result<ListingDetail> {
        self.check("fetch listing")?;

        self.records
            .iter()
            .find(|record| normalize(record).id == id)
            .map(normalize_detail)
            .ok_or(ApiError::Http {
                operation: "fetch listing",
                status: 404,
            })
    }

    async fn create_enquiry(&self, enquiry: &Enquiry) -> Result<Value> {
        self.check("submit enquiry")?;

        if let Ok(mut enquiries) = self.enquiries.lock() {
            enquiries.push(enquiry.clone());
        }
        Ok(json!({ "status": "received", "listing_id": enquiry.listing_id }))
    }

    async fn fetch_site_properties(&self) -> Result<Option<SiteProperties>> {
        self.check("fetch site properties")?;
        Ok(normalize_site_properties(&self.site))
    }
}
