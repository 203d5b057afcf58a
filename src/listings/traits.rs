use crate::error::Result;
use crate::listings::types::ListingsQuery;
use crate::models::{Enquiry, ListingDetail, Property, SiteProperties};
use async_trait::async_trait;
use serde_json::Value;

/// Read/write access to the listings backend.
///
/// Page loaders only depend on this trait, so they can run against the HTTP
/// client or an in-memory stand-in.
#[async_trait]
pub trait ListingsApi: Send + Sync {
    /// Listings matching `query`, normalized
    async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Property>>;

    /// A single listing by id, normalized
    async fn fetch_listing(&self, id: &str) -> Result<ListingDetail>;

    /// Submit an enquiry; the acknowledgement is passed through untouched
    async fn create_enquiry(&self, enquiry: &Enquiry) -> Result<Value>;

    /// Site branding, if the backend has any
    async fn fetch_site_properties(&self) -> Result<Option<SiteProperties>>;
}
