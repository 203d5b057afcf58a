//! Listings core for a real-estate marketing site: normalization of loosely
//! typed API records, the listings HTTP client, client-side filtering, and
//! the property detail view model.

pub mod config;
pub mod detail;
pub mod error;
pub mod format;
pub mod listings;
pub mod models;
pub mod pages;
pub mod search;

pub use error::{ApiError, Result};
pub use listings::{ListingsApi, ListingsClient, ListingsQuery, MockListings};
pub use models::{Category, Enquiry, ListingDetail, ListingType, Property, SiteProperties};
