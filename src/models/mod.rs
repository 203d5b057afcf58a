use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Sale,
    Rent,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "sale",
            ListingType::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of building
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    House,
    Apartment,
    Condo,
    Villa,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::House,
        Category::Apartment,
        Category::Condo,
        Category::Villa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::House => "house",
            Category::Apartment => "apartment",
            Category::Condo => "condo",
            Category::Villa => "villa",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized summary of a listing, as shown in grids and cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    /// Asking price for sales, monthly rent for rentals
    pub price: f64,
    pub location: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Square feet
    pub area: f64,
    pub image: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub category: Category,
    pub featured: bool,
    pub description: String,
}

/// Normalized full view of a listing, as shown on its detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    #[serde(flatten)]
    pub summary: Property,
    pub address: String,
    pub city: String,
    pub state: String,
    pub map_url: String,
    pub parking: u32,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
    /// Never empty; holds at least `summary.image`
    pub images: Vec<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ListingDetail {
    /// Calendar date of the last update, if the API sent a parseable timestamp
    pub fn updated_on(&self) -> Option<NaiveDate> {
        parse_date(&self.updated_at)
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_date(&self.created_at)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Site-wide branding returned by `/site-properties`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteProperties {
    pub id: String,
    pub logo: Option<String>,
    pub address: Option<String>,
    pub about_us: Option<String>,
    pub contact: Option<String>,
    pub footer_image: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl SiteProperties {
    /// Social links that are set, in display order
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("linkedin", &self.linkedin),
            ("instagram", &self.instagram),
            ("facebook", &self.facebook),
            ("twitter", &self.twitter),
        ]
        .into_iter()
        .filter_map(|(name, link)| link.as_deref().map(|link| (name, link)))
        .collect()
    }
}

/// Enquiry body posted to `/enquiries`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enquiry {
    pub listing_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
