//! Client-side filtering over already-fetched listings.

use crate::models::{Category, ListingType, Property};
use serde::{Deserialize, Serialize};

/// Upper price bound of the search form on sale pages
pub const DEFAULT_SALE_MAX_PRICE: f64 = 10_000_000.0;
/// Upper price bound of the search form on rent pages (monthly)
pub const DEFAULT_RENT_MAX_PRICE: f64 = 10_000.0;

/// How many listings the home page shows when none are featured
pub const HOME_FALLBACK_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Sale,
    Rent,
}

impl TypeFilter {
    fn matches(&self, listing_type: ListingType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Sale => listing_type == ListingType::Sale,
            TypeFilter::Rent => listing_type == ListingType::Rent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `"all"` or one of the category names; anything else is `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_lowercase();
        if raw == "all" {
            return Some(CategoryFilter::All);
        }
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == raw)
            .map(CategoryFilter::Only)
    }

    fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

/// Constraints picked in the search form
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub listing_type: TypeFilter,
    pub category: CategoryFilter,
    pub min_price: f64,
    pub max_price: f64,
    /// Minimum bedrooms; zero disables the check
    pub bedrooms: u32,
}

impl FilterCriteria {
    /// Form defaults for the sale side
    pub fn for_sale() -> Self {
        Self::with_max_price(DEFAULT_SALE_MAX_PRICE)
    }

    /// Form defaults for the rent side
    pub fn for_rent() -> Self {
        Self::with_max_price(DEFAULT_RENT_MAX_PRICE)
    }

    /// Criteria that keep every listing
    pub fn any() -> Self {
        Self::with_max_price(f64::INFINITY)
    }

    pub fn defaults_for(listing_type: ListingType) -> Self {
        match listing_type {
            ListingType::Sale => Self::for_sale(),
            ListingType::Rent => Self::for_rent(),
        }
    }

    fn with_max_price(max_price: f64) -> Self {
        Self {
            listing_type: TypeFilter::All,
            category: CategoryFilter::All,
            min_price: 0.0,
            max_price,
            bedrooms: 0,
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.listing_type.matches(property.listing_type)
            && self.category.matches(property.category)
            && (self.bedrooms == 0 || property.bedrooms >= self.bedrooms)
            && property.price >= self.min_price
            && property.price <= self.max_price
    }
}

/// Lowercased, trimmed free-text query; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery(String);

impl TextQuery {
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, property: &Property) -> bool {
        let haystack = format!(
            "{} {} {} {}",
            property.title, property.location, property.category, property.listing_type
        )
        .to_lowercase();
        haystack.contains(&self.0)
    }
}

/// Listings that satisfy `criteria` and, when given, `text`
pub fn apply(
    listings: &[Property],
    criteria: &FilterCriteria,
    text: Option<&TextQuery>,
) -> Vec<Property> {
    listings
        .iter()
        .filter(|property| criteria.matches(property))
        .filter(|property| text.map_or(true, |query| query.matches(property)))
        .cloned()
        .collect()
}

/// Listings that satisfy `text` alone
pub fn search(listings: &[Property], text: Option<&TextQuery>) -> Vec<Property> {
    match text {
        Some(query) => listings
            .iter()
            .filter(|property| query.matches(property))
            .cloned()
            .collect(),
        None => listings.to_vec(),
    }
}

/// Listings of one type only
pub fn of_type(listings: Vec<Property>, listing_type: ListingType) -> Vec<Property> {
    listings
        .into_iter()
        .filter(|property| property.listing_type == listing_type)
        .collect()
}

/// Featured listings, or the first few when nothing is featured
pub fn featured_or_first(listings: &[Property]) -> Vec<Property> {
    let featured: Vec<Property> = listings.iter().filter(|p| p.featured).cloned().collect();
    if featured.is_empty() {
        listings.iter().take(HOME_FALLBACK_COUNT).cloned().collect()
    } else {
        featured
    }
}
