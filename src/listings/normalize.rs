use crate::listings::coerce::{count, number, opt_string, string, string_list, truthy};
use crate::models::{Category, ListingDetail, ListingType, Property, SiteProperties};
use serde_json::Value;

/// Image used when a listing carries none
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1484154218962-a197022b5858?auto=format&fit=crop&w=1200&q=80";

pub const UNTITLED: &str = "Untitled Listing";
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// First of `keys` that is present and not null
fn first_present<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

fn listing_id(raw: &Value) -> String {
    match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn listing_type(value: Option<&Value>) -> ListingType {
    if string(value, "").to_lowercase() == "rent" {
        ListingType::Rent
    } else {
        ListingType::Sale
    }
}

fn category(value: Option<&Value>) -> Category {
    match string(value, "").to_lowercase().as_str() {
        "apartment" => Category::Apartment,
        "condo" => Category::Condo,
        "villa" => Category::Villa,
        _ => Category::House,
    }
}

fn location_label(raw: &Value) -> String {
    let parts: Vec<String> = ["address", "city", "state"]
        .iter()
        .map(|key| string(raw.get(*key), ""))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        string(raw.get("location"), LOCATION_UNAVAILABLE)
    } else {
        parts.join(", ")
    }
}

fn cover_image(raw: &Value) -> String {
    opt_string(raw.get("image"))
        .or_else(|| opt_string(raw.get("image_url")))
        .or_else(|| match raw.get("images") {
            Some(Value::Array(images)) => opt_string(images.first()),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string())
}

/// Convert a raw listing record into a [`Property`].
///
/// Total over any JSON value: fields that are missing or of the wrong shape
/// take their documented fallback.
pub fn normalize(raw: &Value) -> Property {
    Property {
        id: listing_id(raw),
        title: string(raw.get("title"), &string(raw.get("name"), UNTITLED)),
        price: number(raw.get("price"), 0.0),
        location: location_label(raw),
        bedrooms: count(raw.get("bedrooms")),
        bathrooms: count(raw.get("bathrooms")),
        area: number(first_present(raw, &["sqft", "area"]), 0.0),
        image: cover_image(raw),
        listing_type: listing_type(first_present(raw, &["type", "listing_type"])),
        category: category(first_present(raw, &["category", "property_type"])),
        featured: truthy(raw.get("featured")),
        description: string(raw.get("description"), &string(raw.get("summary"), "")),
    }
}

/// Convert a raw listing record into a [`ListingDetail`]
pub fn normalize_detail(raw: &Value) -> ListingDetail {
    let summary = normalize(raw);

    let mut images = string_list(raw.get("images"));
    if images.is_empty() {
        images.push(summary.image.clone());
    }

    ListingDetail {
        address: string(raw.get("address"), ""),
        city: string(raw.get("city"), ""),
        state: string(raw.get("state"), ""),
        map_url: string(raw.get("location"), ""),
        parking: count(raw.get("parking")),
        features: string_list(raw.get("features")),
        amenities: string_list(raw.get("amenities")),
        images,
        status: string(raw.get("status"), ""),
        created_at: string(raw.get("created_at"), ""),
        updated_at: string(raw.get("updated_at"), ""),
        summary,
    }
}

/// Branding record from `/site-properties`; `None` unless it is an object
pub fn normalize_site_properties(raw: &Value) -> Option<SiteProperties> {
    if !raw.is_object() {
        return None;
    }

    let field = |key: &str| opt_string(raw.get(key));
    Some(SiteProperties {
        id: listing_id(raw),
        logo: field("logo"),
        address: field("address"),
        about_us: field("about_us"),
        contact: field("contact"),
        footer_image: field("footer_image"),
        linkedin: field("linkedin"),
        instagram: field("instagram"),
        facebook: field("facebook"),
        twitter: field("twitter"),
        created_at: field("created_at"),
        updated_at: field("updated_at"),
    })
}
