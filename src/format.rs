use crate::models::ListingType;

const CURRENCY: &str = "₹";

/// Price label in Indian rupees with lakh/crore digit grouping; rentals get
/// a `/mo` suffix
pub fn format_price(price: f64, listing_type: ListingType) -> String {
    let rounded = price.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    let label = format!("{}{}{}", sign, CURRENCY, group_indian(&digits));

    match listing_type {
        ListingType::Rent => format!("{}/mo", label),
        ListingType::Sale => label,
    }
}

/// Thousands grouping for areas, e.g. `12,500`
pub fn format_area(area: f64) -> String {
    let digits = format!("{:.0}", area.round().abs());
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    if area.round() < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Last three digits, then groups of two: 1,23,45,678
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = head
        .as_bytes()
        .rchunks(2)
        .rev()
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_price_uses_lakh_grouping() {
        assert_eq!(format_price(8_500_000.0, ListingType::Sale), "₹85,00,000");
        assert_eq!(format_price(12_345_678.4, ListingType::Sale), "₹1,23,45,678");
        assert_eq!(format_price(999.0, ListingType::Sale), "₹999");
        assert_eq!(format_price(0.0, ListingType::Sale), "₹0");
    }

    #[test]
    fn test_rent_price_suffix() {
        assert_eq!(format_price(25_000.0, ListingType::Rent), "₹25,000/mo");
        assert_eq!(format_price(3_499.6, ListingType::Rent), "₹3,500/mo");
    }

    #[test]
    fn test_area_grouping() {
        assert_eq!(format_area(2400.0), "2,400");
        assert_eq!(format_area(950.0), "950");
        assert_eq!(format_area(1_234_567.0), "1,234,567");
    }
}
