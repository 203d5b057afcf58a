use serde::{Deserialize, Serialize};

/// Which side of the market a listings request asks for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarketSide {
    Buy,
    Rent,
}

impl MarketSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSide::Buy => "buy",
            MarketSide::Rent => "rent",
        }
    }
}

/// Query parameters for `GET /listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingsQuery {
    /// 1-based page; zero means "not set"
    pub page: u32,
    /// Page size; zero means "not set"
    pub per_page: u32,
    /// Free-text search
    pub q: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub side: Option<MarketSide>,
}

impl ListingsQuery {
    /// First page of `per_page` listings
    pub fn first_page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            ..Self::default()
        }
    }

    pub fn side(mut self, side: MarketSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Query-string pairs for the fields that are set, in a fixed order
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.page > 0 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.per_page > 0 {
            pairs.push(("per_page", self.per_page.to_string()));
        }
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("city", city.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(side) = self.side {
            pairs.push(("type", side.as_str().to_string()));
        }
        pairs
    }
}
