use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::listings::normalize::{normalize, normalize_detail, normalize_site_properties};
use crate::listings::traits::ListingsApi;
use crate::listings::types::ListingsQuery;
use crate::models::{Enquiry, ListingDetail, Property, SiteProperties};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the listings API
pub struct ListingsClient {
    client: Client,
    base: Url,
}

impl ListingsClient {
    /// Create a client for `base_url` with default transport settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    /// Create a client from the `[api]` config section
    pub fn with_config(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidBaseUrl(config.base_url.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| ApiError::Transport {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` with `segments` appended as percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url, operation: &'static str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        read_json(response, operation).await
    }
}

/// Fail on non-2xx, otherwise decode the body as JSON
async fn read_json(response: Response, operation: &'static str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        warn!("Listings API returned status {} for {}", status, operation);
        return Err(ApiError::Http {
            operation,
            status: status.as_u16(),
        });
    }

    let url = response.url().to_string();
    let body = response
        .bytes()
        .await
        .map_err(|source| ApiError::Transport { url, source })?;

    debug!("Received {} bytes for {}", body.len(), operation);

    serde_json::from_slice(&body).map_err(|source| ApiError::Parse { operation, source })
}

#[async_trait]
impl ListingsApi for ListingsClient {
    async fn fetch_listings(&self, query: &ListingsQuery) -> Result<Vec<Property>> {
        let mut url = self.endpoint(&["listings"]);
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())));
        }

        let data = self.get_json(url, "fetch listings").await?;

        let listings: Vec<Property> = match data {
            Value::Array(items) => items.iter().map(normalize).collect(),
            other => {
                warn!(
                    "Expected a JSON array of listings, got {}; treating as empty",
                    json_kind(&other)
                );
                Vec::new()
            }
        };

        info!("Fetched {} listings", listings.len());
        Ok(listings)
    }

    async fn fetch_listing(&self, id: &str) -> Result<ListingDetail> {
        let url = self.endpoint(&["listings", id]);
        let data = self.get_json(url, "fetch listing").await?;
        Ok(normalize_detail(&data))
    }

    async fn create_enquiry(&self, enquiry: &Enquiry) -> Result<Value> {
        let url = self.endpoint(&["enquiries"]);
        debug!("POST {} for listing {}", url, enquiry.listing_id);

        let response = self
            .client
            .post(url.clone())
            .json(enquiry)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let ack = read_json(response, "submit enquiry").await?;
        info!("Enquiry submitted for listing {}", enquiry.listing_id);
        Ok(ack)
    }

    async fn fetch_site_properties(&self) -> Result<Option<SiteProperties>> {
        let url = self.endpoint(&["site-properties"]);
        let data = self.get_json(url, "fetch site properties").await?;
        Ok(normalize_site_properties(&data))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_segments() {
        let client = ListingsClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            client.endpoint(&["listings", "42"]).as_str(),
            "http://localhost:8000/api/listings/42"
        );

        let client = ListingsClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.endpoint(&["enquiries"]).as_str(),
            "http://localhost:8000/api/enquiries"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = ListingsClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.endpoint(&["listings", "a/b c"]).as_str(),
            "http://localhost:8000/listings/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            ListingsClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ListingsClient::new("mailto:agent@example.com"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
