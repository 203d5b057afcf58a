pub mod client;
pub mod coerce;
pub mod mock;
pub mod normalize;
pub mod traits;
pub mod types;

pub use client::ListingsClient;
pub use mock::MockListings;
pub use normalize::{normalize, normalize_detail, DEFAULT_IMAGE};
pub use traits::ListingsApi;
pub use types::{ListingsQuery, MarketSide};
