//! Product search module.
//!
//! Contains the filters and sort orders used by product listings.

mod filter;
mod query;

pub use filter::{PriceRange, ProductFilter, DEFAULT_MAX_PRICE};
pub use query::{SearchQuery, SortOption};
