//! Public types for the Chineur API.

mod deal;
mod query;
pub mod upstream;

pub use deal::{Deal, DealsPage};
pub use query::{Category, DEFAULT_KEYWORD, MAX_PAGES, Query};
pub use upstream::{SearchItem, SearchRequest, SearchResponse};
