//! Shop page filter engine.
//!
//! Owns the shopper's category/brand/price selections and derives the product
//! list to display from them. Category matching is delegated to a
//! [`CatalogBackend`]; brand and price matching happen locally over the latest
//! snapshot. The engine itself is synchronous: retrievals are modelled as
//! explicit [`RetrievalRequest`]/[`RetrievalResponse`] pairs so the caller
//! decides how to run them, and [`ShopSession`] is the ready-made async driver.

pub mod backend;
pub mod engine;
pub mod price;
pub mod retrieval;
pub mod selection;
pub mod session;
pub mod view;

pub use backend::{BackendError, CatalogBackend, ProductFilter, ProductQuery};
pub use engine::{FilterAction, FilterPolicy, ShopEngine};
pub use price::{js_parse_int, price_matches};
pub use retrieval::{ApplyOutcome, RetrievalFailure, RetrievalRequest, RetrievalResponse};
pub use selection::{FilterMode, SelectionState};
pub use session::ShopSession;
pub use view::ShopView;
