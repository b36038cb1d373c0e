//! Catalog module: the static API reference as an ordered set of endpoint
//! records, plus method/path lookup.

pub mod loader;
pub mod types;

pub use loader::{load_catalog, parse_catalog};
pub use types::{Catalog, EndpointRecord};
