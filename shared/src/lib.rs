pub mod catalog;
pub mod endpoints;
pub mod format;
pub mod popularity;
pub mod snapshot;
pub mod view;
pub mod viewer;
pub mod zone;

pub use catalog::{CatalogState, SortKey, matches_query};
pub use endpoints::Endpoints;
pub use popularity::PopularityMap;
pub use snapshot::{ImportError, ImportReport, StorageSnapshot};
pub use view::{CatalogView, ZoneCard};
pub use viewer::{ViewerSession, ViewerState};
pub use zone::{ZoneId, ZoneRecord};
