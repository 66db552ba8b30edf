//! Contact-penetration detection between a master and a slave boundary.

pub use self::locator::{ConstructionError, PenetrationLocator};
pub use self::nearest_nodes::{LinearScanLocator, NearestNodeLocator};
pub use self::record::PenetrationRecord;
pub use self::store::PenetrationStore;

mod locator;
mod nearest_nodes;
mod record;
mod store;
