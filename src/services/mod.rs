pub mod mock;
pub mod seed;
pub mod traits;

pub use mock::MockPropertyService;
pub use seed::{demo_listings, export_listings, load_listings};
pub use traits::PropertyService;
