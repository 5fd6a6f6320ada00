pub mod config;
pub mod errors;
pub mod format;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod store;
pub mod validation;

pub use config::Settings;
pub use errors::{ListingError, ListingResult};
pub use format::{format_price, status_color};
pub use models::{CreatePropertyInput, Property, PropertyId, PropertyStatus, UpdatePropertyInput};
pub use pipeline::{ListingPage, ListingView, SortOrder, StatusFilter, PAGE_SIZE};
pub use services::{MockPropertyService, PropertyService};
pub use store::PropertyStore;
pub use validation::{validate_draft, validate_update, ValidationErrors};
