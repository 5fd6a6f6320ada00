use crate::errors::ListingResult;
use crate::models::{CreatePropertyInput, Property, PropertyId, UpdatePropertyInput};
use async_trait::async_trait;

/// Data source behind the property store.
/// The mock implementation keeps everything in memory, but callers must only
/// rely on the async contract so a real backend can slot in later.
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Every record, deleted ones included, in id order
    async fn get_all(&self) -> ListingResult<Vec<Property>>;

    /// Copy of a single record; deleted records are still returned
    async fn get_by_id(&self, id: PropertyId) -> ListingResult<Option<Property>>;

    /// Store a new record and return it with its assigned id
    async fn create(&self, input: CreatePropertyInput) -> ListingResult<Property>;

    /// Merge `changes` into an existing record
    async fn update(&self, id: PropertyId, changes: UpdatePropertyInput) -> ListingResult<Property>;

    /// Flag a record as deleted; unknown ids are a no-op
    async fn soft_delete(&self, id: PropertyId) -> ListingResult<()>;

    /// Case-insensitive match over name, address and description
    async fn search(&self, query: &str) -> ListingResult<Vec<Property>>;

    /// Name of the backing source, for logs
    fn source_name(&self) -> &'static str;
}
