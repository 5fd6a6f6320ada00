use crate::config::Settings;
use crate::errors::{ListingError, ListingResult};
use crate::models::{CreatePropertyInput, Property, PropertyId, UpdatePropertyInput};
use crate::services::seed;
use crate::services::traits::PropertyService;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// In-memory stand-in for a listings backend
pub struct MockPropertyService {
    listings: RwLock<BTreeMap<PropertyId, Property>>,
    latency: Duration,
}

impl MockPropertyService {
    /// Service seeded with the built-in demo listings and no added latency
    pub fn new() -> Self {
        Self::with_listings(seed::demo_listings(), Duration::ZERO)
    }

    /// Service over the given records; later duplicates of an id replace earlier ones
    pub fn with_listings(listings: Vec<Property>, latency: Duration) -> Self {
        let listings: BTreeMap<_, _> = listings.into_iter().map(|p| (p.id, p)).collect();
        debug!("Mock service holds {} listings", listings.len());
        Self {
            listings: RwLock::new(listings),
            latency,
        }
    }

    /// Seed from the configured JSON file, or the demo listings when none is set
    pub async fn from_settings(settings: &Settings) -> ListingResult<Self> {
        let listings = match &settings.seed_path {
            Some(path) => {
                info!("Seeding mock service from {}", path.display());
                seed::load_listings(path).await?
            }
            None => seed::demo_listings(),
        };
        Ok(Self::with_listings(listings, settings.latency))
    }

    // Every call suspends at least once so callers never observe synchronous completion.
    async fn simulate_latency(&self) {
        if self.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockPropertyService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyService for MockPropertyService {
    async fn get_all(&self) -> ListingResult<Vec<Property>> {
        self.simulate_latency().await;
        let listings = self.listings.read().await;
        Ok(listings.values().cloned().collect())
    }

    async fn get_by_id(&self, id: PropertyId) -> ListingResult<Option<Property>> {
        self.simulate_latency().await;
        Ok(self.listings.read().await.get(&id).cloned())
    }

    async fn create(&self, input: CreatePropertyInput) -> ListingResult<Property> {
        self.simulate_latency().await;
        let mut listings = self.listings.write().await;

        // Naive count-based id; safe only while nothing is ever physically removed.
        let id = listings.len() as PropertyId + 1;
        if listings.contains_key(&id) {
            warn!("Refusing to overwrite listing {} on create", id);
            return Err(ListingError::IdConflict(id));
        }

        let property = Property::from_input(id, input, Utc::now());
        listings.insert(id, property.clone());
        info!("Created listing {} ({})", id, property.name);
        Ok(property)
    }

    async fn update(
        &self,
        id: PropertyId,
        changes: UpdatePropertyInput,
    ) -> ListingResult<Property> {
        self.simulate_latency().await;
        let mut listings = self.listings.write().await;

        let property = listings.get_mut(&id).ok_or(ListingError::NotFound(id))?;
        property.apply(changes, Utc::now());
        debug!("Updated listing {}", id);
        Ok(property.clone())
    }

    async fn soft_delete(&self, id: PropertyId) -> ListingResult<()> {
        self.simulate_latency().await;
        let mut listings = self.listings.write().await;

        match listings.get_mut(&id) {
            Some(property) => {
                property.mark_deleted(Utc::now());
                info!("Soft-deleted listing {}", id);
            }
            None => debug!("Soft delete of unknown listing {} ignored", id),
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> ListingResult<Vec<Property>> {
        self.simulate_latency().await;
        let needle = query.to_lowercase();
        let listings = self.listings.read().await;

        let results: Vec<Property> = listings
            .values()
            .filter(|p| p.matches_query(&needle))
            .cloned()
            .collect();
        debug!("Search {:?} matched {} listings", query, results.len());
        Ok(results)
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}
