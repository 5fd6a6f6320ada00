//! Cached view of the listing service shared by the UI layer.
//!
//! The store is an ordinary value handed to whoever needs it. It keeps an
//! id-keyed cache of listings, the listing currently being viewed and a
//! loading flag. Every action returns a [`ListingResult`]; failures are also
//! logged so the UI can stay quiet about them if it wants to.
//!
//! Overlapping actions are not serialised: the cache follows whichever
//! service call resolves last.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info};

use crate::errors::{ListingError, ListingResult};
use crate::models::{CreatePropertyInput, Property, PropertyId, UpdatePropertyInput};
use crate::services::PropertyService;

#[derive(Debug, Default)]
struct StoreState {
    properties: BTreeMap<PropertyId, Property>,
    current_property: Option<Property>,
    in_flight: usize,
    loaded: bool,
}

pub struct PropertyStore<S: PropertyService> {
    service: Arc<S>,
    state: Mutex<StoreState>,
}

/// Keeps `loading` raised until the action that created it finishes, however it finishes.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
}

impl<'a> LoadingGuard<'a> {
    fn raise(state: &'a Mutex<StoreState>) -> Self {
        lock(state).in_flight += 1;
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = lock(self.state);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

fn lock(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn logged<T>(action: &str, result: ListingResult<T>) -> ListingResult<T> {
    if let Err(err) = &result {
        error!("Failed to {}: {}", action, err);
    }
    result
}

impl<S: PropertyService> PropertyStore<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        lock(&self.state)
    }

    /// Load every listing once; later calls reuse the cache until [`refresh`](Self::refresh).
    pub async fn fetch_all_properties(&self) -> ListingResult<()> {
        if self.state().loaded {
            debug!("Listings already cached, skipping fetch");
            return Ok(());
        }
        self.reload("fetch properties").await
    }

    /// Replace the cache with the service's current listings.
    pub async fn refresh(&self) -> ListingResult<()> {
        self.reload("refresh properties").await
    }

    async fn reload(&self, action: &str) -> ListingResult<()> {
        let _loading = LoadingGuard::raise(&self.state);
        let listings = logged(action, self.service.get_all().await)?;

        let mut state = self.state();
        state.properties = listings.into_iter().map(|p| (p.id, p)).collect();
        state.loaded = true;
        info!("Cached {} listings from {}", state.properties.len(), self.service.source_name());
        Ok(())
    }

    /// Fetch one listing into `current_property`. On failure the previous value stays.
    pub async fn fetch_current_property(&self, id: PropertyId) -> ListingResult<Property> {
        let _loading = LoadingGuard::raise(&self.state);
        let result = match self.service.get_by_id(id).await {
            Ok(Some(property)) => Ok(property),
            Ok(None) => Err(ListingError::NotFound(id)),
            Err(err) => Err(err),
        };
        let property = logged("fetch property", result)?;

        self.state().current_property = Some(property.clone());
        Ok(property)
    }

    /// Search the service directly; results are handed back, not cached.
    pub async fn search_properties(&self, query: &str) -> ListingResult<Vec<Property>> {
        let _loading = LoadingGuard::raise(&self.state);
        logged("search properties", self.service.search(query).await)
    }

    pub async fn add_new_property(&self, input: CreatePropertyInput) -> ListingResult<Property> {
        let _loading = LoadingGuard::raise(&self.state);
        let property = logged("add property", self.service.create(input).await)?;

        self.state().properties.insert(property.id, property.clone());
        Ok(property)
    }

    pub async fn update_current_property(
        &self,
        id: PropertyId,
        changes: UpdatePropertyInput,
    ) -> ListingResult<Property> {
        let _loading = LoadingGuard::raise(&self.state);
        let property = logged("update property", self.service.update(id, changes).await)?;

        self.remember(&property);
        Ok(property)
    }

    /// Soft-delete through the service and mirror the flag locally.
    pub async fn remove_property(&self, id: PropertyId) -> ListingResult<()> {
        let _loading = LoadingGuard::raise(&self.state);
        logged("delete property", self.service.soft_delete(id).await)?;

        match logged("delete property", self.service.get_by_id(id).await)? {
            Some(property) => self.remember(&property),
            None => debug!(
                "Listing {} unknown to {}, nothing to mirror",
                id,
                self.service.source_name()
            ),
        }
        Ok(())
    }

    pub fn clear_current_property(&self) {
        self.state().current_property = None;
    }

    // Upsert into the cache and keep the detail view in step with it.
    fn remember(&self, property: &Property) {
        let mut state = self.state();
        state.properties.insert(property.id, property.clone());
        if state
            .current_property
            .as_ref()
            .is_some_and(|current| current.id == property.id)
        {
            state.current_property = Some(property.clone());
        }
    }

    /// Cached listings in id order, deleted ones included
    pub fn properties(&self) -> Vec<Property> {
        self.state().properties.values().cloned().collect()
    }

    pub fn current_property(&self) -> Option<Property> {
        self.state().current_property.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().in_flight > 0
    }

    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }
}
