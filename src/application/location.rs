use crate::domain::error::NearbyError;
use crate::domain::geo::normalize_key;
use crate::domain::model::{Coordinate, UserLocation};
use crate::domain::traits::{Geocoder, KeyValueStore};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub const GEO_CACHE_KEY: &str = "geo_cache_v1";
pub const USER_LOCATION_KEY: &str = "user_location_v1";

/// Geocoding with a persistent place-name cache, plus the saved user location.
///
/// The in-memory cache is loaded once and stays authoritative for the process;
/// every mutation rewrites the whole map to the store. Entries never expire.
pub struct LocationService {
    geocoder: Arc<dyn Geocoder>,
    store: Arc<dyn KeyValueStore>,
    cache: DashMap<String, Coordinate>,
}

impl LocationService {
    pub async fn load(geocoder: Arc<dyn Geocoder>, store: Arc<dyn KeyValueStore>) -> Self {
        let cache = DashMap::new();
        for (key, coords) in read_cache(store.as_ref()).await {
            cache.insert(key, coords);
        }
        debug!("Loaded {} cached places", cache.len());

        Self {
            geocoder,
            store,
            cache,
        }
    }

    pub fn cached_places(&self) -> usize {
        self.cache.len()
    }

    pub fn get_cached_coords(&self, query: &str) -> Option<Coordinate> {
        self.cache
            .get(&normalize_key(query))
            .map(|entry| *entry.value())
    }

    pub async fn remember_coords(&self, query: &str, coords: Coordinate) {
        if !(coords.lat.is_finite() && coords.lng.is_finite()) {
            warn!("Not caching non-finite coordinates for {}", query);
            return;
        }
        self.cache.insert(normalize_key(query), coords);
        self.persist_cache().await;
    }

    /// Resolve a place name, from the cache when possible.
    pub async fn geocode_place(&self, query: &str) -> Result<Coordinate, NearbyError> {
        let key = normalize_key(query);
        if key.is_empty() {
            return Err(NearbyError::InvalidInput(
                "Please enter a location".to_string(),
            ));
        }

        if let Some(cached) = self.get_cached_coords(&key) {
            debug!("Geocode cache hit: {}", key);
            return Ok(cached);
        }

        debug!("Geocode cache miss: {}", key);
        let matches = self.geocoder.lookup(query.trim()).await?;
        let coords = matches
            .into_iter()
            .next()
            .ok_or_else(|| NearbyError::NoResults(query.trim().to_string()))?;

        self.remember_coords(&key, coords).await;
        Ok(coords)
    }

    pub async fn load_user_location(&self) -> Option<UserLocation> {
        let raw = match self.store.get(USER_LOCATION_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Unable to read saved user location: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(location) => Some(location),
            Err(e) => {
                warn!("Unable to read saved user location: {}", e);
                None
            }
        }
    }

    pub async fn save_user_location(&self, location: &UserLocation) {
        let raw = match serde_json::to_string(location) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Unable to save user location: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(USER_LOCATION_KEY, raw).await {
            warn!("Unable to save user location: {}", e);
        }
    }

    pub async fn clear_user_location(&self) {
        if let Err(e) = self.store.remove(USER_LOCATION_KEY).await {
            warn!("Unable to clear user location: {}", e);
        }
    }

    async fn persist_cache(&self) {
        let snapshot: BTreeMap<String, Coordinate> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        let raw = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Unable to save geocode cache: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(GEO_CACHE_KEY, raw).await {
            warn!("Unable to save geocode cache: {}", e);
        }
    }
}

async fn read_cache(store: &dyn KeyValueStore) -> BTreeMap<String, Coordinate> {
    let raw = match store.get(GEO_CACHE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeMap::new(),
        Err(e) => {
            warn!("Unable to read geocode cache: {}", e);
            return BTreeMap::new();
        }
    };

    let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Unable to read geocode cache: {}", e);
            return BTreeMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<Coordinate>(value) {
            Ok(coords) if coords.lat.is_finite() && coords.lng.is_finite() => Some((key, coords)),
            _ => {
                warn!("Dropping unreadable cached place: {}", key);
                None
            }
        })
        .collect()
}
