use crate::domain::error::NearbyError;
use crate::domain::model::{Coordinate, Event, EventFilters, Genre, Identity, User};
use async_trait::async_trait;
use tokio::sync::watch;

/// Forward geocoding: free-text place name to candidate coordinates.
///
/// Implementations return at most the single best match. Transport failures
/// and non-success responses map to `NearbyError::RequestFailed`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Vec<Coordinate>, NearbyError>;
}

/// Durable string key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, NearbyError>;

    /// Insert or overwrite a value
    async fn set(&self, key: &str, value: String) -> Result<(), NearbyError>;

    async fn remove(&self, key: &str) -> Result<(), NearbyError>;
}

/// The event-listing backend API.
#[async_trait]
pub trait EventsBackend: Send + Sync {
    async fn list_events(&self, filters: &EventFilters) -> Result<Vec<Event>, NearbyError>;

    async fn list_genres(&self) -> Result<Vec<Genre>, NearbyError>;

    /// Profile for an authenticated identity, if the backend knows it.
    async fn current_user(&self, identity: &Identity) -> Result<Option<User>, NearbyError>;

    /// Ids of the events the identity has favorited.
    async fn list_favorites(&self, identity: &Identity) -> Result<Vec<i64>, NearbyError>;

    async fn add_favorite(&self, identity: &Identity, event_id: i64) -> Result<(), NearbyError>;

    async fn remove_favorite(&self, identity: &Identity, event_id: i64)
        -> Result<(), NearbyError>;
}

/// Source of login/logout notifications.
pub trait AuthProvider: Send + Sync {
    fn current(&self) -> Option<Identity>;

    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
