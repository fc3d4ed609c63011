#![allow(dead_code)]

use async_trait::async_trait;
use nearby::application::location::LocationService;
use nearby::application::view::{GenreChip, Page, View};
use nearby::domain::error::NearbyError;
use nearby::domain::model::{Coordinate, Event, EventFilters, Genre, Identity, User};
use nearby::domain::traits::{EventsBackend, Geocoder, KeyValueStore};
use nearby::infrastructure::storage::MemoryStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Geocoder answering from a fixed table and counting lookups.
#[derive(Default)]
pub struct FakeGeocoder {
    pub places: HashMap<String, Coordinate>,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with(places: &[(&str, Coordinate)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, c)| (name.to_lowercase(), *c))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn lookup(&self, query: &str) -> Result<Vec<Coordinate>, NearbyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if query.to_lowercase().contains("offline") {
            return Err(NearbyError::RequestFailed("connection refused".to_string()));
        }
        Ok(self
            .places
            .get(&query.to_lowercase())
            .copied()
            .into_iter()
            .collect())
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, NearbyError> {
        Err(NearbyError::Storage("disk unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), NearbyError> {
        Err(NearbyError::Storage("disk full".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), NearbyError> {
        Err(NearbyError::Storage("disk unavailable".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Page(Page),
    Genres(Vec<GenreChip>, String),
    Status(String),
    Session(Option<User>),
    Alert(String),
}

/// View that records every call in order.
#[derive(Clone, Default)]
pub struct RecordingView {
    pub frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingView {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<Page> {
        self.frames()
            .into_iter()
            .filter_map(|f| match f {
                Frame::Page(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn last_page(&self) -> Option<Page> {
        self.pages().pop()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.frames()
            .into_iter()
            .filter_map(|f| match f {
                Frame::Alert(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.frames().into_iter().rev().find_map(|f| match f {
            Frame::Status(s) => Some(s),
            _ => None,
        })
    }

    pub fn last_heading(&self) -> Option<String> {
        self.frames().into_iter().rev().find_map(|f| match f {
            Frame::Genres(_, heading) => Some(heading),
            _ => None,
        })
    }

    fn push(&self, frame: Frame) {
        self.frames.lock().unwrap().push(frame);
    }
}

impl View for RecordingView {
    fn render(&mut self, page: Page) {
        self.push(Frame::Page(page));
    }

    fn genres(&mut self, chips: Vec<GenreChip>, heading: String) {
        self.push(Frame::Genres(chips, heading));
    }

    fn location_status(&mut self, text: String) {
        self.push(Frame::Status(text));
    }

    fn session(&mut self, user: Option<User>) {
        self.push(Frame::Session(user));
    }

    fn alert(&mut self, message: String) {
        self.push(Frame::Alert(message));
    }
}

/// In-memory backend. `reject_favorites` makes every favorite mutation fail
/// with an application-level error, `offline_favorites` with a transport one.
#[derive(Default)]
pub struct FakeBackend {
    pub events: Vec<Event>,
    pub genres: Vec<Genre>,
    pub users: HashMap<String, User>,
    pub favorites: Mutex<Vec<i64>>,
    pub fail_events: Option<String>,
    pub reject_favorites: bool,
    pub offline_favorites: bool,
    /// Identities whose profile and favorites requests fail.
    pub unreachable_uids: Vec<String>,
    pub requested_filters: Mutex<Vec<EventFilters>>,
    /// Frames seen by the view when a favorite request arrived.
    pub view: Option<RecordingView>,
    pub frames_at_favorite_call: Mutex<Vec<Vec<Frame>>>,
}

impl FakeBackend {
    fn observe(&self) {
        if let Some(view) = &self.view {
            self.frames_at_favorite_call
                .lock()
                .unwrap()
                .push(view.frames());
        }
    }

    fn check_reachable(&self, identity: &Identity) -> Result<(), NearbyError> {
        if self.unreachable_uids.contains(&identity.uid) {
            return Err(NearbyError::RequestFailed("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_favorite_failure(&self) -> Result<(), NearbyError> {
        if self.offline_favorites {
            return Err(NearbyError::RequestFailed("connection reset".to_string()));
        }
        if self.reject_favorites {
            return Err(NearbyError::Api(
                "Failed to update favorite: Event not found".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl EventsBackend for FakeBackend {
    async fn list_events(&self, filters: &EventFilters) -> Result<Vec<Event>, NearbyError> {
        self.requested_filters.lock().unwrap().push(filters.clone());
        if let Some(message) = &self.fail_events {
            return Err(NearbyError::Api(message.clone()));
        }
        Ok(self.events.clone())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, NearbyError> {
        Ok(self.genres.clone())
    }

    async fn current_user(&self, identity: &Identity) -> Result<Option<User>, NearbyError> {
        self.check_reachable(identity)?;
        Ok(self.users.get(&identity.uid).cloned())
    }

    async fn list_favorites(&self, identity: &Identity) -> Result<Vec<i64>, NearbyError> {
        self.check_reachable(identity)?;
        Ok(self.favorites.lock().unwrap().clone())
    }

    async fn add_favorite(&self, _identity: &Identity, event_id: i64) -> Result<(), NearbyError> {
        self.observe();
        self.check_favorite_failure()?;
        self.favorites.lock().unwrap().push(event_id);
        Ok(())
    }

    async fn remove_favorite(
        &self,
        _identity: &Identity,
        event_id: i64,
    ) -> Result<(), NearbyError> {
        self.observe();
        self.check_favorite_failure()?;
        self.favorites.lock().unwrap().retain(|id| *id != event_id);
        Ok(())
    }
}

pub fn event(id: i64, name: &str, location: &str) -> Event {
    let mut event = Event::new(id);
    event.name = Some(name.to_string());
    event.location = Some(location.to_string());
    event
}

pub fn event_at(id: i64, name: &str, coords: Coordinate) -> Event {
    let mut event = Event::new(id);
    event.name = Some(name.to_string());
    event.lat = Some(coords.lat);
    event.lng = Some(coords.lng);
    event
}

pub fn user(name: &str) -> User {
    User {
        id: Some(1),
        name: Some(name.to_string()),
        email: None,
        role: Some("user".to_string()),
    }
}

pub async fn location_service(geocoder: Arc<FakeGeocoder>) -> (Arc<LocationService>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = LocationService::load(geocoder, store.clone()).await;
    (Arc::new(service), store)
}

pub const PARIS: Coordinate = Coordinate {
    lat: 48.8566,
    lng: 2.3522,
};
pub const LONDON: Coordinate = Coordinate {
    lat: 51.5074,
    lng: -0.1278,
};
pub const BERLIN: Coordinate = Coordinate {
    lat: 52.52,
    lng: 13.405,
};
