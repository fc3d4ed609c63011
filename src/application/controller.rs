use crate::application::distance::annotate_distances;
use crate::application::favorites::{FavoriteState, Favorites};
use crate::application::location::LocationService;
use crate::application::search::filter_events;
use crate::application::view::{events_heading, genre_chips, EventCard, Page, View};
use crate::domain::error::NearbyError;
use crate::domain::model::{Coordinate, Event, EventFilters, Genre, Identity, User, UserLocation};
use crate::domain::traits::{AuthProvider, EventsBackend};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, warn};

/// Owns the event list page: loaded events, genres, filters, favorites and the
/// user location. Every handler takes `&mut self`, so handlers never overlap.
pub struct EventListController {
    backend: Arc<dyn EventsBackend>,
    location: Arc<LocationService>,
    auth: watch::Receiver<Option<Identity>>,
    view: Box<dyn View>,

    events: Vec<Event>,
    genres: Vec<Genre>,
    filters: EventFilters,
    favorites: Favorites,
    current_user: Option<User>,
    user_location: Option<UserLocation>,
}

impl EventListController {
    pub fn new(
        backend: Arc<dyn EventsBackend>,
        location: Arc<LocationService>,
        auth: &dyn AuthProvider,
        view: Box<dyn View>,
    ) -> Self {
        Self {
            backend,
            location,
            auth: auth.subscribe(),
            view,
            events: Vec::new(),
            genres: Vec::new(),
            filters: EventFilters::default(),
            favorites: Favorites::default(),
            current_user: None,
            user_location: None,
        }
    }

    pub fn with_filters(mut self, filters: EventFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn filters(&self) -> &EventFilters {
        &self.filters
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn user_location(&self) -> Option<&UserLocation> {
        self.user_location.as_ref()
    }

    /// Initial page load.
    pub async fn start(&mut self) {
        let identity = self.auth.borrow_and_update().clone();
        self.handle_auth_change(identity).await;

        self.load_genres().await;
        self.load_events().await;
        self.hydrate_saved_location().await;
    }

    /// Wait for the next login/logout and apply it. Returns `false` once the
    /// auth provider is gone.
    pub async fn next_auth_change(&mut self) -> bool {
        if self.auth.changed().await.is_err() {
            return false;
        }
        let identity = self.auth.borrow_and_update().clone();
        self.handle_auth_change(identity).await;
        true
    }

    pub async fn handle_auth_change(&mut self, identity: Option<Identity>) {
        match identity {
            Some(identity) => {
                self.current_user = None;
                self.favorites = Favorites::default();
                self.load_current_user(&identity).await;
                self.view.session(self.current_user.clone());
                self.load_favorites(&identity).await;
            }
            None => {
                self.current_user = None;
                self.favorites = Favorites::default();
                self.view.session(None);
            }
        }

        if !self.events.is_empty() {
            self.render_events();
        }
    }

    async fn load_current_user(&mut self, identity: &Identity) {
        match self.backend.current_user(identity).await {
            Ok(Some(user)) => self.current_user = Some(user),
            Ok(None) => debug!("No profile for uid {}", identity.uid),
            Err(e) => error!("Failed to load user: {}", e),
        }
    }

    async fn load_favorites(&mut self, identity: &Identity) {
        match self.backend.list_favorites(identity).await {
            Ok(ids) => self.favorites = Favorites::new(ids),
            Err(e) => error!("Failed to load favorites: {}", e),
        }
    }

    pub async fn load_genres(&mut self) {
        match self.backend.list_genres().await {
            Ok(genres) => {
                self.genres = genres;
                self.render_genres();
            }
            Err(e) => error!("Failed to load genres: {}", e),
        }
    }

    /// Fetch events for the current filters, annotate distances and render.
    /// Failures render an error panel; there is no retry.
    pub async fn load_events(&mut self) {
        self.view.render(Page::Loading);

        match self.backend.list_events(&self.filters).await {
            Ok(events) => {
                self.events = events;
                self.add_distances_to_events().await;
                self.render_events();
            }
            Err(e) => {
                error!("Failed to load events: {}", e);
                self.view.render(Page::Error(load_error_message(&e)));
            }
        }
    }

    pub async fn add_distances_to_events(&mut self) {
        let origin = self.user_location.as_ref().map(|l| l.coords);
        annotate_distances(&mut self.events, origin, &self.location).await;
    }

    /// Optimistic favorite toggle: flip and render first, then confirm with
    /// the backend and restore the previous state if it says no.
    pub async fn toggle_favorite(&mut self, event_id: i64) {
        if self.current_user.is_none() {
            self.view.alert("Please log in to add favorites".to_string());
            return;
        }
        let Some(identity) = self.auth.borrow().clone() else {
            self.view.alert("Please log in to add favorites".to_string());
            return;
        };

        let pending = self.favorites.toggle(event_id);
        self.render_events();

        let result = match pending.previous {
            FavoriteState::Favorited => {
                self.backend.remove_favorite(&identity, event_id).await
            }
            FavoriteState::NotFavorited => {
                self.backend.add_favorite(&identity, event_id).await
            }
        };

        if let Err(e) = result {
            warn!("toggle favorite {} failed: {}", event_id, e);
            self.favorites.rollback(&pending);
            self.render_events();
            self.view.alert(match e {
                NearbyError::Api(message) => message,
                _ => "Network error while updating favorite".to_string(),
            });
        }
    }

    /// Render the loaded events matching `query` without touching the list
    /// itself or the network.
    pub fn search(&mut self, query: &str) {
        let can_favorite = self.current_user.is_some();
        let cards: Vec<EventCard> = filter_events(&self.events, query)
            .into_iter()
            .map(|event| {
                EventCard::from_event(event, self.favorites.contains(event.id), can_favorite)
            })
            .collect();

        self.view.render(if cards.is_empty() {
            Page::Empty
        } else {
            Page::Events(cards)
        });
    }

    pub async fn select_genre(&mut self, genre: &str) {
        self.filters.genre = genre.trim().to_string();
        self.render_genres();
        self.load_events().await;
    }

    /// Replace every filter, keeping the selected genre when `filters` has none.
    pub async fn apply_filters(&mut self, filters: EventFilters) {
        let genre = if filters.genre.is_empty() {
            std::mem::take(&mut self.filters.genre)
        } else {
            filters.genre.clone()
        };
        self.filters = EventFilters { genre, ..filters };
        self.load_events().await;
    }

    pub async fn clear_filters(&mut self) {
        self.filters = EventFilters::default();
        self.render_genres();
        self.load_events().await;
    }

    pub async fn use_device_location(&mut self, coords: Coordinate) {
        self.set_user_location(UserLocation::device(coords)).await;
    }

    /// Manual location search; geocoding errors go to the user and leave the
    /// current location unchanged.
    pub async fn use_place_location(&mut self, query: &str) -> Result<(), NearbyError> {
        match self.location.geocode_place(query).await {
            Ok(coords) => {
                self.set_user_location(UserLocation::named(coords, query.trim()))
                    .await;
                Ok(())
            }
            Err(e) => {
                self.view.alert(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn forget_location(&mut self) {
        self.location.clear_user_location().await;
        self.user_location = None;
        self.add_distances_to_events().await;
        self.render_events();
        self.update_location_status();
    }

    async fn set_user_location(&mut self, location: UserLocation) {
        self.location.save_user_location(&location).await;
        self.user_location = Some(location);
        self.add_distances_to_events().await;
        self.render_events();
        self.update_location_status();
    }

    async fn hydrate_saved_location(&mut self) {
        self.user_location = self.location.load_user_location().await;
        self.update_location_status();
        if self.user_location.is_some() && !self.events.is_empty() {
            self.add_distances_to_events().await;
            self.render_events();
        }
    }

    pub fn location_status(&self) -> String {
        match &self.user_location {
            Some(location) => format!("Distances shown from {}", location.label),
            None => "Set a location to see distances.".to_string(),
        }
    }

    fn update_location_status(&mut self) {
        let status = self.location_status();
        self.view.location_status(status);
    }

    fn render_genres(&mut self) {
        let chips = genre_chips(&self.genres, &self.filters.genre);
        let heading = events_heading(&self.genres, &self.filters.genre);
        self.view.genres(chips, heading);
    }

    fn render_events(&mut self) {
        if self.events.is_empty() {
            self.view.render(Page::Empty);
            return;
        }

        let can_favorite = self.current_user.is_some();
        let cards = self
            .events
            .iter()
            .map(|event| {
                EventCard::from_event(event, self.favorites.contains(event.id), can_favorite)
            })
            .collect();
        self.view.render(Page::Events(cards));
    }
}

fn load_error_message(err: &NearbyError) -> String {
    match err {
        NearbyError::Api(message) => message.clone(),
        other => other.to_string(),
    }
}
