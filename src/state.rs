use crate::application::controller::EventListController;
use crate::application::location::LocationService;
use crate::application::view::View;
use crate::domain::error::NearbyError;
use crate::domain::traits::{EventsBackend, Geocoder};
use crate::infrastructure::auth::StaticAuthProvider;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::{HttpBackend, NominatimGeocoder};
use crate::infrastructure::storage::SqliteStore;
use std::sync::Arc;
use tokio_rusqlite::Connection;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub location: Arc<LocationService>,
    pub backend: Arc<dyn EventsBackend>,
    pub auth: Arc<StaticAuthProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(db: Connection, config: Config) -> Result<Self, NearbyError> {
        let http_client = create_client(&config)?;

        let store = Arc::new(SqliteStore::new(db));
        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(
            http_client.clone(),
            config.geocoder.endpoint.clone(),
        ));
        let location = Arc::new(LocationService::load(geocoder, store.clone()).await);
        let backend: Arc<dyn EventsBackend> =
            Arc::new(HttpBackend::new(http_client, config.backend.clone()));
        let auth = Arc::new(StaticAuthProvider::from_uid(config.auth.uid.clone()));

        Ok(Self {
            store,
            location,
            backend,
            auth,
            config: Arc::new(config),
        })
    }

    pub fn controller(&self, view: Box<dyn View>) -> EventListController {
        EventListController::new(
            self.backend.clone(),
            self.location.clone(),
            self.auth.as_ref(),
            view,
        )
    }
}
