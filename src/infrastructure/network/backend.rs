use crate::domain::error::NearbyError;
use crate::domain::model::{Event, EventFilters, Genre, Identity, User};
use crate::domain::traits::EventsBackend;
use crate::infrastructure::config::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

// Backend response envelopes
#[derive(Deserialize, Debug)]
struct EventsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    events: Vec<Value>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GenresResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    genres: Vec<Genre>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FavoritesResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    favorites: Vec<Value>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FavoriteRef {
    #[serde(deserialize_with = "crate::domain::model::id_from_number_or_string")]
    id: i64,
}

#[derive(Deserialize, Debug)]
struct MeResponse {
    user: Option<User>,
}

#[derive(Deserialize, Debug, Default)]
struct AckResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

/// HTTP implementation of the events backend.
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(client: Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authed(&self, request: RequestBuilder, identity: &Identity) -> RequestBuilder {
        request.header(self.config.identity_header.as_str(), identity.uid.as_str())
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, NearbyError> {
        let response = request.send().await.map_err(NearbyError::request_failed)?;
        read_json(response).await
    }
}

/// Decode a JSON body. A body that doesn't decode is reported by status when
/// the status itself already signals failure.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, NearbyError> {
    let status = response.status();
    response.json::<T>().await.map_err(|e| {
        if status.is_success() {
            NearbyError::request_failed(e)
        } else {
            NearbyError::RequestFailed(format!("backend returned {}", status))
        }
    })
}

#[async_trait]
impl EventsBackend for HttpBackend {
    async fn list_events(&self, filters: &EventFilters) -> Result<Vec<Event>, NearbyError> {
        let request = self
            .client
            .get(self.url(&self.config.events_path))
            .query(&filters.to_query());
        let body: EventsResponse = Self::send_json(request).await?;

        if !body.success {
            return Err(NearbyError::Api(
                body.error
                    .unwrap_or_else(|| "Failed to load events".to_string()),
            ));
        }
        Ok(decode_each(body.events, "event"))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, NearbyError> {
        let request = self.client.get(self.url(&self.config.genres_path));
        let body: GenresResponse = Self::send_json(request).await?;

        if !body.success {
            return Err(NearbyError::Api(
                body.error
                    .unwrap_or_else(|| "Failed to load genres".to_string()),
            ));
        }
        Ok(body.genres)
    }

    async fn current_user(&self, identity: &Identity) -> Result<Option<User>, NearbyError> {
        let request = self.authed(self.client.get(self.url(&self.config.me_path)), identity);
        let body: MeResponse = Self::send_json(request).await?;
        Ok(body.user)
    }

    async fn list_favorites(&self, identity: &Identity) -> Result<Vec<i64>, NearbyError> {
        let request = self.authed(
            self.client.get(self.url(&self.config.favorites_path)),
            identity,
        );
        let body: FavoritesResponse = Self::send_json(request).await?;

        if !body.success {
            return Err(NearbyError::Api(
                body.error
                    .unwrap_or_else(|| "Failed to load favorites".to_string()),
            ));
        }
        Ok(decode_each::<FavoriteRef>(body.favorites, "favorite")
            .into_iter()
            .map(|f| f.id)
            .collect())
    }

    async fn add_favorite(&self, identity: &Identity, event_id: i64) -> Result<(), NearbyError> {
        let request = self.authed(
            self.client
                .post(self.url(&self.config.favorites_path))
                .json(&json!({ "event_id": event_id })),
            identity,
        );
        acknowledge(request).await
    }

    async fn remove_favorite(
        &self,
        identity: &Identity,
        event_id: i64,
    ) -> Result<(), NearbyError> {
        let request = self.authed(
            self.client
                .delete(self.url(&self.config.favorites_path))
                .query(&[("event_id", event_id)]),
            identity,
        );
        acknowledge(request).await
    }
}

/// Decode list entries one at a time, dropping the ones that don't fit.
fn decode_each<T: DeserializeOwned>(entries: Vec<Value>, kind: &str) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed {}: {}", kind, e);
                None
            }
        })
        .collect()
}

/// Favorite mutations succeed only on a 2xx status with `success: true`.
async fn acknowledge(request: RequestBuilder) -> Result<(), NearbyError> {
    let response = request.send().await.map_err(NearbyError::request_failed)?;
    let status = response.status();
    let body = response.json::<AckResponse>().await.unwrap_or_default();

    if status.is_success() && body.success {
        return Ok(());
    }

    let reason = body.error.unwrap_or_else(|| status.as_u16().to_string());
    Err(NearbyError::Api(format!("Failed to update favorite: {}", reason)))
}
