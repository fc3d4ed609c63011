// HTTP client utilities
use crate::domain::error::NearbyError;
use crate::infrastructure::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client for the backend and the geocoder
pub fn create_client(config: &Config) -> Result<Client, NearbyError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .user_agent(config.geocoder.user_agent.as_str());

    if let Some(secs) = config.backend.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}
