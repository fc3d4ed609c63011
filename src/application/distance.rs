use crate::application::location::LocationService;
use crate::domain::geo::{haversine_distance_km, round_to};
use crate::domain::model::{Coordinate, Event};
use futures_util::future::join_all;
use tracing::warn;

/// Attach `distance_km` from `origin` to every event, or strip it from all of
/// them when there is no origin.
///
/// Lookups run concurrently and the call returns once every one has settled.
/// A failed geocode only leaves that event without a distance.
pub async fn annotate_distances(
    events: &mut [Event],
    origin: Option<Coordinate>,
    location: &LocationService,
) {
    let Some(origin) = origin else {
        for event in events.iter_mut() {
            event.distance_km = None;
        }
        return;
    };

    let lookups = events
        .iter()
        .map(|event| event_coordinates(event, location));
    let resolved = join_all(lookups).await;

    for (event, coords) in events.iter_mut().zip(resolved) {
        event.distance_km = coords.map(|c| round_to(haversine_distance_km(origin, c), 1));
    }
}

async fn event_coordinates(event: &Event, location: &LocationService) -> Option<Coordinate> {
    if let Some(coords) = event.coordinates() {
        return Some(coords);
    }

    let place = event.location.as_deref().filter(|l| !l.trim().is_empty())?;
    match location.geocode_place(place).await {
        Ok(coords) => Some(coords),
        Err(e) => {
            warn!("Unable to geocode event location {:?}: {}", place, e);
            None
        }
    }
}
