use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// 用户位置 (GPS 或手动搜索)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    #[serde(flatten)]
    pub coords: Coordinate,
    pub label: String,
}

impl UserLocation {
    pub const DEVICE_LABEL: &'static str = "Current location";

    pub fn device(coords: Coordinate) -> Self {
        Self {
            coords,
            label: Self::DEVICE_LABEL.to_string(),
        }
    }

    pub fn named(coords: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coords,
            label: label.into(),
        }
    }
}

// 活动记录 (由后端返回)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genre_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    /// Derived per load, never sent back to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            title: None,
            description: None,
            location: None,
            date: None,
            time: None,
            price: None,
            image_url: None,
            genre_name: None,
            lat: None,
            lng: None,
            distance_km: None,
            extra: Map::new(),
        }
    }

    /// Display title: `name`, then `title`.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref().filter(|s| !s.is_empty()))
    }

    /// Own coordinates, only when both parse as finite numbers.
    pub fn coordinates(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinate::new(lat, lng))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Genre {
    /// Value sent as the `genre` filter.
    pub fn key(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_deref(), Some("admin") | Some("owner"))
    }

    pub fn initial(&self) -> char {
        self.name
            .as_deref()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// Identity issued by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    /// Genre slug, empty means all genres.
    pub genre: String,
    pub date: Option<chrono::NaiveDate>,
    pub price_max: Option<f64>,
    pub sort: Option<String>,
}

impl EventFilters {
    /// Query parameters for the events endpoint. A single date is sent as an
    /// inclusive `date_from`/`date_to` pair.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.genre.is_empty() {
            params.push(("genre", self.genre.clone()));
        }
        if let Some(date) = self.date {
            let day = date.format("%Y-%m-%d").to_string();
            params.push(("date_from", day.clone()));
            params.push(("date_to", day));
        }
        if let Some(price) = self.price_max {
            params.push(("price_max", price.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sort", sort.to_string()));
        }
        params
    }
}

pub(crate) fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom("event id out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid event id: {s}"))),
        other => Err(D::Error::custom(format!("invalid event id: {other}"))),
    }
}

/// Numbers or numeric strings; anything else becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
