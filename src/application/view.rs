use crate::domain::model::{Event, Genre, User};
use serde::Serialize;

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x200/667eea/white?text=Event";

// 活动卡片 (纯数据，由渲染层负责展示)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCard {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub date: String,
    pub time: Option<String>,
    pub price: String,
    pub image_url: String,
    pub genre: Option<String>,
    pub distance_km: Option<f64>,
    pub favorited: bool,
    pub can_favorite: bool,
}

impl EventCard {
    pub fn from_event(event: &Event, favorited: bool, can_favorite: bool) -> Self {
        let price = match event.price {
            Some(p) if p > 0.0 => format!("${:.2}", p),
            _ => "FREE".to_string(),
        };

        Self {
            id: event.id,
            title: event.display_name().unwrap_or("Untitled Event").to_string(),
            location: non_empty(&event.location).unwrap_or("Location TBA").to_string(),
            date: non_empty(&event.date).unwrap_or("TBA").to_string(),
            time: non_empty(&event.time).map(str::to_string),
            price,
            image_url: non_empty(&event.image_url)
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
            genre: non_empty(&event.genre_name).map(str::to_string),
            distance_km: event.distance_km,
            favorited,
            can_favorite,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Loading,
    Events(Vec<EventCard>),
    /// Nothing loaded or nothing matched.
    Empty,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreChip {
    /// Filter value; empty for "All Events".
    pub key: String,
    pub label: String,
    pub active: bool,
}

/// Chips for the genre bar, "All Events" first.
pub fn genre_chips(genres: &[Genre], selected: &str) -> Vec<GenreChip> {
    let all = GenreChip {
        key: String::new(),
        label: "All Events".to_string(),
        active: selected.is_empty(),
    };

    std::iter::once(all)
        .chain(genres.iter().map(|g| GenreChip {
            key: g.key().to_string(),
            label: g.name.clone(),
            active: g.key() == selected,
        }))
        .collect()
}

/// "{Genre} Events" for a selected genre, "All Events" otherwise.
pub fn events_heading(genres: &[Genre], selected: &str) -> String {
    if selected.is_empty() {
        return "All Events".to_string();
    }

    let name = genres
        .iter()
        .find(|g| g.slug.as_deref() == Some(selected) || g.name == selected)
        .map(|g| g.name.as_str())
        .unwrap_or(selected);
    format!("{} Events", name)
}

/// Output surface for the event list. Each call replaces what that part showed before.
pub trait View: Send {
    fn render(&mut self, page: Page);

    fn genres(&mut self, chips: Vec<GenreChip>, heading: String);

    fn location_status(&mut self, text: String);

    fn session(&mut self, user: Option<User>);

    /// User-facing message; alerts accumulate.
    fn alert(&mut self, message: String);
}
