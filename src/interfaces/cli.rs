use crate::domain::model::Coordinate;
use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "nearby")]
#[command(about = "Browse events from the terminal, sorted by how far away they are.")]
#[command(version)]
pub struct Cli {
    /// Only show events of this genre (slug or name)
    #[arg(short = 'g', long)]
    pub genre: Option<String>,

    /// Only show events on this day (YYYY-MM-DD)
    #[arg(short = 'd', long)]
    pub date: Option<NaiveDate>,

    /// Maximum ticket price
    #[arg(short = 'p', long)]
    pub price_max: Option<f64>,

    /// Sort key understood by the backend
    #[arg(short = 's', long)]
    pub sort: Option<String>,

    /// Filter loaded events by name, description or location
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Use these device coordinates as your location
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_coordinate, conflicts_with = "near")]
    pub here: Option<Coordinate>,

    /// Geocode a place name and use it as your location
    #[arg(long, value_name = "PLACE")]
    pub near: Option<String>,

    /// Forget the saved location
    #[arg(long)]
    pub forget_location: bool,

    /// Toggle an event in your favorites
    #[arg(short = 'f', long, value_name = "EVENT_ID")]
    pub favorite: Option<i64>,

    /// Sign in as this user id (overrides config)
    #[arg(long)]
    pub uid: Option<String>,

    /// List genres and exit
    #[arg(long)]
    pub genres: bool,

    /// Output displayed events as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,
}

pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {:?}", raw))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude: {:?}", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude: {:?}", lng.trim()))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("coordinates out of range: {}, {}", lat, lng));
    }
    Ok(Coordinate::new(lat, lng))
}
