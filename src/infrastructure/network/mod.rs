pub mod backend;
pub mod http;
pub mod nominatim;

pub use backend::HttpBackend;
pub use nominatim::NominatimGeocoder;
