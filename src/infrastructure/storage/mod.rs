pub mod cache;
pub mod db;

pub use cache::MemoryStore;
pub use db::SqliteStore;
