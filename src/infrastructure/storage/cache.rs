// In-memory key-value store using DashMap
use crate::domain::error::NearbyError;
use crate::domain::traits::KeyValueStore;
use async_trait::async_trait;
use dashmap::DashMap;

/// Non-durable store; contents are lost with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NearbyError> {
        Ok(self.map.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NearbyError> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), NearbyError> {
        self.map.remove(key);
        Ok(())
    }
}
