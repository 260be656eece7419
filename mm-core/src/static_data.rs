use anyhow::{Context, Result};
use async_trait::async_trait;
use mm_domain::SolarSystemId;
use mockall::automock;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;

#[automock]
#[async_trait]
pub trait SunTypeLookup: Send + Sync + Debug {
    /// The type id of the system's star, `None` for unknown systems.
    async fn get_system_sun_type_id(&self, solar_system_id: SolarSystemId) -> Result<Option<i64>>;
}

/// Sun types held in memory, loaded from an SDE extract.
#[derive(Debug, Clone, Default)]
pub struct InMemorySunTypes {
    sun_types: HashMap<SolarSystemId, i64>,
}

impl InMemorySunTypes {
    pub fn new(sun_types: HashMap<SolarSystemId, i64>) -> Self {
        InMemorySunTypes { sun_types }
    }

    /// Reads a JSON object of `{"<solar system id>": <sun type id>}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read sun types from {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse sun types from {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: HashMap<String, i64> = serde_json::from_str(content)?;

        let sun_types = raw
            .into_iter()
            .map(|(system_id, sun_type_id)| {
                let system_id = system_id.parse::<i64>().with_context(|| format!("Invalid solar system id '{system_id}'"))?;
                Ok((SolarSystemId(system_id), sun_type_id))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self::new(sun_types))
    }
}

#[async_trait]
impl SunTypeLookup for InMemorySunTypes {
    async fn get_system_sun_type_id(&self, solar_system_id: SolarSystemId) -> Result<Option<i64>> {
        Ok(self.sun_types.get(&solar_system_id).copied())
    }
}
