use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::config::yml_settings::ResourceSettings;
use crate::domain::resource::Resource;
use crate::error::RouteError;

pub const DEFAULT_CONFIG_FILE: &str = "resources.yml";

/// Build resources from a YAML list of [`ResourceSettings`], keyed by name
pub fn resources_from_str(yml: &str) -> Result<HashMap<String, Resource>> {
    let settings: Vec<ResourceSettings> =
        serde_yaml::from_str(yml).context("Invalid yaml configuration")?;

    let mut map = HashMap::new();
    for entry in settings {
        let name = entry.name.clone();
        let resource = Resource::try_from(entry)
            .with_context(|| format!("Invalid resource '{}'", name))?;
        if map.insert(name.clone(), resource).is_some() {
            return Err(RouteError::Config(format!("Duplicate resource name: {}", name)).into());
        }
    }

    tracing::debug!(count = map.len(), "loaded resources");
    Ok(map)
}

pub fn load_resources(path: &Path) -> Result<HashMap<String, Resource>> {
    let yml = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read file {}", path.display()))?;
    resources_from_str(&yml).with_context(|| format!("Failed to load {}", path.display()))
}
