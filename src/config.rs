//! Instance launch configuration read from a local JSON file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "data/config.json";

/// Launch parameters for `create`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstanceConfig {
    pub instance_type: String,
    pub image_id: String,
}

impl InstanceConfig {
    /// Read and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let empty = [
            ("instance_type", &self.instance_type),
            ("image_id", &self.image_id),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        match empty {
            Some((field, _)) => Err(Error::ConfigInvalid {
                path: path.to_path_buf(),
                reason: format!("{field} must not be empty"),
            }),
            None => Ok(()),
        }
    }
}
