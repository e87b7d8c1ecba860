use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{EobandsError, Result};

/// Descriptive metadata travelling with a raster
/// (crs, transform, nodata convention, ...).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    description: String,
    entries: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Result<&String> {
        self.entries
            .get(key)
            .ok_or_else(|| EobandsError::MetadataKeyNotFound {
                object_desc: self.description.clone(),
                key: key.into(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            description: String::new(),
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_keys_name_the_owner() {
        let mut metadata = Metadata::new("NIR");
        metadata.insert("crs", "EPSG:32633");
        assert_eq!(metadata.get("crs").unwrap(), "EPSG:32633");
        let err = metadata.get("transform").unwrap_err();
        assert_eq!(err.to_string(), "NIR has no metadata entry \"transform\"");
    }
}
