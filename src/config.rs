//! Registry configuration: default formula constants, constants forced on
//! specific indices, deprecated aliases and derivative indices.
//!
//! The built-in tables are returned by [RegistryConfig::builtin]; a JSON
//! file can extend or override them.
//!
//! ```json
//! {
//!   "constants": { "alpha": 0.2 },
//!   "aliases": { "NDVI_OLD": "NDVI" },
//!   "derivatives": [
//!     { "name": "NDRE_N2", "formula": "NDREI", "roles": [["N", "NARROW_NIR"], ["RE1", "VEGETATION_RED_EDGE_1"]] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

use crate::{bands::SpectralBand, errors::Result};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A library formula evaluated with non-default bands in some roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivativeConfig {
    pub name: String,
    /// Library index whose formula is reused.
    pub formula: String,
    /// Role to band substitutions, in declaration order.
    pub roles: Vec<(String, SpectralBand)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Overrides of the library default constants.
    pub constants: BTreeMap<String, f64>,
    /// Per index constants that ignore caller supplied values.
    pub forced_constants: BTreeMap<String, BTreeMap<String, f64>>,
    /// Deprecated name to library index.
    pub aliases: BTreeMap<String, String>,
    pub derivatives: Vec<DerivativeConfig>,
}

fn derivative(name: &str, formula: &str, roles: &[(&str, SpectralBand)]) -> DerivativeConfig {
    DerivativeConfig {
        name: name.to_string(),
        formula: formula.to_string(),
        roles: roles
            .iter()
            .map(|(role, band)| (role.to_string(), *band))
            .collect(),
    }
}

impl RegistryConfig {
    pub fn builtin() -> Self {
        use SpectralBand::*;

        let aliases = [
            ("AFRI_1_6", "AFRI1600"),
            ("AFRI_2_1", "AFRI2100"),
            ("BSI", "BI"),
            ("NDGRI", "NGRDI"),
            ("NDRE1", "NDREI"),
            ("RGI", "RGRI"),
            ("WV_BI", "NHFD"),
            ("WV_SI", "NDSIWV"),
            ("DSWI", "DSWI5"),
        ]
        .into_iter()
        .map(|(alias, target)| (alias.to_string(), target.to_string()))
        .collect();

        let derivatives = vec![
            derivative("NDRE2", "NDREI", &[("N", Nir), ("RE1", Vre2)]),
            derivative("NDRE3", "NDREI", &[("N", Nir), ("RE1", Vre3)]),
            derivative("CI21", "CIRE", &[("N", Vre3), ("RE1", Vre1)]),
            derivative("NDMI21", "NDMI", &[("N", NarrowNir), ("S1", Swir1)]),
            derivative("SRSWIR", "SR", &[("N", Swir1), ("R", Swir2)]),
            derivative("RDI", "SR", &[("N", Swir2), ("R", NarrowNir)]),
            derivative("WV_VI", "NDVI", &[("N", Wv), ("R", Red)]),
            derivative("WV_WI", "NDWI", &[("G", Ca), ("N", Wv)]),
        ];

        let soil_brightness = BTreeMap::from([("L".to_string(), 0.5)]);
        let forced_constants = BTreeMap::from([
            ("SAVI".to_string(), soil_brightness.clone()),
            ("IBI".to_string(), soil_brightness),
        ]);

        Self {
            constants: BTreeMap::new(),
            forced_constants,
            aliases,
            derivatives,
        }
    }

    /// `other` wins: its entries replace same-named ones, derivatives
    /// included, and new derivatives are appended.
    pub fn merge(mut self, other: RegistryConfig) -> Self {
        self.constants.extend(other.constants);
        for (index, constants) in other.forced_constants {
            self.forced_constants.entry(index).or_default().extend(constants);
        }
        self.aliases.extend(other.aliases);
        for derivative in other.derivatives {
            match self
                .derivatives
                .iter_mut()
                .find(|existing| existing.name == derivative.name)
            {
                Some(existing) => *existing = derivative,
                None => self.derivatives.push(derivative),
            }
        }
        self
    }

    /// Built-in tables extended by a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let extra: RegistryConfig = serde_json::from_str(json).map_err(ConfigError::from)?;
        Ok(Self::builtin().merge(extra))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_json_str(&json)
    }
}
