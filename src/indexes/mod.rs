//! Spectral indices: formula library, local formulas and the registry
//! resolving index names to the bands they need and to their evaluation.

pub mod custom;
pub mod evaluator;
pub mod formula;
pub mod library;
mod registry;

use serde::Serialize;
use shrinkwraprs::Shrinkwrap;
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    fmt::Display,
    sync::{Arc, OnceLock},
};

use crate::{bands::SpectralBand, components::Raster, config::RegistryConfig, errors::Result};

pub use library::Domain;
pub use registry::{IndexInfo, IndexRegistry, Provenance};

/// Concrete band arrays handed to [IndexRegistry::compute].
pub type BandArrays = HashMap<SpectralBand, Raster>;
/// Numeric keyword parameters (`alpha`, `L`, ...).
pub type IndexParams = BTreeMap<String, f64>;

/// Name of a registered spectral index.
///
/// Only [IndexRegistry] hands these out, so holding one means the
/// name was registered when it was created.
#[derive(Shrinkwrap, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IndexName(Arc<str>);

impl IndexName {
    pub(crate) fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IndexName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for IndexName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("{index} needs band {band} which was not provided")]
    MissingBand { index: String, band: SpectralBand },
    #[error("no formula is registered for index {0:?}")]
    NotImplemented(String),
    #[error("{index} formula uses {parameter:?} but no value was given")]
    MissingParameter { index: String, parameter: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("index name {name:?} is declared by both {first} and {second}")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },
    #[error("{name:?} refers to {target:?} which is not a library index")]
    UnknownTarget { name: String, target: String },
    #[error("derivative {name:?} leaves role {role:?} of {target} unmapped")]
    UnmappedRole {
        name: String,
        target: String,
        role: String,
    },
    #[error("derivative {name:?} maps role {role:?} which {target} does not read")]
    UnusedRole {
        name: String,
        target: String,
        role: String,
    },
    #[error("forced constant {constant:?} is not read by {index}")]
    UnusedConstant { index: String, constant: String },
}

static REGISTRY: OnceLock<IndexRegistry> = OnceLock::new();

/// Process-wide registry over the built-in configuration.
///
/// Building is idempotent: the first successful call builds the registry,
/// every later call returns the same instance.
pub fn build_registry() -> Result<&'static IndexRegistry> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let registry = IndexRegistry::build(&RegistryConfig::builtin())?;
    Ok(REGISTRY.get_or_init(|| registry))
}
