//! Sensor-agnostic band identities and spectral index computation.
//!
//! A band request (names, enum members, index names) is resolved into
//! [Identifier]s, indices are expanded into the concrete bands to load,
//! and once those are in memory the [IndexRegistry] computes the index.

pub mod bands;
pub mod components;
pub mod config;
mod deprecation;
pub mod errors;
pub mod indexes;
pub mod resolver;
pub mod sensors;

pub use bands::{Band, BandFamily, CloudBand, DemBand, Identifier, RawBand, SarBand, SpectralBand};
pub use components::{BandCatalog, BandDefinition, BandUpdate, Raster};
pub use config::RegistryConfig;
pub use errors::{EobandsError, Result};
pub use indexes::{build_registry, BandArrays, IndexName, IndexParams, IndexRegistry};
pub use resolver::Resolver;

/// Resolves `raw` against the process-wide registry.
pub fn resolve(raw: impl Into<RawBand>) -> Result<Identifier> {
    Resolver::new(build_registry()?).resolve(raw)
}

/// Resolves every item of `raws` against the process-wide registry.
pub fn resolve_many<R: Into<RawBand>>(raws: impl IntoIterator<Item = R>) -> Result<Vec<Identifier>> {
    Resolver::new(build_registry()?).resolve_many(raws)
}
