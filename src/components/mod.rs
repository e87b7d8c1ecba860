pub mod band;
pub mod catalog;
pub mod metadata;
pub mod raster;

pub use band::{AssetRole, BandDefinition, BandUpdate};
pub use catalog::{BandCatalog, SarCatalog, SpectralCatalog};
pub use metadata::Metadata;
pub use raster::{Raster, FILL_VALUE};
