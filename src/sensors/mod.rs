use std::fmt::Debug;

use crate::{bands::BandFamily, components::BandCatalog};

mod landsat8;
mod sentinel1;
mod sentinel2;
pub use landsat8::Landsat8;
pub use sentinel1::Sentinel1;
pub use sentinel2::{ProcessingLevel, Sentinel2};

/// Static band mapping of one sensor's products.
pub trait Sensor: Debug {
    type Band: BandFamily;

    const CONSTELLATION: &'static str;

    /// Full catalog, with `None` for every band the product lacks.
    fn band_catalog(&self) -> BandCatalog<Self::Band>;
}
