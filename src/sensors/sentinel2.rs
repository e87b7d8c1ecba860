use serde::{Deserialize, Serialize};

use crate::{
    bands::SpectralBand,
    components::{AssetRole, BandDefinition, SpectralCatalog},
};

use super::Sensor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingLevel {
    L1C,
    L2A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel2 {
    pub level: ProcessingLevel,
}

impl Sentinel2 {
    pub fn new(level: ProcessingLevel) -> Self {
        Self { level }
    }
}

// id, band, gsd, center (nm), fwhm (nm), solar illumination, description
#[rustfmt::skip]
const MSI_BANDS: [(&str, SpectralBand, f64, f64, f64, f64, &str); 13] = [
    ("01", SpectralBand::Ca, 60., 442.7, 21., 1884.69, "Coastal aerosol"),
    ("02", SpectralBand::Blue, 10., 492.4, 66., 1959.72, "Blue"),
    ("03", SpectralBand::Green, 10., 559.8, 36., 1823.24, "Green"),
    ("04", SpectralBand::Red, 10., 664.6, 31., 1512.06, "Red"),
    ("05", SpectralBand::Vre1, 20., 704.1, 15., 1424.64, "Vegetation red edge 1"),
    ("06", SpectralBand::Vre2, 20., 740.5, 15., 1287.61, "Vegetation red edge 2"),
    ("07", SpectralBand::Vre3, 20., 782.8, 20., 1162.08, "Vegetation red edge 3"),
    ("08", SpectralBand::Nir, 10., 832.8, 106., 1041.63, "Near infrared"),
    ("8A", SpectralBand::NarrowNir, 20., 864.7, 21., 955.32, "Narrow near infrared"),
    ("09", SpectralBand::Wv, 60., 945.1, 20., 812.92, "Water vapour"),
    ("10", SpectralBand::SwirCirrus, 60., 1373.5, 31., 367.15, "SWIR cirrus"),
    ("11", SpectralBand::Swir1, 20., 1613.7, 91., 245.59, "SWIR 1"),
    ("12", SpectralBand::Swir2, 20., 2202.4, 175., 85.25, "SWIR 2"),
];

impl Sensor for Sentinel2 {
    type Band = SpectralBand;

    const CONSTELLATION: &'static str = "Sentinel-2";

    fn band_catalog(&self) -> SpectralCatalog {
        MSI_BANDS
            .iter()
            // cirrus is dropped by the atmospheric correction
            .filter(|(_, band, ..)| {
                self.level == ProcessingLevel::L1C || *band != SpectralBand::SwirCirrus
            })
            .map(|(id, band, gsd, center, fwhm, solar, description)| {
                let definition =
                    BandDefinition::new(format!("B{id}"), *id, *gsd, AssetRole::Reflectance)
                        .with_wavelength(*center, Some(*fwhm))
                        .with_solar_illumination(*solar)
                        .with_description(*description);
                (*band, definition)
            })
            .collect()
    }
}
