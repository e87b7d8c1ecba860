use crate::{
    bands::SpectralBand,
    components::{AssetRole, BandDefinition, BandUpdate, SpectralCatalog},
};

use super::Sensor;

/// Landsat 8 OLI/TIRS collection products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Landsat8;

fn band(id: &str, gsd: f64, center: f64, fwhm: f64, description: &str) -> BandDefinition {
    BandDefinition::new(format!("B{id}"), id, gsd, AssetRole::Reflectance)
        .with_wavelength(center, Some(fwhm))
        .with_description(description)
}

impl Sensor for Landsat8 {
    type Band = SpectralBand;

    const CONSTELLATION: &'static str = "Landsat-8";

    fn band_catalog(&self) -> SpectralCatalog {
        let nir = band("5", 30., 864.7, 28., "Near infrared");
        let thermal = BandUpdate {
            asset_role: Some(AssetRole::BrightnessTemperature),
            ..Default::default()
        };

        SpectralCatalog::new()
            .with_band(SpectralBand::Ca, band("1", 30., 443., 16., "Coastal aerosol"))
            .with_band(SpectralBand::Blue, band("2", 30., 482., 60., "Blue"))
            .with_band(SpectralBand::Green, band("3", 30., 561.4, 57., "Green"))
            .with_band(SpectralBand::Red, band("4", 30., 654.6, 37., "Red"))
            // OLI has a single NIR band, narrow enough to serve both roles
            .with_band(SpectralBand::NarrowNir, nir.update(BandUpdate::name("Narrow NIR")))
            .with_band(SpectralBand::Nir, nir)
            .with_band(SpectralBand::Swir1, band("6", 30., 1608.9, 85., "SWIR 1"))
            .with_band(SpectralBand::Swir2, band("7", 30., 2200.7, 187., "SWIR 2"))
            .with_band(SpectralBand::Pan, band("8", 15., 589.5, 172., "Panchromatic"))
            .with_band(SpectralBand::SwirCirrus, band("9", 30., 1373.4, 20., "Cirrus"))
            .with_band(
                SpectralBand::Tir1,
                band("10", 100., 10895., 590., "Thermal infrared 1").update(thermal.clone()),
            )
            .with_band(
                SpectralBand::Tir2,
                band("11", 100., 12005., 1010., "Thermal infrared 2").update(thermal),
            )
    }
}
