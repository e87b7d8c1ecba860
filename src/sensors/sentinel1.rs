use crate::{
    bands::{BandFamily, SarBand},
    components::{AssetRole, BandDefinition, BandUpdate, SarCatalog},
};

use super::Sensor;

/// Sentinel-1 GRD product with its acquired polarizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel1 {
    polarizations: Vec<SarBand>,
    despeckled: bool,
}

impl Sentinel1 {
    /// Despeckled variants in `polarizations` are read as their source channel.
    pub fn new(polarizations: impl IntoIterator<Item = SarBand>) -> Self {
        Self {
            polarizations: polarizations
                .into_iter()
                .map(SarBand::to_speckled)
                .collect(),
            despeckled: false,
        }
    }

    /// Also expose the despeckled version of every polarization.
    pub fn with_despeckled(mut self) -> Self {
        self.despeckled = true;
        self
    }
}

impl Sensor for Sentinel1 {
    type Band = SarBand;

    const CONSTELLATION: &'static str = "Sentinel-1";

    fn band_catalog(&self) -> SarCatalog {
        let mut catalog = SarCatalog::new();
        for polarization in &self.polarizations {
            let definition = BandDefinition::new(
                polarization.value(),
                polarization.value().to_lowercase(),
                10.,
                AssetRole::Intensity,
            )
            .with_description(format!("{polarization} backscatter"));
            if self.despeckled {
                let despeckled = polarization.to_despeckled();
                catalog.set(
                    despeckled,
                    Some(definition.update(BandUpdate {
                        name: Some(despeckled.value().to_string()),
                        description: Some(format!("{polarization} despeckled backscatter")),
                        ..Default::default()
                    })),
                );
            }
            catalog.set(*polarization, Some(definition));
        }
        catalog
    }
}
