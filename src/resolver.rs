//! Turns heterogeneous band requests into canonical identifiers.

use itertools::Itertools;
use log::debug;

use crate::{
    bands::{Band, BandFamily, CloudBand, DemBand, Identifier, RawBand, SarBand, SpectralBand},
    deprecation::warn_once,
    errors::Result,
    indexes::IndexRegistry,
};

/// Legacy spelling of [SpectralBand::Green1].
const DEPRECATED_GREEN_1: &str = "GREEN1";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("{0} is neither a known band nor a registered index")]
    UnknownBandOrIndex(String),
}

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r IndexRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r IndexRegistry) -> Self {
        Self { registry }
    }

    /// Resolution order: identifiers pass through (indices only if
    /// registered), then exact index names, then the SAR, spectral,
    /// DEM and cloud families. Numbers never match a family.
    pub fn resolve(&self, raw: impl Into<RawBand>) -> Result<Identifier> {
        let raw = raw.into();
        match &raw {
            RawBand::Identifier(Identifier::Band(band)) => return Ok(Identifier::Band(*band)),
            RawBand::Identifier(Identifier::Index(index)) => {
                if self.registry.is_index(index) {
                    return Ok(Identifier::Index(index.clone()));
                }
            }
            RawBand::Name(name) => {
                if let Some(index) = self.registry.index_name(name) {
                    return Ok(Identifier::Index(index));
                }
                if name == DEPRECATED_GREEN_1 {
                    warn_once(
                        DEPRECATED_GREEN_1,
                        "band name GREEN1 is replaced by GREEN_1",
                    );
                    return Ok(SpectralBand::Green1.into());
                }
            }
            RawBand::Number(_) => {}
        }

        let band = SarBand::try_from_any(&raw)
            .map(Band::from)
            .or_else(|| SpectralBand::try_from_any(&raw).map(Band::from))
            .or_else(|| DemBand::try_from_any(&raw).map(Band::from))
            .or_else(|| CloudBand::try_from_any(&raw).map(Band::from));
        match band {
            Some(band) => {
                debug!("{raw} resolved to {} band {band}", band_family(&band));
                Ok(Identifier::Band(band))
            }
            None => Err(ResolveError::UnknownBandOrIndex(raw.to_string()).into()),
        }
    }

    /// Resolves every item, failing on the first unknown one.
    pub fn resolve_many<R: Into<RawBand>>(
        &self,
        raws: impl IntoIterator<Item = R>,
    ) -> Result<Vec<Identifier>> {
        raws.into_iter().map(|raw| self.resolve(raw)).collect()
    }

    /// Concrete bands to load for `identifiers`, without duplicates.
    ///
    /// Indices expand to their required bands. Despeckled SAR bands
    /// are preceded by their speckled source, which the loader
    /// despeckles.
    pub fn needed_bands(&self, identifiers: &[Identifier]) -> Result<Vec<Band>> {
        let mut needed = Vec::new();
        for identifier in identifiers {
            match identifier {
                Identifier::Index(index) => needed.extend(
                    self.registry
                        .required_bands(index)?
                        .iter()
                        .map(|band| band.into_band()),
                ),
                Identifier::Band(Band::Sar(sar)) if sar.is_despeckled() => {
                    needed.push(sar.to_speckled().into());
                    needed.push(Band::Sar(*sar));
                }
                Identifier::Band(band) => needed.push(*band),
            }
        }
        Ok(needed.into_iter().unique().collect())
    }
}

fn band_family(band: &Band) -> &'static str {
    match band {
        Band::Spectral(_) => SpectralBand::FAMILY,
        Band::Sar(_) => SarBand::FAMILY,
        Band::Cloud(_) => CloudBand::FAMILY,
        Band::Dem(_) => DemBand::FAMILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::EobandsError, indexes::build_registry};
    use rstest::{fixture, rstest};

    #[fixture]
    fn resolver() -> Resolver<'static> {
        Resolver::new(build_registry().unwrap())
    }

    #[rstest]
    #[case("RED", SpectralBand::Red.into())]
    #[case("VRE_1", SpectralBand::Vre1.into())]
    #[case("VEGETATION_RED_EDGE_1", SpectralBand::Vre1.into())]
    #[case("VV", SarBand::Vv.into())]
    #[case("VV_DSPK", SarBand::VvDspk.into())]
    #[case("SLOPE", DemBand::Slope.into())]
    #[case("ALL_CLOUDS", CloudBand::AllClouds.into())]
    #[case("Oa08", SpectralBand::Oa08.into())]
    fn bands_resolve_to_their_family(
        resolver: Resolver,
        #[case] raw: &str,
        #[case] expected: Identifier,
    ) {
        assert_eq!(resolver.resolve(raw).unwrap(), expected);
    }

    #[rstest]
    fn index_names_resolve_to_indices(resolver: Resolver) {
        let ndvi = resolver.resolve("ndvi".to_uppercase()).unwrap();
        assert!(ndvi.is_index());
        assert_eq!(ndvi.value(), "NDVI");
        assert!(resolver.resolve("NDRE2").unwrap().is_index());
        assert!(resolver.resolve("BSI").unwrap().is_index());
    }

    #[rstest]
    fn despeckled_and_speckled_stay_distinct(resolver: Resolver) {
        assert_ne!(
            resolver.resolve("VV_DSPK").unwrap(),
            resolver.resolve("VV").unwrap()
        );
    }

    #[rstest]
    fn legacy_green_name(resolver: Resolver) {
        assert_eq!(
            resolver.resolve("GREEN1").unwrap(),
            Identifier::from(SpectralBand::Green1)
        );
        assert_eq!(resolver.resolve("GREEN1").unwrap(), resolver.resolve("GREEN_1").unwrap());
        assert!(SpectralBand::from_value("GREEN1").is_err());
    }

    #[rstest]
    #[case(RawBand::from("red"))]
    #[case(RawBand::from("NOT_A_BAND"))]
    #[case(RawBand::from(4i64))]
    #[case(RawBand::from(0.865))]
    fn unknown_values_are_echoed(resolver: Resolver, #[case] raw: RawBand) {
        let echoed = raw.to_string();
        let err = resolver.resolve(raw).unwrap_err();
        assert!(matches!(
            err,
            EobandsError::Resolve(ResolveError::UnknownBandOrIndex(ref value)) if *value == echoed
        ));
    }

    #[rstest]
    fn identifiers_pass_through(resolver: Resolver) {
        let ndvi = resolver.resolve("NDVI").unwrap();
        assert_eq!(resolver.resolve(ndvi.clone()).unwrap(), ndvi);
        assert_eq!(
            resolver.resolve(SpectralBand::Nir).unwrap(),
            Identifier::from(SpectralBand::Nir)
        );
    }

    #[rstest]
    fn resolve_many_stops_at_unknown(resolver: Resolver) {
        let resolved = resolver.resolve_many(["RED", "NDVI", "HILLSHADE"]).unwrap();
        assert_eq!(resolved.len(), 3);
        assert!(resolver.resolve_many(["RED", "BLUISH"]).is_err());
    }

    #[rstest]
    fn needed_bands_expand_indices(resolver: Resolver) {
        let request = resolver
            .resolve_many(["NDVI", "RED", "VV_DSPK", "NDRE2"])
            .unwrap();
        assert_eq!(
            resolver.needed_bands(&request).unwrap(),
            vec![
                Band::from(SpectralBand::Nir),
                Band::from(SpectralBand::Red),
                Band::from(SarBand::Vv),
                Band::from(SarBand::VvDspk),
                Band::from(SpectralBand::Vre2),
            ]
        );
    }

    #[rstest]
    fn serialized_index_names_come_back_through_resolve(resolver: Resolver) {
        let ndvi = resolver.resolve("NDVI").unwrap();
        let name = ndvi.as_index().unwrap();
        let json = serde_json::to_string(name).unwrap();
        assert_eq!(json, "\"NDVI\"");

        let text: String = serde_json::from_str(&json).unwrap();
        assert_eq!(resolver.resolve(text).unwrap(), ndvi);
        let forged: String = serde_json::from_str("\"NDVI_2\"").unwrap();
        assert!(resolver.resolve(forged).is_err());
    }
}
