//! Indices computed by direct arithmetic over concrete bands, for the
//! formulas the generic library does not carry.
//!
//! Every formula is registered with the exact bands its body reads,
//! so the registry never has to inspect the formula to know its inputs.

use log::warn;

use crate::{
    bands::SpectralBand::{self, *},
    components::Raster,
    errors::Result,
    indexes::{
        evaluator::{linear_combination, masked_divide},
        BandArrays, Domain, IndexError,
    },
};

/// Band lookup handed to local formulas.
pub struct FormulaInputs<'a> {
    index: &'a str,
    arrays: &'a BandArrays,
}

impl<'a> FormulaInputs<'a> {
    pub fn new(index: &'a str, arrays: &'a BandArrays) -> Self {
        Self { index, arrays }
    }

    pub fn band(&self, band: SpectralBand) -> Result<&'a Raster> {
        self.arrays.get(&band).ok_or_else(|| {
            IndexError::MissingBand {
                index: self.index.to_string(),
                band,
            }
            .into()
        })
    }

    fn combine(&self, terms: &[(f64, SpectralBand)], offset: f64) -> Result<Raster> {
        let rasters = terms
            .iter()
            .map(|(coefficient, band)| self.band(*band).map(|raster| (*coefficient, raster)))
            .collect::<Result<Vec<_>>>()?;
        match rasters.split_first() {
            Some((first, rest)) => Ok(linear_combination(*first, rest, offset)),
            None => Err(IndexError::NotImplemented(self.index.to_string()).into()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomIndex {
    pub name: &'static str,
    pub long_name: &'static str,
    pub domain: Domain,
    /// Every band the formula reads, in the order it reads them.
    pub bands: &'static [SpectralBand],
    /// Historical formula kept as published even though it is known to be wrong.
    pub suspect: bool,
    formula: fn(&FormulaInputs) -> Result<Raster>,
}

impl CustomIndex {
    /// Suspect formulas log a warning on every evaluation.
    pub fn evaluate(&self, inputs: &FormulaInputs) -> Result<Raster> {
        if self.suspect {
            warn!(
                "{} evaluates to a constant and is kept for backward compatibility only",
                self.name
            );
        }
        (self.formula)(inputs)
    }
}

// Crist (1985) Landsat TM reflectance factor coefficients.
const TC_BRIGHTNESS: [(f64, SpectralBand); 6] = [
    (0.3037, Blue),
    (0.2793, Green),
    (0.4743, Red),
    (0.5585, Nir),
    (0.5082, Swir1),
    (0.1863, Swir2),
];
const TC_GREENNESS: [(f64, SpectralBand); 6] = [
    (-0.2848, Blue),
    (-0.2435, Green),
    (-0.5436, Red),
    (0.7243, Nir),
    (0.0840, Swir1),
    (-0.1800, Swir2),
];
const TC_WETNESS: [(f64, SpectralBand); 6] = [
    (0.1509, Blue),
    (0.1973, Green),
    (0.3279, Red),
    (0.3406, Nir),
    (-0.7112, Swir1),
    (-0.4572, Swir2),
];

fn tcbri(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(&TC_BRIGHTNESS, 0.)
}

fn tcgre(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(&TC_GREENNESS, 0.)
}

fn tcwet(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(&TC_WETNESS, 0.)
}

fn sci(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(&[(3., Green), (-1., Red)], -100.)
}

/// `4 * (GREEN - SWIR_1) - (0.25 * NIR + 2.75 * SWIR_2)`
fn awei_nsh(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(&[(4., Green), (-4., Swir1), (-0.25, Nir), (-2.75, Swir2)], 0.)
}

/// `BLUE + 2.5 * GREEN - 1.5 * (NIR + SWIR_1) - 0.25 * SWIR_2`
fn awei_sh(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(
        &[(1., Blue), (2.5, Green), (-1.5, Nir), (-1.5, Swir1), (-0.25, Swir2)],
        0.,
    )
}

fn wi(inputs: &FormulaInputs) -> Result<Raster> {
    inputs.combine(
        &[(171., Green), (3., Red), (-70., Nir), (-45., Swir1), (-71., Swir2)],
        1.7204,
    )
}

/// `ln(1 - (NIR - SWIR_1)) / -ln(1 - (NIR - SWIR_1))`, i.e. -1 wherever defined.
fn lwci(inputs: &FormulaInputs) -> Result<Raster> {
    let nir = inputs.band(Nir)?;
    let swir = inputs.band(Swir1)?;
    let log_term = (1. - (nir - swir)).ln();
    Ok(masked_divide(&log_term, &-&log_term))
}

pub static CUSTOM_INDICES: &[CustomIndex] = &[
    CustomIndex {
        name: "TCBRI",
        long_name: "Tasseled Cap Brightness",
        domain: Domain::Soil,
        bands: &[Blue, Green, Red, Nir, Swir1, Swir2],
        suspect: false,
        formula: tcbri,
    },
    CustomIndex {
        name: "TCGRE",
        long_name: "Tasseled Cap Greenness",
        domain: Domain::Vegetation,
        bands: &[Blue, Green, Red, Nir, Swir1, Swir2],
        suspect: false,
        formula: tcgre,
    },
    CustomIndex {
        name: "TCWET",
        long_name: "Tasseled Cap Wetness",
        domain: Domain::Water,
        bands: &[Blue, Green, Red, Nir, Swir1, Swir2],
        suspect: false,
        formula: tcwet,
    },
    CustomIndex {
        name: "SCI",
        long_name: "Soil Cuirass Index",
        domain: Domain::Soil,
        bands: &[Green, Red],
        suspect: false,
        formula: sci,
    },
    CustomIndex {
        name: "AWEInsh",
        long_name: "Automated Water Extraction Index (no shadows)",
        domain: Domain::Water,
        bands: &[Green, Swir1, Nir, Swir2],
        suspect: false,
        formula: awei_nsh,
    },
    CustomIndex {
        name: "AWEIsh",
        long_name: "Automated Water Extraction Index (shadows)",
        domain: Domain::Water,
        bands: &[Blue, Green, Nir, Swir1, Swir2],
        suspect: false,
        formula: awei_sh,
    },
    CustomIndex {
        name: "WI",
        long_name: "Water Index (2015)",
        domain: Domain::Water,
        bands: &[Green, Red, Nir, Swir1, Swir2],
        suspect: false,
        formula: wi,
    },
    CustomIndex {
        name: "LWCI",
        long_name: "Leaf Water Content Index",
        domain: Domain::Vegetation,
        bands: &[Nir, Swir1],
        suspect: true,
        formula: lwci,
    },
];

pub fn find(name: &str) -> Option<&'static CustomIndex> {
    CUSTOM_INDICES.iter().find(|index| index.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rstest::{fixture, rstest};

    #[fixture]
    fn reflectances() -> BandArrays {
        [
            (Blue, 0.05),
            (Green, 0.08),
            (Red, 0.06),
            (Nir, 0.4),
            (Swir1, 0.2),
            (Swir2, 0.1),
        ]
        .into_iter()
        .map(|(band, value)| (band, Raster::new(band.to_string(), array![[value, value]])))
        .collect()
    }

    fn evaluate(name: &str, arrays: &BandArrays) -> Raster {
        find(name)
            .unwrap()
            .evaluate(&FormulaInputs::new(name, arrays))
            .unwrap()
    }

    #[rstest]
    fn tasseled_cap_brightness(reflectances: BandArrays) {
        let expected = 0.3037 * 0.05 + 0.2793 * 0.08 + 0.4743 * 0.06 + 0.5585 * 0.4
            + 0.5082 * 0.2
            + 0.1863 * 0.1;
        let result = evaluate("TCBRI", &reflectances);
        assert_abs_diff_eq!(result.get(&[0, 1]).unwrap(), expected, epsilon = 1e-12);
    }

    #[rstest]
    fn soil_cuirass(reflectances: BandArrays) {
        let result = evaluate("SCI", &reflectances);
        assert_abs_diff_eq!(result.get(&[0, 0]).unwrap(), 3. * 0.08 - 0.06 - 100., epsilon = 1e-12);
    }

    #[rstest]
    fn water_extraction(reflectances: BandArrays) {
        let nsh = evaluate("AWEInsh", &reflectances).get(&[0, 0]).unwrap();
        let sh = evaluate("AWEIsh", &reflectances).get(&[0, 0]).unwrap();
        let wi = evaluate("WI", &reflectances).get(&[0, 0]).unwrap();
        assert_abs_diff_eq!(nsh, 4. * (0.08 - 0.2) - (0.25 * 0.4 + 2.75 * 0.1), epsilon = 1e-12);
        assert_abs_diff_eq!(sh, 0.05 + 2.5 * 0.08 - 1.5 * (0.4 + 0.2) - 0.25 * 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(
            wi,
            1.7204 + 171. * 0.08 + 3. * 0.06 - 70. * 0.4 - 45. * 0.2 - 71. * 0.1,
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn leaf_water_content_is_constant(reflectances: BandArrays) {
        let result = evaluate("LWCI", &reflectances);
        assert!(result.data().iter().all(|value| *value == -1.));
        assert!(find("LWCI").unwrap().suspect);
    }

    #[rstest]
    fn declared_bands_are_sufficient(reflectances: BandArrays) {
        for index in CUSTOM_INDICES {
            let arrays: BandArrays = index
                .bands
                .iter()
                .map(|band| (*band, reflectances[band].clone()))
                .collect();
            assert!(index.evaluate(&FormulaInputs::new(index.name, &arrays)).is_ok());
        }
    }

    #[rstest]
    fn missing_bands_are_reported(reflectances: BandArrays) {
        let mut arrays = reflectances;
        arrays.remove(&Swir2);
        let err = find("TCWET")
            .unwrap()
            .evaluate(&FormulaInputs::new("TCWET", &arrays))
            .unwrap_err();
        assert_eq!(err.to_string(), "TCWET needs band SWIR_2 which was not provided");
    }
}
