use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
};

use crate::{
    bands::{Band, SpectralBand},
    components::Raster,
    config::RegistryConfig,
    deprecation::warn_once,
    errors::{EobandsError, Result},
    indexes::{
        custom::{self, CustomIndex, FormulaInputs},
        evaluator::retag,
        formula::Formula,
        library::{self, role_band, Domain, LibraryIndex},
        BandArrays, IndexError, IndexName, IndexParams, RegistryError,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Library,
    Custom,
    Alias,
    Derivative,
}

impl Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Provenance::Library => "library",
            Provenance::Custom => "custom",
            Provenance::Alias => "alias",
            Provenance::Derivative => "derivative",
        })
    }
}

/// Description of a registered index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexInfo {
    pub name: IndexName,
    pub provenance: Provenance,
    pub long_name: &'static str,
    pub domain: Domain,
    /// Formula text, `None` for local formulas.
    pub formula: Option<&'static str>,
    /// Library index an alias or a derivative evaluates.
    pub target: Option<IndexName>,
    pub suspect: bool,
}

#[derive(Debug)]
enum Entry {
    Library {
        def: &'static LibraryIndex,
        formula: Formula,
    },
    Custom(&'static CustomIndex),
    Alias {
        target: IndexName,
    },
    Derivative {
        target: IndexName,
        roles: Vec<(String, SpectralBand)>,
    },
}

impl Entry {
    fn provenance(&self) -> Provenance {
        match self {
            Entry::Library { .. } => Provenance::Library,
            Entry::Custom(_) => Provenance::Custom,
            Entry::Alias { .. } => Provenance::Alias,
            Entry::Derivative { .. } => Provenance::Derivative,
        }
    }
}

/// Every computable index, built once and read-only afterwards.
#[derive(Debug)]
pub struct IndexRegistry {
    entries: BTreeMap<IndexName, Entry>,
    required_bands: HashMap<IndexName, Vec<SpectralBand>>,
    constants: BTreeMap<String, f64>,
    forced_constants: BTreeMap<String, BTreeMap<String, f64>>,
}

impl IndexRegistry {
    /// Merges the formula library, the local formulas and the configured
    /// aliases and derivatives.
    ///
    /// Fails on name collisions (between indices or with any band value
    /// or name), on aliases and derivatives whose target is not a library
    /// index, and on derivatives leaving a band role of their target unmapped.
    pub fn build(config: &RegistryConfig) -> Result<Self> {
        let mut registry = Self {
            entries: BTreeMap::new(),
            required_bands: HashMap::new(),
            constants: library::DEFAULT_CONSTANTS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .chain(config.constants.clone())
                .collect(),
            forced_constants: config.forced_constants.clone(),
        };

        for def in library::LIBRARY {
            let formula = Formula::parse(def.formula)?;
            registry.register(def.short_name, Entry::Library { def, formula })?;
        }
        for index in custom::CUSTOM_INDICES {
            registry.register(index.name, Entry::Custom(index))?;
        }
        for (alias, target) in &config.aliases {
            let target = registry.library_target(alias, target)?;
            registry.register(alias, Entry::Alias { target })?;
        }
        for derivative in &config.derivatives {
            let target = registry.library_target(&derivative.name, &derivative.formula)?;
            registry.check_roles(&derivative.name, &target, &derivative.roles)?;
            registry.register(
                &derivative.name,
                Entry::Derivative {
                    target,
                    roles: derivative.roles.clone(),
                },
            )?;
        }
        for (index, constants) in &config.forced_constants {
            let target = registry.library_target("forced constants", index)?;
            registry.check_constants(&target, constants.keys())?;
        }

        let band_strings: HashSet<&str> = Band::all_strings().collect();
        if let Some(name) = registry
            .entries
            .keys()
            .find(|name| band_strings.contains(name.as_str()))
        {
            return Err(RegistryError::NameCollision {
                name: name.to_string(),
                first: "band".to_string(),
                second: registry.entries[name].provenance().to_string(),
            }
            .into());
        }

        let required_bands = registry
            .entries
            .keys()
            .map(|name| (name.clone(), registry.resolve_required_bands(name)))
            .collect();
        registry.required_bands = required_bands;

        let counts = registry
            .entries
            .values()
            .map(Entry::provenance)
            .counts();
        info!(
            "index registry built: {} indices ({} library, {} custom, {} aliases, {} derivatives)",
            registry.entries.len(),
            counts.get(&Provenance::Library).unwrap_or(&0),
            counts.get(&Provenance::Custom).unwrap_or(&0),
            counts.get(&Provenance::Alias).unwrap_or(&0),
            counts.get(&Provenance::Derivative).unwrap_or(&0),
        );
        Ok(registry)
    }

    fn register(&mut self, name: &str, entry: Entry) -> Result<()> {
        if let Some(existing) = self.entries.get(name) {
            return Err(RegistryError::NameCollision {
                name: name.to_string(),
                first: existing.provenance().to_string(),
                second: entry.provenance().to_string(),
            }
            .into());
        }
        self.entries.insert(IndexName::new(name), entry);
        Ok(())
    }

    fn library_target(&self, name: &str, target: &str) -> Result<IndexName> {
        match self.entries.get_key_value(target) {
            Some((target, Entry::Library { .. })) => Ok(target.clone()),
            _ => Err(RegistryError::UnknownTarget {
                name: name.to_string(),
                target: target.to_string(),
            }
            .into()),
        }
    }

    fn check_roles(
        &self,
        name: &str,
        target: &IndexName,
        roles: &[(String, SpectralBand)],
    ) -> Result<()> {
        let def = self.library_def(target)?;
        if let Some(role) = def
            .bands
            .iter()
            .filter(|role| role_band(role).is_some())
            .find(|role| !roles.iter().any(|(mapped, _)| mapped.as_str() == **role))
        {
            return Err(RegistryError::UnmappedRole {
                name: name.to_string(),
                target: target.to_string(),
                role: role.to_string(),
            }
            .into());
        }
        match roles.iter().find(|(mapped, _)| {
            role_band(mapped).is_none() || !def.bands.contains(&mapped.as_str())
        }) {
            Some((role, _)) => Err(RegistryError::UnusedRole {
                name: name.to_string(),
                target: target.to_string(),
                role: role.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Forced constants must be scalars the target formula reads.
    fn check_constants<'c>(
        &self,
        target: &IndexName,
        mut constants: impl Iterator<Item = &'c String>,
    ) -> Result<()> {
        let def = self.library_def(target)?;
        match constants.find(|constant| {
            role_band(constant).is_some() || !def.bands.contains(&constant.as_str())
        }) {
            Some(constant) => Err(RegistryError::UnusedConstant {
                index: target.to_string(),
                constant: constant.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn library_def(&self, name: &str) -> Result<&'static LibraryIndex> {
        match self.entries.get(name) {
            Some(Entry::Library { def, .. }) => Ok(*def),
            _ => Err(IndexError::NotImplemented(name.to_string()).into()),
        }
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| IndexError::NotImplemented(name.to_string()).into())
    }

    fn resolve_required_bands(&self, name: &IndexName) -> Vec<SpectralBand> {
        match &self.entries[name] {
            Entry::Derivative { roles, .. } => roles.iter().map(|(_, band)| *band).collect(),
            Entry::Alias { target } => self.resolve_required_bands(target),
            Entry::Custom(index) => index.bands.to_vec(),
            Entry::Library { def, .. } => def
                .bands
                .iter()
                .filter_map(|role| role_band(role))
                .unique()
                .collect(),
        }
    }

    /// Every registered index, in name order.
    pub fn all_index_names(&self) -> impl Iterator<Item = &IndexName> {
        self.entries.keys()
    }

    pub fn is_index(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn index_name(&self, name: &str) -> Option<IndexName> {
        self.entries.get_key_value(name).map(|(name, _)| name.clone())
    }

    /// Concrete bands [IndexRegistry::compute] reads for `name`.
    pub fn required_bands(&self, name: &str) -> Result<&[SpectralBand]> {
        self.required_bands
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| IndexError::NotImplemented(name.to_string()).into())
    }

    pub fn info(&self, name: &str) -> Result<IndexInfo> {
        let index_name = self
            .index_name(name)
            .ok_or_else(|| IndexError::NotImplemented(name.to_string()))?;
        let (def, target) = match self.entry(name)? {
            Entry::Custom(index) => {
                return Ok(IndexInfo {
                    name: index_name,
                    provenance: Provenance::Custom,
                    long_name: index.long_name,
                    domain: index.domain,
                    formula: None,
                    target: None,
                    suspect: index.suspect,
                })
            }
            Entry::Library { def, .. } => (*def, None),
            Entry::Alias { target } | Entry::Derivative { target, .. } => {
                (self.library_def(target)?, Some(target.clone()))
            }
        };
        Ok(IndexInfo {
            provenance: self.entry(name)?.provenance(),
            name: index_name,
            long_name: def.long_name,
            domain: def.domain,
            formula: Some(def.formula),
            target,
            suspect: false,
        })
    }

    /// Evaluates `name` over `arrays`.
    ///
    /// `params` supplies formula constants (`alpha`, `L`, ...); keys naming a
    /// band role are ignored, and constants forced on the evaluated formula
    /// always win. The result is named after the index and carries the
    /// metadata of its first required band.
    pub fn compute(&self, name: &str, arrays: &BandArrays, params: &IndexParams) -> Result<Raster> {
        let entry = self.entry(name)?;
        let template = self.check_inputs(name, arrays)?;
        debug!("computing {name} ({})", entry.provenance());

        let result = match entry {
            Entry::Library { def, formula } => {
                let roles = Self::library_roles(name, def, arrays)?;
                self.evaluate_library(name, def, formula, &roles, params, template)?
            }
            Entry::Alias { target } => {
                warn_once(name, &format!("index {name} is an alias of {target}"));
                let (def, formula) = self.library_formula(target)?;
                let roles = Self::library_roles(name, def, arrays)?;
                self.evaluate_library(name, def, formula, &roles, params, template)?
            }
            Entry::Derivative { target, roles } => {
                let (def, formula) = self.library_formula(target)?;
                let roles = roles
                    .iter()
                    .map(|(role, band)| {
                        Self::band(name, arrays, *band).map(|raster| (role.as_str(), raster))
                    })
                    .collect::<Result<HashMap<_, _>>>()?;
                self.evaluate_library(name, def, formula, &roles, params, template)?
            }
            Entry::Custom(index) => index.evaluate(&FormulaInputs::new(name, arrays))?,
        };
        Ok(retag(result, name, template))
    }

    /// [IndexRegistry::compute] for several indices at once, in parallel.
    pub fn compute_many(
        &self,
        names: &[&str],
        arrays: &BandArrays,
        params: &IndexParams,
    ) -> Result<Vec<Raster>> {
        names
            .par_iter()
            .map(|name| self.compute(name, arrays, params))
            .collect()
    }

    /// First required band, after checking every required band is
    /// present with a common shape.
    fn check_inputs<'a>(&self, name: &str, arrays: &'a BandArrays) -> Result<&'a Raster> {
        let rasters = self
            .required_bands(name)?
            .iter()
            .map(|band| Self::band(name, arrays, *band))
            .collect::<Result<Vec<_>>>()?;
        let (template, rest) = rasters
            .split_first()
            .ok_or_else(|| IndexError::NotImplemented(name.to_string()))?;
        if let Some(other) = rest.iter().find(|raster| raster.shape() != template.shape()) {
            return Err(EobandsError::ShapeMismatch {
                expected: template.shape().to_vec(),
                found: other.shape().to_vec(),
            });
        }
        Ok(*template)
    }

    fn band<'a>(name: &str, arrays: &'a BandArrays, band: SpectralBand) -> Result<&'a Raster> {
        arrays.get(&band).ok_or_else(|| {
            IndexError::MissingBand {
                index: name.to_string(),
                band,
            }
            .into()
        })
    }

    fn library_formula(&self, name: &str) -> Result<(&'static LibraryIndex, &Formula)> {
        match self.entries.get(name) {
            Some(Entry::Library { def, formula }) => Ok((*def, formula)),
            _ => Err(IndexError::NotImplemented(name.to_string()).into()),
        }
    }

    fn library_roles<'a>(
        name: &str,
        def: &LibraryIndex,
        arrays: &'a BandArrays,
    ) -> Result<HashMap<&'static str, &'a Raster>> {
        def.bands
            .iter()
            .filter_map(|role| role_band(role).map(|band| (*role, band)))
            .map(|(role, band)| Self::band(name, arrays, band).map(|raster| (role, raster)))
            .collect()
    }

    fn evaluate_library(
        &self,
        name: &str,
        def: &LibraryIndex,
        formula: &Formula,
        roles: &HashMap<&str, &Raster>,
        params: &IndexParams,
        template: &Raster,
    ) -> Result<Raster> {
        let mut scalars = self.constants.clone();
        scalars.extend(
            params
                .iter()
                .filter(|(key, _)| role_band(key).is_none())
                .map(|(key, value)| (key.clone(), *value)),
        );
        if let Some(forced) = self.forced_constants.get(def.short_name) {
            scalars.extend(forced.iter().map(|(key, value)| (key.clone(), *value)));
        }
        formula.evaluate(name, roles, &scalars, template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bands::BandFamily,
        config::DerivativeConfig,
        indexes::{build_registry, evaluator::normalized_difference},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> &'static IndexRegistry {
        build_registry().unwrap()
    }

    fn raster(band: SpectralBand, values: Array2<f64>) -> Raster {
        Raster::new(band.value(), values)
    }

    /// Every optical role band with a distinct reflectance.
    #[fixture]
    fn arrays() -> BandArrays {
        library::ROLES
            .iter()
            .map(|(_, band)| *band)
            .unique()
            .enumerate()
            .map(|(i, band)| {
                let value = 0.05 + 0.03 * i as f64;
                (band, raster(band, array![[value, value * 2.], [value / 2., 0.]]))
            })
            .collect()
    }

    fn value(raster: &Raster) -> f64 {
        raster.get(&[0, 0]).unwrap()
    }

    #[rstest]
    fn index_names_never_shadow_bands(registry: &IndexRegistry) {
        let band_strings: HashSet<&str> = Band::all_strings().collect();
        assert!(registry
            .all_index_names()
            .all(|name| !band_strings.contains(name.as_str())));
        assert!(registry.all_index_names().count() > 100);
    }

    #[rstest]
    fn ndvi_is_a_normalized_difference(registry: &IndexRegistry, arrays: BandArrays) {
        assert_eq!(
            registry.required_bands("NDVI").unwrap(),
            &[SpectralBand::Nir, SpectralBand::Red]
        );
        let ndvi = registry.compute("NDVI", &arrays, &IndexParams::new()).unwrap();
        let expected = normalized_difference(&arrays[&SpectralBand::Nir], &arrays[&SpectralBand::Red]);
        assert_eq!(ndvi.mask(), expected.mask());
        for (computed, expected) in ndvi.data().iter().zip(expected.data()) {
            assert_abs_diff_eq!(*computed, *expected, epsilon = 1e-12);
        }
        // 0 / 0 in the last pixel
        assert_eq!(ndvi.get(&[1, 1]), None);
    }

    #[rstest]
    #[case("NDRE2", &[SpectralBand::Nir, SpectralBand::Vre2])]
    #[case("NDRE3", &[SpectralBand::Nir, SpectralBand::Vre3])]
    #[case("CI21", &[SpectralBand::Vre3, SpectralBand::Vre1])]
    #[case("RDI", &[SpectralBand::Swir2, SpectralBand::NarrowNir])]
    #[case("WV_WI", &[SpectralBand::Ca, SpectralBand::Wv])]
    fn derivative_bands_keep_declaration_order(
        registry: &IndexRegistry,
        #[case] name: &str,
        #[case] expected: &[SpectralBand],
    ) {
        assert_eq!(registry.required_bands(name).unwrap(), expected);
    }

    #[rstest]
    fn derivatives_substitute_roles(registry: &IndexRegistry, arrays: BandArrays) {
        let ndre2 = registry.compute("NDRE2", &arrays, &IndexParams::new()).unwrap();
        let expected = normalized_difference(&arrays[&SpectralBand::Nir], &arrays[&SpectralBand::Vre2]);
        assert_abs_diff_eq!(value(&ndre2), value(&expected), epsilon = 1e-12);
        assert_eq!(ndre2.name(), "NDRE2");

        let rdi = registry.compute("RDI", &arrays, &IndexParams::new()).unwrap();
        assert_abs_diff_eq!(
            value(&rdi),
            value(&arrays[&SpectralBand::Swir2]) / value(&arrays[&SpectralBand::NarrowNir]),
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn derivatives_ignore_unmapped_arrays(registry: &IndexRegistry) {
        let arrays = BandArrays::from([
            (SpectralBand::Nir, raster(SpectralBand::Nir, array![[0.4]])),
            (SpectralBand::Vre2, raster(SpectralBand::Vre2, array![[0.2]])),
        ]);
        let ndre2 = registry.compute("NDRE2", &arrays, &IndexParams::new()).unwrap();
        assert_abs_diff_eq!(value(&ndre2), 0.2 / 0.6, epsilon = 1e-12);
    }

    #[rstest]
    fn aliases_evaluate_their_target(registry: &IndexRegistry, arrays: BandArrays) {
        assert_eq!(
            registry.required_bands("NDRE1").unwrap(),
            registry.required_bands("NDREI").unwrap()
        );
        let alias = registry.compute("NDRE1", &arrays, &IndexParams::new()).unwrap();
        let target = registry.compute("NDREI", &arrays, &IndexParams::new()).unwrap();
        assert_eq!(alias.data(), target.data());
        assert_eq!(alias.name(), "NDRE1");

        let info = registry.info("WV_SI").unwrap();
        assert_eq!(info.provenance, Provenance::Alias);
        assert_eq!(info.target.as_deref().map(|name| &**name), Some("NDSIWV"));
    }

    #[rstest]
    #[case("SAVI")]
    #[case("IBI")]
    fn forced_constants_ignore_caller_values(
        registry: &IndexRegistry,
        arrays: BandArrays,
        #[case] name: &str,
    ) {
        let default = registry.compute(name, &arrays, &IndexParams::new()).unwrap();
        let caller = IndexParams::from([("L".to_string(), 2.)]);
        let overridden = registry.compute(name, &arrays, &caller).unwrap();
        assert_eq!(default.data(), overridden.data());
    }

    #[rstest]
    fn savi_uses_half_soil_brightness(registry: &IndexRegistry, arrays: BandArrays) {
        let savi = registry.compute("SAVI", &arrays, &IndexParams::new()).unwrap();
        let (nir, red) = (value(&arrays[&SpectralBand::Nir]), value(&arrays[&SpectralBand::Red]));
        assert_abs_diff_eq!(value(&savi), 1.5 * (nir - red) / (nir + red + 0.5), epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.1)]
    #[case(0.2)]
    fn alpha_is_forwarded(registry: &IndexRegistry, arrays: BandArrays, #[case] alpha: f64) {
        let params = IndexParams::from([("alpha".to_string(), alpha)]);
        let wdrvi = registry.compute("WDRVI", &arrays, &params).unwrap();
        let (nir, red) = (value(&arrays[&SpectralBand::Nir]), value(&arrays[&SpectralBand::Red]));
        assert_abs_diff_eq!(
            value(&wdrvi),
            (alpha * nir - red) / (alpha * nir + red),
            epsilon = 1e-12
        );
    }

    #[rstest]
    fn role_named_params_do_not_replace_bands(registry: &IndexRegistry, arrays: BandArrays) {
        let params = IndexParams::from([("N".to_string(), 100.)]);
        let plain = registry.compute("NDVI", &arrays, &IndexParams::new()).unwrap();
        assert_eq!(registry.compute("NDVI", &arrays, &params).unwrap(), plain);
    }

    #[rstest]
    fn required_bands_are_sufficient_for_every_index(registry: &IndexRegistry, arrays: BandArrays) {
        for name in registry.all_index_names() {
            let required: BandArrays = registry
                .required_bands(name)
                .unwrap()
                .iter()
                .map(|band| (*band, arrays[band].clone()))
                .collect();
            let result = registry.compute(name, &required, &IndexParams::new());
            assert!(result.is_ok(), "{name}: {:?}", result.err());
            assert_eq!(result.unwrap().shape(), &[2, 2]);
        }
    }

    #[rstest]
    fn unknown_indices_are_not_implemented(registry: &IndexRegistry, arrays: BandArrays) {
        let err = registry.compute("NOPE", &arrays, &IndexParams::new()).unwrap_err();
        assert!(matches!(err, EobandsError::Index(IndexError::NotImplemented(name)) if name == "NOPE"));
        assert!(registry.required_bands("NOPE").is_err());
        assert!(!registry.is_index("ndvi"));
    }

    #[rstest]
    fn missing_bands_propagate(registry: &IndexRegistry, mut arrays: BandArrays) {
        arrays.remove(&SpectralBand::Red);
        let err = registry.compute("NDVI", &arrays, &IndexParams::new()).unwrap_err();
        assert!(matches!(
            err,
            EobandsError::Index(IndexError::MissingBand { band: SpectralBand::Red, .. })
        ));
    }

    #[rstest]
    fn mismatched_shapes_are_rejected(registry: &IndexRegistry, mut arrays: BandArrays) {
        arrays.insert(SpectralBand::Red, raster(SpectralBand::Red, array![[0.1]]));
        let err = registry.compute("NDVI", &arrays, &IndexParams::new()).unwrap_err();
        assert!(matches!(err, EobandsError::ShapeMismatch { .. }));
    }

    #[rstest]
    fn results_carry_first_band_metadata(registry: &IndexRegistry, mut arrays: BandArrays) {
        if let Some(nir) = arrays.get_mut(&SpectralBand::Nir) {
            nir.metadata_mut().insert("crs", "EPSG:32633");
        }
        let ndvi = registry.compute("NDVI", &arrays, &IndexParams::new()).unwrap();
        assert_eq!(ndvi.name(), "NDVI");
        assert_eq!(ndvi.metadata().get("crs").unwrap(), "EPSG:32633");
        let ndwi = registry.compute("NDWI", &arrays, &IndexParams::new()).unwrap();
        assert!(ndwi.metadata().is_empty());
    }

    #[rstest]
    fn compute_many_keeps_request_order(registry: &IndexRegistry, arrays: BandArrays) {
        let names = ["NDVI", "TCBRI", "NDRE2", "BSI"];
        let results = registry.compute_many(&names, &arrays, &IndexParams::new()).unwrap();
        assert_eq!(results.iter().map(Raster::name).collect_vec(), names);
    }

    #[rstest]
    fn custom_info(registry: &IndexRegistry) {
        let info = registry.info("LWCI").unwrap();
        assert_eq!(info.provenance, Provenance::Custom);
        assert!(info.suspect && info.formula.is_none());
        assert_eq!(registry.info("NDVI").unwrap().formula, Some("(N - R)/(N + R)"));
    }

    fn with_config(edit: impl FnOnce(&mut RegistryConfig)) -> Result<IndexRegistry> {
        let mut config = RegistryConfig::builtin();
        edit(&mut config);
        IndexRegistry::build(&config)
    }

    #[rstest]
    fn colliding_names_are_fatal() {
        let err = with_config(|config| {
            config.aliases.insert("NDVI".into(), "NDWI".into());
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EobandsError::Registry(RegistryError::NameCollision { ref first, .. }) if first == "library"
        ));

        let err = with_config(|config| {
            config.aliases.insert("VEGETATION_RED_EDGE_1".into(), "NDVI".into());
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EobandsError::Registry(RegistryError::NameCollision { ref first, .. }) if first == "band"
        ));
    }

    #[rstest]
    fn aliases_must_target_library_indices() {
        let err = with_config(|config| {
            config.aliases.insert("OLD".into(), "TCBRI".into());
        })
        .unwrap_err();
        assert!(matches!(err, EobandsError::Registry(RegistryError::UnknownTarget { .. })));
    }

    #[rstest]
    fn derivatives_must_map_every_band_role() {
        let err = with_config(|config| {
            config.derivatives.push(DerivativeConfig {
                name: "HALF".into(),
                formula: "NDVI".into(),
                roles: vec![("N".into(), SpectralBand::NarrowNir)],
            });
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "derivative \"HALF\" leaves role \"R\" of NDVI unmapped"
        );
    }

    #[rstest]
    fn forced_constants_must_name_library_indices() {
        let err = with_config(|config| {
            config.forced_constants.insert("SOMETHING".into(), BTreeMap::new());
        })
        .unwrap_err();
        assert!(matches!(err, EobandsError::Registry(RegistryError::UnknownTarget { .. })));
    }

    #[rstest]
    fn derivatives_must_not_map_unread_roles() {
        let err = with_config(|config| {
            config.derivatives.push(DerivativeConfig {
                name: "WIDE".into(),
                formula: "NDVI".into(),
                roles: vec![
                    ("N".into(), SpectralBand::NarrowNir),
                    ("R".into(), SpectralBand::Red),
                    ("S1".into(), SpectralBand::Swir1),
                ],
            });
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "derivative \"WIDE\" maps role \"S1\" which NDVI does not read"
        );
    }

    #[rstest]
    #[case("SAVI", "gamma")]
    #[case("SAVI", "N")]
    #[case("NDVI", "L")]
    fn forced_constants_must_be_read_by_their_index(#[case] index: &str, #[case] constant: &str) {
        let err = with_config(|config| {
            config
                .forced_constants
                .entry(index.into())
                .or_default()
                .insert(constant.into(), 1.);
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EobandsError::Registry(RegistryError::UnusedConstant { index: ref found, constant: ref name })
                if found == index && name == constant
        ));
    }

    #[rstest]
    fn builtin_derivatives_need_exactly_their_mapped_bands(registry: &IndexRegistry) {
        for derivative in RegistryConfig::builtin().derivatives {
            let expected = derivative.roles.iter().map(|(_, band)| *band).collect_vec();
            assert_eq!(registry.required_bands(&derivative.name).unwrap(), expected);
        }
    }
}
