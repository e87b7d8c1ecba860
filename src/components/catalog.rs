use serde::Serialize;
use std::{collections::BTreeMap, ops::Index};

use crate::{
    bands::{BandFamily, SarBand, SpectralBand},
    components::band::BandDefinition,
};

/// Per-product mapping of every member of a band family to its definition.
///
/// Keys are always the full family enumeration; absent bands are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCatalog<B: BandFamily> {
    bands: BTreeMap<B, Option<BandDefinition>>,
}

pub type SpectralCatalog = BandCatalog<SpectralBand>;
pub type SarCatalog = BandCatalog<SarBand>;

impl<B: BandFamily> Default for BandCatalog<B> {
    fn default() -> Self {
        Self {
            bands: B::ALL.iter().map(|band| (*band, None)).collect(),
        }
    }
}

impl<B: BandFamily> BandCatalog<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band(mut self, band: B, definition: BandDefinition) -> Self {
        self.set(band, Some(definition));
        self
    }

    /// Returns the previous definition.
    pub fn set(&mut self, band: B, definition: Option<BandDefinition>) -> Option<BandDefinition> {
        self.bands.insert(band, definition).flatten()
    }

    pub fn get(&self, band: B) -> Option<&BandDefinition> {
        self.bands.get(&band).and_then(Option::as_ref)
    }

    pub fn has_band(&self, band: B) -> bool {
        self.get(band).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (B, Option<&BandDefinition>)> {
        self.bands
            .iter()
            .map(|(band, definition)| (*band, definition.as_ref()))
    }

    /// Bands with a definition, in value order.
    pub fn available(&self) -> impl Iterator<Item = (B, &BandDefinition)> {
        self.bands
            .iter()
            .filter_map(|(band, definition)| definition.as_ref().map(|def| (*band, def)))
    }

    /// Bands whose definition reads the given source band id.
    pub fn find_by_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = B> + 'a {
        self.available()
            .filter(move |(_, definition)| definition.id() == id)
            .map(|(band, _)| band)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl<B: BandFamily> Index<B> for BandCatalog<B> {
    type Output = Option<BandDefinition>;

    fn index(&self, band: B) -> &Self::Output {
        // Every family member is inserted at construction.
        &self.bands[&band]
    }
}

impl<B: BandFamily> FromIterator<(B, BandDefinition)> for BandCatalog<B> {
    fn from_iter<T: IntoIterator<Item = (B, BandDefinition)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::default(), |catalog, (band, definition)| {
                catalog.with_band(band, definition)
            })
    }
}

impl SarCatalog {
    /// Despeckled bands can be produced whenever their speckled source exists.
    pub fn can_provide(&self, band: SarBand) -> bool {
        self.has_band(band) || self.has_band(band.to_speckled())
    }
}
