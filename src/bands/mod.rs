//! Sensor-agnostic band identifiers.
//!
//! Every family is a closed enum whose members carry a symbolic name
//! (`VRE_1`) and a canonical value (`VEGETATION_RED_EDGE_1`).
//! Spectral indices are not part of these families, see [crate::indexes::IndexName].

macro_rules! band_family {
    (
        $(#[$meta:meta])*
        $vis:vis enum $family:ident ($label:literal, $wrapper:ident) {
            $( $variant:ident => ($name:literal, $value:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $family {
            $( #[serde(rename = $value)] $variant ),+
        }

        impl $crate::bands::BandFamily for $family {
            const FAMILY: &'static str = $label;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            fn value(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn into_band(self) -> $crate::bands::Band {
                $crate::bands::Band::$wrapper(self)
            }

            fn from_band(band: &$crate::bands::Band) -> Option<Self> {
                match band {
                    $crate::bands::Band::$wrapper(inner) => Some(*inner),
                    _ => None,
                }
            }
        }

        impl PartialOrd for $family {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $family {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                use $crate::bands::BandFamily;
                self.value().cmp(other.value())
            }
        }

        impl std::fmt::Display for $family {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::bands::BandFamily;
                f.write_str(self.value())
            }
        }

        impl std::str::FromStr for $family {
            type Err = $crate::bands::BandError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                <Self as $crate::bands::BandFamily>::from_value(value)
            }
        }

        impl From<$family> for $crate::bands::Band {
            fn from(value: $family) -> Self {
                $crate::bands::Band::$wrapper(value)
            }
        }

        impl From<$family> for $crate::bands::Identifier {
            fn from(value: $family) -> Self {
                $crate::bands::Identifier::Band($crate::bands::Band::$wrapper(value))
            }
        }

        impl From<$family> for $crate::bands::RawBand {
            fn from(value: $family) -> Self {
                $crate::bands::RawBand::Identifier(value.into())
            }
        }
    };
}

mod classification;
mod dem;
mod sar;
mod spectral;

use std::{fmt::Display, hash::Hash};

use serde::{Deserialize, Serialize};

pub use classification::CloudBand;
pub use dem::DemBand;
pub use sar::{SarBand, DSPK_SUFFIX};
pub use spectral::SpectralBand;

use crate::indexes::IndexName;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BandError {
    #[error("{value:?} is not a valid {family} band value")]
    InvalidValue { family: &'static str, value: String },
    #[error("{found} can not be converted into a {family} band")]
    InvalidType { family: &'static str, found: String },
}

/// One item of a heterogeneous band request.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBand {
    Name(String),
    Number(f64),
    Identifier(Identifier),
}

impl Display for RawBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawBand::Name(name) => f.write_str(name),
            RawBand::Number(number) => write!(f, "{number}"),
            RawBand::Identifier(identifier) => write!(f, "{identifier}"),
        }
    }
}

impl From<&str> for RawBand {
    fn from(value: &str) -> Self {
        RawBand::Name(value.to_string())
    }
}

impl From<String> for RawBand {
    fn from(value: String) -> Self {
        RawBand::Name(value)
    }
}

impl From<f64> for RawBand {
    fn from(value: f64) -> Self {
        RawBand::Number(value)
    }
}

impl From<i64> for RawBand {
    fn from(value: i64) -> Self {
        RawBand::Number(value as f64)
    }
}

impl From<Identifier> for RawBand {
    fn from(value: Identifier) -> Self {
        RawBand::Identifier(value)
    }
}

impl From<Band> for RawBand {
    fn from(value: Band) -> Self {
        RawBand::Identifier(Identifier::Band(value))
    }
}

impl From<IndexName> for RawBand {
    fn from(value: IndexName) -> Self {
        RawBand::Identifier(Identifier::Index(value))
    }
}

/// Shared behaviour of the band identifier families.
pub trait BandFamily:
    Copy + Eq + Hash + Ord + std::fmt::Debug + Display + Serialize + Send + Sync + 'static
{
    const FAMILY: &'static str;
    /// Every member of the family, in declaration order.
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;
    fn value(&self) -> &'static str;
    fn into_band(self) -> Band;
    fn from_band(band: &Band) -> Option<Self>;

    /// Exact, case-sensitive lookup against canonical values only.
    fn from_value(value: &str) -> Result<Self, BandError> {
        Self::ALL
            .iter()
            .copied()
            .find(|band| band.value() == value)
            .ok_or_else(|| BandError::InvalidValue {
                family: Self::FAMILY,
                value: value.to_string(),
            })
    }

    /// Matches either the canonical value or the symbolic name.
    fn from_str_exact(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|band| band.value() == text || band.name() == text)
    }

    fn try_from_any(raw: &RawBand) -> Option<Self> {
        match raw {
            RawBand::Name(text) => Self::from_str_exact(text),
            RawBand::Identifier(Identifier::Band(band)) => Self::from_band(band),
            RawBand::Identifier(Identifier::Index(_)) | RawBand::Number(_) => None,
        }
    }

    /// Converts every item or fails with [BandError::InvalidType]
    /// on the first one that does not belong to this family.
    fn convert_from(raws: &[RawBand]) -> Result<Vec<Self>, BandError> {
        raws.iter()
            .map(|raw| {
                Self::try_from_any(raw).ok_or_else(|| BandError::InvalidType {
                    family: Self::FAMILY,
                    found: raw.to_string(),
                })
            })
            .collect()
    }
}

/// A concrete band: raw or lightly processed sensor data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Band {
    Spectral(SpectralBand),
    Sar(SarBand),
    Cloud(CloudBand),
    Dem(DemBand),
}

impl Band {
    pub fn name(&self) -> &'static str {
        match self {
            Band::Spectral(band) => band.name(),
            Band::Sar(band) => band.name(),
            Band::Cloud(band) => band.name(),
            Band::Dem(band) => band.name(),
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Band::Spectral(band) => band.value(),
            Band::Sar(band) => band.value(),
            Band::Cloud(band) => band.value(),
            Band::Dem(band) => band.value(),
        }
    }

    /// Every concrete band of every family.
    pub fn all() -> impl Iterator<Item = Band> {
        SpectralBand::ALL
            .iter()
            .map(|band| band.into_band())
            .chain(SarBand::ALL.iter().map(|band| band.into_band()))
            .chain(CloudBand::ALL.iter().map(|band| band.into_band()))
            .chain(DemBand::ALL.iter().map(|band| band.into_band()))
    }

    /// Canonical values and symbolic names of every concrete band.
    pub fn all_strings() -> impl Iterator<Item = &'static str> {
        Self::all().flat_map(|band| [band.value(), band.name()])
    }
}

impl PartialOrd for Band {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Band {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value()
            .cmp(other.value())
            .then_with(|| self.family_rank().cmp(&other.family_rank()))
    }
}

impl Band {
    fn family_rank(&self) -> u8 {
        match self {
            Band::Spectral(_) => 0,
            Band::Sar(_) => 1,
            Band::Cloud(_) => 2,
            Band::Dem(_) => 3,
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Anything a band request can resolve to.
///
/// Serialize only: identifiers coming from outside go through
/// [crate::resolver::Resolver] as a [RawBand].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Identifier {
    Band(Band),
    Index(IndexName),
}

impl Identifier {
    pub fn value(&self) -> &str {
        match self {
            Identifier::Band(band) => band.value(),
            Identifier::Index(index) => index,
        }
    }

    pub fn is_spectral(&self) -> bool {
        matches!(self, Identifier::Band(Band::Spectral(_)))
    }

    pub fn is_sar(&self) -> bool {
        matches!(self, Identifier::Band(Band::Sar(_)))
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Identifier::Band(Band::Cloud(_)))
    }

    pub fn is_dem(&self) -> bool {
        matches!(self, Identifier::Band(Band::Dem(_)))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Identifier::Index(_))
    }

    pub fn as_band(&self) -> Option<Band> {
        match self {
            Identifier::Band(band) => Some(*band),
            Identifier::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexName> {
        match self {
            Identifier::Index(index) => Some(index),
            Identifier::Band(_) => None,
        }
    }
}

impl From<Band> for Identifier {
    fn from(value: Band) -> Self {
        Identifier::Band(value)
    }
}

impl From<IndexName> for Identifier {
    fn from(value: IndexName) -> Self {
        Identifier::Index(value)
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Display order only.
impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Identifier::Band(lhs), Identifier::Band(rhs)) => lhs.cmp(rhs),
            _ => self
                .value()
                .cmp(other.value())
                .then_with(|| self.is_index().cmp(&other.is_index())),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Canonical values of a list of identifiers.
pub fn to_str<'a>(identifiers: impl IntoIterator<Item = &'a Identifier>) -> Vec<String> {
    identifiers
        .into_iter()
        .map(|identifier| identifier.value().to_string())
        .collect()
}
