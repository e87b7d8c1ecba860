//! Generic spectral index library.
//!
//! Formulas are written over abstract roles (`R`, `N`, `S1`, ...) mapped
//! onto concrete bands by [role_band]. Identifiers that are not roles are
//! scalar constants, defaulted by [DEFAULT_CONSTANTS].

use serde::{Deserialize, Serialize};

use crate::bands::SpectralBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Vegetation,
    Water,
    Burn,
    Soil,
    Urban,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryIndex {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub domain: Domain,
    pub formula: &'static str,
    /// Roles and constants the formula reads, in declared order.
    pub bands: &'static [&'static str],
}

const fn index(
    short_name: &'static str,
    long_name: &'static str,
    domain: Domain,
    formula: &'static str,
    bands: &'static [&'static str],
) -> LibraryIndex {
    LibraryIndex {
        short_name,
        long_name,
        domain,
        formula,
        bands,
    }
}

/// Role letters and the concrete band playing them.
pub const ROLES: &[(&str, SpectralBand)] = &[
    ("A", SpectralBand::Ca),
    ("B", SpectralBand::Blue),
    ("G1", SpectralBand::Green1),
    ("G", SpectralBand::Green),
    ("Y", SpectralBand::Yellow),
    ("R", SpectralBand::Red),
    ("RE1", SpectralBand::Vre1),
    ("RE2", SpectralBand::Vre2),
    ("RE3", SpectralBand::Vre3),
    ("N", SpectralBand::Nir),
    ("N2", SpectralBand::NarrowNir),
    ("WV", SpectralBand::Wv),
    ("S1", SpectralBand::Swir1),
    ("S2", SpectralBand::Swir2),
    ("T", SpectralBand::Tir1),
    ("T1", SpectralBand::Tir1),
    ("T2", SpectralBand::Tir2),
];

/// `None` for scalar constants.
pub fn role_band(role: &str) -> Option<SpectralBand> {
    ROLES
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, band)| *band)
}

/// First role played by `band`.
pub fn band_role(band: SpectralBand) -> Option<&'static str> {
    ROLES
        .iter()
        .find(|(_, candidate)| *candidate == band)
        .map(|(role, _)| *role)
}

pub const DEFAULT_CONSTANTS: &[(&str, f64)] = &[
    ("L", 1.0),
    ("g", 2.5),
    ("C1", 6.0),
    ("C2", 7.5),
    ("gamma", 1.0),
    ("alpha", 0.1),
    ("omega", 2.0),
];

pub fn find(short_name: &str) -> Option<&'static LibraryIndex> {
    LIBRARY.iter().find(|index| index.short_name == short_name)
}

use Domain::*;

#[rustfmt::skip]
pub static LIBRARY: &[LibraryIndex] = &[
    // vegetation
    index("NDVI", "Normalized Difference Vegetation Index", Vegetation,
        "(N - R)/(N + R)", &["N", "R"]),
    index("GNDVI", "Green Normalized Difference Vegetation Index", Vegetation,
        "(N - G)/(N + G)", &["N", "G"]),
    index("BNDVI", "Blue Normalized Difference Vegetation Index", Vegetation,
        "(N - B)/(N + B)", &["N", "B"]),
    index("EVI", "Enhanced Vegetation Index", Vegetation,
        "g * (N - R) / (N + C1 * R - C2 * B + L)", &["g", "N", "R", "C1", "C2", "B", "L"]),
    index("EVI2", "Two-Band Enhanced Vegetation Index", Vegetation,
        "g * (N - R) / (N + 2.4 * R + L)", &["g", "N", "R", "L"]),
    index("SAVI", "Soil-Adjusted Vegetation Index", Vegetation,
        "(1.0 + L) * (N - R) / (N + R + L)", &["L", "N", "R"]),
    index("OSAVI", "Optimized Soil-Adjusted Vegetation Index", Vegetation,
        "(N - R) / (N + R + 0.16)", &["N", "R"]),
    index("MSAVI", "Modified Soil-Adjusted Vegetation Index", Vegetation,
        "0.5 * (2.0 * N + 1 - (((2 * N + 1) ** 2) - 8 * (N - R)) ** 0.5)", &["N", "R"]),
    index("WDRVI", "Wide Dynamic Range Vegetation Index", Vegetation,
        "(alpha * N - R) / (alpha * N + R)", &["alpha", "N", "R"]),
    index("ARVI", "Atmospherically Resistant Vegetation Index", Vegetation,
        "(N - (R - gamma * (R - B))) / (N + (R - gamma * (R - B)))", &["N", "R", "gamma", "B"]),
    index("GARI", "Green Atmospherically Resistant Vegetation Index", Vegetation,
        "(N - (G - (gamma * (B - R))))/(N - (G + (gamma * (B - R))))", &["N", "G", "gamma", "B", "R"]),
    index("NIRv", "Near-Infrared Reflectance of Vegetation", Vegetation,
        "((N - R) / (N + R)) * N", &["N", "R"]),
    index("CIG", "Chlorophyll Index Green", Vegetation,
        "(N / G) - 1.0", &["N", "G"]),
    index("CIRE", "Chlorophyll Index Red Edge", Vegetation,
        "(N / RE1) - 1", &["N", "RE1"]),
    index("GRVI", "Green Ratio Vegetation Index", Vegetation,
        "N/G", &["N", "G"]),
    index("SR", "Simple Ratio", Vegetation,
        "N/R", &["N", "R"]),
    index("DVI", "Difference Vegetation Index", Vegetation,
        "N - R", &["N", "R"]),
    index("RDVI", "Renormalized Difference Vegetation Index", Vegetation,
        "(N - R) / ((N + R) ** 0.5)", &["N", "R"]),
    index("NLI", "Non-Linear Vegetation Index", Vegetation,
        "((N ** 2) - R)/((N ** 2) + R)", &["N", "R"]),
    index("MNLI", "Modified Non-Linear Vegetation Index", Vegetation,
        "(1 + L)*((N ** 2) - R)/((N ** 2) + R + L)", &["L", "N", "R"]),
    index("GEMI", "Global Environment Monitoring Index", Vegetation,
        "((2.0*((N ** 2.0)-(R ** 2.0)) + 1.5*N + 0.5*R)/(N + R + 0.5))*(1.0 - 0.25*((2.0 * ((N ** 2.0) - (R ** 2)) + 1.5 * N + 0.5 * R)/(N + R + 0.5)))-((R - 0.125)/(1 - R))",
        &["N", "R"]),
    index("NGRDI", "Normalized Green Red Difference Index", Vegetation,
        "(G - R) / (G + R)", &["G", "R"]),
    index("RGRI", "Red-Green Ratio Index", Vegetation,
        "R/G", &["R", "G"]),
    index("VARI", "Visible Atmospherically Resistant Index", Vegetation,
        "(G - R) / (G + R - B)", &["G", "R", "B"]),
    index("GLI", "Green Leaf Index", Vegetation,
        "(2.0 * G - R - B) / (2.0 * G + R + B)", &["G", "R", "B"]),
    index("ExG", "Excess Green Index", Vegetation,
        "2 * G - R - B", &["G", "R", "B"]),
    index("ExR", "Excess Red Index", Vegetation,
        "1.3 * R - G", &["R", "G"]),
    index("ExGR", "ExG - ExR Vegetation Index", Vegetation,
        "(2.0 * G - R - B) - (1.3 * R - G)", &["G", "R", "B"]),
    index("TGI", "Triangular Greenness Index", Vegetation,
        "- 0.5 * (190 * (R - G) - 120 * (R - B))", &["R", "G", "B"]),
    index("CVI", "Chlorophyll Vegetation Index", Vegetation,
        "(N * R) / (G ** 2.0)", &["N", "R", "G"]),
    index("NormNIR", "Normalized NIR", Vegetation,
        "N/(N + G + R)", &["N", "G", "R"]),
    index("SLAVI", "Specific Leaf Area Vegetation Index", Vegetation,
        "N/(R + S2)", &["N", "R", "S2"]),
    index("NDREI", "Normalized Difference Red Edge Index", Vegetation,
        "(N - RE1) / (N + RE1)", &["N", "RE1"]),
    index("MCARI", "Modified Chlorophyll Absorption in Reflectance Index", Vegetation,
        "((RE1 - R) - 0.2 * (RE1 - G)) * (RE1 / R)", &["RE1", "R", "G"]),
    index("TCARI", "Transformed Chlorophyll Absorption in Reflectance Index", Vegetation,
        "3 * ((RE1 - R) - 0.2 * (RE1 - G) * (RE1 / R))", &["RE1", "R", "G"]),
    index("TCARIOSAVI", "TCARI/OSAVI Ratio", Vegetation,
        "(3 * ((RE1 - R) - 0.2 * (RE1 - G) * (RE1 / R))) / (1.16 * (N - R) / (N + R + 0.16))",
        &["RE1", "R", "G", "N"]),
    index("MTCI", "MERIS Terrestrial Chlorophyll Index", Vegetation,
        "(RE2 - RE1) / (RE1 - R)", &["RE2", "RE1", "R"]),
    index("IRECI", "Inverted Red-Edge Chlorophyll Index", Vegetation,
        "(RE3 - R) / (RE1 / RE2)", &["RE3", "R", "RE1", "RE2"]),
    index("S2REP", "Sentinel-2 Red-Edge Position", Vegetation,
        "705.0 + 35.0 * ((((RE3 + R) / 2.0) - RE1) / (RE2 - RE1))", &["RE3", "R", "RE1", "RE2"]),
    index("TRRVI", "Transformed Red Range Vegetation Index", Vegetation,
        "((RE2 - R) / (RE2 + R)) / (((N - R) / (N + R)) + 1.0)", &["RE2", "R", "N"]),
    index("PSRI", "Plant Senescing Reflectance Index", Vegetation,
        "(R - B)/RE2", &["R", "B", "RE2"]),
    index("SIPI", "Structure Insensitive Pigment Index", Vegetation,
        "(N - A) / (N - R)", &["N", "A", "R"]),
    index("SeLI", "Sentinel-2 LAI Green Index", Vegetation,
        "(N2 - RE1) / (N2 + RE1)", &["N2", "RE1"]),
    index("NDMI", "Normalized Difference Moisture Index", Vegetation,
        "(N - S1)/(N + S1)", &["N", "S1"]),
    index("MSI", "Moisture Stress Index", Vegetation,
        "S1/N", &["S1", "N"]),
    index("GVMI", "Global Vegetation Moisture Index", Vegetation,
        "((N + 0.1) - (S2 + 0.02)) / ((N + 0.1) + (S2 + 0.02))", &["N", "S2"]),
    index("DSWI1", "Disease-Water Stress Index 1", Vegetation,
        "N/S1", &["N", "S1"]),
    index("DSWI2", "Disease-Water Stress Index 2", Vegetation,
        "S1/G", &["S1", "G"]),
    index("DSWI3", "Disease-Water Stress Index 3", Vegetation,
        "S1/R", &["S1", "R"]),
    index("DSWI4", "Disease-Water Stress Index 4", Vegetation,
        "G/R", &["G", "R"]),
    index("DSWI5", "Disease-Water Stress Index 5", Vegetation,
        "(N + G)/(S1 + R)", &["N", "G", "S1", "R"]),
    index("VIBI", "Vegetation Index Built-up Index", Urban,
        "((N-R)/(N+R))/(((N-R)/(N+R)) + ((S1-N)/(S1+N)))", &["N", "R", "S1"]),
    index("NDPI", "Normalized Difference Phenology Index", Vegetation,
        "(N - (alpha * R + (1.0 - alpha) * S1))/(N + (alpha * R + (1.0 - alpha) * S1))",
        &["N", "alpha", "R", "S1"]),
    // water
    index("NDWI", "Normalized Difference Water Index", Water,
        "(G - N)/(G + N)", &["G", "N"]),
    index("MNDWI", "Modified Normalized Difference Water Index", Water,
        "(G - S1) / (G + S1)", &["G", "S1"]),
    index("NDVIMNDWI", "NDVI-MNDWI Model", Water,
        "((N - R)/(N + R)) - ((G - S1)/(G + S1))", &["N", "R", "G", "S1"]),
    index("SWI", "Sentinel Water Index", Water,
        "(RE1 * (N - S1)) / ((RE1 + N) * (N + S1))", &["RE1", "N", "S1"]),
    index("WI1", "Water Index 1", Water,
        "(G - S2) / (G + S2)", &["G", "S2"]),
    index("WI2", "Water Index 2", Water,
        "(B - S2) / (B + S2)", &["B", "S2"]),
    index("ANDWI", "Augmented Normalized Difference Water Index", Water,
        "(B + G + R - N - S1 - S2)/(B + G + R + N + S1 + S2)", &["B", "G", "R", "N", "S1", "S2"]),
    index("LSWI", "Land Surface Water Index", Water,
        "(N - S1)/(N + S1)", &["N", "S1"]),
    index("MBWI", "Multi-Band Water Index", Water,
        "(omega * G) - R - N - S1 - S2", &["omega", "G", "R", "N", "S1", "S2"]),
    index("NDTI", "Normalized Difference Turbidity Index", Water,
        "(R-G)/(R+G)", &["R", "G"]),
    index("NDCI", "Normalized Difference Chlorophyll Index", Water,
        "(RE1 - R)/(RE1 + R)", &["RE1", "R"]),
    index("NDPonI", "Normalized Difference Pond Index", Water,
        "(S1-G)/(S1+G)", &["S1", "G"]),
    index("WRI", "Water Ratio Index", Water,
        "(G + R)/(N + S1)", &["G", "R", "N", "S1"]),
    index("SWM", "Sentinel Water Mask", Water,
        "(B + G)/(N + S1)", &["B", "G", "N", "S1"]),
    index("AFRI1600", "Aerosol Free Vegetation Index (1600 nm)", Vegetation,
        "(N - 0.66 * S1) / (N + 0.66 * S1)", &["N", "S1"]),
    index("AFRI2100", "Aerosol Free Vegetation Index (2100 nm)", Vegetation,
        "(N - 0.5 * S2) / (N + 0.5 * S2)", &["N", "S2"]),
    // burn
    index("NBR", "Normalized Burn Ratio", Burn,
        "(N - S2) / (N + S2)", &["N", "S2"]),
    index("NBR2", "Normalized Burn Ratio 2", Burn,
        "(S1 - S2) / (S1 + S2)", &["S1", "S2"]),
    index("NBRSWIR", "Normalized Burn Ratio SWIR", Burn,
        "(S2 - S1 - 0.02)/(S2 + S1 + 0.1)", &["S2", "S1"]),
    index("NBRT1", "Normalized Burn Ratio Thermal 1", Burn,
        "(N - (S2 * T / 10000.0)) / (N + (S2 * T / 10000.0))", &["N", "S2", "T"]),
    index("BAI", "Burned Area Index", Burn,
        "1.0 / ((0.1 - R) ** 2.0 + (0.06 - N) ** 2.0)", &["R", "N"]),
    index("BAIS2", "Burned Area Index for Sentinel 2", Burn,
        "(1.0 - ((RE2 * RE3 * N2) / R) ** 0.5) * (((S2 - N2)/((S2 + N2) ** 0.5)) + 1.0)",
        &["RE2", "RE3", "N2", "R", "S2"]),
    index("MIRBI", "Mid-Infrared Burn Index", Burn,
        "10.0 * S2 - 9.8 * S1 + 2.0", &["S2", "S1"]),
    index("CSI", "Char Soil Index", Burn,
        "N/S2", &["N", "S2"]),
    // soil
    index("BI", "Bare Soil Index", Soil,
        "((S1 + R) - (N + B))/((S1 + R) + (N + B))", &["S1", "R", "N", "B"]),
    index("DBSI", "Dry Bareness Index", Soil,
        "((S1 - G)/(S1 + G)) - ((N - R)/(N + R))", &["S1", "G", "N", "R"]),
    index("NSDS", "Normalized Shortwave Infrared Difference Soil-Moisture", Soil,
        "(S1 - S2)/(S1 + S2)", &["S1", "S2"]),
    index("NHFD", "Non-Homogeneous Feature Difference", Urban,
        "(RE1 - A) / (RE1 + A)", &["RE1", "A"]),
    index("NDSIWV", "WorldView Normalized Difference Soil Index", Soil,
        "(G - Y) / (G + Y)", &["G", "Y"]),
    // urban
    index("NDBI", "Normalized Difference Built-Up Index", Urban,
        "(S1 - N)/(S1 + N)", &["S1", "N"]),
    index("UI", "Urban Index", Urban,
        "(S2 - N)/(S2 + N)", &["S2", "N"]),
    index("NDBaI", "Normalized Difference Bareness Index", Soil,
        "(S1 - T)/(S1 + T)", &["S1", "T"]),
    index("IBI", "Index-Based Built-Up Index", Urban,
        "(((S1-N)/(S1+N))-(((N-R)*(1.0+L)/(N+R+L))+((G-S1)/(G+S1)))/2.0)/(((S1-N)/(S1+N))+(((N-R)*(1.0+L)/(N+R+L))+((G-S1)/(G+S1)))/2.0)",
        &["S1", "N", "R", "L", "G"]),
    index("EBBI", "Enhanced Built-Up and Bareness Index", Urban,
        "(S1 - N) / (10.0 * ((S1 + T) ** 0.5))", &["S1", "N", "T"]),
    index("PISI", "Perpendicular Impervious Surface Index", Urban,
        "0.8192 * B - 0.5735 * N + 0.0750", &["B", "N"]),
    index("BITM", "Landsat TM-based Brightness Index", Soil,
        "(((B**2.0)+(G**2.0)+(R**2.0))/3.0)**0.5", &["B", "G", "R"]),
    // snow
    index("NDSI", "Normalized Difference Snow Index", Snow,
        "(G - S1) / (G + S1)", &["G", "S1"]),
    index("NDGlaI", "Normalized Difference Glacier Index", Snow,
        "(G - R)/(G + R)", &["G", "R"]),
];
