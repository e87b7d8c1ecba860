use serde::{Deserialize, Serialize};

/// Wavelengths above this value are taken as nanometers.
const NANOMETER_THRESHOLD: f64 = 100.0;
/// Widths above this value are taken as nanometers.
const FWHM_NANOMETER_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    Reflectance,
    BrightnessTemperature,
    Intensity,
    Coherence,
    Amplitude,
}

/// How one band materializes in one opened product.
///
/// Plain value: [BandDefinition::update] returns a new definition
/// and never shares state with the one it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDefinition {
    name: String,
    id: String,
    gsd: f64,
    center_wavelength: Option<f64>,
    full_width_half_max: Option<f64>,
    solar_illumination: Option<f64>,
    description: String,
    asset_role: AssetRole,
}

/// Field overrides for [BandDefinition::update].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandUpdate {
    pub name: Option<String>,
    pub id: Option<String>,
    pub gsd: Option<f64>,
    pub center_wavelength: Option<f64>,
    pub full_width_half_max: Option<f64>,
    pub solar_illumination: Option<f64>,
    pub description: Option<String>,
    pub asset_role: Option<AssetRole>,
}

impl BandUpdate {
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Center wavelength in micrometers.
fn wavelength_to_micrometers(center: f64) -> f64 {
    if center > NANOMETER_THRESHOLD {
        center / 1000.
    } else {
        center
    }
}

/// FWHM in micrometers, whatever unit the center was given in.
fn width_to_micrometers(width: f64) -> f64 {
    if width > FWHM_NANOMETER_THRESHOLD {
        width / 1000.
    } else {
        width
    }
}

impl BandDefinition {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        gsd: f64,
        asset_role: AssetRole,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            gsd,
            center_wavelength: None,
            full_width_half_max: None,
            solar_illumination: None,
            description: String::new(),
            asset_role,
        }
    }

    /// Accepts nanometers or micrometers, stores micrometers.
    pub fn with_wavelength(mut self, center: f64, full_width_half_max: Option<f64>) -> Self {
        self.center_wavelength = Some(wavelength_to_micrometers(center));
        self.full_width_half_max = full_width_half_max.map(width_to_micrometers);
        self
    }

    pub fn with_solar_illumination(mut self, solar_illumination: f64) -> Self {
        self.solar_illumination = Some(solar_illumination);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Copy of `self` with every field set in `changes` replaced.
    pub fn update(&self, changes: BandUpdate) -> Self {
        let center = changes.center_wavelength.map(wavelength_to_micrometers);
        let fwhm = changes.full_width_half_max.map(width_to_micrometers);
        Self {
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            id: changes.id.unwrap_or_else(|| self.id.clone()),
            gsd: changes.gsd.unwrap_or(self.gsd),
            center_wavelength: center.or(self.center_wavelength),
            full_width_half_max: fwhm.or(self.full_width_half_max),
            solar_illumination: changes.solar_illumination.or(self.solar_illumination),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            asset_role: changes.asset_role.unwrap_or(self.asset_role),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Band id or number inside the source file.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Ground sample distance in meters.
    pub fn gsd(&self) -> f64 {
        self.gsd
    }

    /// Micrometers.
    pub fn center_wavelength(&self) -> Option<f64> {
        self.center_wavelength
    }

    /// Micrometers.
    pub fn full_width_half_max(&self) -> Option<f64> {
        self.full_width_half_max
    }

    pub fn solar_illumination(&self) -> Option<f64> {
        self.solar_illumination
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn asset_role(&self) -> AssetRole {
        self.asset_role
    }
}
