band_family! {
    /// Optical bands, generic roles first then raw sensor-specific names.
    pub enum SpectralBand ("spectral", Spectral) {
        Ca => ("CA", "COASTAL_AEROSOL"),
        Blue => ("BLUE", "BLUE"),
        Green1 => ("GREEN_1", "GREEN_1"),
        Green => ("GREEN", "GREEN"),
        Yellow => ("YELLOW", "YELLOW"),
        Red => ("RED", "RED"),
        Vre1 => ("VRE_1", "VEGETATION_RED_EDGE_1"),
        Vre2 => ("VRE_2", "VEGETATION_RED_EDGE_2"),
        Vre3 => ("VRE_3", "VEGETATION_RED_EDGE_3"),
        Nir => ("NIR", "NIR"),
        NarrowNir => ("NARROW_NIR", "NARROW_NIR"),
        Wv => ("WV", "WATER_VAPOUR"),
        SwirCirrus => ("SWIR_CIRRUS", "SWIR_CIRRUS"),
        Swir1 => ("SWIR_1", "SWIR_1"),
        Swir2 => ("SWIR_2", "SWIR_2"),
        Tir1 => ("TIR_1", "THERMAL_IR_1"),
        Tir2 => ("TIR_2", "THERMAL_IR_2"),
        Pan => ("PAN", "PANCHROMATIC"),
        // Sentinel-3 OLCI
        Oa01 => ("Oa01", "Oa01"),
        Oa02 => ("Oa02", "Oa02"),
        Oa03 => ("Oa03", "Oa03"),
        Oa04 => ("Oa04", "Oa04"),
        Oa05 => ("Oa05", "Oa05"),
        Oa06 => ("Oa06", "Oa06"),
        Oa07 => ("Oa07", "Oa07"),
        Oa08 => ("Oa08", "Oa08"),
        Oa09 => ("Oa09", "Oa09"),
        Oa10 => ("Oa10", "Oa10"),
        Oa11 => ("Oa11", "Oa11"),
        Oa12 => ("Oa12", "Oa12"),
        Oa13 => ("Oa13", "Oa13"),
        Oa14 => ("Oa14", "Oa14"),
        Oa15 => ("Oa15", "Oa15"),
        Oa16 => ("Oa16", "Oa16"),
        Oa17 => ("Oa17", "Oa17"),
        Oa18 => ("Oa18", "Oa18"),
        Oa19 => ("Oa19", "Oa19"),
        Oa20 => ("Oa20", "Oa20"),
        Oa21 => ("Oa21", "Oa21"),
        // Sentinel-3 SLSTR
        S7 => ("S7", "S7"),
        S8 => ("S8", "S8"),
        S9 => ("S9", "S9"),
        F1 => ("F1", "F1"),
        F2 => ("F2", "F2"),
    }
}

impl SpectralBand {
    /// STAC `eo` extension common name, if the band has one.
    pub fn stac_common_name(&self) -> Option<&'static str> {
        match self {
            SpectralBand::Ca => Some("coastal"),
            SpectralBand::Blue => Some("blue"),
            SpectralBand::Green | SpectralBand::Green1 => Some("green"),
            SpectralBand::Yellow => Some("yellow"),
            SpectralBand::Red => Some("red"),
            SpectralBand::Vre1 | SpectralBand::Vre2 | SpectralBand::Vre3 => Some("rededge"),
            SpectralBand::Nir => Some("nir"),
            SpectralBand::NarrowNir => Some("nir08"),
            SpectralBand::Wv => Some("nir09"),
            SpectralBand::SwirCirrus => Some("cirrus"),
            SpectralBand::Swir1 => Some("swir16"),
            SpectralBand::Swir2 => Some("swir22"),
            SpectralBand::Tir1 => Some("lwir11"),
            SpectralBand::Tir2 => Some("lwir12"),
            SpectralBand::Pan => Some("pan"),
            _ => None,
        }
    }

    pub fn is_thermal(&self) -> bool {
        matches!(
            self,
            SpectralBand::Tir1
                | SpectralBand::Tir2
                | SpectralBand::S7
                | SpectralBand::S8
                | SpectralBand::S9
                | SpectralBand::F1
                | SpectralBand::F2
        )
    }
}
