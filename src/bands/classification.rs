band_family! {
    /// Cloud and shadow masks derived from product quality layers.
    pub enum CloudBand ("classification", Cloud) {
        RawClouds => ("RAW_CLOUDS", "RAW_CLOUDS"),
        Clouds => ("CLOUDS", "CLOUDS"),
        Shadows => ("SHADOWS", "SHADOWS"),
        Cirrus => ("CIRRUS", "CIRRUS"),
        AllClouds => ("ALL_CLOUDS", "ALL_CLOUDS"),
    }
}
