band_family! {
    /// Bands derived from a digital elevation model.
    pub enum DemBand ("dem", Dem) {
        Dem => ("DEM", "DEM"),
        Slope => ("SLOPE", "SLOPE"),
        Hillshade => ("HILLSHADE", "HILLSHADE"),
    }
}
