use super::BandFamily;

/// Suffix of despeckled polarization values.
pub const DSPK_SUFFIX: &str = "_DSPK";

band_family! {
    /// Radar polarization channels and their despeckled counterparts.
    pub enum SarBand ("sar", Sar) {
        Vv => ("VV", "VV"),
        VvDspk => ("VV_DSPK", "VV_DSPK"),
        Hh => ("HH", "HH"),
        HhDspk => ("HH_DSPK", "HH_DSPK"),
        Vh => ("VH", "VH"),
        VhDspk => ("VH_DSPK", "VH_DSPK"),
        Hv => ("HV", "HV"),
        HvDspk => ("HV_DSPK", "HV_DSPK"),
        Rh => ("RH", "RH"),
        RhDspk => ("RH_DSPK", "RH_DSPK"),
        Rv => ("RV", "RV"),
        RvDspk => ("RV_DSPK", "RV_DSPK"),
    }
}

impl SarBand {
    pub fn is_despeckled(&self) -> bool {
        self.value().ends_with(DSPK_SUFFIX)
    }

    /// Idempotent on despeckled bands.
    pub fn to_despeckled(self) -> Self {
        match self {
            SarBand::Vv | SarBand::VvDspk => SarBand::VvDspk,
            SarBand::Hh | SarBand::HhDspk => SarBand::HhDspk,
            SarBand::Vh | SarBand::VhDspk => SarBand::VhDspk,
            SarBand::Hv | SarBand::HvDspk => SarBand::HvDspk,
            SarBand::Rh | SarBand::RhDspk => SarBand::RhDspk,
            SarBand::Rv | SarBand::RvDspk => SarBand::RvDspk,
        }
    }

    /// Idempotent on speckled bands.
    pub fn to_speckled(self) -> Self {
        match self {
            SarBand::Vv | SarBand::VvDspk => SarBand::Vv,
            SarBand::Hh | SarBand::HhDspk => SarBand::Hh,
            SarBand::Vh | SarBand::VhDspk => SarBand::Vh,
            SarBand::Hv | SarBand::HvDspk => SarBand::Hv,
            SarBand::Rh | SarBand::RhDspk => SarBand::Rh,
            SarBand::Rv | SarBand::RvDspk => SarBand::Rv,
        }
    }

    /// Compact polarimetry channels (circular transmit).
    pub fn is_compact(&self) -> bool {
        matches!(self.to_speckled(), SarBand::Rh | SarBand::Rv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn despeckling_is_a_bijection() {
        let speckled = SarBand::ALL
            .iter()
            .copied()
            .filter(|band| !band.is_despeckled())
            .collect::<Vec<_>>();
        assert_eq!(speckled.len() * 2, SarBand::ALL.len());
        for band in speckled {
            let despeckled = band.to_despeckled();
            assert_ne!(despeckled, band);
            assert!(despeckled.is_despeckled());
            assert_eq!(despeckled.to_speckled(), band);
            assert_eq!(despeckled.to_despeckled(), despeckled);
            assert_eq!(band.to_speckled(), band);
        }
    }

    #[rstest]
    fn despeckled_values_follow_the_suffix() {
        for band in SarBand::ALL {
            let despeckled = band.to_despeckled();
            assert_eq!(
                despeckled.value(),
                format!("{}{DSPK_SUFFIX}", band.to_speckled().value())
            );
        }
    }

    #[rstest]
    #[case(SarBand::RvDspk, true)]
    #[case(SarBand::Hv, false)]
    fn compact_polarimetry(#[case] band: SarBand, #[case] expected: bool) {
        assert_eq!(band.is_compact(), expected);
    }
}
