//! No-data aware arithmetic shared by the local formulas.

use crate::components::Raster;

/// Element-wise division, masked wherever the quotient is undefined.
pub fn masked_divide(numerator: &Raster, denominator: &Raster) -> Raster {
    numerator / denominator
}

/// `(a - b) / (a + b)`, masked where `a + b == 0`.
pub fn normalized_difference(a: &Raster, b: &Raster) -> Raster {
    masked_divide(&(a - b), &(a + b))
}

/// `offset + Σ coefficient * band`, named after the first band.
pub fn linear_combination(first: (f64, &Raster), rest: &[(f64, &Raster)], offset: f64) -> Raster {
    let (first_coefficient, first) = first;
    let init = first.map(|value| first_coefficient * value + offset);
    rest.iter().fold(init, |acc, (coefficient, band)| {
        acc.zip_with(band, |sum, value| sum + coefficient * value)
    })
}

/// Gives `result` the look of a directly loaded band: the index name
/// and the descriptive metadata of the input it was computed from.
pub fn retag(result: Raster, name: &str, template: &Raster) -> Raster {
    result
        .rename(name)
        .with_metadata(template.metadata().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use rstest::rstest;

    #[rstest]
    #[case(array![[1., -2.], [0., 3.5]])]
    #[case(array![[0., 0.], [0., 0.]])]
    fn dividing_by_zero_masks_everything(#[case] values: Array2<f64>) {
        let x = Raster::new("X", values);
        let quotient = masked_divide(&x, &x.full_like(0.));
        assert_eq!(quotient.shape(), x.shape());
        assert!(quotient.is_all_masked());
    }

    #[rstest]
    fn normalized_difference_is_antisymmetric() {
        let a = Raster::new("A", array![[0.4, 0.1], [0.0, 0.3]]);
        let b = Raster::new("B", array![[0.1, 0.2], [0.0, 0.3]]);
        let ab = normalized_difference(&a, &b);
        let ba = normalized_difference(&b, &a);
        for ((x, y), masked) in ab.data().iter().zip(ba.data()).zip(ab.mask()) {
            if !masked {
                assert_abs_diff_eq!(*x, -*y, epsilon = 1e-12);
            }
        }
        assert_eq!(ab.get(&[1, 0]), None);
        assert_eq!(ab.get(&[1, 1]), Some(0.));
        assert_abs_diff_eq!(ab.get(&[0, 0]).unwrap(), 0.6, epsilon = 1e-12);
    }

    #[rstest]
    fn linear_combination_with_offset() {
        let green = Raster::new("GREEN", array![10., 40.]);
        let red = Raster::new("RED", array![5., f64::NAN]);
        let sci = linear_combination((3., &green), &[(-1., &red)], -100.);
        assert_eq!(sci.name(), "GREEN");
        assert_eq!(sci.get(&[0]), Some(-75.));
        assert_eq!(sci.get(&[1]), None);
    }

    #[rstest]
    fn retag_copies_template_metadata() {
        let mut nir = Raster::new("NIR", array![1.]);
        nir.metadata_mut().insert("crs", "EPSG:32633");
        let result = retag(nir.full_like(0.).rename("tmp"), "NDVI", &nir);
        assert_eq!(result.name(), "NDVI");
        assert_eq!(result.metadata().get("crs").unwrap(), "EPSG:32633");
    }
}
