use ndarray::{Array, ArrayD, Dimension, Zip};
use num_traits::AsPrimitive;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{
    components::Metadata,
    errors::{EobandsError, Result},
};

/// Value stored under masked pixels.
pub const FILL_VALUE: f64 = -9999.;

/// Pixel array with a no-data mask.
///
/// A pixel is masked when it was flagged as no-data on load or
/// when the computation producing it was undefined (division by zero,
/// logarithm of a negative value, ...). Masked pixels hold [FILL_VALUE],
/// never `NaN` or infinities.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    name: String,
    data: ArrayD<f64>,
    mask: ArrayD<bool>,
    metadata: Metadata,
}

impl Raster {
    /// Non-finite values are masked.
    pub fn new<D: Dimension>(name: impl Into<String>, data: Array<f64, D>) -> Self {
        let data = data.into_dyn();
        let mask = ArrayD::from_elem(data.raw_dim(), false);
        Self::normalized(name.into(), data, mask, Metadata::default())
    }

    /// Converts raw sensor values, masking those equal to `nodata`.
    pub fn from_array<T, D>(name: impl Into<String>, data: Array<T, D>, nodata: Option<T>) -> Self
    where
        T: AsPrimitive<f64> + PartialEq,
        D: Dimension,
    {
        let mask = data.map(|value| Some(*value) == nodata).into_dyn();
        let data = data.mapv(|value| value.as_()).into_dyn();
        Self::normalized(name.into(), data, mask, Metadata::default())
    }

    /// `true` in `mask` flags no-data.
    pub fn with_mask<D: Dimension>(
        name: impl Into<String>,
        data: Array<f64, D>,
        mask: Array<bool, D>,
    ) -> Result<Self> {
        if data.shape() != mask.shape() {
            return Err(EobandsError::ShapeMismatch {
                expected: data.shape().to_vec(),
                found: mask.shape().to_vec(),
            });
        }
        Ok(Self::normalized(
            name.into(),
            data.into_dyn(),
            mask.into_dyn(),
            Metadata::default(),
        ))
    }

    fn normalized(
        name: String,
        mut data: ArrayD<f64>,
        mut mask: ArrayD<bool>,
        metadata: Metadata,
    ) -> Self {
        Zip::from(&mut data).and(&mut mask).for_each(|value, masked| {
            if !value.is_finite() {
                *masked = true;
            }
            if *masked {
                *value = FILL_VALUE;
            }
        });
        Self {
            name,
            data,
            mask,
            metadata,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw values, [FILL_VALUE] where masked.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn mask(&self) -> &ArrayD<bool> {
        &self.mask
    }

    /// `None` when masked or out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        match self.mask.get(index) {
            Some(false) => self.data.get(index).copied(),
            _ => None,
        }
    }

    pub fn filled(&self, fill: f64) -> ArrayD<f64> {
        let mut filled = self.data.clone();
        Zip::from(&mut filled)
            .and(&self.mask)
            .for_each(|value, &masked| {
                if masked {
                    *value = fill
                }
            });
        filled
    }

    pub fn valid_count(&self) -> usize {
        self.mask.iter().filter(|masked| !**masked).count()
    }

    pub fn is_all_masked(&self) -> bool {
        self.mask.iter().all(|masked| *masked)
    }

    /// Same shape, name and metadata, every pixel set to `value`.
    pub fn full_like(&self, value: f64) -> Raster {
        Self::normalized(
            self.name.clone(),
            ArrayD::from_elem(self.data.raw_dim(), value),
            ArrayD::from_elem(self.mask.raw_dim(), false),
            self.metadata.clone(),
        )
    }

    /// Element-wise map; masked pixels stay masked.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Raster {
        Self::normalized(
            self.name.clone(),
            self.data.mapv(f),
            self.mask.clone(),
            self.metadata.clone(),
        )
    }

    /// Element-wise combination, masked where either input is.
    ///
    /// Panics when the shapes are not broadcast compatible,
    /// like `ndarray` arithmetic does.
    pub fn zip_with(&self, rhs: &Raster, f: impl Fn(f64, f64) -> f64) -> Raster {
        let mut data = self.data.clone();
        Zip::from(&mut data)
            .and_broadcast(&rhs.data)
            .for_each(|lhs, &rhs| *lhs = f(*lhs, rhs));
        let mut mask = self.mask.clone();
        Zip::from(&mut mask)
            .and_broadcast(&rhs.mask)
            .for_each(|lhs, &rhs| *lhs |= rhs);
        Self::normalized(self.name.clone(), data, mask, self.metadata.clone())
    }

    pub fn powf(&self, exponent: f64) -> Raster {
        self.map(|value| value.powf(exponent))
    }

    pub fn pow(&self, exponent: &Raster) -> Raster {
        self.zip_with(exponent, f64::powf)
    }

    pub fn sqrt(&self) -> Raster {
        self.map(f64::sqrt)
    }

    pub fn ln(&self) -> Raster {
        self.map(f64::ln)
    }

    pub fn abs(&self) -> Raster {
        self.map(f64::abs)
    }
}

pub(crate) fn divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0. {
        f64::NAN
    } else {
        numerator / denominator
    }
}

macro_rules! raster_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<&Raster> for &Raster {
            type Output = Raster;
            fn $method(self, rhs: &Raster) -> Raster {
                self.zip_with(rhs, $op)
            }
        }

        impl $trait<Raster> for Raster {
            type Output = Raster;
            fn $method(self, rhs: Raster) -> Raster {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Raster> for Raster {
            type Output = Raster;
            fn $method(self, rhs: &Raster) -> Raster {
                (&self).$method(rhs)
            }
        }

        impl $trait<Raster> for &Raster {
            type Output = Raster;
            fn $method(self, rhs: Raster) -> Raster {
                self.$method(&rhs)
            }
        }

        impl $trait<f64> for &Raster {
            type Output = Raster;
            fn $method(self, rhs: f64) -> Raster {
                self.map(|lhs| ($op)(lhs, rhs))
            }
        }

        impl $trait<f64> for Raster {
            type Output = Raster;
            fn $method(self, rhs: f64) -> Raster {
                (&self).$method(rhs)
            }
        }

        impl $trait<&Raster> for f64 {
            type Output = Raster;
            fn $method(self, rhs: &Raster) -> Raster {
                rhs.map(|value| ($op)(self, value))
            }
        }

        impl $trait<Raster> for f64 {
            type Output = Raster;
            fn $method(self, rhs: Raster) -> Raster {
                self.$method(&rhs)
            }
        }
    };
}

raster_binary_op!(Add, add, |lhs: f64, rhs: f64| lhs + rhs);
raster_binary_op!(Sub, sub, |lhs: f64, rhs: f64| lhs - rhs);
raster_binary_op!(Mul, mul, |lhs: f64, rhs: f64| lhs * rhs);
raster_binary_op!(Div, div, divide);

impl Neg for &Raster {
    type Output = Raster;
    fn neg(self) -> Raster {
        self.map(|value| -value)
    }
}

impl Neg for Raster {
    type Output = Raster;
    fn neg(self) -> Raster {
        -&self
    }
}
