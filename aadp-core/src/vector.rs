//! Fixed-length real vectors
//!
//! Positions and velocities of particles live in `n - 1` free dimensions;
//! the aperture coordinate is appended with [`Vector::to_design`] whenever a
//! full antenna design is needed.
//!
//! Vector-vector operations are checked and return
//! [`Error::DimensionMismatch`] on unequal lengths. Scalar operations
//! broadcast and are exposed through the `std::ops` operators.

use core::ops::{Index, IndexMut};

use rand::Rng;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A fixed-length vector of reals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /// Wrap existing components
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// All-zero vector with `dimensions` components
    pub fn zeros(dimensions: usize) -> Self {
        Self {
            values: vec![0.0; dimensions],
        }
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for the zero-dimensional vector
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Elementwise sum
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product
    pub fn hadamard(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient
    pub fn divide(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |a, b| a / b)
    }

    fn zip_with(&self, other: &Vector, op: impl Fn(f64, f64) -> f64) -> Result<Vector> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| op(a, b))
            .collect())
    }

    fn map(&self, op: impl Fn(f64) -> f64) -> Vector {
        self.values.iter().map(|&a| op(a)).collect()
    }

    /// Full design: the free coordinates followed by the fixed `aperture`.
    pub fn to_design(&self, aperture: f64) -> Vec<f64> {
        let mut design = Vec::with_capacity(self.len() + 1);
        design.extend_from_slice(&self.values);
        design.push(aperture);
        design
    }

    /// Free coordinates of a design, i.e. everything but the last element.
    pub fn from_design(design: &[f64]) -> Vector {
        let free = design.len().saturating_sub(1);
        Vector::new(design[..free].to_vec())
    }

    /// Gaussian components scaled into `[lower, upper]`.
    ///
    /// Each component is a standard normal deviate produced by the
    /// Box–Muller transform, then mapped as `z * (upper - lower) + lower`.
    pub fn normal_random<R: RngCore + ?Sized>(
        rng: &mut R,
        dimensions: usize,
        lower: f64,
        upper: f64,
    ) -> Vector {
        (0..dimensions)
            .map(|_| standard_normal(rng) * (upper - lower) + lower)
            .collect()
    }

    /// Gaussian components with per-dimension bounds.
    pub fn normal_random_within<R: RngCore + ?Sized>(
        rng: &mut R,
        lower: &Vector,
        upper: &Vector,
    ) -> Result<Vector> {
        check_bounds(lower, upper)?;
        Ok(lower
            .iter()
            .zip(upper.iter())
            .map(|(&lo, &hi)| standard_normal(rng) * (hi - lo) + lo)
            .collect())
    }

    /// Uniform components in `[lower, upper)`.
    pub fn uniform_random<R: RngCore + ?Sized>(
        rng: &mut R,
        dimensions: usize,
        lower: f64,
        upper: f64,
    ) -> Vector {
        (0..dimensions)
            .map(|_| rng.gen::<f64>() * (upper - lower) + lower)
            .collect()
    }

    /// Uniform components with per-dimension bounds.
    pub fn uniform_random_within<R: RngCore + ?Sized>(
        rng: &mut R,
        lower: &Vector,
        upper: &Vector,
    ) -> Result<Vector> {
        check_bounds(lower, upper)?;
        Ok(lower
            .iter()
            .zip(upper.iter())
            .map(|(&lo, &hi)| rng.gen::<f64>() * (hi - lo) + lo)
            .collect())
    }
}

fn check_bounds(lower: &Vector, upper: &Vector) -> Result<()> {
    if lower.len() != upper.len() {
        return Err(Error::DimensionMismatch {
            left: lower.len(),
            right: upper.len(),
        });
    }
    Ok(())
}

/// One standard normal deviate via Box–Muller.
fn standard_normal<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    // (0, 1]: keeps ln(u1) finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * core::f64::consts::PI * u2).sin()
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::new(iter.into_iter().collect())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::new(values)
    }
}

impl AsRef<[f64]> for Vector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

// Scalar broadcast for owned and borrowed vectors. The operator traits stay
// path-qualified so they never shadow the checked inherent methods.
macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl core::ops::$trait<f64> for &Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                self.map(|a| a $op rhs)
            }
        }

        impl core::ops::$trait<f64> for Vector {
            type Output = Vector;

            fn $method(self, rhs: f64) -> Vector {
                core::ops::$trait::$method(&self, rhs)
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl core::ops::Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Vector {
        rhs * self
    }
}

impl core::ops::Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        &rhs * self
    }
}

impl core::ops::Add<&Vector> for f64 {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        rhs + self
    }
}
