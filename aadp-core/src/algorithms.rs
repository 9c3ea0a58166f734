//! Particle swarm optimisation parameters
//!
//! Defaults are the standard SPSO-2006 constriction values
//! `w = 1 / (2 ln 2)` and `c1 = c2 = 0.5 + ln 2`.

use core::f64::consts::LN_2;

use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Distribution of the per-dimension random coefficients `r1`, `r2`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSampling {
    /// Uniform on `[0, 1)`
    #[default]
    Uniform,
    /// Box–Muller Gaussian mapped with `z * (upper - lower) + lower` over `[-0.5, 0.5]`
    Gaussian,
}

impl CoefficientSampling {
    /// Draw one coefficient vector of the given length.
    pub fn sample<R: RngCore + ?Sized>(self, rng: &mut R, dimensions: usize) -> Vector {
        match self {
            Self::Uniform => Vector::uniform_random(rng, dimensions, 0.0, 1.0),
            Self::Gaussian => Vector::normal_random(rng, dimensions, -0.5, 0.5),
        }
    }
}

/// Particle Swarm Optimization (PSO) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsoCoefficients {
    /// Inertia weight (momentum)
    pub inertia: f64,
    /// Cognitive coefficient (attraction to personal best)
    pub cognitive: f64,
    /// Social coefficient (attraction to global best)
    pub social: f64,
    /// How `r1` and `r2` are drawn
    pub sampling: CoefficientSampling,
    /// Halve the initial velocity drawn from a second feasible design
    pub halve_initial_velocity: bool,
}

impl Default for PsoCoefficients {
    fn default() -> Self {
        Self {
            inertia: 1.0 / (2.0 * LN_2),
            cognitive: 0.5 + LN_2,
            social: 0.5 + LN_2,
            sampling: CoefficientSampling::default(),
            halve_initial_velocity: true,
        }
    }
}

impl PsoCoefficients {
    /// Use Gaussian `r1`/`r2` instead of uniform ones
    pub fn with_sampling(mut self, sampling: CoefficientSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Set the inertia weight
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }
}

/// Swarm size for a problem with `n_antennae` elements: `ceil(20 + sqrt(n))`.
pub fn population_size(n_antennae: usize) -> usize {
    (20.0 + (n_antennae as f64).sqrt()).ceil() as usize
}
