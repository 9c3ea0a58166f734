//! # AADP
//!
//! **Antenna array design by particle swarm optimisation.**
//!
//! Given a number of antenna elements and a desired beam direction, find
//! element positions along a line that minimise the peak side-lobe level of
//! the array. The heavy lifting lives in [`aadp_core`]; this crate adds run
//! configuration, a single `run` entry point, result rendering, and the
//! `aadp` command-line tool.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aadp::RunConfig;
//!
//! let config = RunConfig::builder()
//!     .antennae(3)
//!     .steering_angle(90.0)
//!     .iterations(100)
//!     .seed(42)
//!     .build();
//!
//! let record = aadp::run(&config)?;
//! println!("{}", aadp::report::render_text(&record.report));
//! # Ok::<(), aadp::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - [`aadp_core`]: vectors, the design problem, particles and the swarm
//! - [`report`]: text and JSON rendering of a finished run

#![forbid(unsafe_code)]

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use aadp_core as core;

// Re-export commonly used items at the top level
pub use aadp_core::{
    algorithms::{population_size, CoefficientSampling, PsoCoefficients},
    antenna::{AntennaArray, DesignProblem},
    swarm::{RunReport, Swarm},
    termination::{Budget, Termination},
    Error, Result,
};

/// Command-line argument parsing.
pub mod cli;

/// Result rendering.
pub mod report;

/// Prelude module for convenient imports
///
/// ```rust,ignore
/// use aadp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;

    pub use crate::{run, RunConfig, RunRecord};
}

/// Configuration for a single optimisation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of antenna elements
    pub n_antennae: usize,
    /// Desired main beam direction in degrees
    pub steering_angle: f64,
    /// When to stop sweeping
    pub budget: Budget,
    /// RNG seed; a fresh one is drawn and recorded when absent
    pub seed: Option<u64>,
    /// Particle count override; defaults to `ceil(20 + sqrt(n))`
    pub population: Option<usize>,
    /// PSO coefficients
    pub coefficients: PsoCoefficients,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_antennae: 3,
            steering_angle: 90.0,
            budget: Budget::default(),
            seed: None,
            population: None,
            coefficients: PsoCoefficients::default(),
        }
    }
}

impl RunConfig {
    /// Create a new config builder
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Effective swarm size
    pub fn population(&self) -> usize {
        self.population
            .unwrap_or_else(|| population_size(self.n_antennae))
    }
}

/// Builder for RunConfig
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of antenna elements
    pub fn antennae(mut self, n_antennae: usize) -> Self {
        self.config.n_antennae = n_antennae;
        self
    }

    /// Set the steering angle in degrees
    pub fn steering_angle(mut self, degrees: f64) -> Self {
        self.config.steering_angle = degrees;
        self
    }

    /// Stop after a fixed number of termination polls
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.config.budget = Budget::Iterations(iterations);
        self
    }

    /// Stop once `limit` of wall-clock time has passed
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.config.budget = Budget::Time(limit);
        self
    }

    /// Fix the RNG seed for a reproducible run
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Override the swarm size
    pub fn population(mut self, population: usize) -> Self {
        self.config.population = Some(population);
        self
    }

    /// Set the PSO coefficients
    pub fn coefficients(mut self, coefficients: PsoCoefficients) -> Self {
        self.config.coefficients = coefficients;
        self
    }

    /// Build the configuration
    pub fn build(self) -> RunConfig {
        self.config
    }
}

/// A finished run together with the inputs needed to replay it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub n_antennae: usize,
    pub steering_angle: f64,
    /// Seed the run actually used
    pub seed: u64,
    pub population: usize,
    #[serde(flatten)]
    pub report: RunReport,
}

/// Optimise one antenna array.
///
/// The budget's clock starts before the swarm is built, so a time limit
/// covers initialisation as well as the sweeps.
pub fn run(config: &RunConfig) -> Result<RunRecord> {
    let problem = AntennaArray::new(config.n_antennae, config.steering_angle)?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let population = config.population();

    info!(
        n_antennae = config.n_antennae,
        steering_angle = config.steering_angle,
        seed,
        population,
        "optimising antenna array"
    );

    let termination = config.budget.start()?;
    let mut swarm = Swarm::new(
        problem,
        config.coefficients.clone(),
        population,
        StdRng::seed_from_u64(seed),
    )?;
    let report = swarm.run(termination)?;

    Ok(RunRecord {
        n_antennae: config.n_antennae,
        steering_angle: config.steering_angle,
        seed,
        population,
        report,
    })
}
