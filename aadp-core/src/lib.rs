//! # AADP Core
//!
//! Particle swarm optimisation engine for the antenna array design problem:
//! place `n` elements on a line so that the peak side-lobe level of the
//! resulting array factor is as low as possible for a given steering angle.
//!
//! This crate provides:
//! - Fixed-length real vectors with elementwise arithmetic and seeded sampling
//! - The constrained design space and its side-lobe cost function
//! - Feasible random initialisation with a bounded retry budget
//! - Iteration and wall-clock termination policies
//! - Particles and the swarm coordinator that drives them
//!
//! All randomness is drawn from a caller-supplied generator, so a run seeded
//! with the same value is fully reproducible.

pub mod algorithms;
pub mod antenna;
pub mod init;
pub mod particle;
pub mod swarm;
pub mod termination;
pub mod vector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::*;
    pub use crate::antenna::{AntennaArray, DesignProblem};
    pub use crate::init::RandomInitialiser;
    pub use crate::particle::Particle;
    pub use crate::swarm::{GlobalBest, RunReport, Swarm};
    pub use crate::termination::{Budget, Termination};
    pub use crate::vector::Vector;
    pub use crate::{Error, Result};
}

/// Result type for AADP operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for AADP core operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Vector-vector operation on operands of different lengths
    #[error("dimension mismatch: left operand has {left} components, right has {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// Rejected constructor or configuration argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A design was evaluated against a problem with a different antenna count
    #[error("design has {actual} elements but the problem has {expected} antennae")]
    SizeMismatch { expected: usize, actual: usize },
    /// No feasible design was sampled within the attempt budget
    #[error("no feasible design found after {attempts} attempts")]
    InitializationTimeout { attempts: usize },
}
