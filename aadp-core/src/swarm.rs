//! Swarm coordination
//!
//! The swarm owns its particles and the shared global best. One sweep
//! updates every particle in insertion order; the termination policy is
//! polled between sweeps, never inside one.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::algorithms::{population_size, PsoCoefficients};
use crate::antenna::{DesignProblem, INFEASIBLE_COST};
use crate::init::RandomInitialiser;
use crate::particle::Particle;
use crate::termination::Termination;
use crate::vector::Vector;
use crate::{Error, Result};

/// A position together with its cost
#[derive(Debug, Clone, PartialEq)]
pub struct Best {
    pub position: Vector,
    pub cost: f64,
}

/// Best position seen by any particle of a run.
///
/// Every write goes through [`GlobalBest::offer`], which only replaces the
/// stored best with a strictly cheaper one, so the cost never increases.
#[derive(Debug, Default)]
pub struct GlobalBest {
    best: Mutex<Option<Best>>,
}

impl GlobalBest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the best if `cost` is strictly lower. Returns whether it did.
    pub fn offer(&self, position: &Vector, cost: f64) -> bool {
        let mut best = self.best.lock();
        let current = best.as_ref().map_or(INFEASIBLE_COST, |b| b.cost);
        if cost < current {
            *best = Some(Best {
                position: position.clone(),
                cost,
            });
            true
        } else {
            false
        }
    }

    /// Copy of the current best, if any particle has reported one
    pub fn snapshot(&self) -> Option<Best> {
        self.best.lock().clone()
    }

    /// Current best cost, [`INFEASIBLE_COST`] before the first report
    pub fn cost(&self) -> f64 {
        self.best.lock().as_ref().map_or(INFEASIBLE_COST, |b| b.cost)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Best full design found, aperture included
    pub design: Vec<f64>,
    /// Its peak side-lobe level
    pub cost: f64,
    /// Wall-clock time spent in the sweep loop
    pub elapsed_ms: f64,
    /// Number of completed sweeps
    pub sweeps: u64,
}

/// Particle swarm bound to one design problem
pub struct Swarm<P: ?Sized, R> {
    problem: Arc<P>,
    particles: Vec<Particle<P>>,
    global_best: GlobalBest,
    coefficients: PsoCoefficients,
    rng: R,
    sweeps: u64,
}

impl<P: DesignProblem, R: RngCore> Swarm<P, R> {
    /// Swarm of `ceil(20 + sqrt(n))` particles with default coefficients.
    pub fn for_problem(problem: P, rng: R) -> Result<Self> {
        let population = population_size(problem.dimensions());
        Self::new(problem, PsoCoefficients::default(), population, rng)
    }

    /// Build and evaluate `population` particles.
    pub fn new(
        problem: P,
        coefficients: PsoCoefficients,
        population: usize,
        mut rng: R,
    ) -> Result<Self> {
        if population == 0 {
            return Err(Error::InvalidArgument(
                "swarm needs at least one particle".to_string(),
            ));
        }

        let problem = Arc::new(problem);
        let initialiser = RandomInitialiser::new();
        let global_best = GlobalBest::new();
        let particles = (0..population)
            .map(|_| {
                Particle::new(
                    Arc::clone(&problem),
                    &initialiser,
                    &coefficients,
                    &global_best,
                    &mut rng,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            problem,
            particles,
            global_best,
            coefficients,
            rng,
            sweeps: 0,
        })
    }

    /// One sweep: update every particle once, in order.
    pub fn step(&mut self) -> Result<()> {
        for particle in &mut self.particles {
            particle.update(&self.coefficients, &self.global_best, &mut self.rng)?;
        }
        self.sweeps += 1;
        trace!(
            sweep = self.sweeps,
            cost = self.global_best.cost(),
            "sweep complete"
        );
        Ok(())
    }

    /// Sweep until `termination` fires, then report the global best.
    pub fn run(&mut self, mut termination: Termination) -> Result<RunReport> {
        info!(
            dimensions = self.problem.dimensions(),
            population = self.particles.len(),
            "starting swarm"
        );

        let started = Instant::now();
        while !termination.is_expired() {
            self.step()?;
        }
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let best = self.global_best.snapshot().ok_or_else(|| {
            Error::InvalidArgument("no particle reached a feasible design".to_string())
        })?;
        info!(
            cost = best.cost,
            sweeps = self.sweeps,
            elapsed_ms,
            "swarm finished"
        );

        Ok(RunReport {
            design: best.position.to_design(self.problem.aperture()),
            cost: best.cost,
            elapsed_ms,
            sweeps: self.sweeps,
        })
    }

    pub fn global_best(&self) -> &GlobalBest {
        &self.global_best
    }

    pub fn particles(&self) -> &[Particle<P>] {
        &self.particles
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }
}
