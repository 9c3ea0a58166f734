//! Particle state in PSO
//!
//! A particle moves through the free dimensions of the design space (every
//! coordinate except the pinned aperture). Each update follows
//!
//! ```text
//! v' = w v + c1 r1 ∘ (pbest - x) + c2 r2 ∘ (gbest - x)
//! x' = x + v'
//! ```
//!
//! where `∘` is the elementwise product, then evaluates the new position and
//! offers it to the personal and shared global bests.

use std::sync::Arc;

use rand_core::RngCore;
use tracing::debug;

use crate::algorithms::PsoCoefficients;
use crate::antenna::{DesignProblem, INFEASIBLE_COST};
use crate::init::RandomInitialiser;
use crate::swarm::GlobalBest;
use crate::vector::Vector;
use crate::Result;

/// One candidate solution and its memory
#[derive(Debug, Clone)]
pub struct Particle<P: ?Sized> {
    problem: Arc<P>,
    position: Vector,
    velocity: Vector,
    personal_best: Vector,
    personal_best_cost: f64,
}

impl<P: DesignProblem + ?Sized> Particle<P> {
    /// Seed a particle at a random feasible position and evaluate it.
    ///
    /// The starting position is offered to `global_best`.
    pub fn new<R: RngCore + ?Sized>(
        problem: Arc<P>,
        initialiser: &RandomInitialiser,
        coefficients: &PsoCoefficients,
        global_best: &GlobalBest,
        rng: &mut R,
    ) -> Result<Self> {
        let position = initialiser.position(problem.as_ref(), rng)?;
        let velocity =
            initialiser.velocity(problem.as_ref(), rng, coefficients.halve_initial_velocity)?;

        let mut particle = Self {
            problem,
            personal_best: position.clone(),
            personal_best_cost: INFEASIBLE_COST,
            position,
            velocity,
        };
        particle.evaluate(global_best)?;
        Ok(particle)
    }

    /// Advance one step: velocity, position, then cost and bests.
    ///
    /// The global best is read when this particle moves, so updates made by
    /// particles earlier in the same sweep are already visible.
    pub fn update<R: RngCore + ?Sized>(
        &mut self,
        coefficients: &PsoCoefficients,
        global_best: &GlobalBest,
        rng: &mut R,
    ) -> Result<()> {
        let dimensions = self.position.len();
        let r1 = coefficients.sampling.sample(rng, dimensions);
        let r2 = coefficients.sampling.sample(rng, dimensions);

        let attractor = global_best
            .snapshot()
            .map(|best| best.position)
            .unwrap_or_else(|| self.personal_best.clone());

        let cognitive =
            r1.hadamard(&self.personal_best.sub(&self.position)?)? * coefficients.cognitive;
        let social = r2.hadamard(&attractor.sub(&self.position)?)? * coefficients.social;

        self.velocity = (&self.velocity * coefficients.inertia)
            .add(&cognitive)?
            .add(&social)?;
        self.position = self.position.add(&self.velocity)?;

        self.evaluate(global_best)
    }

    fn evaluate(&mut self, global_best: &GlobalBest) -> Result<()> {
        let cost = self.problem.evaluate(&self.design())?;

        // ties never replace a best
        if cost < self.personal_best_cost {
            self.personal_best = self.position.clone();
            self.personal_best_cost = cost;

            if global_best.offer(&self.position, cost) {
                debug!(cost, "global best improved");
            }
        }
        Ok(())
    }

    /// Current full design, aperture included
    pub fn design(&self) -> Vec<f64> {
        self.position.to_design(self.problem.aperture())
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn personal_best(&self) -> &Vector {
        &self.personal_best
    }

    pub fn personal_best_cost(&self) -> f64 {
        self.personal_best_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::AntennaArray;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> (Arc<AntennaArray>, GlobalBest, StdRng) {
        (
            Arc::new(AntennaArray::new(3, 90.0).unwrap()),
            GlobalBest::new(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn new_particle_is_feasible_and_offered() {
        let (problem, global, mut rng) = seeded(1);
        let coefficients = PsoCoefficients::default();
        let p = Particle::new(
            problem.clone(),
            &RandomInitialiser::new(),
            &coefficients,
            &global,
            &mut rng,
        )
        .unwrap();

        assert_eq!(p.position().len(), 2);
        assert_eq!(p.velocity().len(), 2);
        assert!(problem.is_valid(&p.design()));
        assert_eq!(p.personal_best(), p.position());
        assert!(p.personal_best_cost() < INFEASIBLE_COST);

        let best = global.snapshot().unwrap();
        assert_eq!(best.cost, p.personal_best_cost());
        assert_eq!(&best.position, p.position());
    }

    #[test]
    fn personal_best_never_regresses() {
        let (problem, global, mut rng) = seeded(2);
        let coefficients = PsoCoefficients::default();
        let mut p = Particle::new(
            problem,
            &RandomInitialiser::new(),
            &coefficients,
            &global,
            &mut rng,
        )
        .unwrap();

        let mut last = p.personal_best_cost();
        for _ in 0..25 {
            p.update(&coefficients, &global, &mut rng).unwrap();
            assert!(p.personal_best_cost() <= last);
            assert!(global.cost() <= p.personal_best_cost());
            last = p.personal_best_cost();
        }
    }

    #[test]
    fn update_follows_velocity_rule() {
        let (problem, global, mut rng) = seeded(3);
        let coefficients = PsoCoefficients::default();
        let mut p = Particle::new(
            problem,
            &RandomInitialiser::new(),
            &coefficients,
            &global,
            &mut rng,
        )
        .unwrap();

        // lone particle: pbest == gbest == x, so only inertia acts
        let before = p.position().clone();
        let velocity = p.velocity().clone();
        p.update(&coefficients, &global, &mut rng).unwrap();

        let expected = before.add(&(&velocity * coefficients.inertia)).unwrap();
        for (a, b) in p.position().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
