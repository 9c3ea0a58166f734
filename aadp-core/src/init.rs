//! Feasible random initialisation
//!
//! Designs are drawn coordinate-by-coordinate inside the problem bounds with
//! the last coordinate pinned to the aperture, and rejected until one passes
//! the feasibility check or the attempt budget runs out.

use rand_core::RngCore;
use tracing::{trace, warn};

use crate::antenna::DesignProblem;
use crate::vector::Vector;
use crate::{Error, Result};

/// Sampling attempts before initialisation gives up.
pub const MAX_ATTEMPTS: usize = 50;

/// Rejection sampler for feasible designs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomInitialiser {
    max_attempts: usize,
}

impl Default for RandomInitialiser {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl RandomInitialiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// A full feasible design for `problem`.
    ///
    /// Fails with [`Error::InitializationTimeout`] once `max_attempts`
    /// samples have all been rejected.
    pub fn feasible_design<P, R>(&self, problem: &P, rng: &mut R) -> Result<Vec<f64>>
    where
        P: DesignProblem + ?Sized,
        R: RngCore + ?Sized,
    {
        let free = problem.dimensions().saturating_sub(1);
        let (lower, upper): (Vec<f64>, Vec<f64>) =
            problem.bounds().into_iter().take(free).unzip();
        let (lower, upper) = (Vector::new(lower), Vector::new(upper));

        for attempt in 1..=self.max_attempts {
            let design = Vector::uniform_random_within(rng, &lower, &upper)?
                .to_design(problem.aperture());
            if problem.is_valid(&design) {
                trace!(attempt, "sampled feasible design");
                return Ok(design);
            }
        }

        warn!(
            attempts = self.max_attempts,
            dimensions = problem.dimensions(),
            "no feasible design found"
        );
        Err(Error::InitializationTimeout {
            attempts: self.max_attempts,
        })
    }

    /// Free-dimension starting position: a feasible design without its aperture.
    pub fn position<P, R>(&self, problem: &P, rng: &mut R) -> Result<Vector>
    where
        P: DesignProblem + ?Sized,
        R: RngCore + ?Sized,
    {
        Ok(Vector::from_design(&self.feasible_design(problem, rng)?))
    }

    /// Starting velocity, drawn from an independent feasible design.
    pub fn velocity<P, R>(&self, problem: &P, rng: &mut R, halve: bool) -> Result<Vector>
    where
        P: DesignProblem + ?Sized,
        R: RngCore + ?Sized,
    {
        let velocity = self.position(problem, rng)?;
        Ok(if halve { velocity / 2.0 } else { velocity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::AntennaArray;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A problem whose feasible region is empty.
    struct Unsatisfiable {
        checks: AtomicUsize,
    }

    impl DesignProblem for Unsatisfiable {
        fn dimensions(&self) -> usize {
            4
        }

        fn bounds(&self) -> Vec<(f64, f64)> {
            vec![(0.0, 1.0); 4]
        }

        fn aperture(&self) -> f64 {
            1.0
        }

        fn is_valid(&self, _design: &[f64]) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            false
        }

        fn evaluate(&self, _design: &[f64]) -> Result<f64> {
            Ok(f64::MAX)
        }
    }

    #[test]
    fn sampled_designs_are_feasible() {
        let mut rng = StdRng::seed_from_u64(1);
        let problem = AntennaArray::new(4, 30.0).unwrap();
        for _ in 0..20 {
            let design = RandomInitialiser::new()
                .feasible_design(&problem, &mut rng)
                .unwrap();
            assert_eq!(design.len(), 4);
            assert_eq!(design[3], 2.0);
            assert!(problem.is_valid(&design));
        }
    }

    #[test]
    fn empty_region_times_out_after_budget() {
        let problem = Unsatisfiable {
            checks: AtomicUsize::new(0),
        };
        let mut rng = StdRng::seed_from_u64(9);
        let err = RandomInitialiser::new()
            .feasible_design(&problem, &mut rng)
            .unwrap_err();
        assert_eq!(err, Error::InitializationTimeout { attempts: 50 });
        assert_eq!(problem.checks.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[test]
    fn position_and_velocity_drop_the_aperture() {
        let mut rng = StdRng::seed_from_u64(2);
        let problem = AntennaArray::new(4, 90.0).unwrap();
        let init = RandomInitialiser::new();
        let position = init.position(&problem, &mut rng).unwrap();
        assert_eq!(position.len(), 3);
        assert!(problem.is_valid(&position.to_design(2.0)));

        let velocity = init.velocity(&problem, &mut rng, true).unwrap();
        assert_eq!(velocity.len(), 3);
        assert!(velocity.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn single_antenna_has_no_free_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        let problem = AntennaArray::new(1, 90.0).unwrap();
        let design = RandomInitialiser::new()
            .feasible_design(&problem, &mut rng)
            .unwrap();
        assert_eq!(design, vec![0.5]);
    }
}
