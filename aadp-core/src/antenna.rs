//! The antenna array design problem
//!
//! A design is a list of `n` element positions along a line, measured in
//! wavelengths from the left end of the array. A design is feasible when
//!
//! 1. the largest position (the aperture) is exactly `n / 2`,
//! 2. every position lies within `[0, n / 2]`,
//! 3. sorted neighbours are at least [`MIN_SPACING`] apart.
//!
//! The cost of a feasible design is its peak side-lobe level: the power of
//! the strongest lobe of the array factor that is not the main beam.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Minimum spacing permitted between antennae.
pub const MIN_SPACING: f64 = 0.25;

/// Tolerance on the aperture constraint.
pub const APERTURE_TOLERANCE: f64 = 1e-10;

/// Cost of a design outside the feasible region.
pub const INFEASIBLE_COST: f64 = f64::MAX;

/// Cost of a pattern with fewer than two peaks, i.e. no detectable side lobe.
pub const NO_SIDE_LOBE_COST: f64 = f64::MIN;

/// Elevation sampling step, in degrees.
pub const ELEVATION_STEP: f64 = 0.01;

/// Number of sampling steps between 0° and 180°.
const ELEVATION_STEPS: usize = 18_000;

/// A constrained design space with a cost to minimise.
///
/// Initialisation and particles only see a problem through this trait.
pub trait DesignProblem: Send + Sync {
    /// Number of coordinates in a full design
    fn dimensions(&self) -> usize;

    /// `(min, max)` for every coordinate of a full design
    fn bounds(&self) -> Vec<(f64, f64)>;

    /// Value pinned to the last coordinate of every feasible design
    fn aperture(&self) -> f64;

    /// Whether `design` lies in the feasible region
    fn is_valid(&self, design: &[f64]) -> bool;

    /// Cost of `design`; lower is better
    fn evaluate(&self, design: &[f64]) -> Result<f64>;
}

/// Linear antenna array with a desired main beam direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaArray {
    n_antennae: usize,
    steering_angle: f64,
}

#[derive(Debug, Clone, Copy)]
struct PowerPeak {
    elevation: f64,
    power: f64,
}

impl AntennaArray {
    /// Construct an antenna design problem.
    ///
    /// `steering_angle` is the desired direction of the main beam in degrees.
    pub fn new(n_antennae: usize, steering_angle: f64) -> Result<Self> {
        if n_antennae == 0 {
            return Err(Error::InvalidArgument(
                "antenna count must be at least 1".to_string(),
            ));
        }
        if !steering_angle.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "steering angle must be finite, got {steering_angle}"
            )));
        }
        Ok(Self {
            n_antennae,
            steering_angle,
        })
    }

    pub fn n_antennae(&self) -> usize {
        self.n_antennae
    }

    pub fn steering_angle(&self) -> f64 {
        self.steering_angle
    }

    /// Cost that never fails.
    ///
    /// Wrongly sized and infeasible designs both get [`INFEASIBLE_COST`]
    /// without sampling the array factor.
    pub fn penalized_cost(&self, design: &[f64]) -> f64 {
        if !self.is_valid(design) {
            return INFEASIBLE_COST;
        }
        self.peak_side_lobe(design)
    }

    /// Array factor in (natural-log) decibels at `elevation` degrees.
    ///
    /// `20 * ln |sum_x cos(2 pi x (cos(elevation) - cos(steering)))|`
    pub fn array_factor(&self, design: &[f64], elevation: f64) -> f64 {
        let steering = self.steering_angle.to_radians().cos();
        array_factor(design, elevation.to_radians().cos() - steering)
    }

    fn peak_side_lobe(&self, design: &[f64]) -> f64 {
        side_lobe_level(&self.power_peaks(design), self.steering_angle)
    }

    /// Local maxima of the pattern over 0°..180°, strongest first.
    ///
    /// The 180° endpoint is always included.
    fn power_peaks(&self, design: &[f64]) -> Vec<PowerPeak> {
        let steering = self.steering_angle.to_radians().cos();
        let sample = |step: usize| {
            let elevation = step as f64 * ELEVATION_STEP;
            PowerPeak {
                elevation,
                power: array_factor(design, elevation.to_radians().cos() - steering),
            }
        };

        let mut peaks = Vec::new();
        let mut prev = f64::MIN;
        let mut current = sample(0);
        for step in 1..=ELEVATION_STEPS {
            let next = sample(step);
            if current.power >= prev && current.power >= next.power {
                peaks.push(current);
            }
            prev = current.power;
            current = next;
        }
        peaks.push(sample(ELEVATION_STEPS));

        peaks.sort_by(|l, r| r.power.total_cmp(&l.power));
        peaks
    }
}

/// Side-lobe level from peaks sorted strongest first.
///
/// The strongest peak is the main beam unless another peak sits closer to
/// the steering angle, in which case the main beam is misplaced and its own
/// power is the level.
fn side_lobe_level(peaks: &[PowerPeak], steering_angle: f64) -> f64 {
    let [strongest, runner_up, ..] = peaks else {
        return NO_SIDE_LOBE_COST;
    };

    let distance_from_steering = (strongest.elevation - steering_angle).abs();
    let misplaced = peaks[1..]
        .iter()
        .any(|p| (p.elevation - steering_angle).abs() < distance_from_steering);
    if misplaced {
        strongest.power
    } else {
        runner_up.power
    }
}

fn array_factor(design: &[f64], phase_delta: f64) -> f64 {
    let sum: f64 = design
        .iter()
        .map(|x| (2.0 * core::f64::consts::PI * x * phase_delta).cos())
        .sum();
    20.0 * sum.abs().ln()
}

impl DesignProblem for AntennaArray {
    fn dimensions(&self) -> usize {
        self.n_antennae
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, self.aperture()); self.n_antennae]
    }

    fn aperture(&self) -> f64 {
        self.n_antennae as f64 / 2.0
    }

    fn is_valid(&self, design: &[f64]) -> bool {
        if design.len() != self.n_antennae {
            return false;
        }
        let mut sorted = design.to_vec();
        sorted.sort_by(f64::total_cmp);

        let Some(&largest) = sorted.last() else {
            return false;
        };
        if (largest - self.aperture()).abs() > APERTURE_TOLERANCE {
            return false;
        }
        // the aperture element is pinned by the tolerance check above
        let upper = self.aperture();
        let in_bounds = sorted[..sorted.len() - 1]
            .iter()
            .all(|&x| (0.0..=upper).contains(&x));
        if !in_bounds {
            return false;
        }
        sorted.windows(2).all(|w| w[1] - w[0] >= MIN_SPACING)
    }

    fn evaluate(&self, design: &[f64]) -> Result<f64> {
        if design.len() != self.n_antennae {
            return Err(Error::SizeMismatch {
                expected: self.n_antennae,
                actual: design.len(),
            });
        }
        Ok(self.penalized_cost(design))
    }
}
