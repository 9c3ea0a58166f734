//! Termination policies
//!
//! A policy is polled once per swarm sweep and answers a single question:
//! has the run ended? Iteration policies count their own polls, time policies
//! compare the clock against a deadline fixed when they were created.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stateful "has the run ended" predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Expires on the `limit`-th poll
    FixedIterations { count: u64, limit: u64 },
    /// Expires once the clock passes `deadline`
    Timeout { deadline: Instant },
}

impl Termination {
    /// Run for exactly `limit` sweeps.
    pub fn fixed_iterations(limit: u64) -> Result<Self> {
        if limit < 1 {
            return Err(Error::InvalidArgument(
                "iteration count must be at least 1".to_string(),
            ));
        }
        Ok(Self::FixedIterations { count: 0, limit })
    }

    /// Run until `duration` from now has elapsed.
    pub fn timeout(duration: Duration) -> Result<Self> {
        let deadline = Instant::now().checked_add(duration).ok_or_else(|| {
            Error::InvalidArgument(format!("timeout {duration:?} overflows the clock"))
        })?;
        Ok(Self::Timeout { deadline })
    }

    /// Run until `millis` milliseconds from now have elapsed.
    pub fn timeout_ms(millis: f64) -> Result<Self> {
        if millis.is_nan() || millis < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "timeout must be non-negative, got {millis}ms"
            )));
        }
        let duration = Duration::try_from_secs_f64(millis / 1000.0)
            .map_err(|e| Error::InvalidArgument(format!("timeout {millis}ms: {e}")))?;
        Self::timeout(duration)
    }

    /// Poll the policy. Iteration policies advance their counter on every call.
    pub fn is_expired(&mut self) -> bool {
        match self {
            Self::FixedIterations { count, limit } => {
                *count += 1;
                *count >= *limit
            }
            Self::Timeout { deadline } => Instant::now() > *deadline,
        }
    }
}

/// Serializable description of how long a run may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Budget {
    /// Fixed number of sweeps
    Iterations(u64),
    /// Wall-clock limit
    Time(Duration),
}

impl Default for Budget {
    fn default() -> Self {
        Self::Iterations(100)
    }
}

impl Budget {
    /// Start the clock: build the live policy for this budget.
    pub fn start(&self) -> Result<Termination> {
        match *self {
            Self::Iterations(limit) => Termination::fixed_iterations(limit),
            Self::Time(duration) => Termination::timeout(duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_iterations_fire_on_the_nth_poll() {
        for limit in [1, 2, 7, 100] {
            let mut t = Termination::fixed_iterations(limit).unwrap();
            for _ in 1..limit {
                assert!(!t.is_expired());
            }
            assert!(t.is_expired());
        }
    }

    #[test]
    fn zero_iterations_is_rejected() {
        assert!(matches!(
            Termination::fixed_iterations(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn negative_timeout_is_rejected() {
        assert!(matches!(
            Termination::timeout_ms(-1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Termination::timeout_ms(f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn timeout_expires_after_deadline() {
        let mut t = Termination::timeout(Duration::from_secs(3600)).unwrap();
        assert!(!t.is_expired());

        let mut t = Termination::timeout_ms(0.0).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        assert!(t.is_expired());
    }

    #[test]
    fn budget_defaults_to_a_hundred_sweeps() {
        assert_eq!(Budget::default(), Budget::Iterations(100));
        assert_eq!(
            Budget::Iterations(3).start().unwrap(),
            Termination::FixedIterations { count: 0, limit: 3 }
        );
        assert!(Budget::Iterations(0).start().is_err());
    }

    #[test]
    fn budget_round_trips_through_json() {
        let json = serde_json::to_string(&Budget::Iterations(5)).unwrap();
        assert_eq!(json, r#"{"iterations":5}"#);
        let back: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Budget::Iterations(5));
    }
}
