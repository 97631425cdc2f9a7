use super::Settings;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Indicates why a local iteration stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The residual satisfied the tolerance
    Converged,

    /// The maximum number of iterations was reached without satisfying the tolerance
    MaxIterations,
}

/// Holds the result of a scalar local iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonOutcome {
    /// Final estimate of the root
    pub root: f64,

    /// Residual at the final estimate
    pub residual: f64,

    /// Derivative of the residual at the final estimate
    pub derivative: f64,

    /// Number of updates of the estimate
    pub iterations: usize,

    /// Termination reason
    pub termination: Termination,
}

impl NewtonOutcome {
    /// Indicates that the tolerance was satisfied
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Implements a bounded, safeguarded Newton iteration for scalar equations
///
/// The residual `r(x)` must be decreasing with `r(lower) > 0` and `r(upper) < 0`
/// (as for the consistency condition of plasticity where `x = Δλ`). Newton steps
/// leaving the current bracket are replaced by bisection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalNewton {
    /// Absolute tolerance on the residual
    pub tolerance: f64,

    /// Maximum number of updates
    pub max_iterations: usize,
}

impl LocalNewton {
    /// Allocates a new instance
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        LocalNewton {
            tolerance,
            max_iterations,
        }
    }

    /// Allocates a new instance with the tolerance scaled by `scale`
    pub fn from_settings(settings: &Settings, scale: f64) -> Self {
        LocalNewton {
            tolerance: settings.tolerance * scale,
            max_iterations: settings.max_iterations,
        }
    }

    /// Solves `r(x) = 0` in `[lower, upper]` starting from `x0`
    ///
    /// The function `f` returns the residual and its derivative.
    pub fn solve<F>(&self, x0: f64, lower: f64, upper: f64, mut f: F) -> NewtonOutcome
    where
        F: FnMut(f64) -> (f64, f64),
    {
        let (mut lo, mut hi) = (lower, upper);
        let mut x = x0.clamp(lo, hi);
        let (mut r, mut dr) = f(x);
        let mut iterations = 0;
        loop {
            trace!(iterations, x, residual = r, derivative = dr, "local Newton");
            if f64::abs(r) <= self.tolerance {
                return self.outcome(x, r, dr, iterations, Termination::Converged);
            }
            if iterations == self.max_iterations {
                return self.outcome(x, r, dr, iterations, Termination::MaxIterations);
            }
            if r > 0.0 {
                lo = x;
            } else {
                hi = x;
            }
            let newton = x - r / dr;
            x = if dr.is_finite() && dr != 0.0 && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
            (r, dr) = f(x);
            iterations += 1;
        }
    }

    fn outcome(&self, root: f64, residual: f64, derivative: f64, iterations: usize, termination: Termination) -> NewtonOutcome {
        NewtonOutcome {
            root,
            residual,
            derivative,
            iterations,
            termination,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
