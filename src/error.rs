use std::fmt;
use thiserror::Error;

/// Identifies the local iteration that failed to converge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Rate-independent return mapping (consistency condition)
    ReturnMapping,

    /// Rate-dependent return mapping (overstress law)
    Overstress,

    /// Iteration on the unknown strain components of a reduced stress state
    StressState,
}

/// Defines the errors raised by the stress-update routines
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Invalid or ambiguous parameters, or an unsupported stress state
    #[error("{model}: {reason}")]
    Configuration { model: &'static str, reason: String },

    /// Malformed tensor dimensions or representation
    #[error("shape error: {0}")]
    Shape(String),

    /// A local iteration exceeded its cap without satisfying the tolerance
    #[error("{model}: {stage} did not converge after {iterations} iterations (residual = {residual:e})")]
    Nonconvergence {
        model: &'static str,
        stage: Stage,
        iterations: usize,
        residual: f64,
    },
}

impl Error {
    /// Returns a new configuration error
    pub(crate) fn config(model: &'static str, reason: impl Into<String>) -> Self {
        Error::Configuration {
            model,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ReturnMapping => write!(f, "return mapping"),
            Stage::Overstress => write!(f, "viscoplastic return mapping"),
            Stage::StressState => write!(f, "stress-state iteration"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
