use crate::Error;
use serde::{Deserialize, Serialize};

/// Holds the tolerances and iteration caps of the local iterations
///
/// # Default values
///
/// | field                   | default |
/// |-------------------------|---------|
/// | `tolerance`             | 1e-10   |
/// | `max_iterations`        | 50      |
/// | `stress_tolerance`      | 1e-10   |
/// | `max_stress_iterations` | 25      |
///
/// These values are part of the public contract and are kept stable across versions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tolerance on the return-mapping residual, relative to the initial yield stress
    pub tolerance: f64,

    /// Maximum number of return-mapping (Newton) iterations
    pub max_iterations: usize,

    /// Tolerance on the stress residual of reduced stress states (e.g., uniaxial stress)
    ///
    /// The residual is measured relative to the largest of the current stress
    /// magnitude and the elastic stress caused by the strain increment.
    pub stress_tolerance: f64,

    /// Maximum number of iterations on the unknown strain components of reduced stress states
    pub max_stress_iterations: usize,
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            tolerance: 1e-10,
            max_iterations: 50,
            stress_tolerance: 1e-10,
            max_stress_iterations: 25,
        }
    }

    /// Sets the return-mapping tolerance
    pub fn set_tolerance(&mut self, value: f64) -> &mut Self {
        self.tolerance = value;
        self
    }

    /// Sets the maximum number of return-mapping iterations
    pub fn set_max_iterations(&mut self, value: usize) -> &mut Self {
        self.max_iterations = value;
        self
    }

    /// Sets the stress-state tolerance
    pub fn set_stress_tolerance(&mut self, value: f64) -> &mut Self {
        self.stress_tolerance = value;
        self
    }

    /// Sets the maximum number of stress-state iterations
    pub fn set_max_stress_iterations(&mut self, value: usize) -> &mut Self {
        self.max_stress_iterations = value;
        self
    }

    /// Validates the tolerances and caps
    ///
    /// `model` identifies the caller in the error message.
    pub fn validate(&self, model: &'static str) -> Result<(), Error> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::config(model, "tolerance must be finite and > 0"));
        }
        if self.max_iterations == 0 {
            return Err(Error::config(model, "max_iterations must be ≥ 1"));
        }
        if !self.stress_tolerance.is_finite() || self.stress_tolerance <= 0.0 {
            return Err(Error::config(model, "stress_tolerance must be finite and > 0"));
        }
        if self.max_stress_iterations == 0 {
            return Err(Error::config(model, "max_stress_iterations must be ≥ 1"));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

/// Holds the per-call options of a stress update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Options {
    /// Overrides the settings stored in the model (for this call only)
    pub settings: Option<Settings>,

    /// Requests the consistent tangent
    pub tangent: bool,
}

impl Options {
    /// Returns options requesting the consistent tangent
    pub fn with_tangent() -> Self {
        Options {
            settings: None,
            tangent: true,
        }
    }

    /// Returns the settings to be used in this call
    pub fn resolve(&self, model_settings: &Settings) -> Settings {
        self.settings.unwrap_or(*model_settings)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
