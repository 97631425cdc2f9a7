use crate::base::{Options, Settings, StressState};
use crate::tensor::{Tensor2, Tensor4};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicates which branch of the constitutive update was taken
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// The trial state was admissible (no internal variable changed)
    Elastic,

    /// A rate-independent plastic correction was applied
    Plastic,

    /// A rate-dependent (overstress) plastic correction was applied
    ViscoPlastic,

    /// The viscous strain of a rheological model was updated
    Viscoelastic,
}

impl StepStatus {
    /// Indicates that the internal variables changed because of plastic flow
    pub fn is_plastic(&self) -> bool {
        matches!(self, StepStatus::Plastic | StepStatus::ViscoPlastic)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Elastic => write!(f, "elastic"),
            StepStatus::Plastic => write!(f, "plastic"),
            StepStatus::ViscoPlastic => write!(f, "viscoplastic"),
            StepStatus::Viscoelastic => write!(f, "viscoelastic"),
        }
    }
}

/// Holds the results of a stress update
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult<S> {
    /// New stress tensor
    pub stress: Tensor2,

    /// Strain increment actually applied
    ///
    /// Under a reduced stress state this includes the solved (non-controlled) components.
    pub strain_increment: Tensor2,

    /// New state (the old one is never modified)
    pub state: S,

    /// Consistent tangent dσ/dε (if requested)
    ///
    /// Under plane stress and uniaxial stress this is the condensed tangent with
    /// zeros in the non-controlled rows and columns.
    pub tangent: Option<Tensor4>,

    /// Branch taken by the update
    pub status: StepStatus,

    /// Number of local iterations of the final evaluation
    pub iterations: usize,

    /// Number of iterations on the non-controlled strain components
    pub stress_state_iterations: usize,
}

impl<S> StepResult<S> {
    /// Converts the state into another type (e.g. to wrap it in an enum)
    pub fn map_state<T, F>(self, f: F) -> StepResult<T>
    where
        F: FnOnce(S) -> T,
    {
        StepResult {
            stress: self.stress,
            strain_increment: self.strain_increment,
            state: f(self.state),
            tangent: self.tangent,
            status: self.status,
            iterations: self.iterations,
            stress_state_iterations: self.stress_state_iterations,
        }
    }
}

/// Specifies the essential functions for stress-strain models
pub trait MaterialModel: Send + Sync {
    /// Defines the internal state of a material point
    type State: Clone + fmt::Debug + Send + Sync;

    /// Returns the name of the model
    fn name(&self) -> &'static str;

    /// Returns the settings owned by the model
    fn settings(&self) -> &Settings;

    /// Returns the virgin state (zero stress, zero internal variables)
    fn initial_state(&self) -> Self::State;

    /// Updates the stress given the strain increment and the time increment
    ///
    /// The old state is not modified; the new state is returned in [StepResult].
    fn material_response(
        &self,
        old: &Self::State,
        delta_strain: &Tensor2,
        dt: f64,
        stress_state: StressState,
        options: &Options,
    ) -> Result<StepResult<Self::State>, Error>;
}

/// Holds the results of a three-dimensional (strain-driven) update
#[derive(Clone, Debug)]
pub(crate) struct Update<S> {
    pub stress: Tensor2,
    pub state: S,
    pub tangent: Tensor4,
    pub status: StepStatus,
    pub iterations: usize,
}

/// Returns the settings for this call after validating them and the time increment
pub(crate) fn prepare(model: &'static str, own: &Settings, options: &Options, dt: f64) -> Result<Settings, Error> {
    if dt.is_nan() || dt < 0.0 {
        return Err(Error::config(model, "the time increment must be ≥ 0"));
    }
    let settings = options.resolve(own);
    settings.validate(model)?;
    Ok(settings)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
