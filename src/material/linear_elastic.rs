use super::{prepare, reduce, ElasticConstants, ElasticState, MaterialModel, StepResult, StepStatus, Update};
use crate::base::{Options, ParamElasticity, Settings, StressState};
use crate::tensor::Tensor2;
use crate::Error;

/// Implements the linear isotropic elastic model
///
/// ```text
/// σ_new = σ_old + C : Δε    with    C = 2G P_dev + K I⊗I
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearElastic {
    constants: ElasticConstants,
    settings: Settings,
}

impl LinearElastic {
    /// Name of the model
    pub const NAME: &'static str = "LinearIsotropicElasticity";

    /// Allocates a new instance
    pub fn new(param: &ParamElasticity) -> Result<Self, Error> {
        Ok(LinearElastic {
            constants: ElasticConstants::new(param, Self::NAME)?,
            settings: Settings::new(),
        })
    }

    /// Replaces the settings owned by the model
    pub fn with_settings(mut self, settings: Settings) -> Result<Self, Error> {
        settings.validate(Self::NAME)?;
        self.settings = settings;
        Ok(self)
    }

    /// Returns the elastic constants
    pub fn constants(&self) -> &ElasticConstants {
        &self.constants
    }
}

impl MaterialModel for LinearElastic {
    type State = ElasticState;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn initial_state(&self) -> ElasticState {
        ElasticState::default()
    }

    fn material_response(
        &self,
        old: &ElasticState,
        delta_strain: &Tensor2,
        dt: f64,
        stress_state: StressState,
        options: &Options,
    ) -> Result<StepResult<ElasticState>, Error> {
        let settings = prepare(Self::NAME, &self.settings, options, dt)?;
        let dd = self.constants.stiffness();
        reduce(Self::NAME, stress_state, delta_strain, dd, &settings, options.tangent, |deps| {
            let stress = &old.stress + dd.ddot_t2(deps); // σ += D : Δε
            Ok(Update {
                stress: stress.clone(),
                state: ElasticState { stress },
                tangent: dd.clone(),
                status: StepStatus::Elastic,
                iterations: 0,
            })
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
