use super::{prepare, MaterialModel, StepResult, StepStatus, ZenerState};
use crate::base::{Options, Settings, StressState};
use crate::tensor::{Tensor2, Tensor4};
use crate::Error;

/// Implements the Zener (standard linear solid) model in uniaxial stress
///
/// A spring E1 in parallel with a Maxwell branch (spring E2 in series with a damper η):
///
/// ```text
/// σ = E1 ε + E2 (ε - εv)    with    η dεv/dt = E2 (ε - εv)
/// ```
///
/// The viscous strain is integrated with the backward Euler method. Only
/// [StressState::UniaxialStress] is supported; the axial component of the strain
/// increment drives the model. An infinite time increment gives the fully relaxed
/// response (`εv = ε`, tangent E1).
#[derive(Clone, Debug, PartialEq)]
pub struct Zener1D {
    e1: f64,
    e2: f64,
    eta: f64,

    /// Validated and returned by [MaterialModel::settings] but not used by the update,
    /// which is closed-form
    settings: Settings,
}

impl Zener1D {
    /// Name of the model
    pub const NAME: &'static str = "Zener1D";

    /// Allocates a new instance
    ///
    /// * `e1` -- stiffness of the equilibrium spring (≥ 0)
    /// * `e2` -- stiffness of the Maxwell spring (> 0)
    /// * `eta` -- viscosity of the damper (> 0)
    pub fn new(e1: f64, e2: f64, eta: f64) -> Result<Self, Error> {
        if !e1.is_finite() || e1 < 0.0 {
            return Err(Error::config(Self::NAME, "e1 must be finite and ≥ 0"));
        }
        if !e2.is_finite() || e2 <= 0.0 {
            return Err(Error::config(Self::NAME, "e2 must be finite and > 0"));
        }
        if !eta.is_finite() || eta <= 0.0 {
            return Err(Error::config(Self::NAME, "eta must be finite and > 0"));
        }
        Ok(Zener1D {
            e1,
            e2,
            eta,
            settings: Settings::new(),
        })
    }

    /// Replaces the settings owned by the model
    ///
    /// The settings are validated and stored so that all models share the same interface.
    /// The update has no local or stress-state iterations, thus they do not affect the results.
    pub fn with_settings(mut self, settings: Settings) -> Result<Self, Error> {
        settings.validate(Self::NAME)?;
        self.settings = settings;
        Ok(self)
    }

    /// Returns the relaxation time τ = η / E2
    pub fn relaxation_time(&self) -> f64 {
        self.eta / self.e2
    }

    /// Returns the instantaneous modulus E1 + E2
    pub fn instantaneous_modulus(&self) -> f64 {
        self.e1 + self.e2
    }

    /// Returns the relaxed (long-term) modulus E1
    pub fn relaxed_modulus(&self) -> f64 {
        self.e1
    }
}

impl MaterialModel for Zener1D {
    type State = ZenerState;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn initial_state(&self) -> ZenerState {
        ZenerState::default()
    }

    fn material_response(
        &self,
        old: &ZenerState,
        delta_strain: &Tensor2,
        dt: f64,
        stress_state: StressState,
        options: &Options,
    ) -> Result<StepResult<ZenerState>, Error> {
        prepare(Self::NAME, &self.settings, options, dt)?;
        if stress_state != StressState::UniaxialStress {
            return Err(Error::config(
                Self::NAME,
                format!("only uniaxial stress is supported ({} requested)", stress_state),
            ));
        }
        let deps = delta_strain.get(0, 0);
        let strain = old.strain + deps;
        let theta = dt * self.e2 / self.eta;
        let (viscous_strain, modulus) = if theta.is_infinite() {
            (strain, self.e1) // the Maxwell branch is fully relaxed
        } else {
            (
                (old.viscous_strain + theta * strain) / (1.0 + theta),
                self.e1 + self.e2 / (1.0 + theta),
            )
        };
        let stress = self.e1 * strain + self.e2 * (strain - viscous_strain);
        let tangent = if options.tangent {
            let mut dd = Tensor4::new();
            dd.set(0, 0, modulus);
            Some(dd)
        } else {
            None
        };
        Ok(StepResult {
            stress: Tensor2::uniaxial(stress),
            strain_increment: Tensor2::uniaxial(deps),
            state: ZenerState {
                stress,
                strain,
                viscous_strain,
            },
            tangent,
            status: if dt > 0.0 {
                StepStatus::Viscoelastic
            } else {
                StepStatus::Elastic
            },
            iterations: 0,
            stress_state_iterations: 0,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
