use super::{prepare, reduce, return_mapping, validate_param_j2, yield_function, ElasticConstants, FlowRule};
use super::{MaterialModel, PlasticState, StepResult};
use crate::base::{Options, ParamElasticity, ParamJ2, Settings, StressState};
use crate::tensor::Tensor2;
use crate::Error;

/// Implements the rate-dependent von Mises (J2) model with a Norton-type overstress law
///
/// The plastic multiplier follows
///
/// ```text
/// Δλ = (Δt / t*) η(Φ_new)    with    η(Φ) = (⟨Φ⟩ / Y0)ⁿ
/// ```
///
/// where Φ is the yield function of [super::J2Plasticity] (Voce isotropic and
/// Armstrong-Frederick kinematic hardening). The implicit equation is inverted as
/// `Φ(Δλ) = Y0 (Δλ t* / Δt)^(1/n)` and solved for Δλ by the local Newton method.
///
/// * `Δt = 0` or `t* = ∞`: no plastic flow (the trial state is accepted)
/// * `t* = 0`: the rate-independent solution
#[derive(Clone, Debug, PartialEq)]
pub struct J2ViscoPlasticity {
    constants: ElasticConstants,
    param: ParamJ2,
    n: f64,
    t_star: f64,
    settings: Settings,
}

impl J2ViscoPlasticity {
    /// Name of the model
    pub const NAME: &'static str = "J2ViscoPlasticity";

    /// Allocates a new instance
    ///
    /// * `n` -- rate-sensitivity exponent (finite and > 0)
    /// * `t_star` -- reference time (≥ 0; may be infinite)
    pub fn new(elasticity: &ParamElasticity, param: &ParamJ2, n: f64, t_star: f64) -> Result<Self, Error> {
        let constants = ElasticConstants::new(elasticity, Self::NAME)?;
        validate_param_j2(param, Self::NAME)?;
        if !n.is_finite() || n <= 0.0 {
            return Err(Error::config(Self::NAME, "n must be finite and > 0"));
        }
        if t_star.is_nan() || t_star < 0.0 {
            return Err(Error::config(Self::NAME, "t_star must be ≥ 0 (or infinite)"));
        }
        Ok(J2ViscoPlasticity {
            constants,
            param: *param,
            n,
            t_star,
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

    /// Returns the plasticity parameters
    pub fn param(&self) -> &ParamJ2 {
        &self.param
    }

    /// Calculates the yield function Φ at the given state
    pub fn yield_function(&self, state: &PlasticState) -> f64 {
        yield_function(&self.param, state)
    }

    /// Evaluates the overstress function η(Φ) = (⟨Φ⟩ / Y0)ⁿ
    pub fn overstress(&self, phi: f64) -> f64 {
        f64::powf(f64::max(phi, 0.0) / self.param.y0, self.n)
    }

    /// Selects the flow rule for the time increment
    fn flow_rule(&self, dt: f64) -> FlowRule {
        if dt == 0.0 || self.t_star.is_infinite() {
            FlowRule::Frozen
        } else {
            FlowRule::Overstress {
                n: self.n,
                rate: self.t_star / dt,
            }
        }
    }
}

impl MaterialModel for J2ViscoPlasticity {
    type State = PlasticState;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn initial_state(&self) -> PlasticState {
        PlasticState::default()
    }

    fn material_response(
        &self,
        old: &PlasticState,
        delta_strain: &Tensor2,
        dt: f64,
        stress_state: StressState,
        options: &Options,
    ) -> Result<StepResult<PlasticState>, Error> {
        let settings = prepare(Self::NAME, &self.settings, options, dt)?;
        let flow = self.flow_rule(dt);
        let dde = self.constants.stiffness();
        reduce(Self::NAME, stress_state, delta_strain, dde, &settings, options.tangent, |deps| {
            return_mapping(Self::NAME, &self.constants, &self.param, old, deps, flow, &settings)
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
