use super::{prepare, reduce, validate_param_j2, ArmstrongFrederick, ElasticConstants, Voce};
use super::{MaterialModel, PlasticState, StepResult, StepStatus, Update};
use crate::base::{LocalNewton, Options, ParamElasticity, ParamJ2, Settings, StressState};
use crate::tensor::{Tensor2, Tensor4};
use crate::{Error, Stage};
use russell_tensor::{IDENTITY2, P_SYMDEV, SQRT_3_BY_2};
use tracing::{debug, warn};

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Defines an alias to P_SYMDEV
const PSD: &[[f64; 9]; 9] = &P_SYMDEV;

/// Specifies the flow rule used by the return mapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FlowRule {
    /// Consistency condition `Φ = 0`
    RateIndependent,

    /// Overstress law `Δλ = (Δt/t*) (⟨Φ⟩/Y0)ⁿ` with `rate = t*/Δt` finite
    Overstress { n: f64, rate: f64 },

    /// No plastic flow (e.g., Δt = 0 in the overstress law)
    Frozen,
}

/// Implements the von Mises (J2) plasticity model with mixed hardening
///
/// Yield function (von Mises equivalent of the relative stress ξ = dev(σ) - β):
///
/// ```text
/// Φ = √(3/2) ‖dev(σ) - β‖ - (Y0 + R(α))
/// ```
///
/// * isotropic hardening: Voce law R(α), see [super::Voce]
/// * kinematic hardening: Armstrong-Frederick law for β, see [super::ArmstrongFrederick]
///
/// The stress update is the backward-Euler (closest-point) return mapping reduced to a
/// scalar equation in Δλ, solved by [LocalNewton]. The tangent is the consistent
/// (algorithmic) one.
#[derive(Clone, Debug, PartialEq)]
pub struct J2Plasticity {
    constants: ElasticConstants,
    param: ParamJ2,
    settings: Settings,
}

impl J2Plasticity {
    /// Name of the model
    pub const NAME: &'static str = "J2Plasticity";

    /// Allocates a new instance
    pub fn new(elasticity: &ParamElasticity, param: &ParamJ2) -> Result<Self, Error> {
        let constants = ElasticConstants::new(elasticity, Self::NAME)?;
        validate_param_j2(param, Self::NAME)?;
        Ok(J2Plasticity {
            constants,
            param: *param,
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
}

impl MaterialModel for J2Plasticity {
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
        let dde = self.constants.stiffness();
        reduce(Self::NAME, stress_state, delta_strain, dde, &settings, options.tangent, |deps| {
            return_mapping(
                Self::NAME,
                &self.constants,
                &self.param,
                old,
                deps,
                FlowRule::RateIndependent,
                &settings,
            )
        })
    }
}

/// Calculates the yield function Φ = √(3/2) ‖dev(σ) - β‖ - (Y0 + R(α))
pub(crate) fn yield_function(param: &ParamJ2, state: &PlasticState) -> f64 {
    let voce = Voce::new(param.h_iso, param.kappa_inf);
    let xi = state.stress.deviator() - &state.back_stress;
    SQRT_3_BY_2 * xi.norm() - (param.y0 + voce.value(state.alpha))
}

/// Holds the relative stress ξ̃(Δλ) = s_trial - β_old / b and its derivatives
struct Relative {
    b: f64,
    norm: f64,
    unit: Tensor2,
}

impl Relative {
    fn new(s_trial: &Tensor2, beta_old: &Tensor2, af: &ArmstrongFrederick, delta_lambda: f64) -> Self {
        let b = af.denominator(delta_lambda);
        let xi = s_trial - beta_old / b;
        let norm = xi.norm();
        let unit = if norm > 0.0 { xi / norm } else { Tensor2::new() };
        Relative { b, norm, unit }
    }
}

/// Performs the return mapping of the J2 models in 3D
///
/// Returns the new stress and state, the consistent tangent, and the number of
/// local iterations.
pub(crate) fn return_mapping(
    model: &'static str,
    constants: &ElasticConstants,
    param: &ParamJ2,
    old: &PlasticState,
    delta_strain: &Tensor2,
    flow: FlowRule,
    settings: &Settings,
) -> Result<Update<PlasticState>, Error> {
    // trial state
    let dde = constants.stiffness();
    let sigma_trial = &old.stress + dde.ddot_t2(delta_strain); // σ_trial = σ_old + D : Δε
    let s_trial = sigma_trial.deviator();
    let beta_old = &old.back_stress;
    let voce = Voce::new(param.h_iso, param.kappa_inf);
    let af = ArmstrongFrederick::new(param.h_kin, param.beta_inf);
    let phi_trial = SQRT_3_BY_2 * (&s_trial - beta_old).norm() - (param.y0 + voce.value(old.alpha));

    // elastic update
    if phi_trial <= 0.0 || flow == FlowRule::Frozen {
        return Ok(elastic_update(old, sigma_trial, dde));
    }

    // residual of the consistency condition (or overstress law) and its derivative
    let gg = constants.gg;
    let residual = |dl: f64| -> (f64, f64) {
        let rel = Relative::new(&s_trial, beta_old, &af, dl);
        let b2 = rel.b * rel.b;
        let phi = SQRT_3_BY_2 * rel.norm - (3.0 * gg + af.h_kin / rel.b) * dl - param.y0 - voce.value(old.alpha + dl);
        let dphi = SQRT_3_BY_2 * af.recovery / b2 * rel.unit.ddot(beta_old) - 3.0 * gg - af.h_kin / rel.b
            + af.h_kin * dl * af.recovery / b2
            - voce.slope(old.alpha + dl);
        match flow {
            FlowRule::Overstress { n, rate } if rate > 0.0 => {
                let over = param.y0 * f64::powf(rate * dl, 1.0 / n);
                let dover = if dl > 0.0 { over / (n * dl) } else { f64::INFINITY };
                (phi - over, dphi - dover)
            }
            _ => (phi, dphi),
        }
    };

    // solve for Δλ within a bracket where the residual changes sign
    let upper = SQRT_3_BY_2 * (s_trial.norm() + beta_old.norm()) / (3.0 * gg);
    let newton = LocalNewton::from_settings(settings, param.y0);
    let out = newton.solve(0.0, 0.0, upper, residual);
    let (stage, status) = match flow {
        FlowRule::Overstress { .. } => (Stage::Overstress, StepStatus::ViscoPlastic),
        _ => (Stage::ReturnMapping, StepStatus::Plastic),
    };
    if !out.converged() {
        warn!(model, %stage, iterations = out.iterations, residual = out.residual, "return mapping did not converge");
        return Err(Error::Nonconvergence {
            model,
            stage,
            iterations: out.iterations,
            residual: out.residual,
        });
    }

    // Φ_trial within the tolerance: no plastic correction
    let dl = out.root;
    if dl == 0.0 {
        debug!(model, phi_trial, "trial state accepted on the yield surface");
        return Ok(elastic_update(old, sigma_trial, dde));
    }

    // update the stress and internal variables
    let rel = Relative::new(&s_trial, beta_old, &af, dl);
    let nu = &rel.unit * SQRT_3_BY_2; // flow direction ν = √(3/2) n̂
    let stress = sigma_trial - &nu * (2.0 * gg * dl);
    let state = PlasticState {
        stress: stress.clone(),
        plastic_strain: &old.plastic_strain + &nu * dl,
        back_stress: (beta_old + &nu * (dl * 2.0 * af.h_kin / 3.0)) / rel.b,
        alpha: old.alpha + dl,
    };
    debug!(model, delta_lambda = dl, iterations = out.iterations, phi_trial, "plastic correction");

    // consistent tangent
    let tangent = consistent_tangent(constants, &rel, beta_old, &af, dl, out.derivative);
    Ok(Update {
        stress,
        state,
        tangent,
        status,
        iterations: out.iterations,
    })
}

/// Returns the trial state as the new state (no plastic flow)
fn elastic_update(old: &PlasticState, sigma_trial: Tensor2, dde: &Tensor4) -> Update<PlasticState> {
    Update {
        stress: sigma_trial.clone(),
        state: PlasticState {
            stress: sigma_trial,
            ..old.clone()
        },
        tangent: dde.clone(),
        status: StepStatus::Elastic,
        iterations: 0,
    }
}

/// Computes the consistent tangent of the return mapping
///
/// ```text
/// D = K I⊗I + 2G (1 - 2G √(3/2) Δλ / ‖ξ̃‖) P_dev
///   + (4G² √(3/2) Δλ / ‖ξ̃‖ + 6G² / r') n̂⊗n̂
///   + (6G² Δλ / r') (Q:m)⊗n̂
///
/// Q = (P_dev - n̂⊗n̂) / ‖ξ̃‖    m = β_old (Hkin/β∞) / b²
/// ```
///
/// where `r'` is the derivative of the scalar residual at the solution.
fn consistent_tangent(
    constants: &ElasticConstants,
    rel: &Relative,
    beta_old: &Tensor2,
    af: &ArmstrongFrederick,
    dl: f64,
    dr: f64,
) -> Tensor4 {
    let (gg, kk) = (constants.gg, constants.kk);
    let n_hat = &rel.unit;
    let a = 2.0 * gg * (1.0 - 2.0 * gg * SQRT_3_BY_2 * dl / rel.norm);
    let c = 4.0 * gg * gg * SQRT_3_BY_2 * dl / rel.norm + 6.0 * gg * gg / dr;
    let mut dd = Tensor4::new();
    for i in 0..6 {
        for j in 0..6 {
            dd.set(i, j, a * PSD[i][j] + kk * I[i] * I[j]);
        }
    }
    dd.add_dyad(c, n_hat, n_hat);
    if af.recovery > 0.0 {
        let m = beta_old * (af.recovery / (rel.b * rel.b));
        let q_m = (&m - n_hat * n_hat.ddot(&m)) / rel.norm;
        dd.add_dyad(6.0 * gg * gg * dl / dr, &q_m, n_hat);
    }
    dd
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
