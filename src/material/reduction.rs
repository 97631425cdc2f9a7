use super::{StepResult, Update};
use crate::base::{Settings, StressState};
use crate::tensor::{Tensor2, Tensor4};
use crate::{Error, Stage};
use russell_lab::{mat_inverse, Matrix};
use tracing::{debug, warn};

/// Applies the stress state to a three-dimensional (strain-driven) update
///
/// * Plane-strain and uniaxial strain: the fixed strain components are set to zero.
/// * Plane-stress and uniaxial stress: the non-controlled strain components are
///   found by Newton's method such that the corresponding stress components vanish.
///   The caller's values are the initial guess and the returned tangent is condensed.
///
/// `elastic` is the elastic stiffness, used to scale the stress tolerance.
pub(crate) fn reduce<S, F>(
    model: &'static str,
    stress_state: StressState,
    delta_strain: &Tensor2,
    elastic: &Tensor4,
    settings: &Settings,
    tangent: bool,
    mut update: F,
) -> Result<StepResult<S>, Error>
where
    F: FnMut(&Tensor2) -> Result<Update<S>, Error>,
{
    let mut deps = delta_strain.with_zeroed(stress_state.zero_strain_indices());
    let unknown = stress_state.zero_stress_indices();
    if unknown.is_empty() {
        let res = update(&deps)?;
        let dd = if tangent { Some(res.tangent.clone()) } else { None };
        return Ok(finish(res, deps, dd, 0));
    }
    let controlled = stress_state.controlled_indices();
    let mut iterations = 0;
    loop {
        let res = update(&deps)?;
        let residual = unknown
            .iter()
            .fold(0.0, |acc, &a| f64::max(acc, f64::abs(res.stress.mandel_component(a))));
        let scale = f64::max(res.stress.norm(), elastic.ddot_t2(&deps).norm());
        debug!(model, %stress_state, iterations, residual, scale, "stress-state iteration");
        if residual <= settings.stress_tolerance * scale {
            let dd = if tangent {
                let dd_uu_inv = inverse_block(model, &res.tangent, unknown, iterations, residual)?;
                Some(condense(&res.tangent, &dd_uu_inv, unknown, &controlled))
            } else {
                None
            };
            return Ok(finish(res, deps, dd, iterations));
        }
        if iterations == settings.max_stress_iterations {
            warn!(model, %stress_state, iterations, residual, "stress-state iteration did not converge");
            return Err(Error::Nonconvergence {
                model,
                stage: Stage::StressState,
                iterations,
                residual,
            });
        }
        // Δε_u ← Δε_u - D_uu⁻¹ σ_u
        let dd_uu_inv = inverse_block(model, &res.tangent, unknown, iterations, residual)?;
        for (i, &a) in unknown.iter().enumerate() {
            let mut correction = 0.0;
            for (j, &b) in unknown.iter().enumerate() {
                correction += dd_uu_inv.get(i, j) * res.stress.mandel_component(b);
            }
            deps.set_mandel_component(a, deps.mandel_component(a) - correction);
        }
        iterations += 1;
    }
}

/// Converts the results of the final three-dimensional update
fn finish<S>(res: Update<S>, deps: Tensor2, tangent: Option<Tensor4>, iterations: usize) -> StepResult<S> {
    StepResult {
        stress: res.stress,
        strain_increment: deps,
        state: res.state,
        tangent,
        status: res.status,
        iterations: res.iterations,
        stress_state_iterations: iterations,
    }
}

/// Computes the inverse of the block of the tangent associated with the unknown components
fn inverse_block(
    model: &'static str,
    dd: &Tensor4,
    unknown: &[usize],
    iterations: usize,
    residual: f64,
) -> Result<Matrix, Error> {
    let n = unknown.len();
    let mut dd_uu = Matrix::new(n, n);
    for (i, &a) in unknown.iter().enumerate() {
        for (j, &b) in unknown.iter().enumerate() {
            dd_uu.set(i, j, dd.get(a, b));
        }
    }
    let mut dd_uu_inv = Matrix::new(n, n);
    if let Err(e) = mat_inverse(&mut dd_uu_inv, &dd_uu) {
        warn!(model, iterations, residual, error = e, "singular tangent in the stress-state iteration");
        return Err(Error::Nonconvergence {
            model,
            stage: Stage::StressState,
            iterations,
            residual,
        });
    }
    Ok(dd_uu_inv)
}

/// Computes the condensed tangent `D_cc - D_cu D_uu⁻¹ D_uc`
///
/// The rows and columns of the unknown components are zero.
fn condense(dd: &Tensor4, dd_uu_inv: &Matrix, unknown: &[usize], controlled: &[usize]) -> Tensor4 {
    let mut res = Tensor4::new();
    for &c1 in controlled {
        for &c2 in controlled {
            let mut value = dd.get(c1, c2);
            for (i, &u1) in unknown.iter().enumerate() {
                for (j, &u2) in unknown.iter().enumerate() {
                    value -= dd.get(c1, u1) * dd_uu_inv.get(i, j) * dd.get(u2, c2);
                }
            }
            res.set(c1, c2, value);
        }
    }
    res
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
