use matresp::prelude::*;
use russell_lab::approx_eq;

// Consistent tangents versus finite differences
//
// This test compares the consistent (algorithmic) tangent returned by each model
// with the central finite-difference derivative of the stress-update map with
// respect to the strain increment.
//
// TEST GOAL
//
// Verifies that the tangent is the exact derivative of the discrete update,
// including the non-symmetric contribution of Armstrong-Frederick hardening
// and the static condensation of plane-stress and uniaxial-stress states.
//
// CONFIGURATION AND PARAMETERS
//
// * G = 80000, K = 160000
// * Y0 = 200, Hiso = 10000, κ∞ = 50, Hkin = 20000, β∞ = 100
// * Prestressed state with non-zero back stress (not coaxial with the trial stress)
// * Tight tolerances so that the iteration error is below the differencing error

const STEP: f64 = 1e-6;

fn elasticity() -> ParamElasticity {
    ParamElasticity::shear_bulk(80_000.0, 160_000.0)
}

fn hardening() -> ParamJ2 {
    ParamJ2 {
        y0: 200.0,
        h_iso: 10_000.0,
        kappa_inf: 50.0,
        h_kin: 20_000.0,
        beta_inf: 100.0,
    }
}

fn tight() -> Options {
    let mut settings = Settings::new();
    settings.set_tolerance(1e-13).set_stress_tolerance(1e-12);
    Options {
        settings: Some(settings),
        tangent: true,
    }
}

fn prestressed() -> State {
    State::Plastic(PlasticState {
        stress: Tensor2::from_mandel(&[150.0, -20.0, -30.0, 40.0, 10.0, -5.0]).unwrap(),
        plastic_strain: Tensor2::diagonal(0.001, -0.0005, -0.0005),
        back_stress: Tensor2::from_mandel(&[30.0, -20.0, -10.0, -15.0, 0.0, 8.0]).unwrap(),
        alpha: 0.002,
    })
}

/// Compares the tangent with central differences over the given (controlled) components
fn check_tangent(
    material: &Material,
    old: &State,
    deps: &Tensor2,
    dt: f64,
    stress_state: StressState,
    expected_status: StepStatus,
) {
    let options = tight();
    let res = material
        .material_response(old, deps, dt, stress_state, &options)
        .unwrap();
    assert_eq!(res.status, expected_status);
    let dd = res.tangent.unwrap();
    let scale = dd.max_abs();
    let controlled = stress_state_controlled(stress_state);
    for &b in &controlled {
        let mut plus = deps.vector().to_vec();
        let mut minus = deps.vector().to_vec();
        plus[b] += STEP;
        minus[b] -= STEP;
        let sig_plus = material
            .material_response(old, &Tensor2::from_mandel(&plus).unwrap(), dt, stress_state, &options)
            .unwrap()
            .stress;
        let sig_minus = material
            .material_response(old, &Tensor2::from_mandel(&minus).unwrap(), dt, stress_state, &options)
            .unwrap()
            .stress;
        for &a in &controlled {
            let num = (sig_plus.vector()[a] - sig_minus.vector()[a]) / (2.0 * STEP);
            approx_eq(dd.get(a, b), num, 1e-5 * scale);
        }
    }
}

/// Returns the strain components that are neither fixed nor solved for
fn stress_state_controlled(stress_state: StressState) -> Vec<usize> {
    let fixed = stress_state.zero_strain_indices();
    let solved = stress_state.zero_stress_indices();
    (0..6).filter(|a| !fixed.contains(a) && !solved.contains(a)).collect()
}

#[test]
fn test_tangent_linear_elastic() {
    let material = Material::new(&ParamMaterial::LinearElastic {
        elasticity: elasticity(),
    })
    .unwrap();
    let old = material.initial_state();
    let deps = Tensor2::from_mandel(&[0.001, -0.0002, 0.0003, 0.0004, -0.0001, 0.0002]).unwrap();
    check_tangent(&material, &old, &deps, 0.0, StressState::General, StepStatus::Elastic);
    check_tangent(&material, &old, &deps, 0.0, StressState::PlaneStress, StepStatus::Elastic);
    check_tangent(&material, &old, &deps, 0.0, StressState::UniaxialStress, StepStatus::Elastic);
}

#[test]
fn test_tangent_j2_plasticity_general() {
    let material = Material::new(&ParamMaterial::J2Plasticity {
        elasticity: elasticity(),
        plasticity: hardening(),
    })
    .unwrap();
    let deps = Tensor2::from_mandel(&[0.004, -0.001, -0.001, 0.002, 0.0, 0.001]).unwrap();
    check_tangent(&material, &prestressed(), &deps, 0.0, StressState::General, StepStatus::Plastic);

    // the tangent of nonlinear kinematic hardening with non-zero back stress is not symmetric
    let res = material
        .material_response(&prestressed(), &deps, 0.0, StressState::General, &tight())
        .unwrap();
    let dd = res.tangent.unwrap();
    assert!(!dd.is_major_symmetric(1e-8));

    // from the virgin state the tangent is symmetric
    let virgin = material.initial_state();
    check_tangent(&material, &virgin, &deps, 0.0, StressState::General, StepStatus::Plastic);
    let res = material
        .material_response(&virgin, &deps, 0.0, StressState::General, &tight())
        .unwrap();
    let dd = res.tangent.unwrap();
    assert!(dd.is_major_symmetric(1e-10));
}

#[test]
fn test_tangent_j2_plasticity_reduced_states() {
    let material = Material::new(&ParamMaterial::J2Plasticity {
        elasticity: elasticity(),
        plasticity: hardening(),
    })
    .unwrap();
    let deps = Tensor2::from_mandel(&[0.004, -0.001, 0.0, 0.002, 0.0, 0.0]).unwrap();
    check_tangent(&material, &prestressed(), &deps, 0.0, StressState::PlaneStrain, StepStatus::Plastic);
    check_tangent(&material, &prestressed(), &deps, 0.0, StressState::PlaneStress, StepStatus::Plastic);
    let virgin = material.initial_state();
    check_tangent(&material, &virgin, &Tensor2::uniaxial(0.004), 0.0, StressState::UniaxialStress, StepStatus::Plastic);
}

#[test]
fn test_tangent_j2_viscoplasticity() {
    let material = Material::new(&ParamMaterial::J2ViscoPlasticity {
        elasticity: elasticity(),
        plasticity: hardening(),
        n: 3.0,
        t_star: 2.0,
    })
    .unwrap();
    let deps = Tensor2::from_mandel(&[0.004, -0.001, -0.001, 0.002, 0.0, 0.001]).unwrap();
    check_tangent(&material, &prestressed(), &deps, 0.5, StressState::General, StepStatus::ViscoPlastic);
    let virgin = material.initial_state();
    check_tangent(&material, &virgin, &Tensor2::uniaxial(0.004), 0.5, StressState::UniaxialStress, StepStatus::ViscoPlastic);
}

#[test]
fn test_tangent_zener() {
    let material = Material::new(&ParamMaterial::Zener1D {
        e1: 100.0,
        e2: 50.0,
        eta: 10.0,
    })
    .unwrap();
    let old = State::Zener(ZenerState {
        stress: 1.25,
        strain: 0.01,
        viscous_strain: 0.005,
    });
    check_tangent(&material, &old, &Tensor2::uniaxial(0.002), 0.1, StressState::UniaxialStress, StepStatus::Viscoelastic);
}
