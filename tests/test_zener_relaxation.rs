use matresp::prelude::*;
use russell_lab::approx_eq;

// Stress relaxation of the Zener (standard linear solid) model
//
// This test applies a strain step at t = 0 and holds the strain constant.
//
// TEST GOAL
//
// Verifies the instantaneous and relaxed moduli and the backward-Euler
// relaxation curve of the viscous branch.
//
//  σ
//  ↑
//  |(E1+E2)ε0
//  |\
//  | \
//  |  `-.__
//  |       `------------  E1 ε0
//  +--------------------→ t
//
// CONFIGURATION AND PARAMETERS
//
// * E1 = 100, E2 = 50, η = 10 (τ = η/E2 = 0.2)
// * ε0 = 0.01
// * Δt = τ/100

#[test]
fn test_zener_relaxation() {
    let (e1, e2, eta) = (100.0, 50.0, 10.0);
    let model = Zener1D::new(e1, e2, eta).unwrap();
    let tau = model.relaxation_time();
    let eps0 = 0.01;

    // strain step (no time elapsed)
    let step = model
        .material_response(
            &model.initial_state(),
            &Tensor2::uniaxial(eps0),
            0.0,
            StressState::UniaxialStress,
            &Options::default(),
        )
        .unwrap();
    approx_eq(step.state.stress, (e1 + e2) * eps0, 1e-15);
    assert_eq!(step.state.viscous_strain, 0.0);

    // hold the strain
    let dt = tau / 100.0;
    let theta = dt * e2 / eta;
    let mut state = step.state;
    let mut previous = state.stress;
    for k in 1..=1000 {
        let res = model
            .material_response(
                &state,
                &Tensor2::new(),
                dt,
                StressState::UniaxialStress,
                &Options::with_tangent(),
            )
            .unwrap();
        state = res.state;
        assert_eq!(res.status, StepStatus::Viscoelastic);
        assert!(state.stress < previous);
        previous = state.stress;

        // backward Euler: σ_k = E1 ε0 + E2 ε0 (1 + θ)⁻ᵏ
        let correct = e1 * eps0 + e2 * eps0 * f64::powi(1.0 + theta, -k);
        approx_eq(state.stress, correct, 1e-12);

        // close to the exact exponential decay
        let exact = e1 * eps0 + e2 * eps0 * f64::exp(-(k as f64) * dt / tau);
        assert!(f64::abs(state.stress - exact) < 5e-3 * e2 * eps0);
    }

    // relaxed after 10 τ
    approx_eq(state.stress, model.relaxed_modulus() * eps0, 1e-4);
    approx_eq(state.strain, eps0, 1e-15);
}

#[test]
fn test_zener_rate_dependence() {
    // the same strain increment is stiffer when applied faster
    let model = Zener1D::new(100.0, 50.0, 10.0).unwrap();
    let mut previous = f64::MAX;
    for dt in [0.0, 0.01, 0.1, 1.0, 10.0, 1e6] {
        let res = model
            .material_response(
                &model.initial_state(),
                &Tensor2::uniaxial(0.01),
                dt,
                StressState::UniaxialStress,
                &Options::with_tangent(),
            )
            .unwrap();
        let et = res.tangent.unwrap().get(0, 0);
        assert!(et < previous);
        assert!(et >= model.relaxed_modulus());
        assert!(et <= model.instantaneous_modulus());
        approx_eq(res.stress.get(0, 0), et * 0.01, 1e-14);
        previous = et;
    }
    approx_eq(previous, model.relaxed_modulus(), 1e-3);
}

#[test]
fn test_zener_rejects_other_stress_states() {
    let material = Material::from_json(r#"{ "model": "Zener1D", "e1": 100.0, "e2": 50.0, "eta": 10.0 }"#).unwrap();
    let res = material.material_response(
        &material.initial_state(),
        &Tensor2::uniaxial(0.01),
        1.0,
        StressState::General,
        &Options::default(),
    );
    match res {
        Err(Error::Configuration { model, reason }) => {
            assert_eq!(model, "Zener1D");
            assert_eq!(reason, "only uniaxial stress is supported (general requested)");
        }
        _ => panic!("configuration error expected"),
    }
}

#[test]
fn test_zener_infinite_time_increment_is_fully_relaxed() {
    let model = Zener1D::new(100.0, 50.0, 10.0).unwrap();
    let old = ZenerState {
        stress: 150.0 * 0.01,
        strain: 0.01,
        viscous_strain: 0.0,
    };
    let res = model
        .material_response(
            &old,
            &Tensor2::uniaxial(0.002),
            f64::INFINITY,
            StressState::UniaxialStress,
            &Options::with_tangent(),
        )
        .unwrap();
    assert_eq!(res.status, StepStatus::Viscoelastic);
    approx_eq(res.state.strain, 0.012, 1e-15);
    assert_eq!(res.state.viscous_strain, res.state.strain);
    approx_eq(res.state.stress, model.relaxed_modulus() * 0.012, 1e-15);
    assert!(res.stress.get(0, 0).is_finite());
    assert_eq!(res.tangent.unwrap().get(0, 0), model.relaxed_modulus());
}
