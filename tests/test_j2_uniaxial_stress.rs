use matresp::prelude::*;
use russell_lab::approx_eq;

// von Mises plasticity in uniaxial stress
//
// This test runs a strain-driven uniaxial-stress loading/unloading cycle of a
// single material point represented by the J2 plasticity model.
//
// TEST GOAL
//
// Verifies the return mapping combined with the stress-state reduction, in
// particular the calibration of the von Mises equivalent stress against the
// uniaxial yield stress Y0.
//
// LOADING
//
//  σxx
//   ↑        ________________  +Y0
//   |       /               /
//   |      /               /
//   |     /               /
//   |----/---------------/---------→ εxx
//   |   /               /
//   |  /_______________/  -Y0
//
// * Load to εxx = 2 εy (εy = Y0/E), unload to εxx = -2 εy, reload to 0
//
// CONFIGURATION AND PARAMETERS
//
// * G = 80000, K = 160000 (E = 1440000/7, ν = 2/7)
// * Y0 = 200, no hardening (perfect plasticity)

const GG: f64 = 80_000.0;
const KK: f64 = 160_000.0;
const Y0: f64 = 200.0;

fn young() -> f64 {
    9.0 * KK * GG / (3.0 * KK + GG)
}

/// Runs a sequence of uniaxial-stress increments and returns all results
fn run<M: MaterialModel>(model: &M, increments: &[f64]) -> Vec<StepResult<M::State>> {
    let mut state = model.initial_state();
    let mut results = Vec::new();
    for de in increments {
        let res = model
            .material_response(
                &state,
                &Tensor2::uniaxial(*de),
                1.0,
                StressState::UniaxialStress,
                &Options::with_tangent(),
            )
            .unwrap();
        state = res.state.clone();
        results.push(res);
    }
    results
}

#[test]
fn test_j2_uniaxial_stress_perfect_plasticity() {
    let model = J2Plasticity::new(&ParamElasticity::shear_bulk(GG, KK), &ParamJ2::perfect(Y0)).unwrap();
    let eps_y = Y0 / young();

    // increments: 20 up to 2εy, 40 down to -2εy, 20 up to 0
    let de = eps_y / 10.0;
    let mut increments = vec![de; 20];
    increments.extend(vec![-de; 40]);
    increments.extend(vec![de; 20]);
    let results = run(&model, &increments);

    let mut strain = 0.0;
    let mut previous = 0.0;
    for (i, res) in results.iter().enumerate() {
        strain += increments[i];
        let sxx = res.stress.get(0, 0);

        // the lateral stresses vanish
        for a in 1..6 {
            approx_eq(res.stress.vector()[a], 0.0, 1e-7);
        }

        // the stress is bounded by the yield stress
        assert!(f64::abs(sxx) <= Y0 + 1e-6);

        // plastic steps are exactly on ±Y0 with a vanishing tangent
        let dd = res.tangent.as_ref().unwrap();
        if res.status == StepStatus::Plastic {
            approx_eq(f64::abs(sxx), Y0, 1e-6);
            approx_eq(dd.get(0, 0), 0.0, 1e-4);
        } else {
            approx_eq(dd.get(0, 0), young(), 1e-6);
            approx_eq(sxx - previous, young() * increments[i], 1e-6);
        }
        previous = sxx;

        // the solved lateral strains are -ν εxx in the elastic range
        if i < 9 {
            let poisson = 2.0 / 7.0;
            approx_eq(res.strain_increment.get(1, 1), -poisson * increments[i], 1e-15);
        }
    }
    approx_eq(strain, 0.0, 1e-15);

    // loading: yield at εy
    assert_eq!(results[8].status, StepStatus::Elastic);
    assert_eq!(results[19].status, StepStatus::Plastic);
    approx_eq(results[19].stress.get(0, 0), Y0, 1e-6);

    // unloading is elastic until the reversed yield point (Δε = -2εy)
    for res in &results[20..39] {
        assert_eq!(res.status, StepStatus::Elastic);
    }
    approx_eq(results[59].stress.get(0, 0), -Y0, 1e-6);

    // plastic strain accumulates in both directions
    let last = &results[79].state;
    assert!(last.alpha > 2.0 * eps_y);
    approx_eq(last.plastic_strain.trace(), 0.0, 1e-15);
}

#[test]
fn test_j2_uniaxial_stress_linear_hardening() {
    // εp = α in uniaxial stress, hence σ = Y0 + H εp and Et = E H / (E + H)
    let hh = 20_000.0;
    let param = ParamJ2 {
        y0: Y0,
        h_iso: hh,
        kappa_inf: f64::INFINITY,
        h_kin: 0.0,
        beta_inf: f64::INFINITY,
    };
    let model = J2Plasticity::new(&ParamElasticity::shear_bulk(GG, KK), &param).unwrap();
    let eps_y = Y0 / young();
    let results = run(&model, &vec![eps_y / 4.0; 12]);
    let et = young() * hh / (young() + hh);
    for res in &results[4..] {
        assert_eq!(res.status, StepStatus::Plastic);
        let sxx = res.stress.get(0, 0);
        approx_eq(sxx, Y0 + hh * res.state.alpha, 1e-6);
        approx_eq(res.state.plastic_strain.get(0, 0), res.state.alpha, 1e-11);
        approx_eq(res.tangent.as_ref().unwrap().get(0, 0) / et, 1.0, 1e-7);
    }
    // total strain = elastic + plastic
    let last = &results[11];
    approx_eq(last.stress.get(0, 0) / young() + last.state.alpha, 3.0 * eps_y, 1e-10);
}

#[test]
fn test_j2_uniaxial_stress_kinematic_saturation() {
    // pure Armstrong-Frederick hardening: the stress saturates at Y0 + β∞
    let beta_inf = 100.0;
    let param = ParamJ2 {
        y0: Y0,
        h_iso: 0.0,
        kappa_inf: f64::INFINITY,
        h_kin: 50_000.0,
        beta_inf,
    };
    let model = J2Plasticity::new(&ParamElasticity::shear_bulk(GG, KK), &param).unwrap();
    let eps_y = Y0 / young();
    let results = run(&model, &vec![eps_y; 60]);
    let mut previous = 0.0;
    for res in &results {
        let sxx = res.stress.get(0, 0);
        assert!(sxx >= previous - 1e-6);
        assert!(sxx < Y0 + beta_inf + 1e-6);
        previous = sxx;
    }
    approx_eq(previous, Y0 + beta_inf, 1e-3);
}

#[test]
fn test_j2_zero_increment_is_idempotent() {
    let param = ParamJ2 {
        y0: Y0,
        h_iso: 10_000.0,
        kappa_inf: 50.0,
        h_kin: 20_000.0,
        beta_inf: 100.0,
    };
    let model = J2Plasticity::new(&ParamElasticity::shear_bulk(GG, KK), &param).unwrap();
    let eps_y = Y0 / young();
    let results = run(&model, &[0.5 * eps_y, 2.0 * eps_y]);

    // inside the yield surface
    let elastic = &results[0].state;
    let res = model
        .material_response(elastic, &Tensor2::new(), 1.0, StressState::General, &Options::default())
        .unwrap();
    assert_eq!(res.status, StepStatus::Elastic);
    assert_eq!(&res.state, elastic);

    // on the yield surface (after a plastic step)
    let plastic = &results[1].state;
    assert!(plastic.alpha > 0.0);
    let res = model
        .material_response(plastic, &Tensor2::new(), 1.0, StressState::General, &Options::default())
        .unwrap();
    assert_eq!(res.status, StepStatus::Elastic);
    assert_eq!(res.iterations, 0);
    assert_eq!(res.state.alpha, plastic.alpha);
    assert_eq!(res.state.back_stress, plastic.back_stress);
    assert_eq!(res.state.plastic_strain, plastic.plastic_strain);
    assert_eq!(res.stress, plastic.stress);
}
