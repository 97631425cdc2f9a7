use super::{J2Plasticity, J2ViscoPlasticity, LinearElastic, MaterialModel, State, StepResult, Zener1D};
use crate::base::{Options, ParamMaterial, Settings, StressState};
use crate::tensor::Tensor2;
use crate::Error;

/// Holds any of the material models
///
/// The model is selected once from [ParamMaterial]; each update dispatches on the
/// (model, state) pair. A state of another model is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    LinearElastic(LinearElastic),
    J2Plasticity(J2Plasticity),
    J2ViscoPlasticity(J2ViscoPlasticity),
    Zener1D(Zener1D),
}

impl Material {
    /// Allocates a new instance
    pub fn new(param: &ParamMaterial) -> Result<Self, Error> {
        let material = match param {
            // Linear elastic model
            ParamMaterial::LinearElastic { elasticity } => Material::LinearElastic(LinearElastic::new(elasticity)?),

            // von Mises plasticity model
            ParamMaterial::J2Plasticity { elasticity, plasticity } => {
                Material::J2Plasticity(J2Plasticity::new(elasticity, plasticity)?)
            }

            // von Mises viscoplasticity model
            ParamMaterial::J2ViscoPlasticity {
                elasticity,
                plasticity,
                n,
                t_star,
            } => Material::J2ViscoPlasticity(J2ViscoPlasticity::new(elasticity, plasticity, *n, *t_star)?),

            // Zener viscoelastic model
            ParamMaterial::Zener1D { e1, e2, eta } => Material::Zener1D(Zener1D::new(*e1, *e2, *eta)?),
        };
        Ok(material)
    }

    /// Allocates a new instance from a JSON string (see [ParamMaterial])
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Material::new(&ParamMaterial::from_json(json)?)
    }

    /// Replaces the settings owned by the model
    pub fn with_settings(self, settings: Settings) -> Result<Self, Error> {
        let material = match self {
            Material::LinearElastic(m) => Material::LinearElastic(m.with_settings(settings)?),
            Material::J2Plasticity(m) => Material::J2Plasticity(m.with_settings(settings)?),
            Material::J2ViscoPlasticity(m) => Material::J2ViscoPlasticity(m.with_settings(settings)?),
            Material::Zener1D(m) => Material::Zener1D(m.with_settings(settings)?),
        };
        Ok(material)
    }
}

impl MaterialModel for Material {
    type State = State;

    fn name(&self) -> &'static str {
        match self {
            Material::LinearElastic(m) => m.name(),
            Material::J2Plasticity(m) => m.name(),
            Material::J2ViscoPlasticity(m) => m.name(),
            Material::Zener1D(m) => m.name(),
        }
    }

    fn settings(&self) -> &Settings {
        match self {
            Material::LinearElastic(m) => m.settings(),
            Material::J2Plasticity(m) => m.settings(),
            Material::J2ViscoPlasticity(m) => m.settings(),
            Material::Zener1D(m) => m.settings(),
        }
    }

    fn initial_state(&self) -> State {
        match self {
            Material::LinearElastic(m) => State::Elastic(m.initial_state()),
            Material::J2Plasticity(m) => State::Plastic(m.initial_state()),
            Material::J2ViscoPlasticity(m) => State::Plastic(m.initial_state()),
            Material::Zener1D(m) => State::Zener(m.initial_state()),
        }
    }

    fn material_response(
        &self,
        old: &State,
        delta_strain: &Tensor2,
        dt: f64,
        stress_state: StressState,
        options: &Options,
    ) -> Result<StepResult<State>, Error> {
        let res = match (self, old) {
            (Material::LinearElastic(m), State::Elastic(s)) => m
                .material_response(s, delta_strain, dt, stress_state, options)?
                .map_state(State::Elastic),
            (Material::J2Plasticity(m), State::Plastic(s)) => m
                .material_response(s, delta_strain, dt, stress_state, options)?
                .map_state(State::Plastic),
            (Material::J2ViscoPlasticity(m), State::Plastic(s)) => m
                .material_response(s, delta_strain, dt, stress_state, options)?
                .map_state(State::Plastic),
            (Material::Zener1D(m), State::Zener(s)) => m
                .material_response(s, delta_strain, dt, stress_state, options)?
                .map_state(State::Zener),
            _ => return Err(Error::config(self.name(), "the state does not belong to this model")),
        };
        Ok(res)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Material;
    use crate::base::{Options, ParamElasticity, ParamJ2, ParamMaterial, Settings, StressState};
    use crate::material::{ElasticState, MaterialModel, State, StepStatus};
    use crate::tensor::Tensor2;
    use crate::Error;

    fn samples() -> Vec<ParamMaterial> {
        let elasticity = ParamElasticity::young_poisson(210_000.0, 0.3);
        vec![
            ParamMaterial::LinearElastic { elasticity },
            ParamMaterial::J2Plasticity {
                elasticity,
                plasticity: ParamJ2::perfect(200.0),
            },
            ParamMaterial::J2ViscoPlasticity {
                elasticity,
                plasticity: ParamJ2::perfect(200.0),
                n: 2.0,
                t_star: 1.0,
            },
            ParamMaterial::Zener1D {
                e1: 100.0,
                e2: 50.0,
                eta: 10.0,
            },
        ]
    }

    #[test]
    fn new_works() {
        for param in samples() {
            let material = Material::new(&param).unwrap();
            assert_eq!(material.name(), param.name());
            assert_eq!(material.settings(), &Settings::new());
            assert_eq!(material.initial_state().stress(), Tensor2::new());
        }
    }

    #[test]
    fn new_captures_errors() {
        let param = ParamMaterial::Zener1D {
            e1: 100.0,
            e2: -50.0,
            eta: 10.0,
        };
        assert!(matches!(
            Material::new(&param),
            Err(Error::Configuration { model: "Zener1D", .. })
        ));
        assert!(Material::from_json(r#"{ "model": "Unknown" }"#).is_err());
    }

    #[test]
    fn with_settings_works() {
        let mut settings = Settings::new();
        settings.set_max_iterations(7);
        for param in samples() {
            let material = Material::new(&param).unwrap().with_settings(settings).unwrap();
            assert_eq!(material.settings().max_iterations, 7);
        }
        settings.set_max_iterations(0);
        assert!(Material::new(&samples()[0]).unwrap().with_settings(settings).is_err());
    }

    #[test]
    fn material_response_works() {
        for param in samples() {
            let material = Material::new(&param).unwrap();
            let old = material.initial_state();
            let res = material
                .material_response(
                    &old,
                    &Tensor2::uniaxial(1e-5),
                    1.0,
                    StressState::UniaxialStress,
                    &Options::with_tangent(),
                )
                .unwrap();
            assert!(res.stress.get(0, 0) > 0.0);
            assert!(res.tangent.is_some());
            assert_eq!(res.state.stress(), res.stress);
            assert_ne!(res.status, StepStatus::Plastic);
        }
    }

    #[test]
    fn mismatched_state_is_rejected() {
        let material = Material::new(&samples()[1]).unwrap();
        let wrong = State::Elastic(ElasticState::default());
        assert_eq!(
            material
                .material_response(&wrong, &Tensor2::new(), 0.0, StressState::General, &Options::default())
                .err(),
            Some(Error::config("J2Plasticity", "the state does not belong to this model"))
        );
    }
}
