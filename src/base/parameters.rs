use crate::Error;
use serde::{Deserialize, Serialize};

/// Holds the elastic constants as given by the user
///
/// Exactly one of the pairs {G,K}, {E,G}, {E,ν}, {E,K} must be given; the
/// validation is performed by [crate::material::ElasticConstants::new].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamElasticity {
    /// Young's modulus E
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub young: Option<f64>,

    /// Poisson's coefficient ν
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisson: Option<f64>,

    /// Shear modulus G
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shear: Option<f64>,

    /// Bulk modulus K
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk: Option<f64>,
}

impl ParamElasticity {
    /// Specifies the shear and bulk moduli
    pub fn shear_bulk(shear: f64, bulk: f64) -> Self {
        ParamElasticity {
            shear: Some(shear),
            bulk: Some(bulk),
            ..Default::default()
        }
    }

    /// Specifies Young's modulus and the shear modulus
    pub fn young_shear(young: f64, shear: f64) -> Self {
        ParamElasticity {
            young: Some(young),
            shear: Some(shear),
            ..Default::default()
        }
    }

    /// Specifies Young's modulus and Poisson's coefficient
    pub fn young_poisson(young: f64, poisson: f64) -> Self {
        ParamElasticity {
            young: Some(young),
            poisson: Some(poisson),
            ..Default::default()
        }
    }

    /// Specifies Young's modulus and the bulk modulus
    pub fn young_bulk(young: f64, bulk: f64) -> Self {
        ParamElasticity {
            young: Some(young),
            bulk: Some(bulk),
            ..Default::default()
        }
    }
}

/// Returns the default saturation value (no saturation)
fn unsaturated() -> f64 {
    f64::INFINITY
}

/// Indicates a missing saturation value (JSON has no infinity)
fn is_unsaturated(value: &f64) -> bool {
    *value == f64::INFINITY
}

/// Holds the parameters of the von Mises yield function and hardening laws
///
/// Isotropic (Voce) hardening:
///
/// ```text
/// R(α) = κ∞ (1 - exp(-Hiso α / κ∞))
/// ```
///
/// Kinematic (Armstrong-Frederick) hardening:
///
/// ```text
/// dβ/dt = dλ/dt ((2/3) Hkin ν - (Hkin / β∞) β)
/// ```
///
/// A saturation value equal to `f64::INFINITY` renders linear hardening. The
/// saturation values default to infinity when omitted from JSON input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamJ2 {
    /// Initial yield stress Y0 (von Mises equivalent)
    pub y0: f64,

    /// Isotropic hardening modulus Hiso
    pub h_iso: f64,

    /// Saturation stress of isotropic hardening κ∞
    #[serde(default = "unsaturated", skip_serializing_if = "is_unsaturated")]
    pub kappa_inf: f64,

    /// Kinematic hardening modulus Hkin
    pub h_kin: f64,

    /// Saturation back-stress (von Mises equivalent) of kinematic hardening β∞
    #[serde(default = "unsaturated", skip_serializing_if = "is_unsaturated")]
    pub beta_inf: f64,
}

impl ParamJ2 {
    /// Returns parameters for perfect plasticity (no hardening)
    pub fn perfect(y0: f64) -> Self {
        ParamJ2 {
            y0,
            h_iso: 0.0,
            kappa_inf: f64::INFINITY,
            h_kin: 0.0,
            beta_inf: f64::INFINITY,
        }
    }
}

/// Holds the parameters of the material models
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum ParamMaterial {
    /// Linear isotropic elasticity
    LinearElastic { elasticity: ParamElasticity },

    /// Rate-independent von Mises plasticity
    J2Plasticity {
        elasticity: ParamElasticity,
        plasticity: ParamJ2,
    },

    /// Rate-dependent von Mises plasticity with the overstress function `(⟨Φ⟩/Y0)ⁿ`
    J2ViscoPlasticity {
        elasticity: ParamElasticity,
        plasticity: ParamJ2,

        /// Rate-sensitivity exponent n
        n: f64,

        /// Reference (relaxation) time t*
        t_star: f64,
    },

    /// Uniaxial Zener (standard linear solid) viscoelasticity
    Zener1D {
        /// Stiffness of the equilibrium spring
        e1: f64,

        /// Stiffness of the spring in the Maxwell branch
        e2: f64,

        /// Viscosity of the damper in the Maxwell branch
        eta: f64,
    },
}

impl ParamMaterial {
    /// Parses the parameters from a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use matresp::base::ParamMaterial;
    /// let param = ParamMaterial::from_json(
    ///     r#"{ "model": "Zener1D", "e1": 100.0, "e2": 50.0, "eta": 10.0 }"#,
    /// ).unwrap();
    /// assert_eq!(param.name(), "Zener1D");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::config("ParamMaterial", format!("cannot parse JSON: {}", e)))
    }

    /// Returns the name of the model
    pub fn name(&self) -> &'static str {
        match self {
            ParamMaterial::LinearElastic { .. } => "LinearIsotropicElasticity",
            ParamMaterial::J2Plasticity { .. } => "J2Plasticity",
            ParamMaterial::J2ViscoPlasticity { .. } => "J2ViscoPlasticity",
            ParamMaterial::Zener1D { .. } => "Zener1D",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
