use crate::base::ParamElasticity;
use crate::tensor::Tensor4;
use crate::Error;
use serde::{Deserialize, Serialize};

/// Holds the validated constants of linear isotropic elasticity
///
/// All constants are derived once from the pair given in [ParamElasticity]:
///
/// ```text
/// E = 9KG / (3K + G)
/// ν = (3K - 2G) / (2 (3K + G))
/// λ = K - 2G/3
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElasticConstants {
    /// Young's modulus E
    pub young: f64,

    /// Poisson's coefficient ν
    pub poisson: f64,

    /// Shear modulus G
    pub gg: f64,

    /// Bulk modulus K
    pub kk: f64,

    /// Lamé's first parameter λ
    pub lambda: f64,

    /// Isotropic stiffness `2G P_dev + K I⊗I`
    stiffness: Tensor4,
}

impl ElasticConstants {
    /// Validates the given pair of constants and computes the derived ones
    ///
    /// `model` identifies the caller in the error messages.
    pub fn new(param: &ParamElasticity, model: &'static str) -> Result<Self, Error> {
        let given = [param.young, param.poisson, param.shear, param.bulk];
        let count = given.iter().filter(|v| v.is_some()).count();
        if count < 2 {
            return Err(Error::config(
                model,
                "exactly one pair of {G,K}, {E,G}, {E,ν}, {E,K} must be given",
            ));
        }
        if count > 2 {
            return Err(Error::config(
                model,
                "redundant elastic constants: give exactly one pair of {G,K}, {E,G}, {E,ν}, {E,K}",
            ));
        }
        if given.iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::config(model, "elastic constants must be finite"));
        }
        let (gg, kk) = match (param.young, param.poisson, param.shear, param.bulk) {
            (None, None, Some(gg), Some(kk)) => (gg, kk),
            (Some(young), None, Some(gg), None) => {
                if young <= 0.0 || gg <= 0.0 || young >= 3.0 * gg {
                    return Err(Error::config(model, "inconsistent {E,G}: 0 < E < 3G is required"));
                }
                (gg, young * gg / (3.0 * (3.0 * gg - young)))
            }
            (Some(young), Some(poisson), None, None) => {
                if young <= 0.0 || poisson <= -1.0 || poisson >= 0.5 {
                    return Err(Error::config(
                        model,
                        "inconsistent {E,ν}: E > 0 and -1 < ν < 0.5 are required",
                    ));
                }
                (
                    young / (2.0 * (1.0 + poisson)),
                    young / (3.0 * (1.0 - 2.0 * poisson)),
                )
            }
            (Some(young), None, None, Some(kk)) => {
                if young <= 0.0 || kk <= 0.0 || young >= 9.0 * kk {
                    return Err(Error::config(model, "inconsistent {E,K}: 0 < E < 9K is required"));
                }
                (3.0 * kk * young / (9.0 * kk - young), kk)
            }
            _ => {
                return Err(Error::config(
                    model,
                    "unsupported pair of elastic constants: use {G,K}, {E,G}, {E,ν} or {E,K}",
                ))
            }
        };
        if !(gg > 0.0) || !(kk > 0.0) {
            return Err(Error::config(model, "the shear and bulk moduli must be > 0"));
        }
        Ok(ElasticConstants {
            young: 9.0 * kk * gg / (3.0 * kk + gg),
            poisson: (3.0 * kk - 2.0 * gg) / (2.0 * (3.0 * kk + gg)),
            gg,
            kk,
            lambda: kk - 2.0 * gg / 3.0,
            stiffness: Tensor4::isotropic(gg, kk),
        })
    }

    /// Returns the elastic stiffness
    pub fn stiffness(&self) -> &Tensor4 {
        &self.stiffness
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
