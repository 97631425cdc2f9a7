use crate::base::ParamJ2;
use crate::Error;

/// Implements the Voce (saturating) isotropic hardening law
///
/// ```text
/// R(α) = κ∞ (1 - exp(-Hiso α / κ∞))
/// ```
///
/// With `κ∞ = ∞` the law becomes linear: `R(α) = Hiso α`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voce {
    h_iso: f64,
    kappa_inf: f64,
}

impl Voce {
    /// Allocates a new instance
    pub fn new(h_iso: f64, kappa_inf: f64) -> Self {
        Voce { h_iso, kappa_inf }
    }

    /// Calculates the size increase of the yield surface R(α)
    pub fn value(&self, alpha: f64) -> f64 {
        if self.kappa_inf.is_infinite() {
            self.h_iso * alpha
        } else {
            self.kappa_inf * (1.0 - f64::exp(-self.h_iso * alpha / self.kappa_inf))
        }
    }

    /// Calculates the hardening modulus dR/dα
    pub fn slope(&self, alpha: f64) -> f64 {
        if self.kappa_inf.is_infinite() {
            self.h_iso
        } else {
            self.h_iso * f64::exp(-self.h_iso * alpha / self.kappa_inf)
        }
    }
}

/// Implements the Armstrong-Frederick kinematic hardening law
///
/// ```text
/// dβ/dt = dλ/dt ((2/3) Hkin ν - (Hkin / β∞) β)
/// ```
///
/// integrated with the backward Euler method:
///
/// ```text
/// β_new = (β_old + Δλ (2/3) Hkin ν) / (1 + Δλ Hkin / β∞)
/// ```
///
/// With `β∞ = ∞` the law becomes linear (Prager).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmstrongFrederick {
    /// Kinematic hardening modulus Hkin
    pub h_kin: f64,

    /// Dynamic recovery coefficient Hkin / β∞
    pub recovery: f64,
}

impl ArmstrongFrederick {
    /// Allocates a new instance
    pub fn new(h_kin: f64, beta_inf: f64) -> Self {
        let recovery = if beta_inf.is_infinite() { 0.0 } else { h_kin / beta_inf };
        ArmstrongFrederick { h_kin, recovery }
    }

    /// Returns the backward-Euler denominator `b = 1 + Δλ Hkin / β∞`
    pub fn denominator(&self, delta_lambda: f64) -> f64 {
        1.0 + delta_lambda * self.recovery
    }
}

/// Validates the parameters of the von Mises models
pub(crate) fn validate_param_j2(param: &ParamJ2, model: &'static str) -> Result<(), Error> {
    if !param.y0.is_finite() || param.y0 <= 0.0 {
        return Err(Error::config(model, "y0 must be finite and > 0"));
    }
    if !param.h_iso.is_finite() || param.h_iso < 0.0 {
        return Err(Error::config(model, "h_iso must be finite and ≥ 0"));
    }
    if param.kappa_inf.is_nan() || param.kappa_inf <= 0.0 {
        return Err(Error::config(model, "kappa_inf must be > 0 (or infinite)"));
    }
    if !param.h_kin.is_finite() || param.h_kin < 0.0 {
        return Err(Error::config(model, "h_kin must be finite and ≥ 0"));
    }
    if param.beta_inf.is_nan() || param.beta_inf <= 0.0 {
        return Err(Error::config(model, "beta_inf must be > 0 (or infinite)"));
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
