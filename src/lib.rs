//! Material-point stress update for small-strain constitutive models
//!
//! Given a material model, the internal state at the beginning of a step, a strain
//! increment and a time increment, the models in this crate compute the stress and
//! internal state at the end of the step and, on request, the consistent tangent.
//!
//! The following models are available:
//!
//! * [material::LinearElastic] -- linear isotropic elasticity
//! * [material::J2Plasticity] -- von Mises plasticity with Voce isotropic and
//!   Armstrong-Frederick kinematic hardening
//! * [material::J2ViscoPlasticity] -- the above with a Norton-type overstress law
//! * [material::Zener1D] -- uniaxial standard linear solid (Zener) viscoelasticity
//!
//! All updates are pure functions of their input; a model may be shared by many
//! threads, each one updating its own integration points.

mod error;
pub use crate::error::*;

pub mod base;
pub mod material;
pub mod prelude;
pub mod tensor;
