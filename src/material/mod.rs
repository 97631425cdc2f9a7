//! Implements the material models and the local stress-update algorithms

mod dispatch;
mod elastic_constants;
mod hardening;
mod j2_plasticity;
mod j2_viscoplasticity;
mod linear_elastic;
mod reduction;
mod states;
mod stress_strain;
mod zener_1d;
pub use crate::material::dispatch::*;
pub use crate::material::elastic_constants::*;
pub use crate::material::hardening::*;
pub use crate::material::j2_plasticity::*;
pub use crate::material::j2_viscoplasticity::*;
pub use crate::material::linear_elastic::*;
pub use crate::material::states::*;
pub use crate::material::stress_strain::*;
pub use crate::material::zener_1d::*;

pub(crate) use crate::material::hardening::validate_param_j2;
pub(crate) use crate::material::j2_plasticity::{return_mapping, yield_function, FlowRule};
pub(crate) use crate::material::reduction::reduce;
pub(crate) use crate::material::stress_strain::{prepare, Update};
