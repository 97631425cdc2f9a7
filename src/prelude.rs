//! Makes available the structures needed to run stress updates
//!
//! You may write `use matresp::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Options, ParamElasticity, ParamJ2, ParamMaterial, Settings, StressState};
pub use crate::material::{J2Plasticity, J2ViscoPlasticity, LinearElastic, Material, MaterialModel, Zener1D};
pub use crate::material::{ElasticState, PlasticState, State, StepResult, StepStatus, ZenerState};
pub use crate::tensor::{Tensor2, Tensor4};
pub use crate::{Error, Stage};
