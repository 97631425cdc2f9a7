use crate::tensor::Tensor2;
use serde::{Deserialize, Serialize};

/// Holds the state of a linear elastic material point
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticState {
    /// Stress tensor σ
    pub stress: Tensor2,
}

/// Holds the state of a J2 (von Mises) elastoplastic or elastoviscoplastic material point
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlasticState {
    /// Stress tensor σ
    pub stress: Tensor2,

    /// Plastic strain εp
    pub plastic_strain: Tensor2,

    /// Back stress β (kinematic hardening)
    pub back_stress: Tensor2,

    /// Accumulated equivalent plastic strain α (isotropic hardening)
    pub alpha: f64,
}

impl PlasticState {
    /// Allocates a virgin state with the given (initial) stress
    pub fn with_stress(stress: Tensor2) -> Self {
        PlasticState {
            stress,
            ..Default::default()
        }
    }
}

/// Holds the state of the one-dimensional standard linear solid
///
/// Only the axial components are stored because the model works in uniaxial stress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ZenerState {
    /// Axial stress σ
    pub stress: f64,

    /// Total axial strain ε
    pub strain: f64,

    /// Viscous axial strain εv of the Maxwell branch
    pub viscous_strain: f64,
}

/// Holds the state of any material point
///
/// This enum is the state associated with [crate::material::Material].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum State {
    Elastic(ElasticState),
    Plastic(PlasticState),
    Zener(ZenerState),
}

impl State {
    /// Returns the stress tensor
    pub fn stress(&self) -> Tensor2 {
        match self {
            State::Elastic(s) => s.stress.clone(),
            State::Plastic(s) => s.stress.clone(),
            State::Zener(s) => Tensor2::uniaxial(s.stress),
        }
    }
}

impl From<ElasticState> for State {
    fn from(state: ElasticState) -> Self {
        State::Elastic(state)
    }
}

impl From<PlasticState> for State {
    fn from(state: PlasticState) -> Self {
        State::Plastic(state)
    }
}

impl From<ZenerState> for State {
    fn from(state: ZenerState) -> Self {
        State::Zener(state)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
