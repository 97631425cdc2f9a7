//! Implements the base structures: parameters, settings, stress states and local solvers

mod newton;
mod parameters;
mod settings;
mod stress_state;
pub use crate::base::newton::*;
pub use crate::base::parameters::*;
pub use crate::base::settings::*;
pub use crate::base::stress_state::*;
