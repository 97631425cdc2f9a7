use serde::{Deserialize, Serialize};
use std::fmt;

/// Specifies the stress (or strain) state assumed at the material point
///
/// Reduced states fix some components of the strain increment to zero
/// (plane-strain, uniaxial strain) or require some stress components to vanish
/// (plane-stress, uniaxial stress). In the latter case the corresponding strain
/// components become unknowns of a local iteration.
///
/// Components are given in the Mandel ordering `(xx, yy, zz, xy, yz, zx)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressState {
    /// Full 3D state: the strain increment is used as given
    #[default]
    General,

    /// `εzz = εyz = εzx = 0`
    PlaneStrain,

    /// Only `εxx` may be non-zero
    UniaxialStrain,

    /// `σzz = σyz = σzx = 0`
    PlaneStress,

    /// Only `σxx` may be non-zero
    UniaxialStress,
}

impl StressState {
    /// Returns the Mandel indices of the strain components forced to zero
    pub fn zero_strain_indices(&self) -> &'static [usize] {
        match self {
            StressState::PlaneStrain => &[2, 4, 5],
            StressState::UniaxialStrain => &[1, 2, 3, 4, 5],
            _ => &[],
        }
    }

    /// Returns the Mandel indices of the stress components required to vanish
    ///
    /// The strain components with the same indices are unknowns.
    pub fn zero_stress_indices(&self) -> &'static [usize] {
        match self {
            StressState::PlaneStress => &[2, 4, 5],
            StressState::UniaxialStress => &[1, 2, 3, 4, 5],
            _ => &[],
        }
    }

    /// Returns the Mandel indices of the strain components prescribed by the caller
    pub fn controlled_indices(&self) -> Vec<usize> {
        let unknown = self.zero_stress_indices();
        (0..6).filter(|a| !unknown.contains(a)).collect()
    }

    /// Indicates that the state requires a local iteration on the strain components
    pub fn is_stress_driven(&self) -> bool {
        !self.zero_stress_indices().is_empty()
    }
}

impl fmt::Display for StressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StressState::General => "general",
            StressState::PlaneStrain => "plane-strain",
            StressState::UniaxialStrain => "uniaxial strain",
            StressState::PlaneStress => "plane-stress",
            StressState::UniaxialStress => "uniaxial stress",
        };
        write!(f, "{}", name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
