use super::Tensor4;
use crate::Error;
use russell_lab::vec_inner;
use russell_tensor::{t2_add, t2_dyad_t2_update, Mandel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Tolerance (relative to the largest component) used to accept a matrix as symmetric
const SYMMETRY_TOL: f64 = 1e-12;

/// Implements a symmetric second-order tensor in the Mandel basis
///
/// The data is held by a [russell_tensor::Tensor2] with [Mandel::Symmetric], i.e.,
/// the six components are stored as:
///
/// ```text
/// ┌                ┐
/// │      T00       │
/// │      T11       │
/// │      T22       │
/// │ T01 * SQRT_2   │
/// │ T12 * SQRT_2   │
/// │ T02 * SQRT_2   │
/// └                ┘
/// ```
///
/// With this basis the double-dot product `A:B` is the dot product of the Mandel vectors.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tensor2 {
    tt: russell_tensor::Tensor2,
}

impl Tensor2 {
    /// Allocates a new (zero) tensor
    pub fn new() -> Self {
        Tensor2 {
            tt: russell_tensor::Tensor2::new(Mandel::Symmetric),
        }
    }

    /// Returns the second-order identity tensor
    pub fn identity() -> Self {
        Tensor2 {
            tt: russell_tensor::Tensor2::identity(Mandel::Symmetric),
        }
    }

    /// Returns a diagonal tensor
    pub fn diagonal(t00: f64, t11: f64, t22: f64) -> Self {
        let mut res = Tensor2::new();
        res.tt.sym_set(0, 0, t00);
        res.tt.sym_set(1, 1, t11);
        res.tt.sym_set(2, 2, t22);
        res
    }

    /// Returns a tensor with only the 00 component (e.g., uniaxial strain or stress)
    pub fn uniaxial(t00: f64) -> Self {
        Tensor2::diagonal(t00, 0.0, 0.0)
    }

    /// Creates a tensor from the six Mandel components
    pub fn from_mandel(components: &[f64]) -> Result<Self, Error> {
        if components.len() != 6 {
            return Err(Error::Shape(format!(
                "expected 6 Mandel components, found {}",
                components.len()
            )));
        }
        let mut res = Tensor2::new();
        res.tt.set_mandel_vector(1.0, components);
        Ok(res)
    }

    /// Creates a tensor from its 3×3 matrix of components
    ///
    /// The matrix must be symmetric (up to round-off); the off-diagonal pairs are averaged.
    pub fn from_matrix(tt: &[[f64; 3]; 3]) -> Result<Self, Error> {
        let scale = tt.iter().flatten().fold(1.0_f64, |acc, v| f64::max(acc, f64::abs(*v)));
        for (i, j) in [(0, 1), (1, 2), (0, 2)] {
            if f64::abs(tt[i][j] - tt[j][i]) > SYMMETRY_TOL * scale {
                return Err(Error::Shape(format!(
                    "matrix is not symmetric: T{}{} = {:?} but T{}{} = {:?}",
                    i, j, tt[i][j], j, i, tt[j][i]
                )));
            }
        }
        let mut res = Tensor2::new();
        for i in 0..3 {
            for j in i..3 {
                res.tt.sym_set(i, j, 0.5 * (tt[i][j] + tt[j][i]));
            }
        }
        Ok(res)
    }

    /// Creates a tensor from a [russell_tensor::Tensor2]
    ///
    /// Symmetric 2D and 3D representations are accepted. A general representation is
    /// accepted only if its skew components are zero.
    pub fn from_russell(other: &russell_tensor::Tensor2) -> Result<Self, Error> {
        let v = other.vector();
        match other.mandel() {
            Mandel::Symmetric => Ok(Tensor2 { tt: other.clone() }),
            Mandel::Symmetric2D => Ok(Tensor2 {
                tt: other.sym2d_as_symmetric(),
            }),
            Mandel::General => {
                if (6..9).any(|i| v[i] != 0.0) {
                    return Err(Error::Shape("general Mandel tensor has non-zero skew components".to_string()));
                }
                let mut res = Tensor2::new();
                res.tt.set_mandel_vector(1.0, &v.as_data()[..6]);
                Ok(res)
            }
        }
    }

    /// Returns a reference to the underlying [russell_tensor::Tensor2] ([Mandel::Symmetric])
    pub fn as_russell(&self) -> &russell_tensor::Tensor2 {
        &self.tt
    }

    /// Converts this tensor into a [russell_tensor::Tensor2] with [Mandel::Symmetric]
    pub fn to_russell(&self) -> russell_tensor::Tensor2 {
        self.tt.clone()
    }

    /// Returns the Mandel vector
    pub fn vector(&self) -> &[f64] {
        self.tt.vector().as_data()
    }

    /// Returns the (i,j) component (standard basis)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.tt.get(i, j)
    }

    /// Sets the (i,j) and (j,i) components (standard basis)
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.tt.sym_set(i, j, value);
    }

    /// Returns the 3×3 matrix of components
    pub fn as_matrix(&self) -> [[f64; 3]; 3] {
        let mut mat = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                mat[i][j] = self.tt.get(i, j);
            }
        }
        mat
    }

    /// Calculates the double-dot product `A:B`
    pub fn ddot(&self, other: &Tensor2) -> f64 {
        vec_inner(self.tt.vector(), other.tt.vector())
    }

    /// Calculates the Frobenius norm `‖A‖ = √(A:A)`
    pub fn norm(&self) -> f64 {
        self.tt.norm()
    }

    /// Calculates the trace
    pub fn trace(&self) -> f64 {
        self.tt.trace()
    }

    /// Returns the deviatoric part `dev(A) = A - ⅓ tr(A) I`
    pub fn deviator(&self) -> Tensor2 {
        let mut res = Tensor2::new();
        self.tt.deviator(&mut res.tt);
        res
    }

    /// Returns the volumetric part `⅓ tr(A) I`
    pub fn spherical(&self) -> Tensor2 {
        Tensor2::identity() * self.tt.invariant_sigma_m()
    }

    /// Returns the mean stress invariant `σm = ⅓ tr(σ)`
    pub fn invariant_sigma_m(&self) -> f64 {
        self.tt.invariant_sigma_m()
    }

    /// Returns the von Mises (deviatoric) invariant `σd = √(3/2) ‖dev(σ)‖`
    pub fn invariant_sigma_d(&self) -> f64 {
        self.tt.invariant_sigma_d()
    }

    /// Returns the dyadic product `A ⊗ B`
    pub fn dyad(&self, other: &Tensor2) -> Tensor4 {
        let mut res = Tensor4::new();
        t2_dyad_t2_update(res.as_russell_mut(), 1.0, &self.tt, &other.tt);
        res
    }

    /// Returns the largest absolute Mandel component
    pub fn max_abs(&self) -> f64 {
        self.vector().iter().fold(0.0, |acc, v| f64::max(acc, f64::abs(*v)))
    }

    /// Returns a copy with the selected Mandel components set to zero
    pub(crate) fn with_zeroed(&self, indices: &[usize]) -> Tensor2 {
        let mut res = self.clone();
        for &a in indices {
            res.tt.vector_mut()[a] = 0.0;
        }
        res
    }

    /// Returns the Mandel component `a`
    pub(crate) fn mandel_component(&self, a: usize) -> f64 {
        self.tt.vector()[a]
    }

    /// Sets the Mandel component `a`
    pub(crate) fn set_mandel_component(&mut self, a: usize, value: f64) {
        self.tt.vector_mut()[a] = value;
    }

    /// Returns a mutable reference to the underlying [russell_tensor::Tensor2]
    pub(crate) fn as_russell_mut(&mut self) -> &mut russell_tensor::Tensor2 {
        &mut self.tt
    }

    /// Calculates `alpha·A + beta·B`
    fn combined(alpha: f64, a: &Tensor2, beta: f64, b: &Tensor2) -> Tensor2 {
        let mut res = Tensor2::new();
        t2_add(&mut res.tt, alpha, &a.tt, beta, &b.tt);
        res
    }

    /// Calculates `alpha·A`
    fn scaled(&self, alpha: f64) -> Tensor2 {
        let mut res = Tensor2::new();
        res.tt.set_tensor(alpha, &self.tt);
        res
    }
}

impl Default for Tensor2 {
    fn default() -> Self {
        Tensor2::new()
    }
}

impl PartialEq for Tensor2 {
    fn eq(&self, other: &Tensor2) -> bool {
        self.vector() == other.vector()
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $beta:expr) => {
        impl $trait<&Tensor2> for &Tensor2 {
            type Output = Tensor2;
            fn $method(self, rhs: &Tensor2) -> Tensor2 {
                Tensor2::combined(1.0, self, $beta, rhs)
            }
        }
        impl $trait<Tensor2> for &Tensor2 {
            type Output = Tensor2;
            fn $method(self, rhs: Tensor2) -> Tensor2 {
                Tensor2::combined(1.0, self, $beta, &rhs)
            }
        }
        impl $trait<&Tensor2> for Tensor2 {
            type Output = Tensor2;
            fn $method(self, rhs: &Tensor2) -> Tensor2 {
                Tensor2::combined(1.0, &self, $beta, rhs)
            }
        }
        impl $trait<Tensor2> for Tensor2 {
            type Output = Tensor2;
            fn $method(self, rhs: Tensor2) -> Tensor2 {
                Tensor2::combined(1.0, &self, $beta, &rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, 1.0);
impl_binary_op!(Sub, sub, -1.0);

impl Neg for Tensor2 {
    type Output = Tensor2;
    fn neg(self) -> Tensor2 {
        self.scaled(-1.0)
    }
}

impl Neg for &Tensor2 {
    type Output = Tensor2;
    fn neg(self) -> Tensor2 {
        self.scaled(-1.0)
    }
}

impl Mul<f64> for Tensor2 {
    type Output = Tensor2;
    fn mul(self, rhs: f64) -> Tensor2 {
        self.scaled(rhs)
    }
}

impl Mul<f64> for &Tensor2 {
    type Output = Tensor2;
    fn mul(self, rhs: f64) -> Tensor2 {
        self.scaled(rhs)
    }
}

impl Mul<Tensor2> for f64 {
    type Output = Tensor2;
    fn mul(self, rhs: Tensor2) -> Tensor2 {
        rhs.scaled(self)
    }
}

impl Mul<&Tensor2> for f64 {
    type Output = Tensor2;
    fn mul(self, rhs: &Tensor2) -> Tensor2 {
        rhs.scaled(self)
    }
}

impl Div<f64> for Tensor2 {
    type Output = Tensor2;
    fn div(self, rhs: f64) -> Tensor2 {
        self.scaled(1.0 / rhs)
    }
}

impl Div<f64> for &Tensor2 {
    type Output = Tensor2;
    fn div(self, rhs: f64) -> Tensor2 {
        self.scaled(1.0 / rhs)
    }
}

impl fmt::Display for Tensor2 {
    /// Prints the 3×3 matrix of components
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mat = self.as_matrix();
        for (i, row) in mat.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match f.precision() {
                Some(p) => write!(f, "│ {:.*} {:.*} {:.*} │", p, row[0], p, row[1], p, row[2])?,
                None => write!(f, "│ {} {} {} │", row[0], row[1], row[2])?,
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
