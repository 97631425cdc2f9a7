use super::Tensor2;
use crate::Error;
use russell_lab::{mat_cholesky, Matrix};
use russell_tensor::{t2_ddot_t4, t2_dyad_t2_update, t4_ddot_t2, t4_ddot_t4, LinElasticity, Mandel};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Implements a minor-symmetric fourth-order tensor in the Mandel basis
///
/// The data is held by a [russell_tensor::Tensor4] with [Mandel::Symmetric], i.e., the
/// 6×6 matrix mapping Mandel vectors of [Tensor2] into Mandel vectors. Thus `C:ε` is a
/// matrix-vector product. Major symmetry is not assumed; e.g., the consistent tangent of
/// nonlinear kinematic hardening is not major-symmetric.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tensor4 {
    dd: russell_tensor::Tensor4,
}

impl Tensor4 {
    /// Allocates a new (zero) tensor
    pub fn new() -> Self {
        Tensor4 {
            dd: russell_tensor::Tensor4::new(Mandel::Symmetric),
        }
    }

    /// Creates a tensor from the 6×6 Mandel matrix
    pub fn from_matrix(mat: &[[f64; 6]; 6]) -> Self {
        let mut res = Tensor4::new();
        for a in 0..6 {
            for b in 0..6 {
                res.set(a, b, mat[a][b]);
            }
        }
        res
    }

    /// Creates a tensor from the 36 Mandel components given row by row
    pub fn from_mandel(components: &[f64]) -> Result<Self, Error> {
        if components.len() != 36 {
            return Err(Error::Shape(format!(
                "expected 36 Mandel components, found {}",
                components.len()
            )));
        }
        let mut res = Tensor4::new();
        for a in 0..6 {
            for b in 0..6 {
                res.set(a, b, components[6 * a + b]);
            }
        }
        Ok(res)
    }

    /// Creates a tensor from a [russell_tensor::Tensor4]
    ///
    /// Only the symmetric (minor-symmetric) representations are accepted.
    pub fn from_russell(other: &russell_tensor::Tensor4) -> Result<Self, Error> {
        let n = match other.mandel() {
            Mandel::Symmetric => return Ok(Tensor4 { dd: other.clone() }),
            Mandel::Symmetric2D => 4,
            Mandel::General => {
                return Err(Error::Shape(
                    "general Mandel representation of a fourth-order tensor is not supported".to_string(),
                ))
            }
        };
        let mat = other.matrix();
        let mut res = Tensor4::new();
        for a in 0..n {
            for b in 0..n {
                res.set(a, b, mat.get(a, b));
            }
        }
        Ok(res)
    }

    /// Returns a reference to the underlying [russell_tensor::Tensor4] ([Mandel::Symmetric])
    pub fn as_russell(&self) -> &russell_tensor::Tensor4 {
        &self.dd
    }

    /// Converts this tensor into a [russell_tensor::Tensor4] with [Mandel::Symmetric]
    pub fn to_russell(&self) -> russell_tensor::Tensor4 {
        self.dd.clone()
    }

    /// Returns the symmetric fourth-order identity `I_sym`
    ///
    /// `I_sym : A = A` for any symmetric `A`.
    pub fn identity() -> Self {
        let mut res = Tensor4::new();
        for a in 0..6 {
            res.set(a, a, 1.0);
        }
        res
    }

    /// Returns the volumetric operator `I ⊗ I` (i.e., `(I⊗I) : A = tr(A) I`)
    pub fn i_vol() -> Self {
        let ii = Tensor2::identity();
        ii.dyad(&ii)
    }

    /// Returns the deviatoric projector `P_dev = I_sym - ⅓ I ⊗ I`
    pub fn p_dev() -> Self {
        Tensor4 {
            dd: russell_tensor::Tensor4::constant_pp_symdev(true),
        }
    }

    /// Returns the isotropic elastic stiffness `2G P_dev + K I⊗I`
    pub fn isotropic(gg: f64, kk: f64) -> Self {
        let mut ela = LinElasticity::new(1.0, 0.0, false, false);
        ela.set_bulk_shear(kk, gg);
        Tensor4 {
            dd: ela.get_modulus().clone(),
        }
    }

    /// Returns the Mandel matrix
    pub fn matrix(&self) -> &Matrix {
        self.dd.matrix()
    }

    /// Returns the (a,b) entry of the Mandel matrix
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.dd.matrix().get(a, b)
    }

    /// Sets the (a,b) entry of the Mandel matrix
    pub fn set(&mut self, a: usize, b: usize, value: f64) {
        self.dd.matrix_mut().set(a, b, value);
    }

    /// Returns the (i,j,k,l) component in the standard basis
    pub fn component(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        self.dd.get(i, j, k, l)
    }

    /// Calculates `C : A`
    pub fn ddot_t2(&self, aa: &Tensor2) -> Tensor2 {
        let mut res = Tensor2::new();
        t4_ddot_t2(res.as_russell_mut(), 1.0, &self.dd, aa.as_russell());
        res
    }

    /// Calculates `A : C`
    pub fn t2_ddot(&self, aa: &Tensor2) -> Tensor2 {
        let mut res = Tensor2::new();
        t2_ddot_t4(res.as_russell_mut(), 1.0, aa.as_russell(), &self.dd);
        res
    }

    /// Calculates the composition `C : D`
    pub fn ddot(&self, other: &Tensor4) -> Tensor4 {
        let mut res = Tensor4::new();
        t4_ddot_t4(&mut res.dd, 1.0, &self.dd, &other.dd);
        res
    }

    /// Returns the transpose (swaps the first and second pair of indices)
    pub fn transpose(&self) -> Tensor4 {
        let mut res = Tensor4::new();
        for a in 0..6 {
            for b in 0..6 {
                res.set(a, b, self.get(b, a));
            }
        }
        res
    }

    /// Adds `alpha · (A ⊗ B)` to this tensor
    pub fn add_dyad(&mut self, alpha: f64, aa: &Tensor2, bb: &Tensor2) {
        t2_dyad_t2_update(&mut self.dd, alpha, aa.as_russell(), bb.as_russell());
    }

    /// Returns the largest absolute Mandel entry
    pub fn max_abs(&self) -> f64 {
        self.dd.matrix().as_data().iter().fold(0.0, |acc, v| f64::max(acc, f64::abs(*v)))
    }

    /// Checks whether `Cijkl = Cklij` within a tolerance relative to the largest entry
    pub fn is_major_symmetric(&self, tol: f64) -> bool {
        let scale = f64::max(1.0, self.max_abs());
        for a in 0..6 {
            for b in (a + 1)..6 {
                if f64::abs(self.get(a, b) - self.get(b, a)) > tol * scale {
                    return false;
                }
            }
        }
        true
    }

    /// Checks whether `A : C : A > 0` for every non-zero symmetric `A`
    ///
    /// The check performs a Cholesky factorization of the symmetric part of the Mandel matrix.
    pub fn is_positive_definite(&self) -> bool {
        let mut sym = Matrix::new(6, 6);
        for a in 0..6 {
            for b in 0..6 {
                sym.set(a, b, 0.5 * (self.get(a, b) + self.get(b, a)));
            }
        }
        mat_cholesky(&mut sym, false).is_ok()
    }

    /// Returns a mutable reference to the underlying [russell_tensor::Tensor4]
    pub(crate) fn as_russell_mut(&mut self) -> &mut russell_tensor::Tensor4 {
        &mut self.dd
    }

    /// Calculates `alpha·C`
    fn scaled(&self, alpha: f64) -> Tensor4 {
        let mut res = Tensor4::new();
        res.dd.set_tensor(alpha, &self.dd);
        res
    }
}

impl Default for Tensor4 {
    fn default() -> Self {
        Tensor4::new()
    }
}

impl PartialEq for Tensor4 {
    fn eq(&self, other: &Tensor4) -> bool {
        self.dd.matrix().as_data() == other.dd.matrix().as_data()
    }
}

impl Add for Tensor4 {
    type Output = Tensor4;
    fn add(mut self, rhs: Tensor4) -> Tensor4 {
        self.dd.update(1.0, &rhs.dd);
        self
    }
}

impl Sub for Tensor4 {
    type Output = Tensor4;
    fn sub(mut self, rhs: Tensor4) -> Tensor4 {
        self.dd.update(-1.0, &rhs.dd);
        self
    }
}

impl Mul<f64> for Tensor4 {
    type Output = Tensor4;
    fn mul(self, rhs: f64) -> Tensor4 {
        self.scaled(rhs)
    }
}

impl Mul<f64> for &Tensor4 {
    type Output = Tensor4;
    fn mul(self, rhs: f64) -> Tensor4 {
        self.scaled(rhs)
    }
}

impl Neg for Tensor4 {
    type Output = Tensor4;
    fn neg(self) -> Tensor4 {
        self.scaled(-1.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
