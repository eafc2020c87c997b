//! Tridiagonal linear systems.
//!
//! [`TridiagonalSystem`] stores the three bands of an `n × n` tridiagonal
//! matrix and solves `A · x = rhs` directly with the Thomas algorithm (LU
//! decomposition specialised to three bands).  The spline builder uses it for
//! the second-derivative system, which is symmetric and strictly diagonally
//! dominant, so no pivoting is needed.

use ck_core::errors::Result;

use crate::scalar::Scalar;

/// A tridiagonal matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem<T: Scalar = f64> {
    /// Lower diagonal; index 0 is unused, entries start at row 1.
    pub lower: Vec<T>,
    /// Main diagonal.
    pub diag: Vec<T>,
    /// Upper diagonal; the last index is unused, entries end at row n−2.
    pub upper: Vec<T>,
}

impl<T: Scalar> TridiagonalSystem<T> {
    /// Create a zero system of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![T::zero(); n],
            diag: vec![T::zero(); n],
            upper: vec![T::zero(); n],
        }
    }

    /// Size (number of rows/columns).
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Apply the matrix: `y = A · x`.
    pub fn apply(&self, x: &[T]) -> Result<Vec<T>> {
        let n = self.size();
        ck_core::ensure!(x.len() == n, "vector length {} does not match size {n}", x.len());
        let y = (0..n)
            .map(|i| {
                let mut yi = self.diag[i] * x[i];
                if i > 0 {
                    yi = yi + self.lower[i] * x[i - 1];
                }
                if i + 1 < n {
                    yi = yi + self.upper[i] * x[i + 1];
                }
                yi
            })
            .collect();
        Ok(y)
    }

    /// Solve `A · x = rhs` with the Thomas algorithm.
    ///
    /// # Errors
    /// `Precondition` if `rhs` has the wrong length, `DegenerateInput` if a
    /// pivot vanishes (singular or badly conditioned matrix).
    pub fn solve(&self, rhs: &[T]) -> Result<Vec<T>> {
        let n = self.size();
        ck_core::ensure!(
            rhs.len() == n,
            "right-hand side length {} does not match size {n}",
            rhs.len()
        );
        if n == 0 {
            return Ok(Vec::new());
        }

        // Forward sweep
        let mut c_prime = vec![T::zero(); n];
        let mut d_prime = vec![T::zero(); n];

        let mut pivot = self.diag[0];
        ck_core::ensure_input!(pivot != T::zero(), "tridiagonal system: zero pivot in row 0");
        c_prime[0] = self.upper[0] / pivot;
        d_prime[0] = rhs[0] / pivot;

        for i in 1..n {
            pivot = self.diag[i] - self.lower[i] * c_prime[i - 1];
            ck_core::ensure_input!(
                pivot != T::zero() && pivot.is_finite(),
                "tridiagonal system: zero pivot in row {i}"
            );
            if i < n - 1 {
                c_prime[i] = self.upper[i] / pivot;
            }
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / pivot;
        }

        // Back substitution
        let mut x = vec![T::zero(); n];
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector};

    fn sample() -> TridiagonalSystem {
        TridiagonalSystem {
            lower: vec![0.0, 0.5, 0.25, 1.0],
            diag: vec![2.0, 3.0, 1.5, 4.0],
            upper: vec![0.75, 0.2, 0.5, 0.0],
        }
    }

    fn dense(sys: &TridiagonalSystem) -> DMatrix<f64> {
        let n = sys.size();
        DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                sys.diag[i]
            } else if j + 1 == i {
                sys.lower[i]
            } else if i + 1 == j {
                sys.upper[i]
            } else {
                0.0
            }
        })
    }

    #[test]
    fn thomas_matches_dense_lu() {
        let sys = sample();
        let rhs = vec![1.0, -2.0, 0.5, 3.0];
        let x = sys.solve(&rhs).unwrap();

        let expected = dense(&sys)
            .lu()
            .solve(&DVector::from_vec(rhs.clone()))
            .unwrap();
        for i in 0..x.len() {
            assert_abs_diff_eq!(x[i], expected[i], epsilon = 1e-13);
        }
    }

    #[test]
    fn apply_inverts_solve() {
        let sys = sample();
        let rhs = vec![0.3, 0.1, -0.7, 2.0];
        let x = sys.solve(&rhs).unwrap();
        let back = sys.apply(&x).unwrap();
        for (b, r) in back.iter().zip(&rhs) {
            assert_abs_diff_eq!(*b, *r, epsilon = 1e-13);
        }
    }

    #[test]
    fn single_row_system() {
        let sys = TridiagonalSystem {
            lower: vec![0.0],
            diag: vec![4.0],
            upper: vec![0.0],
        };
        assert_eq!(sys.solve(&[2.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn zero_pivot_is_degenerate() {
        let sys = TridiagonalSystem::<f64>::new(3);
        let err = sys.solve(&[1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ck_core::Error::DegenerateInput(_)));
    }

    #[test]
    fn wrong_rhs_length() {
        assert!(sample().solve(&[1.0]).is_err());
    }
}
