//! Dense matrices of rational functions.

use std::fmt;

use crate::error::{Result, TfError};

use super::rational::RationalFunction;

/// Row-major matrix over the field of rational functions in `s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymMatrix {
    rows: usize,
    cols: usize,
    data: Vec<RationalFunction>,
}

/// Upper-triangular form produced by forward elimination.
struct Elimination {
    upper: SymMatrix,
    rhs: Vec<RationalFunction>,
    swaps: usize,
}

impl SymMatrix {
    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![RationalFunction::zero(); rows * cols],
        }
    }

    /// Create a matrix from nested rows. Returns `None` for ragged input.
    pub fn from_rows(rows: Vec<Vec<RationalFunction>>) -> Option<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> &RationalFunction {
        &self.data[row * self.cols + col]
    }

    /// Set matrix element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: RationalFunction) {
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[RationalFunction] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c).clone());
            }
        }
        out
    }

    /// Join four blocks into `[[tl, tr], [bl, br]]`.
    pub fn from_blocks(tl: &Self, tr: &Self, bl: &Self, br: &Self) -> Result<Self> {
        if tl.rows != tr.rows || bl.rows != br.rows || tl.cols != bl.cols || tr.cols != br.cols {
            return Err(TfError::internal(format!(
                "block dimensions do not line up: [{}x{} {}x{}; {}x{} {}x{}]",
                tl.rows, tl.cols, tr.rows, tr.cols, bl.rows, bl.cols, br.rows, br.cols
            )));
        }

        let rows = tl.rows + bl.rows;
        let cols = tl.cols + tr.cols;
        let mut out = Self::zeros(rows, cols);
        let placed = [
            (tl, 0, 0),
            (tr, 0, tl.cols),
            (bl, tl.rows, 0),
            (br, tl.rows, tl.cols),
        ];
        for (block, r0, c0) in placed {
            for r in 0..block.rows {
                for c in 0..block.cols {
                    out.set(r0 + r, c0 + c, block.get(r, c).clone());
                }
            }
        }
        Ok(out)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }

    /// Gaussian elimination to upper-triangular form, carrying `rhs` along.
    ///
    /// Returns `None` if some column has no non-zero pivot, i.e. the
    /// determinant is identically zero. Among the candidate pivots the one of
    /// lowest polynomial degree is chosen to limit expression growth.
    fn forward_eliminate(&self, mut rhs: Vec<RationalFunction>) -> Option<Elimination> {
        let n = self.rows;
        let mut a = self.clone();
        let mut swaps = 0;

        for k in 0..n {
            let pivot_row = (k..n)
                .filter(|&i| !a.get(i, k).is_zero())
                .min_by_key(|&i| a.get(i, k).complexity())?;

            if pivot_row != k {
                a.swap_rows(k, pivot_row);
                rhs.swap(k, pivot_row);
                swaps += 1;
            }

            let pivot = a.get(k, k).clone();
            for i in (k + 1)..n {
                if a.get(i, k).is_zero() {
                    continue;
                }
                let factor = a.get(i, k).checked_div(&pivot)?;
                for j in k..n {
                    let updated = a.get(i, j) - &(&factor * a.get(k, j));
                    a.set(i, j, updated);
                }
                rhs[i] = &rhs[i] - &(&factor * &rhs[k]);
            }
        }

        Some(Elimination {
            upper: a,
            rhs,
            swaps,
        })
    }

    /// Determinant as a rational function of `s`.
    pub fn determinant(&self) -> Result<RationalFunction> {
        if !self.is_square() {
            return Err(TfError::internal(format!(
                "determinant of non-square {}x{} matrix",
                self.rows, self.cols
            )));
        }

        let Some(elim) = self.forward_eliminate(vec![RationalFunction::zero(); self.rows]) else {
            return Ok(RationalFunction::zero());
        };

        let mut det = RationalFunction::one();
        for k in 0..self.rows {
            det = &det * elim.upper.get(k, k);
        }
        if elim.swaps % 2 == 1 {
            det = -det;
        }
        Ok(det)
    }

    /// Solve `self * x = rhs` exactly.
    ///
    /// Fails with [`TfError::SingularSystem`] when the matrix is singular for
    /// generic `s`.
    pub fn solve(&self, rhs: &[RationalFunction]) -> Result<Vec<RationalFunction>> {
        if !self.is_square() || rhs.len() != self.rows {
            return Err(TfError::internal(format!(
                "cannot solve {}x{} system with {} right-hand side entries",
                self.rows,
                self.cols,
                rhs.len()
            )));
        }

        let elim = self
            .forward_eliminate(rhs.to_vec())
            .ok_or(TfError::SingularSystem)?;

        let n = self.rows;
        let mut x = vec![RationalFunction::zero(); n];
        for i in (0..n).rev() {
            let mut acc = elim.rhs[i].clone();
            for j in (i + 1)..n {
                acc = &acc - &(elim.upper.get(i, j) * &x[j]);
            }
            x[i] = acc
                .checked_div(elim.upper.get(i, i))
                .ok_or(TfError::SingularSystem)?;
        }
        Ok(x)
    }
}

impl fmt::Display for SymMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let cells: Vec<String> = self.row(r).iter().map(|e| e.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
