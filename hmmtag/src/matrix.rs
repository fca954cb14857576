//! Dense matrices used by the trainer and the tagger.
//!
//! Counting and normalization are separated by type: the trainer owns a [`CountMatrix`] and
//! the only way to obtain a [`LogProbMatrix`] is [`CountMatrix::normalize()`].

use bincode::{Decode, Encode};

use crate::errors::{HmmTagError, Result};

/// Row-major matrix of raw event counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<u64>,
}

impl CountMatrix {
    /// Creates a zero-filled matrix.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0; n_rows * n_cols],
        }
    }

    #[inline(always)]
    pub fn increment(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.n_rows && col < self.n_cols);
        self.data[row * self.n_cols + col] += 1;
    }

    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.data[row * self.n_cols + col]
    }

    pub const fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub const fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Adds the counts of `other` cell by cell.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn merge(&mut self, other: &Self) {
        assert_eq!((self.n_rows, self.n_cols), (other.n_rows, other.n_cols));
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
    }

    /// Applies add-`alpha` smoothing and turns each row into natural-log probabilities.
    ///
    /// Each cell becomes `ln((count + alpha) / row_sum)` where `row_sum` is the sum of
    /// `count + alpha` over the row. `alpha` must be positive.
    pub fn normalize(&self, alpha: f64) -> LogProbMatrix {
        debug_assert!(alpha > 0.0);
        let mut data = Vec::with_capacity(self.data.len());
        if self.n_cols != 0 {
            for row in self.data.chunks_exact(self.n_cols) {
                let smoothed: Vec<f64> = row.iter().map(|&c| c as f64 + alpha).collect();
                let log_sum = smoothed.iter().sum::<f64>().ln();
                data.extend(smoothed.into_iter().map(|x| x.ln() - log_sum));
            }
        }
        LogProbMatrix {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            data,
        }
    }
}

/// Row-major matrix of natural-log probabilities. Every row is a distribution.
#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub struct LogProbMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

impl LogProbMatrix {
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n_cols + col]
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.n_cols..(row + 1) * self.n_cols]
    }

    pub const fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub const fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Checks the shape and that no cell is NaN or positive. Used on decoded models.
    pub(crate) fn validate(&self, n_rows: usize, n_cols: usize, name: &str) -> Result<()> {
        if self.n_rows != n_rows || self.n_cols != n_cols {
            return Err(HmmTagError::invalid_model(format!(
                "{name} matrix must be {n_rows}x{n_cols}, but got {}x{}",
                self.n_rows, self.n_cols
            )));
        }
        if self.data.len() != n_rows * n_cols {
            return Err(HmmTagError::invalid_model(format!(
                "{name} matrix has {} cells",
                self.data.len()
            )));
        }
        if self.data.iter().any(|x| x.is_nan() || *x > 0.0) {
            return Err(HmmTagError::invalid_model(format!(
                "{name} matrix contains an invalid log-probability"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn test_increment_and_merge() {
        let mut a = CountMatrix::new(2, 3);
        a.increment(0, 1);
        a.increment(0, 1);
        a.increment(1, 2);
        let mut b = CountMatrix::new(2, 3);
        b.increment(0, 1);
        b.increment(1, 0);

        a.merge(&b);

        assert_eq!(3, a.get(0, 1));
        assert_eq!(1, a.get(1, 0));
        assert_eq!(1, a.get(1, 2));
        assert_eq!(0, a.get(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_merge_shape_mismatch() {
        let mut a = CountMatrix::new(2, 3);
        a.merge(&CountMatrix::new(3, 2));
    }

    #[test]
    fn test_normalize() {
        let mut m = CountMatrix::new(2, 2);
        m.increment(0, 0);
        m.increment(0, 0);
        m.increment(0, 0);

        let p = m.normalize(1.0);

        assert_abs_diff_eq!(0.8f64.ln(), p.get(0, 0), epsilon = 1e-12);
        assert_abs_diff_eq!(0.2f64.ln(), p.get(0, 1), epsilon = 1e-12);
        assert_abs_diff_eq!(0.5f64.ln(), p.get(1, 0), epsilon = 1e-12);
        assert_abs_diff_eq!(0.5f64.ln(), p.get(1, 1), epsilon = 1e-12);
        assert_eq!(&[p.get(1, 0), p.get(1, 1)], p.row(1));
    }

    #[test]
    fn test_normalize_rows_sum_to_one() {
        let mut m = CountMatrix::new(3, 5);
        for (r, c) in [(0, 0), (0, 4), (1, 1), (1, 1), (1, 3), (2, 2)] {
            m.increment(r, c);
        }

        for alpha in [1e-4, 0.1, 1.0, 25.0] {
            let p = m.normalize(alpha);
            for r in 0..p.n_rows() {
                let total: f64 = p.row(r).iter().map(|x| x.exp()).sum();
                assert_abs_diff_eq!(1.0, total, epsilon = 1e-6);
                assert!(p.row(r).iter().all(|x| x.is_finite() && *x <= 0.0));
            }
        }
    }

    #[test]
    fn test_validate() {
        let p = CountMatrix::new(2, 3).normalize(0.1);

        assert!(p.validate(2, 3, "test").is_ok());
        assert_eq!(
            "InvalidModelError: test matrix must be 3x3, but got 2x3",
            &p.validate(3, 3, "test").err().unwrap().to_string()
        );
    }
}
