//! The [`Chain`] type: an immutable matrix of MCMC samples, one row per parameter.

use ndarray::prelude::*;

/// MCMC samples with shape `dim × steps`.
///
/// A 1-D sample array resolves to a single parameter (`dim == 1`); a 2-D
/// array keeps its first axis as the parameter axis. The chain is read once
/// at load time and never mutated.
///
/// # Examples
///
/// ```rust
/// use chainplot::chain::Chain;
/// use ndarray::arr2;
///
/// let chain = Chain::from_matrix(arr2(&[[0.1, 0.2, 0.3], [1.1, 1.2, 1.3]]))?;
/// assert_eq!(chain.dim(), 2);
/// assert_eq!(chain.steps(), 3);
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    samples: Array2<f64>,
}

impl Chain {
    /// Wraps a `dim × steps` sample matrix.
    pub fn from_matrix(samples: Array2<f64>) -> Result<Self, String> {
        if samples.nrows() == 0 || samples.ncols() == 0 {
            return Err("Expected chain to contain at least one sample.".into());
        }
        Ok(Self { samples })
    }

    /// Wraps a single-parameter chain given as a flat sample sequence.
    pub fn from_flat(samples: Array1<f64>) -> Result<Self, String> {
        Self::from_matrix(samples.insert_axis(Axis(0)))
    }

    /// Number of parameters (rows).
    pub fn dim(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of samples per parameter (columns).
    pub fn steps(&self) -> usize {
        self.samples.ncols()
    }

    /// The sample sequence of parameter `i`.
    pub fn param(&self, i: usize) -> ArrayView1<f64> {
        self.samples.row(i)
    }
}
