//! Per-parameter summary statistics for chain diagnostics.

use ndarray::prelude::*;
use ndarray_stats::QuantileExt;

/// Number of bins used for parameter histograms.
pub const HIST_BINS: usize = 30;

/// Population mean and standard deviation of a sample sequence.
pub fn mean_std(samples: ArrayView1<f64>) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.sum() / n;
    let var = samples.mapv(|x| (x - mean).powi(2)).sum() / n;
    (mean, var.sqrt())
}

/// A uniform-bin histogram over a sample sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u32>,
}

impl Histogram {
    /// Bins `samples` into `bins` uniform bins spanning `[min, max]`, with
    /// the right edge of the last bin inclusive. A constant sequence has no
    /// span, so it gets the unit-width range around its value instead.
    pub fn from_samples(samples: ArrayView1<f64>, bins: usize) -> Result<Self, String> {
        if bins == 0 {
            return Err("Expected at least one histogram bin.".into());
        }
        let min = *samples
            .min()
            .map_err(|e| format!("Histogram range undefined: {e}"))?;
        let max = *samples
            .max()
            .map_err(|e| format!("Histogram range undefined: {e}"))?;
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u32; bins];
        for &x in samples.iter() {
            let bin = (((x - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
        Ok(Self { edges, counts })
    }

    /// Bin edges; one more entry than there are bins.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin sample counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Uniform bin width.
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Histogram mode: left edge of the highest-count bin plus half the bin
    /// width. The lowest such bin wins ties.
    pub fn mode(&self) -> f64 {
        let mut best = 0;
        for (bin, &count) in self.counts.iter().enumerate() {
            if count > self.counts[best] {
                best = bin;
            }
        }
        self.edges[best] + self.bin_width() / 2.0
    }
}

/// Summary of one parameter's samples: location and spread plus the
/// histogram backing its figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSummary {
    pub mean: f64,
    pub std: f64,
    pub histogram: Histogram,
}

impl ParamSummary {
    /// Computes the summary over one parameter's sample sequence.
    pub fn from_samples(samples: ArrayView1<f64>) -> Result<Self, String> {
        let (mean, std) = mean_std(samples);
        let histogram = Histogram::from_samples(samples, HIST_BINS)?;
        Ok(Self {
            mean,
            std,
            histogram,
        })
    }

    /// The histogram-estimated mode.
    pub fn mode(&self) -> f64 {
        self.histogram.mode()
    }

    /// Console/caption line for parameter `index` (1-based).
    pub fn label(&self, index: usize) -> String {
        format!(
            "Parameter #{}: mode = {:.2}, mean±std = {:.3} ± {:.3}",
            index,
            self.mode(),
            self.mean,
            self.std
        )
    }
}
