/*!
# Figure rendering

Renders the diagnostic figure set for a chain with `plotters`: one trace
figure holding a subplot per parameter, one histogram figure per parameter,
and a pairwise scatter matrix for chains with 2 to 9 parameters. Figures
are written as SVG files named from the input file stem.
*/

use std::error::Error;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use ndarray::prelude::*;
use ndarray_stats::QuantileExt;
use plotters::prelude::*;
use rayon::prelude::*;

use crate::chain::Chain;
use crate::stats::ParamSummary;

/// Most parameters for which the pairwise scatter figure is still drawn.
pub const MAX_PAIRWISE_DIM: usize = 9;

/// Paths of the figures written for one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSet {
    pub trace: PathBuf,
    pub histograms: Vec<PathBuf>,
    pub pairwise: Option<PathBuf>,
}

impl FigureSet {
    /// All written figure paths, in report order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.trace)
            .chain(self.histograms.iter())
            .chain(self.pairwise.iter())
    }
}

/// Renders every figure for `chain` into `out_dir`, deriving file names
/// from `stem`. The pairwise figure is produced only for 2 to 9 parameters;
/// histograms are produced for every parameter regardless of `dim`.
pub fn render_all(chain: &Chain, stem: &str, out_dir: &Path) -> Result<FigureSet, Box<dyn Error>> {
    let trace = out_dir.join(format!("{stem}_trace.svg"));
    plot_traces(chain, &trace)?;

    let histograms = plot_histograms(chain, stem, out_dir)?;

    let pairwise = if chain.dim() > 1 && chain.dim() <= MAX_PAIRWISE_DIM {
        let path = out_dir.join(format!("{stem}_pairwise.svg"));
        plot_pairwise(chain, &path)?;
        Some(path)
    } else {
        None
    };

    Ok(FigureSet {
        trace,
        histograms,
        pairwise,
    })
}

/// Draws the trace figure: `dim` stacked subplots, sample value against
/// step index.
pub fn plot_traces(chain: &Chain, path: &Path) -> Result<(), Box<dyn Error>> {
    let dim = chain.dim();
    let root = SVGBackend::new(path, (1200, 240 * dim as u32)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((dim, 1));
    for (i, area) in areas.iter().enumerate() {
        let data = chain.param(i);
        let (y_min, y_max) = value_range(&data)?;

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..chain.steps() as f64, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_desc(format!("Parameter #{}", i + 1))
            .draw()?;

        chart.draw_series(LineSeries::new(
            data.iter().enumerate().map(|(step, &v)| (step as f64, v)),
            &BLACK,
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Renders every parameter's histogram figure. Figures are independent, so
/// they render in parallel behind one progress bar.
pub fn plot_histograms(
    chain: &Chain,
    stem: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let style = ProgressStyle::default_bar()
        .template("Histograms [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}")?
        .progress_chars("##-");
    let pb = ProgressBar::new(chain.dim() as u64);
    pb.set_style(style);

    let paths = (0..chain.dim())
        .into_par_iter()
        .map(|i| {
            let path = out_dir.join(format!("{stem}_hist_{}.svg", i + 1));
            let summary = ParamSummary::from_samples(chain.param(i))?;
            draw_histogram(i + 1, &summary, &path).map_err(|e| e.to_string())?;
            pb.inc(1);
            Ok(path)
        })
        .collect::<Result<Vec<PathBuf>, String>>()?;

    pb.finish_and_clear();
    Ok(paths)
}

fn draw_histogram(index: usize, summary: &ParamSummary, path: &Path) -> Result<(), Box<dyn Error>> {
    let hist = &summary.histogram;
    let edges = hist.edges();
    let x_min = edges[0];
    let x_max = edges[edges.len() - 1];
    let y_max = f64::from(hist.max_count().max(1)) * 1.05;

    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(summary.label(index), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .y_desc("Count")
        .draw()?;

    chart.draw_series(hist.counts().iter().enumerate().map(|(bin, &count)| {
        Rectangle::new(
            [(edges[bin], 0.0), (edges[bin + 1], f64::from(count))],
            BLACK.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Draws the pairwise scatter matrix. Pair `(i, j)` with `i < j` lands in
/// grid cell (row `j - 1`, column `i`), so exactly the lower-triangular
/// cells of the `(dim - 1)²` grid are populated; parameter `j` goes on the
/// x-axis, parameter `i` on the y-axis.
pub fn plot_pairwise(chain: &Chain, path: &Path) -> Result<(), Box<dyn Error>> {
    let dim = chain.dim();
    if dim < 2 {
        return Err("Pairwise figure requires at least two parameters.".into());
    }
    let cells = dim - 1;
    let side = 320 * cells as u32;
    let root = SVGBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((cells, cells));
    for i in 0..dim - 1 {
        for j in (i + 1)..dim {
            let area = &areas[(j - 1) * cells + i];
            let xs = chain.param(j);
            let ys = chain.param(i);
            let (x_min, x_max) = value_range(&xs)?;
            let (y_min, y_max) = value_range(&ys)?;

            let mut chart = ChartBuilder::on(area)
                .margin(8)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(format!("Parameter #{}", j + 1))
                .y_desc(format!("Parameter #{}", i + 1))
                .draw()?;

            chart.draw_series(
                xs.iter()
                    .zip(ys.iter())
                    .map(|(&x, &y)| Circle::new((x, y), 1, BLACK.filled())),
            )?;
        }
    }

    root.present()?;
    Ok(())
}

/// Data-driven axis range, widened to unit span for constant data.
fn value_range(data: &ArrayView1<f64>) -> Result<(f64, f64), Box<dyn Error>> {
    let min = *data
        .min()
        .map_err(|e| format!("Axis range undefined: {e}"))?;
    let max = *data
        .max()
        .map_err(|e| format!("Axis range undefined: {e}"))?;
    if min == max {
        Ok((min - 0.5, max + 0.5))
    } else {
        Ok((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_chain(dim: usize, steps: usize) -> Chain {
        let samples = Array2::from_shape_fn((dim, steps), |(i, j)| {
            (j as f64 * 0.3 + i as f64).sin() + i as f64
        });
        Chain::from_matrix(samples).expect("Expected test chain to wrap cleanly.")
    }

    fn assert_nonempty_file(path: &Path) {
        let metadata = fs::metadata(path).expect("Expected figure file to exist.");
        assert!(metadata.len() > 0, "Figure file {:?} is empty.", path);
    }

    #[test]
    fn test_render_all_single_parameter() {
        let dir = tempdir().expect("Could not create temp dir");
        let figures = render_all(&test_chain(1, 50), "single", dir.path())
            .expect("Expected rendering to succeed.");

        assert_nonempty_file(&figures.trace);
        assert_eq!(figures.histograms.len(), 1);
        assert_nonempty_file(&figures.histograms[0]);
        assert!(
            figures.pairwise.is_none(),
            "Expected no pairwise figure for dim == 1."
        );
        assert_eq!(figures.paths().count(), 2);
    }

    #[test]
    fn test_render_all_three_parameters() {
        let dir = tempdir().expect("Could not create temp dir");
        let figures = render_all(&test_chain(3, 100), "triple", dir.path())
            .expect("Expected rendering to succeed.");

        assert_nonempty_file(&figures.trace);
        assert_eq!(figures.histograms.len(), 3);
        for path in &figures.histograms {
            assert_nonempty_file(path);
        }
        let pairwise = figures
            .pairwise
            .as_ref()
            .expect("Expected a pairwise figure for dim == 3.");
        assert_nonempty_file(pairwise);
    }

    /// Histograms are still drawn past the pairwise cutoff; the pairwise
    /// figure is not.
    #[test]
    fn test_render_all_past_pairwise_cutoff() {
        let dir = tempdir().expect("Could not create temp dir");
        let figures = render_all(&test_chain(10, 40), "wide", dir.path())
            .expect("Expected rendering to succeed.");

        assert_eq!(figures.histograms.len(), 10);
        assert!(
            figures.pairwise.is_none(),
            "Expected no pairwise figure for dim == 10."
        );
    }

    #[test]
    fn test_render_all_at_pairwise_cutoff() {
        let dir = tempdir().expect("Could not create temp dir");
        let figures = render_all(&test_chain(9, 40), "nine", dir.path())
            .expect("Expected rendering to succeed.");
        assert!(
            figures.pairwise.is_some(),
            "Expected a pairwise figure for dim == 9."
        );
    }

    #[test]
    fn test_histogram_caption_contains_summary() {
        let dir = tempdir().expect("Could not create temp dir");
        let figures = render_all(&test_chain(1, 50), "caption", dir.path())
            .expect("Expected rendering to succeed.");

        let svg = fs::read_to_string(&figures.histograms[0])
            .expect("Expected the histogram SVG to be readable.");
        assert!(
            svg.contains("Parameter #1: mode ="),
            "Expected the caption to carry the summary label."
        );
    }

    #[test]
    fn test_pairwise_rejects_single_parameter() {
        let dir = tempdir().expect("Could not create temp dir");
        let path = dir.path().join("nope.svg");
        assert!(
            plot_pairwise(&test_chain(1, 10), &path).is_err(),
            "Expected the pairwise figure to require two parameters."
        );
    }

    #[test]
    fn test_constant_parameter_renders() {
        let samples = Array2::from_elem((1, 20), 7.0);
        let chain = Chain::from_matrix(samples).expect("Expected test chain to wrap cleanly.");
        let dir = tempdir().expect("Could not create temp dir");
        let figures =
            render_all(&chain, "flat", dir.path()).expect("Expected rendering to succeed.");
        assert_nonempty_file(&figures.trace);
        assert_nonempty_file(&figures.histograms[0]);
    }
}
