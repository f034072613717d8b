/*!
# Chain file loaders

Deserializes an externally produced sample array into a
[`Chain`](crate::chain::Chain). NPY files are read out of the box; CSV and
Parquet loading are enabled via the `csv` and `parquet` features.
*/

pub mod npy;

#[cfg(feature = "csv")]
pub mod csv;

#[cfg(feature = "parquet")]
pub mod parquet;

use std::error::Error;
use std::path::Path;

use crate::chain::Chain;

/// Loads a chain from `path`, picking the loader from the file extension:
/// `.csv` and `.parquet` go to their feature-gated loaders, anything else
/// is treated as NPY.
///
/// # Examples
///
/// ```rust
/// use chainplot::io::load_chain;
/// use ndarray::arr2;
/// use ndarray_npy::WriteNpyExt;
/// use std::fs::File;
///
/// let path = std::env::temp_dir().join("chainplot_doc.npy");
/// arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).write_npy(File::create(&path)?)?;
///
/// let chain = load_chain(&path)?;
/// assert_eq!((chain.dim(), chain.steps()), (2, 3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_chain(path: &Path) -> Result<Chain, Box<dyn Error>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path),
        Some("parquet") => load_parquet(path),
        _ => npy::load_npy(path),
    }
}

#[cfg(feature = "csv")]
fn load_csv(path: &Path) -> Result<Chain, Box<dyn Error>> {
    csv::load_csv(path)
}

#[cfg(not(feature = "csv"))]
fn load_csv(_path: &Path) -> Result<Chain, Box<dyn Error>> {
    Err("CSV support not enabled; rebuild with the `csv` feature.".into())
}

#[cfg(feature = "parquet")]
fn load_parquet(path: &Path) -> Result<Chain, Box<dyn Error>> {
    parquet::load_parquet(path)
}

#[cfg(not(feature = "parquet"))]
fn load_parquet(_path: &Path) -> Result<Chain, Box<dyn Error>> {
    Err("Parquet support not enabled; rebuild with the `parquet` feature.".into())
}
