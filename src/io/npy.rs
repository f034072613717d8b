//! NPY chain loading, the default on-disk format for chain arrays.

use std::error::Error;
use std::fs;
use std::path::Path;

use ndarray::prelude::*;
use ndarray_npy::ReadNpyExt;
use num_traits::ToPrimitive;

use crate::chain::Chain;

/// Reads a 1-D or 2-D NPY array into a chain.
///
/// Accepts `f64`, `f32`, `i64` and `i32` element types; everything but
/// `f64` is widened. The file is read once and each candidate layout parses
/// from the in-memory bytes.
pub fn load_npy(path: &Path) -> Result<Chain, Box<dyn Error>> {
    let bytes = fs::read(path)?;

    if let Ok(arr) = Array2::<f64>::read_npy(&bytes[..]) {
        return Ok(Chain::from_matrix(arr)?);
    }
    if let Ok(arr) = Array1::<f64>::read_npy(&bytes[..]) {
        return Ok(Chain::from_flat(arr)?);
    }
    if let Ok(arr) = Array2::<f32>::read_npy(&bytes[..]) {
        return Ok(Chain::from_matrix(widen(arr))?);
    }
    if let Ok(arr) = Array1::<f32>::read_npy(&bytes[..]) {
        return Ok(Chain::from_flat(widen(arr))?);
    }
    if let Ok(arr) = Array2::<i64>::read_npy(&bytes[..]) {
        return Ok(Chain::from_matrix(widen(arr))?);
    }
    if let Ok(arr) = Array1::<i64>::read_npy(&bytes[..]) {
        return Ok(Chain::from_flat(widen(arr))?);
    }
    if let Ok(arr) = Array2::<i32>::read_npy(&bytes[..]) {
        return Ok(Chain::from_matrix(widen(arr))?);
    }
    if let Ok(arr) = Array1::<i32>::read_npy(&bytes[..]) {
        return Ok(Chain::from_flat(widen(arr))?);
    }

    Err(format!(
        "Could not interpret {} as a 1-D or 2-D numeric array.",
        path.display()
    )
    .into())
}

fn widen<T: ToPrimitive + Clone, D: Dimension>(arr: Array<T, D>) -> Array<f64, D> {
    arr.mapv(|v| v.to_f64().unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::WriteNpyExt;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp<A: ndarray_npy::WritableElement, D: Dimension>(
        arr: &Array<A, D>,
    ) -> NamedTempFile {
        let file = NamedTempFile::new().expect("Could not create temp file");
        arr.write_npy(file.as_file())
            .expect("Expected writing the NPY file to succeed.");
        file
    }

    #[test]
    fn test_load_npy_2d_f64() {
        let arr = Array2::from_shape_fn((3, 100), |(i, j)| i as f64 * 10.0 + j as f64);
        let file = write_temp(&arr);
        let chain = load_npy(file.path()).expect("Expected loading a 2-D f64 array to succeed.");
        assert_eq!((chain.dim(), chain.steps()), (3, 100));
        assert_eq!(chain.param(2)[99], 119.0);
    }

    #[test]
    fn test_load_npy_1d_f64() {
        let arr = arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let file = write_temp(&arr);
        let chain = load_npy(file.path()).expect("Expected loading a 1-D f64 array to succeed.");
        assert_eq!((chain.dim(), chain.steps()), (1, 5));
    }

    #[test]
    fn test_load_npy_widens_f32() {
        let arr = arr1(&[1.5_f32, 2.5, 3.5]);
        let file = write_temp(&arr);
        let chain = load_npy(file.path()).expect("Expected loading a 1-D f32 array to succeed.");
        assert_eq!((chain.dim(), chain.steps()), (1, 3));
        assert_eq!(chain.param(0)[1], 2.5);
    }

    #[test]
    fn test_load_npy_widens_i64() {
        let arr = arr2(&[[1_i64, 2], [3, 4]]);
        let file = write_temp(&arr);
        let chain = load_npy(file.path()).expect("Expected loading a 2-D i64 array to succeed.");
        assert_eq!((chain.dim(), chain.steps()), (2, 2));
        assert_eq!(chain.param(1)[0], 3.0);
    }

    #[test]
    fn test_load_npy_rejects_garbage() {
        let mut file = NamedTempFile::new().expect("Could not create temp file");
        file.write_all(b"definitely not an array")
            .expect("Expected writing the temp file to succeed.");
        assert!(
            load_npy(file.path()).is_err(),
            "Expected unparseable content to be rejected."
        );
    }

    #[test]
    fn test_load_npy_rejects_empty_array() {
        let arr = arr1::<f64>(&[]);
        let file = write_temp(&arr);
        assert!(
            load_npy(file.path()).is_err(),
            "Expected an empty array to be rejected."
        );
    }
}
