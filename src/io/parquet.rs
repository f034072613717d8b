/*!
# Parquet chain loading

Reads the chain/sample/`dim_k` column layout that MCMC runners write into a
chain. Enable via the `parquet` feature.

Rows pool across chains in file order; each `dim_k` column becomes one
parameter of the loaded chain.
*/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use arrow::array::Float64Array;
use ndarray::prelude::*;
use parquet::arrow::arrow_reader::ParquetRecordBatchReader;

use crate::chain::Chain;

/// Reads every record batch in `path`, collecting the `dim_*` columns.
pub fn load_parquet(path: &Path) -> Result<Chain, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReader::try_new(file, 1024)?;

    let mut dim_indices: Vec<usize> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch in reader {
        let batch = batch?;
        if dim_indices.is_empty() {
            for (idx, field) in batch.schema().fields().iter().enumerate() {
                if field.name().starts_with("dim_") {
                    dim_indices.push(idx);
                }
            }
            if dim_indices.is_empty() {
                return Err("Expected at least one dim_* column in the Parquet file.".into());
            }
            columns = vec![Vec::new(); dim_indices.len()];
        }
        for (param, &col_idx) in dim_indices.iter().enumerate() {
            let values = batch
                .column(col_idx)
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or("Expected dim_* columns to hold 64-bit floats.")?;
            columns[param].extend(values.iter().flatten());
        }
    }

    let dim = columns.len();
    let steps = columns.first().map_or(0, Vec::len);
    let flat: Vec<f64> = columns.into_iter().flatten().collect();
    let samples = Array2::from_shape_vec((dim, steps), flat)?;
    Ok(Chain::from_matrix(samples)?)
}
