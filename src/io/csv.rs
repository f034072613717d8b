/*!
# CSV chain loading

Reads a headerless numeric CSV into a chain. Enable via the `csv` feature.

Each record holds one parameter's sample row, matching the `dim × steps`
layout of the array formats. A file with a single field per record is
treated as one parameter's samples written column-wise.
*/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::prelude::*;

use crate::chain::Chain;

/// Parses `path` as headerless numeric CSV. Records of unequal length or
/// non-numeric fields are rejected.
pub fn load_csv(path: &Path) -> Result<Chain, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(File::open(path)?);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    // One field per record: a single parameter written column-wise.
    if n_cols == 1 {
        let flat = Array1::from_iter(rows.into_iter().map(|row| row[0]));
        return Ok(Chain::from_flat(flat)?);
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let samples = Array2::from_shape_vec((n_rows, n_cols), flat)?;
    Ok(Chain::from_matrix(samples)?)
}
