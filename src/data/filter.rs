use log::info;

use super::model::Dataset;
use crate::error::EdaError;

/// Drop every row holding a null in any of `columns`.
///
/// Returns the number of rows removed. Surviving rows keep their order.
/// Naming a column the dataset lacks is an error and leaves it untouched.
pub fn drop_missing(dataset: &mut Dataset, columns: &[&str]) -> Result<usize, EdaError> {
    let indices = columns
        .iter()
        .map(|col| dataset.column_index(col))
        .collect::<Result<Vec<_>, _>>()?;

    let before = dataset.len();
    dataset
        .rows
        .retain(|row| indices.iter().all(|&i| !row[i].is_null()));
    let dropped = before - dataset.len();

    info!("dropped {dropped} of {before} rows with missing categorical values");
    Ok(dropped)
}
