//! Grid reordering: 180-degree flips and flattening

use crate::types::{Grid, Volume};

/// Reverse a grid along both axes: `out[i][j] = grid[rows-1-i][cols-1-j]`.
///
/// Converts a correlation kernel into a convolution kernel and back; applying
/// it twice returns the original grid.
///
/// # Examples
///
/// ```
/// use padgrid_core::flip180;
///
/// let k = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// assert_eq!(flip180(&k), vec![vec![4.0, 3.0], vec![2.0, 1.0]]);
/// ```
pub fn flip180<T: Clone>(grid: &[Vec<T>]) -> Grid<T> {
    grid.iter()
        .rev()
        .map(|row| row.iter().rev().cloned().collect())
        .collect()
}

/// [`flip180`] applied to every depth slice of a kernel stack.
pub fn flip180_volume<T: Clone>(volume: &[Vec<Vec<T>>]) -> Volume<T> {
    volume.iter().map(|grid| flip180(grid)).collect()
}

/// Concatenate the rows of a grid into one row-major sequence.
pub fn flatten<T: Clone>(grid: &[Vec<T>]) -> Vec<T> {
    grid.concat()
}
