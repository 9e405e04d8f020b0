//! Materialized zero padding around 2D grids
//!
//! These operators allocate a new grid. When a sweep only needs to read a few
//! windows, the virtual padding in [`crate::indexing`] avoids the copy.

use scirs2_core::numeric::Float;

use crate::geometry::compute_padding;
use crate::types::{grid_shape, Grid, PaddingSpec, Size2, Stride2};

/// Surround a grid with zeros according to `spec`.
///
/// The result has shape `(rows + top + bottom, cols + left + right)` and the
/// original content starts at `(top, left)`. An empty grid is returned empty.
///
/// # Complexity
///
/// O(rows * cols) time and allocation
///
/// # Examples
///
/// ```
/// use padgrid_core::{apply_padding, PaddingSpec};
///
/// let grid = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// let padded = apply_padding(&grid, PaddingSpec::new(1, 0, 0, 2));
/// assert_eq!(
///     padded,
///     vec![
///         vec![0.0, 0.0, 0.0, 0.0],
///         vec![1.0, 2.0, 0.0, 0.0],
///         vec![3.0, 4.0, 0.0, 0.0],
///     ]
/// );
/// ```
pub fn apply_padding<T: Float>(grid: &[Vec<T>], spec: PaddingSpec) -> Grid<T> {
    if grid.is_empty() {
        return Vec::new();
    }

    let (rows, cols) = grid_shape(grid);
    let width = cols + spec.horizontal();
    let mut result = Vec::with_capacity(rows + spec.vertical());

    result.extend((0..spec.top).map(|_| vec![T::zero(); width]));
    for row in grid {
        let mut padded = Vec::with_capacity(width);
        padded.resize(spec.left, T::zero());
        padded.extend_from_slice(row);
        padded.resize(padded.len() + spec.right, T::zero());
        result.push(padded);
    }
    result.extend((0..spec.bottom).map(|_| vec![T::zero(); width]));

    tracing::trace!(
        from = ?(rows, cols),
        to = ?grid_shape(&result),
        "applied padding"
    );
    result
}

/// Surround a grid with a single ring of zeros.
pub fn apply_unit_border<T: Float>(grid: &[Vec<T>]) -> Grid<T> {
    apply_padding(grid, PaddingSpec::uniform(1))
}

/// Apply SAME padding computed from the grid's own shape.
///
/// # Examples
///
/// ```
/// use padgrid_core::{same_pad, Size2, Stride2};
///
/// let grid = vec![vec![1.0_f64; 4]; 4];
/// let padded = same_pad(&grid, Size2::square(3), Stride2::uniform(1));
/// assert_eq!(padded.len(), 6);
/// assert_eq!(padded[0].len(), 6);
/// ```
#[track_caller]
pub fn same_pad<T: Float>(grid: &[Vec<T>], filter: Size2, stride: Stride2) -> Grid<T> {
    if grid.is_empty() {
        return Vec::new();
    }
    let (rows, cols) = grid_shape(grid);
    let spec = compute_padding(Size2::new(rows, cols), filter, stride);
    apply_padding(grid, spec)
}

/// Trim `n` rows and columns from every edge.
///
/// Trimming more than a dimension holds leaves that dimension empty.
///
/// # Examples
///
/// ```
/// use padgrid_core::shrink;
///
/// let grid = vec![
///     vec![0.0_f32, 0.0, 0.0],
///     vec![0.0, 5.0, 0.0],
///     vec![0.0, 0.0, 0.0],
/// ];
/// assert_eq!(shrink(&grid, 1), vec![vec![5.0]]);
/// ```
pub fn shrink<T: Clone>(grid: &[Vec<T>], n: usize) -> Grid<T> {
    if n == 0 {
        return grid.to_vec();
    }

    let rows = grid.len();
    if n >= rows.div_ceil(2) {
        return Vec::new();
    }

    grid[n..rows - n]
        .iter()
        .map(|row| {
            let cols = row.len();
            if n >= cols.div_ceil(2) {
                Vec::new()
            } else {
                row[n..cols - n].to_vec()
            }
        })
        .collect()
}
