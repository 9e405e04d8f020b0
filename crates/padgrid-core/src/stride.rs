//! Stride insertion: interior zero gaps between grid elements
//!
//! A forward convolution with stride `s` reads every `s`-th position. Its
//! transpose scatters back onto a grid where consecutive elements sit `s`
//! apart, which is what [`insert_stride_gaps`] builds. Gaps are only ever
//! interior: nothing is added before the first or after the last row/column.

use scirs2_core::numeric::Float;

use crate::error::contract_violation;
use crate::padding::{apply_unit_border, shrink};
use crate::types::{grid_shape, Grid, Stride2};

/// Extent of a stride-inserted axis: `(n - 1) * stride + 1`, or 0 when `n == 0`.
pub fn strided_len(n: usize, stride: usize) -> usize {
    if n == 0 {
        0
    } else {
        (n - 1) * stride + 1
    }
}

/// Insert `stride - 1` zero rows/columns between neighbouring elements.
///
/// Element `(i, j)` of the input lands on `(i * strides.rows, j * strides.cols)`.
/// A stride of 1 leaves that axis unchanged. Panics on a zero stride.
///
/// # Examples
///
/// ```
/// use padgrid_core::{insert_stride_gaps, Stride2};
///
/// let grid = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// let gapped = insert_stride_gaps(&grid, Stride2::uniform(2));
/// assert_eq!(
///     gapped,
///     vec![
///         vec![1.0, 0.0, 2.0],
///         vec![0.0, 0.0, 0.0],
///         vec![3.0, 0.0, 4.0],
///     ]
/// );
/// ```
#[track_caller]
pub fn insert_stride_gaps<T: Float>(grid: &[Vec<T>], strides: Stride2) -> Grid<T> {
    if let Err(err) = strides.validate("insert_stride_gaps") {
        contract_violation(err);
    }
    if grid.is_empty() {
        return Vec::new();
    }

    let (rows, cols) = grid_shape(grid);
    let out_rows = strided_len(rows, strides.rows);
    let out_cols = strided_len(cols, strides.cols);

    let mut result = vec![vec![T::zero(); out_cols]; out_rows];
    for (i, row) in grid.iter().enumerate() {
        let target = &mut result[i * strides.rows];
        for (j, &value) in row.iter().enumerate() {
            target[j * strides.cols] = value;
        }
    }

    tracing::trace!(
        from = ?(rows, cols),
        to = ?(out_rows, out_cols),
        strides = ?strides,
        "inserted stride gaps"
    );
    result
}

/// Insert stride gaps, then trim `shrink_by` rows/columns from every edge.
///
/// # Examples
///
/// ```
/// use padgrid_core::{stride_pad_shrink, Stride2};
///
/// let grid = vec![vec![1.0_f64, 2.0, 3.0]; 3];
/// let out = stride_pad_shrink(&grid, Stride2::uniform(2), 1);
/// // 5x5 after gap insertion, 3x3 after trimming
/// assert_eq!(out.len(), 3);
/// assert_eq!(out[0], vec![0.0, 0.0, 0.0]);
/// assert_eq!(out[1], vec![0.0, 2.0, 0.0]);
/// ```
#[track_caller]
pub fn stride_pad_shrink<T: Float>(grid: &[Vec<T>], strides: Stride2, shrink_by: usize) -> Grid<T> {
    shrink(&insert_stride_gaps(grid, strides), shrink_by)
}

/// Insert stride gaps, then add `rounds` unit borders of zeros.
#[track_caller]
pub fn stride_pad_padded<T: Float>(grid: &[Vec<T>], strides: Stride2, rounds: usize) -> Grid<T> {
    let mut result = insert_stride_gaps(grid, strides);
    for _ in 0..rounds {
        result = apply_unit_border(&result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(rows: usize, cols: usize) -> Grid<f32> {
        (0..rows)
            .map(|r| (0..cols).map(|c| (r * cols + c + 1) as f32).collect())
            .collect()
    }

    #[test]
    fn test_insert_stride_gaps_placement() {
        let grid = iota(3, 4);
        let s = 3;
        let out = insert_stride_gaps(&grid, Stride2::uniform(s));
        assert_eq!(grid_shape(&out), (7, 10));

        for (r, row) in out.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if r % s == 0 && c % s == 0 {
                    assert_eq!(v, grid[r / s][c / s]);
                } else {
                    assert_eq!(v, 0.0, "expected gap at ({}, {})", r, c);
                }
            }
        }
    }

    #[test]
    fn test_unit_stride_is_identity() {
        let grid = iota(2, 5);
        assert_eq!(insert_stride_gaps(&grid, Stride2::uniform(1)), grid);
    }

    #[test]
    fn test_per_axis_strides() {
        let grid = iota(2, 2);
        let out = insert_stride_gaps(&grid, Stride2::new(1, 3));
        assert_eq!(
            out,
            vec![vec![1.0, 0.0, 0.0, 2.0], vec![3.0, 0.0, 0.0, 4.0]]
        );
    }

    #[test]
    fn test_single_element_gets_no_gaps() {
        let grid = vec![vec![9.0_f32]];
        assert_eq!(insert_stride_gaps(&grid, Stride2::uniform(4)), grid);
    }

    #[test]
    fn test_empty_grid() {
        let grid: Grid<f32> = Vec::new();
        assert!(insert_stride_gaps(&grid, Stride2::uniform(2)).is_empty());
    }

    #[test]
    fn test_stride_pad_padded() {
        let grid = iota(2, 2);
        let out = stride_pad_padded(&grid, Stride2::uniform(2), 2);
        assert_eq!(grid_shape(&out), (7, 7));
        assert_eq!(out[2][2], 1.0);
        assert_eq!(out[2][4], 2.0);
        assert_eq!(out[4][2], 3.0);
        assert_eq!(out[4][4], 4.0);
        assert_eq!(out[3][3], 0.0);
        assert!(out[0].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_stride_pad_shrink_zero_is_plain_insertion() {
        let grid = iota(3, 2);
        let s = Stride2::new(2, 3);
        assert_eq!(stride_pad_shrink(&grid, s, 0), insert_stride_gaps(&grid, s));
    }

    #[test]
    fn test_stride_pad_shrink_saturates() {
        let grid = iota(2, 2);
        assert!(stride_pad_shrink(&grid, Stride2::uniform(2), usize::MAX / 2 + 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "stride must be positive")]
    fn test_zero_stride_panics() {
        insert_stride_gaps(&iota(2, 2), Stride2::new(0, 1));
    }
}
