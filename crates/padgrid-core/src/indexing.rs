//! Bounds-checked element access with virtual padding and dilation
//!
//! A convolution sweep reads receptive-field windows that may hang over the
//! edge of the signal, or that skip elements because the kernel is dilated.
//! Rather than materializing a padded or dilated copy per window, these
//! functions read straight from the original sequence and substitute a
//! caller-supplied default wherever the logical position has no real element.
//!
//! Out-of-range indices are a normal case here and never panic. A range whose
//! start lies after its end is a caller bug and does.
//!
//! # Layout of a dilated, padded gather
//!
//! For a range of `n` indices, `pad` and `gap`:
//!
//! ```text
//! [pad x default] e0 [gap x default] e1 [gap x default] ... e(n-1) [pad x default]
//! ```
//!
//! Padding sits strictly outside the real+dilated span and dilation entries sit
//! strictly between two real elements. An empty range yields `2 * pad` defaults.

use std::iter;
use std::ops::Range;

use crate::error::{contract_violation, GridError};
use crate::types::Size2;

fn get<T>(seq: &[T], index: isize) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| seq.get(i))
}

#[track_caller]
fn check_range(operation: &'static str, range: &Range<isize>) {
    if range.start > range.end {
        contract_violation(GridError::invalid_range(operation, range.start, range.end));
    }
}

/// Logical positions visited by a dilated, padded gather. `None` marks a
/// padding or dilation slot.
fn positions(range: Range<isize>, pad: usize, gap: usize) -> impl Iterator<Item = Option<isize>> {
    let body = range.enumerate().flat_map(move |(k, i)| {
        let gaps = if k == 0 { 0 } else { gap };
        iter::repeat(None).take(gaps).chain(iter::once(Some(i)))
    });
    iter::repeat(None)
        .take(pad)
        .chain(body)
        .chain(iter::repeat(None).take(pad))
}

/// Number of entries a dilated, padded gather over `n` indices produces.
pub fn gathered_len(n: usize, pad: usize, gap: usize) -> usize {
    let span = if n == 0 { 0 } else { n + (n - 1) * gap };
    span + 2 * pad
}

/// Element at `index`, or `default` when the index falls outside `seq`.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::at;
///
/// let seq = [1.0_f32, 2.0, 3.0];
/// assert_eq!(at(&seq, 1, 0.0), 2.0);
/// assert_eq!(at(&seq, -1, 0.0), 0.0);
/// assert_eq!(at(&seq, 3, 0.0), 0.0);
/// ```
pub fn at<T: Clone>(seq: &[T], index: isize, default: T) -> T {
    get(seq, index).cloned().unwrap_or(default)
}

/// Map [`at`] over an explicit list of indices.
pub fn gather<T: Clone>(seq: &[T], indices: &[isize], default: T) -> Vec<T> {
    indices
        .iter()
        .map(|&i| at(seq, i, default.clone()))
        .collect()
}

/// Gather a contiguous index range, substituting `default` outside `seq`.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::gather_range;
///
/// let seq = [1.0_f64, 2.0, 3.0];
/// assert_eq!(gather_range(&seq, -1..2, 0.0), vec![0.0, 1.0, 2.0]);
/// ```
#[track_caller]
pub fn gather_range<T: Clone>(seq: &[T], range: Range<isize>, default: T) -> Vec<T> {
    check_range("gather_range", &range);
    collect(seq, positions(range, 0, 0), default)
}

/// Gather a range with `gap` defaults between consecutive elements.
///
/// Emulates the receptive field of a kernel dilated by `gap + 1`.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::gather_range_dilated;
///
/// let seq = [1.0_f32, 2.0, 3.0];
/// assert_eq!(
///     gather_range_dilated(&seq, 0..3, 1, 0.0),
///     vec![1.0, 0.0, 2.0, 0.0, 3.0]
/// );
/// ```
#[track_caller]
pub fn gather_range_dilated<T: Clone>(
    seq: &[T],
    range: Range<isize>,
    gap: usize,
    default: T,
) -> Vec<T> {
    check_range("gather_range_dilated", &range);
    collect(seq, positions(range, 0, gap), default)
}

/// Gather a range with `pad` defaults on each side and `gap` defaults
/// between consecutive elements, in one traversal.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::gather_range_dilated_padded;
///
/// let seq = [1.0_f32, 2.0];
/// assert_eq!(
///     gather_range_dilated_padded(&seq, 0..2, 1, 2, 0.0),
///     vec![0.0, 1.0, 0.0, 0.0, 2.0, 0.0]
/// );
/// ```
#[track_caller]
pub fn gather_range_dilated_padded<T: Clone>(
    seq: &[T],
    range: Range<isize>,
    pad: usize,
    gap: usize,
    default: T,
) -> Vec<T> {
    check_range("gather_range_dilated_padded", &range);
    collect(seq, positions(range, pad, gap), default)
}

fn collect<T: Clone>(
    seq: &[T],
    positions: impl Iterator<Item = Option<isize>>,
    default: T,
) -> Vec<T> {
    positions
        .map(|p| match p.and_then(|i| get(seq, i)) {
            Some(v) => v.clone(),
            None => default.clone(),
        })
        .collect()
}

/// Rectangular region of a grid addressed by half-open row and column ranges.
///
/// Coordinates may be negative or extend past the grid; those cells read as
/// the default value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub rows: Range<isize>,
    pub cols: Range<isize>,
}

impl Window {
    /// Window between a `(row, col)` start corner (inclusive) and end corner
    /// (exclusive).
    pub fn new(start: (isize, isize), end: (isize, isize)) -> Self {
        Self {
            rows: start.0..end.0,
            cols: start.1..end.1,
        }
    }

    /// Window of `size` whose top-left corner is `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// use padgrid_core::{indexing::Window, Size2};
    ///
    /// let w = Window::from_origin((-1, 2), Size2::new(3, 2));
    /// assert_eq!(w, Window::new((-1, 2), (2, 4)));
    /// ```
    pub fn from_origin(origin: (isize, isize), size: Size2) -> Self {
        Self {
            rows: origin.0..origin.0 + size.rows as isize,
            cols: origin.1..origin.1 + size.cols as isize,
        }
    }
}

/// Visit every selected row of a window, handing each one to `emit` as a
/// slice (empty for virtual rows).
#[track_caller]
fn for_each_row<'a, T: Clone + 'a>(
    operation: &'static str,
    grid: &'a [Vec<T>],
    window: &Window,
    pad: usize,
    gap: usize,
    mut emit: impl FnMut(&'a [T]),
) {
    check_range(operation, &window.rows);
    check_range(operation, &window.cols);
    for p in positions(window.rows.clone(), pad, gap) {
        let row = p.and_then(|i| get(grid, i)).map_or(&[][..], Vec::as_slice);
        emit(row);
    }
}

#[track_caller]
fn window_rows<T: Clone>(
    operation: &'static str,
    grid: &[Vec<T>],
    window: &Window,
    pad: usize,
    gap: usize,
    default: T,
) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(gathered_len(window.rows.len(), pad, gap));
    for_each_row(operation, grid, window, pad, gap, |row| {
        out.push(collect(
            row,
            positions(window.cols.clone(), pad, gap),
            default.clone(),
        ));
    });
    out
}

#[track_caller]
fn window_flattened<T: Clone>(
    operation: &'static str,
    grid: &[Vec<T>],
    window: &Window,
    pad: usize,
    gap: usize,
    default: T,
) -> Vec<T> {
    let rows = gathered_len(window.rows.len(), pad, gap);
    let cols = gathered_len(window.cols.len(), pad, gap);
    let mut out = Vec::with_capacity(rows * cols);
    for_each_row(operation, grid, window, pad, gap, |row| {
        out.extend(
            positions(window.cols.clone(), pad, gap)
                .map(|p| p.and_then(|i| get(row, i)).cloned())
                .map(|v| v.unwrap_or_else(|| default.clone())),
        );
    });
    out
}

/// Read a window from `grid`, filling out-of-range cells with `default`.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::{window, Window};
///
/// let grid = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// let w = window(&grid, &Window::new((-1, -1), (1, 1)), 0.0);
/// assert_eq!(w, vec![vec![0.0, 0.0], vec![0.0, 1.0]]);
/// ```
#[track_caller]
pub fn window<T: Clone>(grid: &[Vec<T>], window: &Window, default: T) -> Vec<Vec<T>> {
    window_rows("window", grid, window, 0, 0, default)
}

/// [`window`] concatenated row by row into one sequence.
#[track_caller]
pub fn window_flat<T: Clone>(grid: &[Vec<T>], window: &Window, default: T) -> Vec<T> {
    window_flattened("window_flat", grid, window, 0, 0, default)
}

/// Read a window with `gap` default rows and columns between neighbouring entries.
#[track_caller]
pub fn window_dilated<T: Clone>(
    grid: &[Vec<T>],
    window: &Window,
    gap: usize,
    default: T,
) -> Vec<Vec<T>> {
    window_rows("window_dilated", grid, window, 0, gap, default)
}

/// [`window_dilated`] concatenated row by row.
#[track_caller]
pub fn window_dilated_flat<T: Clone>(
    grid: &[Vec<T>],
    window: &Window,
    gap: usize,
    default: T,
) -> Vec<T> {
    window_flattened("window_dilated_flat", grid, window, 0, gap, default)
}

/// Read a dilated window surrounded by `pad` virtual default rows and columns.
///
/// # Examples
///
/// ```
/// use padgrid_core::indexing::{window_dilated_padded, Window};
///
/// let grid = vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]];
/// let w = window_dilated_padded(&grid, &Window::new((0, 0), (2, 2)), 1, 1, 0.0);
/// assert_eq!(
///     w,
///     vec![
///         vec![0.0, 0.0, 0.0, 0.0, 0.0],
///         vec![0.0, 1.0, 0.0, 2.0, 0.0],
///         vec![0.0, 0.0, 0.0, 0.0, 0.0],
///         vec![0.0, 3.0, 0.0, 4.0, 0.0],
///         vec![0.0, 0.0, 0.0, 0.0, 0.0],
///     ]
/// );
/// ```
#[track_caller]
pub fn window_dilated_padded<T: Clone>(
    grid: &[Vec<T>],
    window: &Window,
    pad: usize,
    gap: usize,
    default: T,
) -> Vec<Vec<T>> {
    window_rows("window_dilated_padded", grid, window, pad, gap, default)
}

/// [`window_dilated_padded`] concatenated row by row.
#[track_caller]
pub fn window_dilated_padded_flat<T: Clone>(
    grid: &[Vec<T>],
    window: &Window,
    pad: usize,
    gap: usize,
    default: T,
) -> Vec<T> {
    window_flattened("window_dilated_padded_flat", grid, window, pad, gap, default)
}
