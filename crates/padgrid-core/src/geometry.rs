//! Padding geometry for sliding-window operations
//!
//! Pure arithmetic: given an input extent, a filter extent, and a stride,
//! work out how many zero rows and columns a convolution needs on each side.
//!
//! # SAME padding
//!
//! For each axis:
//!
//! ```text
//! out    = ceil(input / stride)
//! total  = max((out - 1) * stride + filter - input, 0)
//! before = floor(total / 2)
//! after  = total - before
//! ```
//!
//! A stride-`stride` valid sweep over the padded extent then produces exactly
//! `out` positions. Odd totals put the extra unit on the trailing side.

use crate::error::contract_violation;
use crate::types::{ConvPadding, PaddingSpec, Size2, Stride2};

/// Split SAME padding for a single axis into (before, after).
///
/// `stride` must already be validated as positive.
pub(crate) fn same_padding_1d(input: usize, filter: usize, stride: usize) -> (usize, usize) {
    let out = input.div_ceil(stride);
    let covered = out.saturating_sub(1) * stride + filter;
    let total = covered.saturating_sub(input);
    let before = total / 2;
    (before, total - before)
}

/// Compute SAME padding for a 2D input.
///
/// # Examples
///
/// ```
/// use padgrid_core::{compute_padding, PaddingSpec, Size2, Stride2};
///
/// let spec = compute_padding(Size2::square(4), Size2::square(3), Stride2::uniform(1));
/// assert_eq!(spec, PaddingSpec::uniform(1));
///
/// // Odd totals place the extra row/column at the bottom/right.
/// let spec = compute_padding(Size2::square(4), Size2::square(2), Stride2::uniform(1));
/// assert_eq!(spec, PaddingSpec::new(0, 1, 0, 1));
/// ```
#[track_caller]
pub fn compute_padding(input: Size2, filter: Size2, stride: Stride2) -> PaddingSpec {
    if let Err(err) = stride.validate("compute_padding") {
        contract_violation(err);
    }

    let (top, bottom) = same_padding_1d(input.rows, filter.rows, stride.rows);
    let (left, right) = same_padding_1d(input.cols, filter.cols, stride.cols);
    let spec = PaddingSpec::new(top, bottom, left, right);

    tracing::debug!(
        input = ?input,
        filter = ?filter,
        stride = ?stride,
        padding = ?spec,
        "computed same padding"
    );
    spec
}

/// Padding required by a convolution with the given mode.
///
/// `Valid` never pads; `Same` defers to [`compute_padding`].
#[track_caller]
pub fn padding_for_mode(
    mode: ConvPadding,
    input: Size2,
    filter: Size2,
    stride: Stride2,
) -> PaddingSpec {
    match mode {
        ConvPadding::Valid => PaddingSpec::zero(),
        ConvPadding::Same => compute_padding(input, filter, stride),
    }
}

/// Number of window positions of a valid sweep along one axis.
///
/// Returns 0 when the filter does not fit inside the padded extent. `stride`
/// must already be validated as positive.
pub(crate) fn window_count_1d(padded: usize, filter: usize, stride: usize) -> usize {
    if filter == 0 || filter > padded {
        return 0;
    }
    (padded - filter) / stride + 1
}

/// Output extent of a convolution over `input` after applying `spec`.
///
/// Panics on a zero stride.
///
/// # Examples
///
/// ```
/// use padgrid_core::{compute_padding, conv_output_size, Size2, Stride2};
///
/// let input = Size2::new(7, 5);
/// let filter = Size2::square(3);
/// let stride = Stride2::uniform(2);
/// let spec = compute_padding(input, filter, stride);
/// assert_eq!(conv_output_size(input, filter, stride, spec), Size2::new(4, 3));
/// ```
#[track_caller]
pub fn conv_output_size(input: Size2, filter: Size2, stride: Stride2, spec: PaddingSpec) -> Size2 {
    if let Err(err) = stride.validate("conv_output_size") {
        contract_violation(err);
    }
    Size2::new(
        window_count_1d(input.rows + spec.vertical(), filter.rows, stride.rows),
        window_count_1d(input.cols + spec.horizontal(), filter.cols, stride.cols),
    )
}
