//! Grid preparation for transposed convolution
//!
//! A transposed convolution can be computed as an ordinary stride-1, valid
//! convolution (with the kernel flipped 180 degrees) over a prepared grid:
//!
//! 1. insert the forward strides as interior gaps,
//! 2. work out the padding the forward convolution applied,
//! 3. surround the gapped signal with the complementary padding.
//!
//! Per axis, with signal extent `n`, filter `F`, stride `S` and declared
//! forward input `I`:
//!
//! ```text
//! L     = (n - 1) * S + 1                  gapped extent
//! lead  = F - 1 - before                   before = forward SAME padding, or 0 for VALID
//! total = I + F - 1           (SAME)       sweep yields I
//!       = L + 2 * (F - 1)     (VALID)      sweep yields (n - 1) * S + F
//! ```
//!
//! The trailing side gets whatever remains. If the signal is longer than the
//! forward output it describes, the excess trailing entries are dropped.

use scirs2_core::numeric::Float;

use crate::error::{contract_violation, GridError, Result};
use crate::geometry::same_padding_1d;
use crate::indexing::{window, Window};
use crate::stride::{insert_stride_gaps, strided_len};
use crate::types::{grid_shape, ConvPadding, Grid, PaddingSpec, Size2, Stride2};

/// Description of the forward convolution being transposed.
///
/// # Examples
///
/// ```
/// use padgrid_core::{ConvPadding, Size2, Stride2, TransposedConv};
///
/// let spec = TransposedConv::new(Size2::square(3), Stride2::uniform(2), ConvPadding::Same, Size2::square(8));
/// assert_eq!(spec.output_size(Size2::square(4)), Size2::square(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransposedConv {
    /// Kernel extent of the forward convolution
    pub filter: Size2,
    /// Forward strides; they become interior gaps in the prepared grid
    pub strides: Stride2,
    /// Forward padding convention
    pub padding: ConvPadding,
    /// Declared input extent of the forward convolution
    pub input: Size2,
}

/// Placement of the gapped signal inside the prepared grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransposedLayout {
    /// Zero rows/columns in front of the gapped signal
    pub lead: Size2,
    /// Extent of the prepared grid
    pub extent: Size2,
}

impl TransposedConv {
    pub fn new(filter: Size2, strides: Stride2, padding: ConvPadding, input: Size2) -> Self {
        Self {
            filter,
            strides,
            padding,
            input,
        }
    }

    /// Check that the strides are positive and the filter is non-empty.
    pub fn validate(&self) -> Result<()> {
        self.strides.validate("transposed_conv")?;
        if self.filter.rows == 0 || self.filter.cols == 0 {
            return Err(GridError::EmptyFilter {
                operation: "transposed_conv",
                rows: self.filter.rows,
                cols: self.filter.cols,
            });
        }
        Ok(())
    }

    /// Layout of the prepared grid for a signal of extent `signal`.
    ///
    /// Panics on a zero stride or an empty filter.
    #[track_caller]
    pub fn layout(&self, signal: Size2) -> TransposedLayout {
        if let Err(err) = self.validate() {
            contract_violation(err);
        }
        let (lead_rows, rows) = self.axis(
            signal.rows,
            self.filter.rows,
            self.strides.rows,
            self.input.rows,
        );
        let (lead_cols, cols) = self.axis(
            signal.cols,
            self.filter.cols,
            self.strides.cols,
            self.input.cols,
        );
        TransposedLayout {
            lead: Size2::new(lead_rows, lead_cols),
            extent: Size2::new(rows, cols),
        }
    }

    /// Zero rows/columns placed around the gapped signal.
    ///
    /// The trailing side saturates at zero; a negative trail means the signal
    /// overhangs and its excess entries are dropped instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use padgrid_core::{ConvPadding, PaddingSpec, Size2, Stride2, TransposedConv};
    ///
    /// let spec = TransposedConv::new(Size2::square(3), Stride2::uniform(2), ConvPadding::Same, Size2::square(4));
    /// // gapped extent 3, lead 2, total 6
    /// assert_eq!(spec.padding(Size2::square(2)), PaddingSpec::new(2, 1, 2, 1));
    /// ```
    #[track_caller]
    pub fn padding(&self, signal: Size2) -> PaddingSpec {
        let layout = self.layout(signal);
        let gapped = Size2::new(
            strided_len(signal.rows, self.strides.rows),
            strided_len(signal.cols, self.strides.cols),
        );
        PaddingSpec::new(
            layout.lead.rows,
            layout.extent.rows.saturating_sub(gapped.rows + layout.lead.rows),
            layout.lead.cols,
            layout.extent.cols.saturating_sub(gapped.cols + layout.lead.cols),
        )
    }

    /// Extent produced by a stride-1 valid sweep over the prepared grid.
    #[track_caller]
    pub fn output_size(&self, signal: Size2) -> Size2 {
        let extent = self.layout(signal).extent;
        Size2::new(
            (extent.rows + 1).saturating_sub(self.filter.rows),
            (extent.cols + 1).saturating_sub(self.filter.cols),
        )
    }

    fn axis(&self, n: usize, filter: usize, stride: usize, input: usize) -> (usize, usize) {
        let gapped = strided_len(n, stride);
        match self.padding {
            ConvPadding::Valid => (filter - 1, gapped + 2 * (filter - 1)),
            ConvPadding::Same => {
                let (before, _) = same_padding_1d(input, filter, stride);
                ((filter - 1).saturating_sub(before), input + filter - 1)
            }
        }
    }
}

/// Build the grid a stride-1 valid convolution must sweep to realize the
/// transposed convolution described by `spec`.
///
/// An empty signal yields an empty grid.
///
/// # Examples
///
/// ```
/// use padgrid_core::{prepare_for_transposed_conv, ConvPadding, Size2, Stride2, TransposedConv};
///
/// let signal = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// let spec = TransposedConv::new(Size2::square(3), Stride2::uniform(2), ConvPadding::Same, Size2::square(4));
/// let prepared = prepare_for_transposed_conv(&signal, &spec);
///
/// // lead = 3 - 1 - 0, extent = 4 + 3 - 1
/// assert_eq!(prepared.len(), 6);
/// assert_eq!(prepared[2], vec![0.0, 0.0, 1.0, 0.0, 2.0, 0.0]);
/// assert_eq!(prepared[4], vec![0.0, 0.0, 3.0, 0.0, 4.0, 0.0]);
/// ```
#[track_caller]
pub fn prepare_for_transposed_conv<T: Float>(signal: &[Vec<T>], spec: &TransposedConv) -> Grid<T> {
    let (rows, cols) = grid_shape(signal);
    if rows == 0 {
        return Vec::new();
    }

    let layout = spec.layout(Size2::new(rows, cols));
    tracing::debug!(
        signal = ?(rows, cols),
        filter = ?spec.filter,
        strides = ?spec.strides,
        padding = ?spec.padding,
        input = ?spec.input,
        lead = ?layout.lead,
        extent = ?layout.extent,
        "preparing transposed convolution grid"
    );

    let gapped = insert_stride_gaps(signal, spec.strides);
    let view = Window::from_origin(
        (-(layout.lead.rows as isize), -(layout.lead.cols as isize)),
        layout.extent,
    );
    window(&gapped, &view, T::zero())
}
