//! Error types for grid preparation
//!
//! Most operations in this crate treat a violated precondition as a caller
//! bug and panic. The panic message is always the `Display` of a [`GridError`],
//! and the `try_*` entry points return the same error as a value instead.
//!
//! # Examples
//!
//! ```
//! use padgrid_core::{try_add, GridError};
//!
//! let a = vec![vec![1.0_f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
//! let b = vec![vec![1.0_f64, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
//!
//! match try_add(&a, &b) {
//!     Err(GridError::ShapeMismatch { lhs, rhs, .. }) => {
//!         assert_eq!(lhs, vec![2, 3]);
//!         assert_eq!(rhs, vec![3, 2]);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Errors raised by grid preparation and arithmetic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Operands of an elementwise operation have different shapes
    #[error("{operation}: shape mismatch - lhs {lhs:?}, rhs {rhs:?}")]
    ShapeMismatch {
        operation: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    /// A row's length differs from the first row's length
    #[error("ragged grid: row {row} has {len} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A stride or dilation of zero was supplied
    #[error("{operation}: stride must be positive, got ({rows}, {cols})")]
    ZeroStride {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// A filter with no rows or no columns
    #[error("{operation}: filter must be non-empty, got ({rows}, {cols})")]
    EmptyFilter {
        operation: &'static str,
        rows: usize,
        cols: usize,
    },

    /// An index range whose start lies after its end
    #[error("{operation}: invalid range {start}..{end}")]
    InvalidRange {
        operation: &'static str,
        start: isize,
        end: isize,
    },
}

/// Result type for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(operation: &'static str, lhs: Vec<usize>, rhs: Vec<usize>) -> Self {
        GridError::ShapeMismatch {
            operation,
            lhs,
            rhs,
        }
    }

    /// Create an invalid range error
    pub fn invalid_range(operation: &'static str, start: isize, end: isize) -> Self {
        GridError::InvalidRange {
            operation,
            start,
            end,
        }
    }
}

/// Panic with the error's message. Used by the fail-fast entry points.
#[track_caller]
pub(crate) fn contract_violation(err: GridError) -> ! {
    panic!("{}", err)
}
