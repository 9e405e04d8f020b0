//! Core value types: grids, volumes, and geometry descriptors
//!
//! Grids and volumes are plain nested vectors so they can cross the crate
//! boundary without wrapping. Everything else here is a small `Copy` value
//! describing geometry.

use crate::error::{GridError, Result};

/// 2D tensor stored as rows of scalars.
///
/// All rows are expected to have the same length. Hot-path operators do not
/// check this; use [`validate_grid`] on untrusted input.
pub type Grid<T> = Vec<Vec<T>>;

/// 3D tensor stored depth-major as a sequence of grids.
pub type Volume<T> = Vec<Grid<T>>;

/// Spatial extent of a signal or filter, in rows and columns.
///
/// # Examples
///
/// ```
/// use padgrid_core::Size2;
///
/// let size = Size2::new(28, 28);
/// assert_eq!(size, Size2::square(28));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size2 {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Size2 {
    /// Create a size from rows and columns
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Create a square size
    pub const fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }
}

impl From<(usize, usize)> for Size2 {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

/// Per-axis step between window positions, or between inserted elements.
///
/// Both components must be positive. Operations taking a `Stride2` panic on
/// a zero component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stride2 {
    /// Row stride
    pub rows: usize,
    /// Column stride
    pub cols: usize,
}

impl Stride2 {
    /// Create a stride pair
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Same stride on both axes
    pub const fn uniform(s: usize) -> Self {
        Self { rows: s, cols: s }
    }

    /// Check that both components are positive.
    pub fn validate(self, operation: &'static str) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::ZeroStride {
                operation,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }
}

impl Default for Stride2 {
    fn default() -> Self {
        Self::uniform(1)
    }
}

impl From<(usize, usize)> for Stride2 {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

/// Number of zero rows/columns to add on each side of a grid.
///
/// # Examples
///
/// ```
/// use padgrid_core::PaddingSpec;
///
/// let spec = PaddingSpec::new(0, 1, 2, 3);
/// assert_eq!(spec.vertical(), 1);
/// assert_eq!(spec.horizontal(), 5);
/// assert!(PaddingSpec::zero().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaddingSpec {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl PaddingSpec {
    /// Create a padding spec
    pub const fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// No padding on any side
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// The same amount on every side
    pub const fn uniform(n: usize) -> Self {
        Self::new(n, n, n, n)
    }

    /// Rows added in total (top + bottom)
    pub const fn vertical(&self) -> usize {
        self.top + self.bottom
    }

    /// Columns added in total (left + right)
    pub const fn horizontal(&self) -> usize {
        self.left + self.right
    }

    pub const fn is_zero(&self) -> bool {
        self.vertical() == 0 && self.horizontal() == 0
    }
}

/// Padding convention of a convolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvPadding {
    /// No padding - output shrinks by filter size minus one
    #[default]
    Valid,
    /// Pad so that a stride-s sweep yields ceil(input / s) outputs
    Same,
}

/// Shape of a grid as (rows, cols).
///
/// The column count is taken from the first row; an empty grid is `(0, 0)`.
pub fn grid_shape<T>(grid: &[Vec<T>]) -> (usize, usize) {
    (grid.len(), grid.first().map_or(0, Vec::len))
}

/// Shape of a volume as (depth, rows, cols).
///
/// Missing inner components are reported as 0 rather than failing.
///
/// # Examples
///
/// ```
/// use padgrid_core::volume_shape;
///
/// let empty: Vec<Vec<Vec<f32>>> = Vec::new();
/// assert_eq!(volume_shape(&empty), (0, 0, 0));
///
/// let vol = vec![vec![vec![0.0_f32; 4]; 3]; 2];
/// assert_eq!(volume_shape(&vol), (2, 3, 4));
/// ```
pub fn volume_shape<T>(volume: &[Vec<Vec<T>>]) -> (usize, usize, usize) {
    let (rows, cols) = volume.first().map_or((0, 0), |g| grid_shape(g));
    (volume.len(), rows, cols)
}

/// Check that every row has the same length as the first.
pub fn validate_grid<T>(grid: &[Vec<T>]) -> Result<()> {
    let expected = grid.first().map_or(0, Vec::len);
    for (row, r) in grid.iter().enumerate() {
        if r.len() != expected {
            return Err(GridError::RaggedGrid {
                row,
                len: r.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Check that every slice of a volume is rectangular and all slices agree.
pub fn validate_volume<T>(volume: &[Vec<Vec<T>>]) -> Result<()> {
    let expected = volume.first().map_or((0, 0), |g| grid_shape(g));
    for grid in volume {
        validate_grid(grid)?;
        let shape = grid_shape(grid);
        if shape != expected {
            return Err(GridError::shape_mismatch(
                "validate_volume",
                vec![expected.0, expected.1],
                vec![shape.0, shape.1],
            ));
        }
    }
    Ok(())
}
