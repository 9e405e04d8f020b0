//! Shape-checked elementwise arithmetic on grids and volumes
//!
//! Binary tensor-tensor operations require identical shapes. A mismatch is a
//! caller bug: [`add`], [`sub`], [`mul`] and [`div`] panic, while the `try_*`
//! forms return [`GridError::ShapeMismatch`] for callers validating untrusted
//! input. Scalar forms broadcast to every element without a shape check.
//!
//! Traversal is depth-major, then row-major, then column-major, and the result
//! always has the operands' shape.

use scirs2_core::numeric::Float;

use crate::error::{contract_violation, GridError, Result};
use crate::types::{grid_shape, volume_shape, Grid, Volume};

/// A nested tensor whose elements can be mapped and zipped in place order.
///
/// Implemented for [`Grid`] and [`Volume`].
pub trait Tensor<T: Float>: Sized {
    /// Dimension sizes, outermost first.
    fn shape(&self) -> Vec<usize>;

    /// Whether `other` has exactly the same nesting structure, row by row.
    fn same_shape(&self, other: &Self) -> bool;

    /// Apply `f` to every element.
    fn map_elems<F: FnMut(T) -> T>(&self, f: &mut F) -> Self;

    /// Combine corresponding elements. Shapes must already match.
    fn zip_elems<F: FnMut(T, T) -> T>(&self, other: &Self, f: &mut F) -> Self;
}

impl<T: Float> Tensor<T> for Grid<T> {
    fn shape(&self) -> Vec<usize> {
        let (rows, cols) = grid_shape(self);
        vec![rows, cols]
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.len() == b.len())
    }

    fn map_elems<F: FnMut(T) -> T>(&self, f: &mut F) -> Self {
        self.iter()
            .map(|row| row.iter().map(|&x| f(x)).collect())
            .collect()
    }

    fn zip_elems<F: FnMut(T, T) -> T>(&self, other: &Self, f: &mut F) -> Self {
        self.iter()
            .zip(other)
            .map(|(ra, rb)| ra.iter().zip(rb).map(|(&a, &b)| f(a, b)).collect())
            .collect()
    }
}

impl<T: Float> Tensor<T> for Volume<T> {
    fn shape(&self) -> Vec<usize> {
        let (depth, rows, cols) = volume_shape(self);
        vec![depth, rows, cols]
    }

    fn same_shape(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same_shape(b))
    }

    fn map_elems<F: FnMut(T) -> T>(&self, f: &mut F) -> Self {
        self.iter().map(|grid| grid.map_elems(&mut *f)).collect()
    }

    fn zip_elems<F: FnMut(T, T) -> T>(&self, other: &Self, f: &mut F) -> Self {
        self.iter()
            .zip(other)
            .map(|(ga, gb)| ga.zip_elems(gb, &mut *f))
            .collect()
    }
}

/// Combine two tensors elementwise, failing on a shape mismatch.
pub fn try_elementwise<T, A, F>(operation: &'static str, a: &A, b: &A, mut op: F) -> Result<A>
where
    T: Float,
    A: Tensor<T>,
    F: FnMut(T, T) -> T,
{
    if !a.same_shape(b) {
        return Err(GridError::shape_mismatch(operation, a.shape(), b.shape()));
    }
    Ok(a.zip_elems(b, &mut op))
}

/// Combine two tensors elementwise. Panics on a shape mismatch.
///
/// # Examples
///
/// ```
/// use padgrid_core::elementwise;
///
/// let a = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
/// let b = vec![vec![4.0_f32, 3.0], vec![2.0, 1.0]];
/// let m = elementwise(&a, &b, f32::max);
/// assert_eq!(m, vec![vec![4.0, 3.0], vec![3.0, 4.0]]);
/// ```
#[track_caller]
pub fn elementwise<T, A, F>(a: &A, b: &A, op: F) -> A
where
    T: Float,
    A: Tensor<T>,
    F: FnMut(T, T) -> T,
{
    unwrap_shape(try_elementwise("elementwise", a, b, op))
}

#[track_caller]
fn unwrap_shape<A>(result: Result<A>) -> A {
    match result {
        Ok(value) => value,
        Err(err) => contract_violation(err),
    }
}

/// Elementwise sum, or a shape mismatch error.
pub fn try_add<T: Float, A: Tensor<T>>(a: &A, b: &A) -> Result<A> {
    try_elementwise("add", a, b, |x, y| x + y)
}

/// Elementwise difference, or a shape mismatch error.
pub fn try_sub<T: Float, A: Tensor<T>>(a: &A, b: &A) -> Result<A> {
    try_elementwise("sub", a, b, |x, y| x - y)
}

/// Elementwise product, or a shape mismatch error.
pub fn try_mul<T: Float, A: Tensor<T>>(a: &A, b: &A) -> Result<A> {
    try_elementwise("mul", a, b, |x, y| x * y)
}

/// Elementwise quotient, or a shape mismatch error.
pub fn try_div<T: Float, A: Tensor<T>>(a: &A, b: &A) -> Result<A> {
    try_elementwise("div", a, b, |x, y| x / y)
}

/// Elementwise sum. Panics when shapes differ.
///
/// # Examples
///
/// ```
/// use padgrid_core::add;
///
/// let a = vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]];
/// assert_eq!(add(&a, &a), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
/// ```
#[track_caller]
pub fn add<T: Float, A: Tensor<T>>(a: &A, b: &A) -> A {
    unwrap_shape(try_add(a, b))
}

/// Elementwise difference. Panics when shapes differ.
#[track_caller]
pub fn sub<T: Float, A: Tensor<T>>(a: &A, b: &A) -> A {
    unwrap_shape(try_sub(a, b))
}

/// Elementwise product. Panics when shapes differ.
#[track_caller]
pub fn mul<T: Float, A: Tensor<T>>(a: &A, b: &A) -> A {
    unwrap_shape(try_mul(a, b))
}

/// Elementwise quotient. Panics when shapes differ.
#[track_caller]
pub fn div<T: Float, A: Tensor<T>>(a: &A, b: &A) -> A {
    unwrap_shape(try_div(a, b))
}

/// `a + s` for every element.
pub fn add_scalar<T: Float, A: Tensor<T>>(a: &A, s: T) -> A {
    a.map_elems(&mut |x| x + s)
}

/// `a - s` for every element.
pub fn sub_scalar<T: Float, A: Tensor<T>>(a: &A, s: T) -> A {
    a.map_elems(&mut |x| x - s)
}

/// `a * s` for every element.
pub fn mul_scalar<T: Float, A: Tensor<T>>(a: &A, s: T) -> A {
    a.map_elems(&mut |x| x * s)
}

/// `a / s` for every element.
pub fn div_scalar<T: Float, A: Tensor<T>>(a: &A, s: T) -> A {
    a.map_elems(&mut |x| x / s)
}

/// `s + a` for every element.
pub fn scalar_add<T: Float, A: Tensor<T>>(s: T, a: &A) -> A {
    a.map_elems(&mut |x| s + x)
}

/// `s - a` for every element.
pub fn scalar_sub<T: Float, A: Tensor<T>>(s: T, a: &A) -> A {
    a.map_elems(&mut |x| s - x)
}

/// `s * a` for every element.
pub fn scalar_mul<T: Float, A: Tensor<T>>(s: T, a: &A) -> A {
    a.map_elems(&mut |x| s * x)
}

/// `s / a` for every element.
pub fn scalar_div<T: Float, A: Tensor<T>>(s: T, a: &A) -> A {
    a.map_elems(&mut |x| s / x)
}
