//! # padgrid-core
//!
//! Grid preparation primitives for convolution and transposed convolution.
//!
//! This crate sits beneath convolutional layers and handles the boundary
//! arithmetic they depend on:
//!
//! - **Padding geometry** ([`compute_padding`]) for the SAME convention
//! - **Materialized padding** ([`apply_padding`], [`apply_unit_border`], [`same_pad`])
//! - **Stride insertion** ([`insert_stride_gaps`]) for transposed convolution
//! - **Transposed-convolution preparation** ([`prepare_for_transposed_conv`])
//! - **Virtual padding and dilation** ([`indexing`]) for reading receptive-field
//!   windows straight from the unpadded grid
//! - **Shape-checked arithmetic** ([`add`], [`sub`], [`mul`], [`div`] and scalar forms)
//! - **Kernel flipping** ([`flip180`])
//!
//! The convolution sweep itself is left to the caller.
//!
//! ## Data Model
//!
//! Grids are plain `Vec<Vec<T>>` and volumes `Vec<Vec<Vec<T>>>`, with
//! `T: scirs2_core::numeric::Float`. Every operation borrows its input and
//! returns a new value.
//!
//! ## Quick Start
//!
//! ```
//! use padgrid_core::{apply_padding, compute_padding, Size2, Stride2};
//!
//! let grid = vec![vec![1.0_f64; 4]; 4];
//! let spec = compute_padding(Size2::square(4), Size2::square(3), Stride2::uniform(1));
//! let padded = apply_padding(&grid, spec);
//!
//! assert_eq!(padded.len(), 6);
//! assert_eq!(padded[1][1], 1.0);
//! assert_eq!(padded[0][0], 0.0);
//! ```
//!
//! ## Reading Windows Without Padding
//!
//! ```
//! use padgrid_core::indexing::{window_flat, Window};
//!
//! let grid = vec![vec![1.0_f32, 2.0], vec![3.0, 4.0]];
//! // Top-left 3x3 receptive field of a SAME 3x3 convolution
//! let field = window_flat(&grid, &Window::new((-1, -1), (2, 2)), 0.0);
//! assert_eq!(field, vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 3.0, 4.0]);
//! ```
//!
//! ## Error Handling
//!
//! Contract violations (mismatched shapes, zero strides, inverted ranges) are
//! caller bugs and panic with a [`GridError`] message. Reading outside a grid
//! through [`indexing`] is not an error: the caller's default is returned.
//! The `try_*` arithmetic functions return [`Result`] instead of panicking.
//!
//! ```
//! use padgrid_core::try_mul;
//!
//! let a = vec![vec![1.0_f64, 2.0, 3.0]];
//! let b = vec![vec![1.0_f64], vec![2.0], vec![3.0]];
//! assert!(try_mul(&a, &b).is_err());
//! ```
//!
//! ## Logging
//!
//! Computed geometry is emitted as `tracing` events at `debug` level and
//! materialized shapes at `trace` level. Install a subscriber to see them.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for the geometry value types

pub mod elementwise;
pub mod error;
pub mod geometry;
pub mod indexing;
pub mod manipulation;
pub mod padding;
pub mod stride;
pub mod transpose;
pub mod types;


pub use elementwise::{
    add, add_scalar, div, div_scalar, elementwise, mul, mul_scalar, scalar_add, scalar_div,
    scalar_mul, scalar_sub, sub, sub_scalar, try_add, try_div, try_elementwise, try_mul, try_sub,
    Tensor,
};
pub use error::{GridError, Result};
pub use geometry::{compute_padding, conv_output_size, padding_for_mode};
pub use indexing::Window;
pub use manipulation::{flatten, flip180, flip180_volume};
pub use padding::{apply_padding, apply_unit_border, same_pad, shrink};
pub use stride::{insert_stride_gaps, stride_pad_padded, stride_pad_shrink};
pub use transpose::{prepare_for_transposed_conv, TransposedConv, TransposedLayout};
pub use types::{
    grid_shape, validate_grid, validate_volume, volume_shape, ConvPadding, Grid, PaddingSpec,
    Size2, Stride2, Volume,
};
