//! Integration tests for padgrid-core
//!
//! These tests drive the public API the way a convolution layer would: compute
//! geometry, prepare a grid, then sweep it with a reference convolution written
//! here in the test.

use padgrid_core::indexing::{window_dilated_flat, window_dilated_padded, window_flat, Window};
use padgrid_core::{
    add, apply_padding, compute_padding, conv_output_size, flip180, grid_shape,
    insert_stride_gaps, padding_for_mode, prepare_for_transposed_conv, same_pad, ConvPadding,
    Grid, PaddingSpec, Size2, Stride2, TransposedConv,
};

fn iota(rows: usize, cols: usize) -> Grid<f64> {
    (0..rows)
        .map(|r| (0..cols).map(|c| (r * cols + c + 1) as f64).collect())
        .collect()
}

fn kernel(rows: usize, cols: usize) -> Grid<f64> {
    // Asymmetric so that a missing flip shows up
    (0..rows)
        .map(|r| (0..cols).map(|c| (r * 7 + c * 3) as f64 - 4.0).collect())
        .collect()
}

/// Reference valid cross-correlation with the given strides.
fn correlate_valid(input: &[Vec<f64>], k: &[Vec<f64>], stride: Stride2) -> Grid<f64> {
    let (ir, ic) = grid_shape(input);
    let (kr, kc) = grid_shape(k);
    if kr > ir || kc > ic {
        return Vec::new();
    }
    let out_r = (ir - kr) / stride.rows + 1;
    let out_c = (ic - kc) / stride.cols + 1;

    (0..out_r)
        .map(|i| {
            (0..out_c)
                .map(|j| {
                    let mut sum = 0.0;
                    for a in 0..kr {
                        for b in 0..kc {
                            sum += input[i * stride.rows + a][j * stride.cols + b] * k[a][b];
                        }
                    }
                    sum
                })
                .collect()
        })
        .collect()
}

/// Reference transposed convolution by scatter-accumulate, cropped to the
/// forward convolution's padding.
fn scatter_transposed(
    signal: &[Vec<f64>],
    k: &[Vec<f64>],
    stride: Stride2,
    mode: ConvPadding,
    input: Size2,
) -> Grid<f64> {
    let (sr, sc) = grid_shape(signal);
    let (kr, kc) = grid_shape(k);
    let full_r = (sr - 1) * stride.rows + kr;
    let full_c = (sc - 1) * stride.cols + kc;

    let mut full = vec![vec![0.0; full_c]; full_r];
    for i in 0..sr {
        for j in 0..sc {
            for a in 0..kr {
                for b in 0..kc {
                    full[i * stride.rows + a][j * stride.cols + b] += signal[i][j] * k[a][b];
                }
            }
        }
    }

    match mode {
        ConvPadding::Valid => full,
        ConvPadding::Same => {
            let spec = compute_padding(input, Size2::new(kr, kc), stride);
            (0..input.rows)
                .map(|r| {
                    (0..input.cols)
                        .map(|c| {
                            full.get(r + spec.top)
                                .and_then(|row| row.get(c + spec.left))
                                .copied()
                                .unwrap_or(0.0)
                        })
                        .collect()
                })
                .collect()
        }
    }
}

fn assert_grid_close(a: &[Vec<f64>], b: &[Vec<f64>], context: &str) {
    assert_eq!(grid_shape(a), grid_shape(b), "shape mismatch: {}", context);
    for (ra, rb) in a.iter().zip(b) {
        for (x, y) in ra.iter().zip(rb) {
            assert!((x - y).abs() < 1e-9, "{} vs {}: {}", x, y, context);
        }
    }
}

#[test]
fn test_scenario_4x4_filter_3x3_stride_1() {
    let grid = iota(4, 4);
    let spec = compute_padding(Size2::square(4), Size2::square(3), Stride2::uniform(1));
    assert_eq!(spec, PaddingSpec::new(1, 1, 1, 1));

    let padded = apply_padding(&grid, spec);
    assert_eq!(grid_shape(&padded), (6, 6));
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(padded[i + 1][j + 1], grid[i][j]);
        }
    }
    assert!(padded[0].iter().chain(&padded[5]).all(|&x| x == 0.0));
}

#[test]
fn test_scenario_stride_gaps_2x2() {
    let grid = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    assert_eq!(
        insert_stride_gaps(&grid, Stride2::new(2, 2)),
        vec![
            vec![1.0, 0.0, 2.0],
            vec![0.0, 0.0, 0.0],
            vec![3.0, 0.0, 4.0]
        ]
    );
}

#[test]
fn test_scenario_flip180_2x2() {
    let grid = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    assert_eq!(flip180(&grid), vec![vec![4.0, 3.0], vec![2.0, 1.0]]);
}

#[test]
#[should_panic(expected = "shape mismatch")]
fn test_scenario_add_2x3_and_3x2_aborts() {
    add(&iota(2, 3), &iota(3, 2));
}

#[test]
fn test_same_padding_sweep_yields_ceil_outputs() {
    for stride in 1..=3 {
        for filter in 1..=5 {
            for input in 1..=20 {
                let grid = iota(input, input);
                let padded = same_pad(&grid, Size2::square(filter), Stride2::uniform(stride));
                let out = correlate_valid(
                    &padded,
                    &kernel(filter, filter),
                    Stride2::uniform(stride),
                );
                let expected = input.div_ceil(stride);
                assert_eq!(
                    grid_shape(&out),
                    (expected, expected),
                    "input {} filter {} stride {}",
                    input,
                    filter,
                    stride
                );
            }
        }
    }
}

#[test]
fn test_virtual_windows_match_materialized_same_convolution() {
    let grid = iota(5, 6);
    let k = kernel(3, 3);
    let stride = Stride2::new(2, 1);
    let input = Size2::new(5, 6);
    let spec = compute_padding(input, Size2::square(3), stride);

    let reference = correlate_valid(&apply_padding(&grid, spec), &k, stride);
    let out = conv_output_size(input, Size2::square(3), stride, spec);
    let flat_kernel: Vec<f64> = k.concat();

    for i in 0..out.rows {
        for j in 0..out.cols {
            let origin = (
                (i * stride.rows) as isize - spec.top as isize,
                (j * stride.cols) as isize - spec.left as isize,
            );
            let field = window_flat(&grid, &Window::from_origin(origin, Size2::square(3)), 0.0);
            let dot: f64 = field.iter().zip(&flat_kernel).map(|(a, b)| a * b).sum();
            assert!((dot - reference[i][j]).abs() < 1e-9);
        }
    }
}

#[test]
fn test_dilated_window_matches_materialized_gaps() {
    let grid = iota(6, 6);
    for i in -1..4isize {
        for j in -1..4isize {
            let w = Window::new((i, j), (i + 3, j + 2));
            let plain = padgrid_core::indexing::window(&grid, &w, 0.0);
            let dilated = window_dilated_flat(&grid, &w, 1, 0.0);
            assert_eq!(dilated, insert_stride_gaps(&plain, Stride2::uniform(2)).concat());
        }
    }
}

#[test]
fn test_valid_transposed_grid_is_virtual_dilated_padded_window() {
    // With VALID padding the prepared grid is the whole signal read with
    // `stride - 1` gaps and `filter - 1` border.
    let signal = iota(3, 4);
    let whole = Window::new((0, 0), (3, 4));
    for stride in 1..=3 {
        for filter in 1..=4 {
            let spec = TransposedConv::new(
                Size2::square(filter),
                Stride2::uniform(stride),
                ConvPadding::Valid,
                Size2::new(3 * stride + filter, 4 * stride + filter),
            );
            let prepared = prepare_for_transposed_conv(&signal, &spec);
            let virtual_grid = window_dilated_padded(&signal, &whole, filter - 1, stride - 1, 0.0);
            assert_eq!(prepared, virtual_grid, "stride {} filter {}", stride, filter);
        }
    }
}

#[test]
fn test_transposed_conv_matches_scatter_reference() {
    for &mode in &[ConvPadding::Valid, ConvPadding::Same] {
        for stride in 1..=3 {
            for &filter in &[1usize, 3, 5] {
                for input in [filter, filter + 1, 7, 8] {
                    let input_size = Size2::new(input, input + 1);
                    let f = Size2::square(filter);
                    let s = Stride2::uniform(stride);

                    // Signal shaped like the forward convolution's output
                    let fwd_spec = padding_for_mode(mode, input_size, f, s);
                    let fwd_out = conv_output_size(input_size, f, s, fwd_spec);
                    let signal = iota(fwd_out.rows, fwd_out.cols);
                    let k = kernel(filter, filter);

                    let spec = TransposedConv::new(f, s, mode, input_size);
                    let prepared = prepare_for_transposed_conv(&signal, &spec);
                    let swept = correlate_valid(&prepared, &flip180(&k), Stride2::uniform(1));
                    let expected = scatter_transposed(&signal, &k, s, mode, input_size);

                    let context = format!(
                        "mode {:?} stride {} filter {} input {:?}",
                        mode, stride, filter, input_size
                    );
                    assert_grid_close(&swept, &expected, &context);

                    let out = spec.output_size(Size2::new(fwd_out.rows, fwd_out.cols));
                    assert_eq!(grid_shape(&swept), (out.rows, out.cols), "{}", context);
                    if mode == ConvPadding::Same {
                        assert_eq!(out, input_size, "{}", context);
                    }
                }
            }
        }
    }
}

#[test]
fn test_transposed_conv_worked_example() {
    // 2x2 signal, 3x3 all-ones kernel, stride 2, SAME back to 4x4.
    let signal = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let ones = vec![vec![1.0; 3]; 3];
    let spec = TransposedConv::new(
        Size2::square(3),
        Stride2::uniform(2),
        ConvPadding::Same,
        Size2::square(4),
    );

    let prepared = prepare_for_transposed_conv(&signal, &spec);
    let out = correlate_valid(&prepared, &ones, Stride2::uniform(1));
    assert_eq!(
        out,
        vec![
            vec![1.0, 1.0, 3.0, 2.0],
            vec![1.0, 1.0, 3.0, 2.0],
            vec![4.0, 4.0, 10.0, 6.0],
            vec![3.0, 3.0, 7.0, 4.0],
        ]
    );
}
