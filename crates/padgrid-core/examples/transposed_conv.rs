//! Walk through a forward SAME convolution and its transposed counterpart.
//!
//! Run with `RUST_LOG=padgrid_core=debug` to see the computed geometry.

use padgrid_core::indexing::{window_flat, Window};
use padgrid_core::{
    compute_padding, conv_output_size, flip180, prepare_for_transposed_conv, ConvPadding, Grid,
    Size2, Stride2, TransposedConv,
};

fn correlate_valid(input: &[Vec<f64>], kernel: &[Vec<f64>]) -> Grid<f64> {
    let kernel_flat = kernel.concat();
    let size = Size2::new(kernel.len(), kernel[0].len());
    let rows = input.len() + 1 - size.rows;
    let cols = input[0].len() + 1 - size.cols;

    (0..rows)
        .map(|i| {
            (0..cols)
                .map(|j| {
                    let field = window_flat(input, &Window::from_origin((i as isize, j as isize), size), 0.0);
                    field.iter().zip(&kernel_flat).map(|(a, b)| a * b).sum()
                })
                .collect()
        })
        .collect()
}

fn print_grid(title: &str, grid: &[Vec<f64>]) {
    println!("{}:", title);
    for row in grid {
        let cells: Vec<String> = row.iter().map(|v| format!("{:6.1}", v)).collect();
        println!("  {}", cells.join(" "));
    }
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("padgrid_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let input = Size2::square(5);
    let kernel_size = Size2::square(3);
    let stride = Stride2::uniform(2);

    let image: Grid<f64> = (0..input.rows)
        .map(|r| (0..input.cols).map(|c| (r * input.cols + c) as f64).collect())
        .collect();
    let kernel = vec![
        vec![1.0, 0.0, -1.0],
        vec![2.0, 0.0, -2.0],
        vec![1.0, 0.0, -1.0],
    ];

    // Forward pass: read each receptive field through virtual padding
    let spec = compute_padding(input, kernel_size, stride);
    let out = conv_output_size(input, kernel_size, stride, spec);
    let forward: Grid<f64> = (0..out.rows)
        .map(|i| {
            (0..out.cols)
                .map(|j| {
                    let origin = (
                        (i * stride.rows) as isize - spec.top as isize,
                        (j * stride.cols) as isize - spec.left as isize,
                    );
                    let field = window_flat(&image, &Window::from_origin(origin, kernel_size), 0.0);
                    field.iter().zip(kernel.concat()).map(|(a, b)| a * b).sum()
                })
                .collect()
        })
        .collect();

    print_grid("image", &image);
    println!("padding: {:?}", spec);
    print_grid("forward (SAME, stride 2)", &forward);

    // Transposed pass back to the image extent
    let transposed = TransposedConv::new(kernel_size, stride, ConvPadding::Same, input);
    let prepared = prepare_for_transposed_conv(&forward, &transposed);
    print_grid("prepared", &prepared);

    let restored = correlate_valid(&prepared, &flip180(&kernel));
    print_grid("transposed (back to 5x5)", &restored);
}
