//! Performance benchmarks for DPCM encoding and decoding.
//!
//! Measures throughput on a synthetic image for regression testing during
//! development. Use for relative comparisons only.
//!
//! Usage:
//!   cargo run --release --bin bench          # Run with default 100 iterations
//!   cargo run --release --bin bench -- 1000  # Run with custom iteration count

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use dpcm::{calibrate, Color, DifferentialCoder, Image, MAX_BITS, MIN_BITS};
use std::env;
use std::time::Instant;

const DEFAULT_ITERATIONS: usize = 100;
const WIDTH: u16 = 256;
const HEIGHT: u16 = 256;

/// Smooth gradient with a little texture, close to a natural photo.
fn synthetic_image() -> Image {
    let colors = (0..usize::from(HEIGHT))
        .flat_map(|row| {
            (0..usize::from(WIDTH)).map(move |column| {
                let texture = ((row * 7 + column * 13) % 11) as u8;
                Color::new(
                    (column as u8).wrapping_add(texture),
                    (row as u8).wrapping_add(texture),
                    ((row + column) / 2) as u8,
                )
            })
        })
        .collect();

    Image::from_colors(WIDTH, HEIGHT, colors).expect("synthetic image dimensions")
}

fn bench_bits(image: &Image, bits: u8, iterations: usize) {
    let [r, g, b] = calibrate(image, bits).expect("calibration");
    let coder = DifferentialCoder::new(bits).expect("bit depth");
    let raw_bytes = image.len() * 3;

    // Warmup run
    let encoded = coder.encode_to_vec(image, [&r, &g, &b]).expect("encode");

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = coder.encode_to_vec(image, [&r, &g, &b]);
    }
    let encode_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = coder.decode_from_slice(&encoded);
    }
    let decode_secs = start.elapsed().as_secs_f64();

    let mb = (raw_bytes * iterations) as f64 / (1024.0 * 1024.0);
    println!(
        "k={bits:<3} {:>8} bytes  ratio {:>5.2}x  encode {:>8.2} MB/s  decode {:>8.2} MB/s",
        encoded.len(),
        raw_bytes as f64 / encoded.len() as f64,
        mb / encode_secs,
        mb / decode_secs,
    );
}

fn main() {
    let iterations = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    println!("DPCM benchmark: {WIDTH}x{HEIGHT} synthetic image, {iterations} iterations\n");

    let image = synthetic_image();
    for bits in MIN_BITS..=MAX_BITS {
        bench_bits(&image, bits, iterations);
    }
}
