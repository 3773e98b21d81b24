//! DPCM Command Line Interface
//!
//! Usage:
//!   dpcm encode <k> <input.tga> <output>     # compress
//!   dpcm decode <k> <input> <output.tga>     # decompress
//!   dpcm stats <original.tga> <decoded.tga>  # MSE / SNR

#![allow(clippy::cast_precision_loss)]

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dpcm::{calibrate, compare, read_tga, write_tga, DifferentialCoder, Image};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dpcm")]
#[command(version)]
#[command(about = "Lossy closed-loop DPCM compression of 24-bit TGA images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a TGA image using differential coding
    Encode {
        /// Number of bits of quantizer (1-7)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        k: u8,
        /// Input TGA file
        input: PathBuf,
        /// Output encoded file
        output: PathBuf,
    },

    /// Decode an encoded file into a TGA image
    Decode {
        /// Number of bits of quantizer (must match encoding)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=7))]
        k: u8,
        /// Input encoded file
        input: PathBuf,
        /// Output TGA file
        output: PathBuf,
    },

    /// Print MSE and SNR of a decoded image against its original
    Stats {
        /// Original TGA file
        original: PathBuf,
        /// Decoded TGA file
        decoded: PathBuf,
    },
}

fn read_image(path: &Path) -> Result<Image> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    read_tga(BufReader::new(file)).with_context(|| format!("cannot read TGA {}", path.display()))
}

fn file_len(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .with_context(|| format!("cannot read metadata of {}", path.display()))?
        .len())
}

fn do_encode(k: u8, input: &Path, output: &Path) -> Result<()> {
    let image = read_image(input)?;
    let quantizers = calibrate(&image, k).context("calibrating quantizers")?;
    let [r, g, b] = &quantizers;

    let coder = DifferentialCoder::new(k)?;
    let file =
        File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    coder
        .encode(&image, [r, g, b], BufWriter::new(file))
        .with_context(|| format!("encoding failed for {}", input.display()))?;

    let input_size = file_len(input)?;
    let output_size = file_len(output)?;
    info!(
        width = image.width(),
        height = image.height(),
        k,
        "encoded {} -> {}",
        input.display(),
        output.display()
    );
    println!("Input:       {} ({input_size} bytes)", input.display());
    println!("Output:      {} ({output_size} bytes)", output.display());
    println!("Ratio:       {:.2}x", input_size as f64 / output_size as f64);
    println!("Parameters:  k={k}");

    Ok(())
}

fn do_decode(k: u8, input: &Path, output: &Path) -> Result<()> {
    let coder = DifferentialCoder::new(k)?;
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let image = coder
        .decode(BufReader::new(file))
        .with_context(|| format!("decoding failed for {}", input.display()))?;

    let file =
        File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    write_tga(BufWriter::new(file), &image)
        .with_context(|| format!("cannot write TGA {}", output.display()))?;

    info!(
        width = image.width(),
        height = image.height(),
        k,
        "decoded {} -> {}",
        input.display(),
        output.display()
    );
    println!(
        "Output:      {} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    );

    Ok(())
}

fn do_stats(original: &Path, decoded: &Path) -> Result<()> {
    let before = read_image(original)?;
    let after = read_image(decoded)?;
    let stats = compare(&before, &after).context("comparing images")?;
    println!("{stats}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode { k, input, output } => do_encode(k, &input, &output),
        Commands::Decode { k, input, output } => do_decode(k, &input, &output),
        Commands::Stats { original, decoded } => do_stats(&original, &decoded),
    }
}
