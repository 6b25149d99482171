use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::{Parser, Subcommand};
use image::ImageReader;
use qoi15::{pgm::Pgm, Qoi15Context, Qoi15Error};

/// QO15 container format:
/// - Magic: "QO15" (4 bytes)
/// - Width: u32 LE
/// - Height: u32 LE
/// - Codeword stream as u16 LE words
const MAGIC: &[u8; 4] = b"QO15";

#[derive(Parser)]
#[command(name = "qoi15")]
#[command(about = "Lossless 16-bit monochrome image compressor (15-bit payload)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an image (PGM/PNG/...) to a QO15 file
    #[command(visible_alias = "c")]
    Compress {
        /// Input image file
        input: String,
        /// Output QO15 file
        output: String,
    },
    /// Decompress a QO15 file to a 16-bit PGM
    #[command(visible_alias = "d")]
    Decompress {
        /// Input QO15 file
        input: String,
        /// Output PGM file
        output: String,
    },
}

fn load_mono16(path: &str) -> Result<(u32, u32, Vec<u16>), Box<dyn std::error::Error>> {
    let path_lower = path.to_lowercase();

    if path_lower.ends_with(".pgm") {
        let pgm = Pgm::open(path)?;
        Ok((pgm.width(), pgm.height(), pgm.data().to_vec()))
    } else {
        // Anything else goes through the image crate and a 16-bit luma
        // conversion.
        let img = ImageReader::open(path)?.decode()?;
        let gray = img.to_luma16();
        let (width, height) = gray.dimensions();
        Ok((width, height, gray.into_raw()))
    }
}

fn compress(input: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height, samples) = load_mono16(input)?;
    let ctx = Qoi15Context::new(width, height, None)?;
    let words = ctx.encode_image(&samples)?;

    let mut file = File::create(output)?;
    file.write_all(MAGIC)?;
    file.write_all(&ctx.width().to_le_bytes())?;
    file.write_all(&ctx.height().to_le_bytes())?;
    let mut payload = Vec::with_capacity(words.len() * 2);
    for &word in &words {
        payload.extend_from_slice(&word.to_le_bytes());
    }
    file.write_all(&payload)?;

    println!(
        "{}: {} samples -> {} words (ratio {:.3})",
        input,
        samples.len(),
        words.len(),
        words.len() as f64 / samples.len().max(1) as f64
    );
    Ok(())
}

fn decompress(input: &str, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read(input)?;

    if raw.len() < 12 || &raw[..4] != MAGIC {
        return Err(Qoi15Error::InvalidData.into());
    }
    let width = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
    let height = u32::from_le_bytes([raw[8], raw[9], raw[10], raw[11]]);

    let payload = &raw[12..];
    if payload.len() % 2 != 0 {
        return Err(Qoi15Error::InvalidData.into());
    }
    let words: Vec<u16> = payload
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let ctx = Qoi15Context::new(width, height, None)?;
    let samples = ctx.decode_image(&words)?;

    let mut pgm = Pgm::new(ctx.width(), ctx.height());
    pgm.data_mut().copy_from_slice(&samples);
    pgm.save(output, true)?;

    println!("{}: {} words -> {} samples", input, words.len(), samples.len());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let output = match &cli.command {
        Commands::Compress { output, .. } => output,
        Commands::Decompress { output, .. } => output,
    };
    if let Some(parent) = Path::new(output).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Error creating output directory: {}", e);
                std::process::exit(1);
            }
        }
    }

    let result = match &cli.command {
        Commands::Compress { input, output } => compress(input, output),
        Commands::Decompress { input, output } => decompress(input, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
