//! Generate 16-bit PGM test patterns.
//!
//! Writes a small corpus of synthetic images under test_data/patterns for
//! manual compression experiments and benchmarking.
//!
//! Run with: cargo run --bin generate_test_data

use std::fs;
use std::path::PathBuf;

use qoi15::pgm::Pgm;

struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_u16(&mut self) -> u16 {
        (self.next_u64() >> 48) as u16
    }
}

fn gradient(width: u32, height: u32) -> Vec<u16> {
    let mut data = vec![0u16; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            data[idx] = (((x + y) * 65535) / (width + height - 2).max(1)) as u16;
        }
    }
    data
}

fn uniform(width: u32, height: u32, value: u16) -> Vec<u16> {
    vec![value; (width * height) as usize]
}

fn stripes(width: u32, height: u32) -> Vec<u16> {
    let stripe_width = (width / 8).max(1);
    let mut data = vec![0u16; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            data[idx] = if (x / stripe_width) % 2 == 0 { 65535 } else { 0 };
        }
    }
    data
}

fn noise(width: u32, height: u32, seed: u64) -> Vec<u16> {
    let mut rng = SimpleRng::new(seed);
    (0..width * height).map(|_| rng.next_u16()).collect()
}

/// Shallow base gradient with low-amplitude noise, roughly what photographic
/// monochrome content looks like to the codec.
fn photo_like(width: u32, height: u32, seed: u64) -> Vec<u16> {
    let mut rng = SimpleRng::new(seed);
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let base = ((x + y) * 8) as i32;
            let jitter = (rng.next_u16() % 8) as i32 - 4;
            data.push((base + jitter).clamp(0, 65535) as u16);
        }
    }
    data
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let patterns_dir = PathBuf::from("test_data/patterns");
    fs::create_dir_all(&patterns_dir)?;

    let sizes = [(64u32, 64u32), (256, 256), (512, 512)];
    let mut written = 0usize;

    for &(width, height) in &sizes {
        let patterns: Vec<(String, Vec<u16>)> = vec![
            (format!("gradient_{}x{}", width, height), gradient(width, height)),
            (format!("uniform_{}x{}", width, height), uniform(width, height, 0x8000)),
            (format!("stripes_{}x{}", width, height), stripes(width, height)),
            (format!("noise_{}x{}", width, height), noise(width, height, 42)),
            (format!("photo_{}x{}", width, height), photo_like(width, height, 7)),
        ];

        for (name, data) in patterns {
            let mut pgm = Pgm::new(width, height);
            pgm.data_mut().copy_from_slice(&data);
            let path = patterns_dir.join(format!("{}.pgm", name));
            pgm.save(&path, true)?;
            println!("  {}", path.display());
            written += 1;
        }
    }

    println!("Generated {} patterns", written);
    Ok(())
}
