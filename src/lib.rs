//! QOI15: lossless compression for 16-bit monochrome image data.
//!
//! The useful signal is carried in the top 15 bits of each sample; the
//! least-significant bit is discarded on encode and reconstructed as zero on
//! decode. The encoder turns a flat slice of 16-bit samples into a shorter
//! slice of 16-bit codewords; the decoder reverses that given the codewords
//! and the original sample count (the stream does not self-delimit).
//!
//! # Codeword stream
//!
//! Every output word takes one of two forms, discriminated by bit 15:
//!
//! ```plain
//! .- literal -----------------.   .- packed triple ------------------.
//! | 15 | 14 .. 0              |   | 15 | 14..10 |  9..5  |  4..0     |
//! |----+----------------------|   |----+--------+--------+-----------|
//! |  1 | 15-bit raw sample    |   |  0 | third  | second | first     |
//! `---------------------------`   `----------------------------------`
//! ```
//!
//! Each 5-bit field of a packed triple is a sub-codeword whose high bits
//! select a strategy: `00xxx` is a base-8 run-length digit, `01xxx` is an
//! index into an 8-entry cache of recently seen samples, and `1xxxx` is a
//! biased signed delta against the previous sample. The fields are consumed
//! low-to-high, so order between literals and packed triples is preserved.
//!
//! Image framing (dimensions, byte order on disk) is the caller's business;
//! the `qoi15` binary defines its own small container, and [`pgm`] handles
//! 16-bit PGM files.

use thiserror::Error;

pub mod codec;
pub mod pgm;

pub use codec::{decode, encode};

#[derive(Error, Debug)]
pub enum Qoi15Error {
    #[error("Invalid image dimensions (width and height must be non-zero)")]
    ImageDimensions,
    #[error("Invalid argument")]
    InvalidArgument,
    #[error("Unsupported format")]
    UnsupportedFormat,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid compressed data")]
    InvalidData,
    #[error("compressed stream ended after {actual} of {expected} samples")]
    UnexpectedEnd { expected: usize, actual: usize },
    #[error("compressed stream continues past the requested {expected} samples")]
    TrailingData { expected: usize },
}

pub type Result<T> = std::result::Result<T, Qoi15Error>;

/// Image-level entry point: validates dimensions once and carries the thread
/// budget for batch work. Each encode or decode call still runs on exactly
/// one thread; parallelism operates at image granularity only.
pub struct Qoi15Context {
    width: u32,
    height: u32,
    num_threads: usize,
}

impl Qoi15Context {
    pub fn new(width: u32, height: u32, num_threads: Option<usize>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Qoi15Error::ImageDimensions);
        }

        let num_threads = num_threads.unwrap_or_else(num_cpus::get).max(1);

        Ok(Self {
            width,
            height,
            num_threads,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Upper bound on the encoded word count. Reached when every sample
    /// emits a literal container.
    pub fn worst_case_encoded_len(&self) -> usize {
        self.sample_count()
    }

    pub fn encode_image(&self, samples: &[u16]) -> Result<Vec<u16>> {
        if samples.len() != self.sample_count() {
            return Err(Qoi15Error::InvalidArgument);
        }

        Ok(codec::encode(samples))
    }

    pub fn decode_image(&self, words: &[u16]) -> Result<Vec<u16>> {
        codec::decode(words, self.sample_count())
    }

    /// Encodes independent frames of identical dimensions, fanning them out
    /// over up to `num_threads` workers. Results keep the input order.
    pub fn encode_frames(&self, frames: &[&[u16]]) -> Result<Vec<Vec<u16>>> {
        let expected = self.sample_count();
        if frames.iter().any(|frame| frame.len() != expected) {
            return Err(Qoi15Error::InvalidArgument);
        }

        if self.num_threads <= 1 || frames.len() <= 1 {
            return Ok(frames.iter().map(|frame| codec::encode(frame)).collect());
        }

        let per_worker = frames.len().div_ceil(self.num_threads);
        let encoded = std::thread::scope(|scope| {
            let workers: Vec<_> = frames
                .chunks(per_worker)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|frame| codec::encode(frame))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            workers
                .into_iter()
                .flat_map(|worker| worker.join().expect("encoder worker panicked"))
                .collect()
        });

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Qoi15Context::new(0, 4, Some(1)).is_err());
        assert!(Qoi15Context::new(4, 0, Some(1)).is_err());
    }

    #[test]
    fn rejects_mismatched_sample_count() {
        let ctx = Qoi15Context::new(4, 4, Some(1)).unwrap();
        assert!(ctx.encode_image(&[0u16; 15]).is_err());
    }

    #[test]
    fn image_roundtrip() {
        let ctx = Qoi15Context::new(8, 2, Some(1)).unwrap();
        let samples: Vec<u16> = (0..16u16).map(|i| (i * 100) & 0xFFFE).collect();

        let words = ctx.encode_image(&samples).unwrap();
        assert!(words.len() <= ctx.worst_case_encoded_len());

        let decoded = ctx.decode_image(&words).unwrap();
        assert_eq!(samples, decoded);
    }

    #[test]
    fn batch_encode_matches_single() {
        let ctx = Qoi15Context::new(16, 16, Some(4)).unwrap();
        let frames: Vec<Vec<u16>> = (0..8u16)
            .map(|f| (0..256u16).map(|i| (i * 7 + f * 31) & 0xFFFE).collect())
            .collect();
        let views: Vec<&[u16]> = frames.iter().map(Vec::as_slice).collect();

        let batch = ctx.encode_frames(&views).unwrap();
        for (frame, words) in frames.iter().zip(&batch) {
            assert_eq!(words, &codec::encode(frame));
        }
    }
}
