//! The QOI15 codeword codec.
//!
//! Four strategies compete per sample: run-length, small signed delta,
//! recent-sample cache hit, and raw literal. The first three produce 5-bit
//! sub-codewords that are packed three to a 16-bit word; literals occupy a
//! whole word flagged by bit 15.

pub mod bit_shifter;
pub mod chunker;
pub mod decode;
pub mod differential;
pub mod encode;
pub mod literal;
pub mod repository;
pub mod run_length;
pub mod table;

pub use decode::{decode, decode_with_shift};
pub use encode::{encode, encode_with_shift};

/// Run-length digits: tag `00`, 3-bit base-8 digit.
pub type RunCode = run_length::RunLength<0b0000_0000, 3>;

/// Signed delta against the previous sample: tag `1`, 4-bit biased value.
#[cfg(not(feature = "table-first"))]
pub type DiffCode = differential::Differential<0b0001_0000, 4>;
/// Recent-sample cache reference: tag `01`, 3-bit hash index.
#[cfg(not(feature = "table-first"))]
pub type TableCode = table::Table<0b0000_1000, 3>;

/// Signed delta against the previous sample: tag `01`, 3-bit biased value.
#[cfg(feature = "table-first")]
pub type DiffCode = differential::Differential<0b0000_1000, 3>;
/// Recent-sample cache reference: tag `1`, 4-bit hash index.
#[cfg(feature = "table-first")]
pub type TableCode = table::Table<0b0001_0000, 4>;

/// Start value of the `previous` register on both sides. Downshifted samples
/// never exceed 0x7FFF, so the first sample of a stream cannot extend a run.
pub const INITIAL_PREVIOUS: u16 = 0xFFFF;
