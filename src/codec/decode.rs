//! The decoding state machine.
//!
//! Containers are classified by bit 15; packed triples are split and their
//! sub-codewords queued. Run digits accumulate until any other sub-codeword
//! (or a literal) arrives, at which point the run expands into copies of
//! `previous`. Literal consumption refreshes the cache exactly as literal
//! emission did on the encode side, keeping the two tables identical at
//! every point in the stream.

use std::collections::VecDeque;

use log::trace;

use crate::{Qoi15Error, Result};

use super::bit_shifter::BitShifter;
use super::{chunker, literal, DiffCode, RunCode, TableCode, INITIAL_PREVIOUS};

/// Decodes `words` into exactly `output_len` samples, each with a zero LSB.
///
/// The compressed stream does not carry its own length, so the caller
/// supplies the sample count. Producing fewer samples than requested is
/// [`Qoi15Error::UnexpectedEnd`]; producing more is
/// [`Qoi15Error::TrailingData`]. Zero-valued run digits padding the final
/// packed container expand to nothing and are the only ignored residue.
pub fn decode(words: &[u16], output_len: usize) -> Result<Vec<u16>> {
    decode_with_shift::<1>(words, output_len)
}

/// [`decode`] with a custom upshift; must match the shift used to encode.
pub fn decode_with_shift<const SHIFT: u32>(words: &[u16], output_len: usize) -> Result<Vec<u16>> {
    let mut table = TableCode::new();
    let mut out = Vec::with_capacity(output_len);
    let mut previous = INITIAL_PREVIOUS;
    let mut leftovers: VecDeque<u8> = VecDeque::new();
    let mut run_digits: Vec<u8> = Vec::new();
    let mut input = words.iter();

    loop {
        if let Some(sub) = leftovers.pop_front() {
            if RunCode::matches(sub) {
                run_digits.push(sub);
                continue;
            }

            expand_run::<SHIFT>(&mut run_digits, previous, &mut out, output_len)?;

            let current = if DiffCode::matches(sub) {
                DiffCode::apply(previous, DiffCode::decode(sub))
            } else {
                table.refer(TableCode::index(sub))
            };
            emit::<SHIFT>(&mut out, current, output_len)?;
            previous = current;
            continue;
        }

        let Some(&word) = input.next() else { break };

        if literal::is_literal(word) {
            expand_run::<SHIFT>(&mut run_digits, previous, &mut out, output_len)?;

            let current = literal::unpack(word);
            let hash = table.hash(current);
            table.insert(hash, current);
            emit::<SHIFT>(&mut out, current, output_len)?;
            previous = current;
        } else {
            let (first, second, third) = chunker::split(word);
            leftovers.extend([first, second, third]);
        }
    }

    expand_run::<SHIFT>(&mut run_digits, previous, &mut out, output_len)?;

    if out.len() != output_len {
        return Err(Qoi15Error::UnexpectedEnd {
            expected: output_len,
            actual: out.len(),
        });
    }

    trace!("decoded {} words into {} samples", words.len(), out.len());
    Ok(out)
}

fn emit<const SHIFT: u32>(out: &mut Vec<u16>, sample: u16, output_len: usize) -> Result<()> {
    if out.len() == output_len {
        return Err(Qoi15Error::TrailingData {
            expected: output_len,
        });
    }
    out.push(BitShifter::<SHIFT>::up(sample));
    Ok(())
}

fn expand_run<const SHIFT: u32>(
    digits: &mut Vec<u8>,
    previous: u16,
    out: &mut Vec<u16>,
    output_len: usize,
) -> Result<()> {
    if digits.is_empty() {
        return Ok(());
    }

    let length = RunCode::decode(digits);
    digits.clear();
    for _ in 0..length {
        emit::<SHIFT>(out, previous, output_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{encode, encode_with_shift};
    use super::*;

    #[test]
    fn empty_stream_decodes_to_nothing() {
        assert!(decode(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn short_stream_is_an_error() {
        let err = decode(&[], 3).unwrap_err();
        assert!(matches!(
            err,
            Qoi15Error::UnexpectedEnd {
                expected: 3,
                actual: 0
            }
        ));
    }

    #[test]
    fn excess_samples_are_an_error() {
        let words = encode(&[0x0100, 0x0200, 0x0300]);
        let err = decode(&words, 2).unwrap_err();
        assert!(matches!(err, Qoi15Error::TrailingData { expected: 2 }));
    }

    #[test]
    fn literal_roundtrip() {
        let words = encode(&[0x1234]);
        assert_eq!(vec![0x1234], decode(&words, 1).unwrap());
    }

    #[test]
    fn run_expands_against_previous() {
        let samples = [0x0400u16; 20];
        let words = encode(&samples);
        assert_eq!(samples.to_vec(), decode(&words, samples.len()).unwrap());
    }

    #[test]
    fn padding_digits_expand_to_nothing() {
        // A lone delta leaves two zero-padded fields in its packed word;
        // they must not manufacture samples.
        let samples = [0x0100u16, 0x0104];
        let words = encode(&samples);
        assert_eq!(2, words.len());
        assert_eq!(samples.to_vec(), decode(&words, samples.len()).unwrap());
    }

    #[test]
    fn custom_shift_roundtrip() {
        let samples: Vec<u16> = (0..256u16).map(|i| (i * 64) & 0xFFC0).collect();
        let words = encode_with_shift::<6>(&samples);
        assert_eq!(samples, decode_with_shift::<6>(&words, samples.len()).unwrap());
    }
}
