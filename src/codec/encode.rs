//! The encoding state machine.
//!
//! Per sample, strategy priority is fixed: extend a run if the sample equals
//! the previous one, otherwise flush any pending run and try the delta, then
//! the cache, then fall back to a raw literal (which also refreshes the
//! cache slot). A run is flushed relative to the `previous` that preceded
//! it, so `previous` is deliberately not updated when the run ends.

use log::debug;

use super::bit_shifter::BitShifter;
use super::repository::Repository;
use super::{literal, DiffCode, RunCode, TableCode, INITIAL_PREVIOUS};

#[derive(Default)]
struct StrategyTally {
    run: u64,
    diff: u64,
    table: u64,
    literal: u64,
}

/// Encodes `samples` into codeword containers, discarding each sample's LSB.
///
/// The output is never longer than the input: every sample costs at most one
/// word, and runs and packed triples only shrink that.
pub fn encode(samples: &[u16]) -> Vec<u16> {
    encode_with_shift::<1>(samples)
}

/// [`encode`] with a custom downshift. The shift is not recorded in the
/// stream; callers using a shift other than 1 must carry it in their own
/// framing and decode with [`super::decode_with_shift`] to match.
pub fn encode_with_shift<const SHIFT: u32>(samples: &[u16]) -> Vec<u16> {
    let mut table = TableCode::new();
    let mut repo = Repository::with_capacity(samples.len());
    let mut previous = INITIAL_PREVIOUS;
    let mut run: u64 = 0;
    let mut tally = StrategyTally::default();

    for &sample in samples {
        let current = BitShifter::<SHIFT>::down(sample);

        if current == previous {
            run += 1;
            continue;
        }

        if run != 0 {
            for digit in RunCode::encode(run) {
                repo.push_sub(digit);
            }
            tally.run += run;
            run = 0;
        }

        let delta = DiffCode::delta(previous, current);
        if DiffCode::in_range(delta) {
            repo.push_sub(DiffCode::encode(delta));
            previous = current;
            tally.diff += 1;
            continue;
        }

        let hash = table.hash(current);
        if table.refer(hash) == current {
            repo.push_sub(TableCode::code(hash));
            previous = current;
            tally.table += 1;
            continue;
        }

        table.insert(hash, current);
        repo.push_word(literal::pack(current));
        previous = current;
        tally.literal += 1;
    }

    if run != 0 {
        for digit in RunCode::encode(run) {
            repo.push_sub(digit);
        }
        tally.run += run;
    }

    let words = repo.into_words();
    debug!(
        "encoded {} samples into {} words (run {}, diff {}, table {}, literal {})",
        samples.len(),
        words.len(),
        tally.run,
        tally.diff,
        tally.table,
        tally.literal
    );
    words
}
