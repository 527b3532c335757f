//! Delta-debugging minimization of failing inputs.
//!
//! The fuzz loop only depends on the [`Minimizer`] trait. [`Ddmin`] is the
//! default implementation, a byte-level version of Zeller's `ddmin`.

use std::ops::Range;

/// Outcome of running the oracle on a candidate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl From<bool> for Verdict {
    /// Maps a target's verdict: `true` (acceptable) is `Pass`, `false` is `Fail`.
    fn from(ok: bool) -> Self {
        if ok { Verdict::Pass } else { Verdict::Fail }
    }
}

/// Shrinks a failing input while keeping it failing.
///
/// Implementations must return a sequence for which `oracle` reports
/// [`Verdict::Fail`] and that is no longer than `initial`. `initial` itself
/// is known to fail.
pub trait Minimizer {
    fn minimize(
        &mut self,
        initial: Vec<u8>,
        oracle: &mut dyn FnMut(&[u8]) -> Verdict,
    ) -> Vec<u8>;
}

/// Zeller's `ddmin` over bytes.
///
/// The result is 1-minimal: removing any single byte from it makes the
/// oracle pass. A single remaining byte is checked against the empty input. That is a local minimum of this search, not a guarantee that
/// no smaller failing input exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ddmin;

impl Minimizer for Ddmin {
    fn minimize(
        &mut self,
        initial: Vec<u8>,
        oracle: &mut dyn FnMut(&[u8]) -> Verdict,
    ) -> Vec<u8> {
        ddmin(initial, oracle)
    }
}

fn ddmin(mut data: Vec<u8>, oracle: &mut dyn FnMut(&[u8]) -> Verdict) -> Vec<u8> {
    let mut granularity = 2;

    while data.len() >= 2 {
        granularity = granularity.min(data.len());
        let chunks = split(data.len(), granularity);

        // Reduce to subset.
        if let Some(chunk) = chunks
            .iter()
            .find(|chunk| oracle(&data[(*chunk).clone()]) == Verdict::Fail)
        {
            data = data[chunk.clone()].to_vec();
            granularity = 2;
            continue;
        }

        // Reduce to complement. With two chunks the complements are the subsets.
        if granularity > 2 {
            let mut complement = Vec::with_capacity(data.len());
            let reduced = chunks.iter().any(|chunk| {
                complement.clear();
                complement.extend_from_slice(&data[..chunk.start]);
                complement.extend_from_slice(&data[chunk.end..]);
                oracle(&complement) == Verdict::Fail
            });
            if reduced {
                data = complement;
                granularity = (granularity - 1).max(2);
                continue;
            }
        }

        if granularity == data.len() {
            break;
        }
        granularity = (granularity * 2).min(data.len());
    }

    if data.len() == 1 && oracle(&[]) == Verdict::Fail {
        data.clear();
    }
    data
}

/// Splits `0..len` into `n` contiguous, non-empty ranges of near-equal size.
fn split(len: usize, n: usize) -> Vec<Range<usize>> {
    (0..n).map(|i| (i * len / n)..((i + 1) * len / n)).collect()
}
