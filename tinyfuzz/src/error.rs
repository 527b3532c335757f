use thiserror::Error;

/// A defect found by the fuzzer.
///
/// Produced at most once per run. In fixed-length mode `input` is exactly
/// the candidate the target rejected; in variable-length mode it is the
/// minimizer's output, which still fails and is no longer than the original.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tinyfuzz: failing input: {input:?}")]
pub struct FuzzError {
    /// The (possibly minimized) failing input.
    pub input: Vec<u8>,
    /// Zero-based index of the iteration on which the target first failed.
    pub iteration: usize,
    /// Length of the candidate that first failed, before minimization.
    pub original_len: usize,
}

impl FuzzError {
    /// The failing input as a slice.
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// Consumes the error, returning the failing input.
    pub fn into_input(self) -> Vec<u8> {
        self.input
    }

    /// True if the reported input is shorter than the candidate that first failed.
    pub fn was_minimized(&self) -> bool {
        self.input.len() < self.original_len
    }
}
