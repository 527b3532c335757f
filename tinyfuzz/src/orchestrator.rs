use rand::Rng;
use rand_core::RngCore;

use crate::custom::ddmin::{Minimizer, Verdict};
use crate::error::FuzzError;
use crate::fuzzer::{Config, Fuzzer, FuzzerBuilder, LengthMode};
use crate::util::fill_buffer;

/// The code under test.
///
/// `check` returns `true` when `input` is acceptable and `false` when it
/// exposes a defect. The input is a private working copy, so the target may
/// consume or mutate it freely. Panics raised by the target are not caught.
///
/// Implemented for every `FnMut(&mut [u8]) -> bool`; stateful targets can
/// implement it on their own types.
pub trait FuzzTarget {
    fn check(&mut self, input: &mut [u8]) -> bool;
}

impl<F> FuzzTarget for F
where
    F: FnMut(&mut [u8]) -> bool,
{
    fn check(&mut self, input: &mut [u8]) -> bool {
        self(input)
    }
}

impl<R, M> Fuzzer<R, M>
where
    R: RngCore,
    M: Minimizer,
{
    /// Runs the fuzz loop against `target`.
    ///
    /// Returns `Ok(())` when the whole iteration budget passes, or the first
    /// defect found. Iteration stops at the first failure. In variable-length
    /// mode the failing input is minimized before it is returned, with every
    /// minimization trial going to this same `target`.
    pub fn run<T>(&mut self, target: &mut T) -> Result<(), FuzzError>
    where
        T: FuzzTarget + ?Sized,
    {
        let config = self.config;
        let buffer_len = config.buffer_len();

        info!(self.logger, "starting fuzz run";
            "mode" => ?config.mode,
            "iterations" => config.iterations,
            "buffer_len" => buffer_len);

        // Reused across iterations to avoid allocating; contents carry no
        // meaning between iterations.
        let mut data = vec![0u8; buffer_len];
        let mut buf = vec![0u8; buffer_len];

        for iteration in 0..config.iterations {
            let len = match config.mode {
                LengthMode::Fixed(n) => n,
                LengthMode::Variable { max } => self.rng.random_range(0..max),
            };

            fill_buffer(&mut self.rng, &mut data, len);
            let working = &mut buf[..len];
            working.copy_from_slice(&data[..len]);

            if target.check(working) {
                continue;
            }

            debug!(self.logger, "target rejected input";
                "iteration" => iteration,
                "len" => len);

            let failing = data[..len].to_vec();
            return Err(match config.mode {
                LengthMode::Fixed(_) => FuzzError {
                    input: failing,
                    iteration,
                    original_len: len,
                },
                LengthMode::Variable { .. } => FuzzError {
                    input: self.minimize(target, failing),
                    iteration,
                    original_len: len,
                },
            });
        }

        info!(self.logger, "fuzz run passed"; "iterations" => config.iterations);
        Ok(())
    }

    /// Hands a failing input to the minimizer, adapting `target`'s boolean
    /// verdicts into [`Verdict`]s.
    fn minimize<T>(&mut self, target: &mut T, failing: Vec<u8>) -> Vec<u8>
    where
        T: FuzzTarget + ?Sized,
    {
        let original_len = failing.len();
        let fallback = failing.clone();
        let mut scratch = Vec::with_capacity(original_len);
        let mut trials = 0usize;

        let minimized = self.minimizer.minimize(failing, &mut |candidate: &[u8]| {
            trials += 1;
            scratch.clear();
            scratch.extend_from_slice(candidate);
            Verdict::from(target.check(&mut scratch))
        });

        if minimized.len() > original_len {
            warn!(self.logger, "minimizer returned a longer input, reporting the original";
                "original_len" => original_len,
                "returned_len" => minimized.len());
            return fallback;
        }

        info!(self.logger, "minimized failing input";
            "original_len" => original_len,
            "minimized_len" => minimized.len(),
            "trials" => trials);
        minimized
    }
}

/// Fuzzes `target` with an OS-seeded entropy source and the default minimizer.
///
/// `None` runs the default configuration: variable-length inputs below 2048
/// bytes for 1000 iterations.
///
/// ```
/// let result = tinyfuzz::fuzz(|input: &mut [u8]| !input.starts_with(b"\xde\xad"), None);
/// if let Err(err) = result {
///     assert!(err.input().starts_with(b"\xde\xad"));
/// }
/// ```
pub fn fuzz<T>(mut target: T, config: Option<Config>) -> Result<(), FuzzError>
where
    T: FuzzTarget,
{
    FuzzerBuilder::new()
        .with_config(config)
        .build()
        .run(&mut target)
}
