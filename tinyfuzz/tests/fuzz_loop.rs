use assert_matches::assert_matches;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use tinyfuzz::fuzzer::{Config, FuzzerBuilder};
use tinyfuzz::slog::{Discard, Logger, OwnedKV};
use tinyfuzz::{FuzzError, fuzz};

/// Entropy source that emits zeros for one chosen `fill_bytes` call and
/// defers to a seeded `StdRng` otherwise.
struct ZeroOnFill {
    inner: StdRng,
    fills: usize,
    zero_at: usize,
}

impl ZeroOnFill {
    fn new(seed: u64, zero_at: usize) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            fills: 0,
            zero_at,
        }
    }
}

impl RngCore for ZeroOnFill {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        if self.fills == self.zero_at {
            dst.fill(0);
        } else {
            self.inner.fill_bytes(dst);
        }
        self.fills += 1;
    }
}

fn byte_sum(input: &[u8]) -> u32 {
    input.iter().map(|&b| u32::from(b)).sum()
}

#[test]
fn all_zero_input_is_reported_verbatim_in_fixed_mode() {
    let mut fuzzer = FuzzerBuilder::new()
        .with_config(Some(Config::new(4, 10)))
        .with_rng(ZeroOnFill::new(99, 3))
        .build();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| input != [0u8; 4].as_slice())
        .unwrap_err();

    assert_eq!(err.input, vec![0, 0, 0, 0]);
    assert_eq!(err.iteration, 3);
    assert_eq!(err.to_string(), "tinyfuzz: failing input: [0, 0, 0, 0]");
}

#[test]
fn length_threshold_is_minimized_to_three_bytes() {
    let mut fuzzer = FuzzerBuilder::new()
        .with_config(Some(Config::new(0, 100)))
        .with_seed(2024)
        .build();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| input.len() < 3)
        .unwrap_err();

    assert_eq!(err.input.len(), 3);
    assert!(err.original_len >= 3);
}

#[test]
fn always_passing_target_reports_success() {
    let mut calls = 0;
    let mut fuzzer = FuzzerBuilder::new()
        .with_config(Some(Config::new(0, 5)))
        .with_seed(5)
        .build();

    let result = fuzzer.run(&mut |_: &mut [u8]| {
        calls += 1;
        true
    });

    assert_matches!(result, Ok(()));
    assert_eq!(calls, 5);
}

#[test]
fn fixed_mode_reports_the_exact_working_copy_and_stops() {
    let mut seen: Vec<Vec<u8>> = Vec::new();
    let mut fuzzer = FuzzerBuilder::new().length(16).iterations(10_000).with_seed(17).build();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| {
            seen.push(input.to_vec());
            input[0] != 0x7F
        })
        .unwrap_err();

    assert_eq!(seen.len(), err.iteration + 1);
    assert_eq!(err.input.len(), 16);
    assert_eq!(&err.input, seen.last().unwrap());
    assert_eq!(err.original_len, 16);
    assert!(!err.was_minimized());
}

#[test]
fn variable_mode_result_still_fails_and_is_not_longer() {
    let fails = |input: &[u8]| byte_sum(input) > 5000;
    let mut first_failing_len = None;
    let mut fuzzer = FuzzerBuilder::new().iterations(1000).with_seed(31).build();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| {
            let failed = fails(&*input);
            if failed && first_failing_len.is_none() {
                first_failing_len = Some(input.len());
            }
            !failed
        })
        .unwrap_err();

    assert!(fails(&err.input));
    assert_eq!(Some(err.original_len), first_failing_len);
    assert!(err.input.len() <= err.original_len);
    // A random failing input is far from 1-minimal, so ddmin always removes something.
    assert!(err.input.len() < err.original_len);
}

#[test]
fn target_mutation_never_leaks_into_later_candidates() {
    let record = |mutate: bool| {
        let mut seen: Vec<Vec<u8>> = Vec::new();
        let mut fuzzer = FuzzerBuilder::new().iterations(200).with_seed(77).build();
        let result = fuzzer.run(&mut |input: &mut [u8]| {
            seen.push(input.to_vec());
            if mutate {
                input.fill(0xFF);
                input.reverse();
            }
            true
        });
        assert_matches!(result, Ok(()));
        seen
    };

    assert_eq!(record(false), record(true));
}

#[test]
fn mutation_inside_a_failing_call_does_not_change_the_report() {
    let mut fuzzer = FuzzerBuilder::new().length(8).iterations(10).with_seed(4).build();
    let mut original = Vec::new();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| {
            original = input.to_vec();
            input.fill(0);
            false
        })
        .unwrap_err();

    assert_eq!(err.input, original);
}

#[test]
fn minimization_trials_get_private_copies() {
    let mut fuzzer = FuzzerBuilder::new().iterations(1000).with_seed(8).build();

    let err = fuzzer
        .run(&mut |input: &mut [u8]| {
            let ok = !input.contains(&0xAB);
            // Scribble over the candidate; the minimizer must not see this.
            input.fill(0xAB);
            ok
        })
        .unwrap_err();

    assert_eq!(err.input, vec![0xAB]);
}

#[test]
#[should_panic(expected = "target blew up")]
fn target_panics_propagate() {
    let mut fuzzer = FuzzerBuilder::new().length(1).iterations(3).with_seed(0).build();
    let _ = fuzzer.run(&mut |_: &mut [u8]| -> bool { panic!("target blew up") });
}

#[test]
fn caller_logger_through_reexported_slog() {
    let logger = Logger::root(Discard, OwnedKV(()));
    let mut fuzzer = FuzzerBuilder::new()
        .iterations(10)
        .with_seed(6)
        .with_logger(logger)
        .build();

    assert_matches!(fuzzer.run(&mut |_: &mut [u8]| true), Ok(()));
}

#[test]
fn free_function_reports_defects() {
    let result = fuzz(|input: &mut [u8]| input.len() != 2, Some(Config::new(2, 1)));
    assert_matches!(result, Err(FuzzError { ref input, iteration: 0, original_len: 2 }) if input.len() == 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn always_true_target_passes_every_config(
        length in 0usize..64,
        iterations in 0usize..40,
        seed in any::<u64>(),
    ) {
        let mut calls = 0usize;
        let mut fuzzer = FuzzerBuilder::new()
            .with_config(Some(Config::new(length, iterations)))
            .with_seed(seed)
            .build();
        let expected = fuzzer.config().iterations;

        let result = fuzzer.run(&mut |input: &mut [u8]| {
            calls += 1;
            length == 0 || input.len() == length
        });

        prop_assert!(result.is_ok());
        prop_assert_eq!(calls, expected);
    }
}
