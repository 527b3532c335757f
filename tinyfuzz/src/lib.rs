//! A small randomized-testing harness for predicates over byte sequences.
//!
//! `tinyfuzz` repeatedly feeds pseudorandom inputs to a caller-supplied
//! target. On the first input the target rejects, it stops and reports that
//! input. When input lengths vary, the failing input is first shrunk with
//! delta debugging so the report is as small as the minimizer can make it.
//!
//! There is no coverage feedback and no corpus: this is meant to be dropped
//! into an ordinary `#[test]`.
//!
//! ## Getting Started
//!
//! ```
//! use tinyfuzz::{Config, fuzz};
//!
//! // Reversing twice must give back the original bytes.
//! fn reverse_twice_is_identity(input: &mut [u8]) -> bool {
//!     let original = input.to_vec();
//!     input.reverse();
//!     input.reverse();
//!     input[..] == original[..]
//! }
//!
//! // Fixed-length inputs of 8 bytes, 500 iterations.
//! assert!(fuzz(reverse_twice_is_identity, Some(Config::new(8, 500))).is_ok());
//! ```
//!
//! For deterministic runs, custom entropy sources, custom minimizers or
//! logging, build a [`fuzzer::Fuzzer`] with [`fuzzer::FuzzerBuilder`]:
//!
//! ```
//! use tinyfuzz::fuzzer::FuzzerBuilder;
//!
//! let mut fuzzer = FuzzerBuilder::new().iterations(100).with_seed(1).build();
//! let err = fuzzer
//!     .run(&mut |input: &mut [u8]| input.len() < 3)
//!     .unwrap_err();
//! assert_eq!(err.input.len(), 3);
//! ```
#[macro_use]
pub extern crate slog;

pub mod constants;
pub mod custom;
pub mod error;
pub mod fuzzer;
pub mod orchestrator;
pub mod util;

pub use custom::ddmin::{Ddmin, Minimizer, Verdict};
pub use error::FuzzError;
pub use fuzzer::{Config, Fuzzer, FuzzerBuilder};
pub use orchestrator::{FuzzTarget, fuzz};

// re-export the entropy crate used in the public API; `slog` is re-exported above
pub use rand;
