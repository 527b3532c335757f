use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_core::RngCore;
use slog::{Discard, Logger};

use crate::constants::{DEFAULT_ITERATIONS, VARIABLE_MAX_LEN};
use crate::custom::ddmin::{Ddmin, Minimizer};

/// Caller-facing configuration for a fuzzing run.
///
/// Both fields use zero as "pick the default": a zero `length` selects
/// variable-length mode, a zero `iterations` selects [`DEFAULT_ITERATIONS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Length of every generated input, or `0` for variable-length inputs.
    pub length: usize,
    /// Number of iterations to fuzz, or `0` for the default.
    pub iterations: usize,
}

impl Config {
    pub fn new(length: usize, iterations: usize) -> Self {
        Self { length, iterations }
    }
}

/// How the length of each generated input is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    /// Every input has exactly this many bytes. Failing inputs are not minimized.
    Fixed(usize),
    /// Each input length is drawn uniformly from `[0, max)`. Failing inputs
    /// are handed to the minimizer.
    Variable { max: usize },
}

/// A [`Config`] with all defaults substituted. Immutable for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub mode: LengthMode,
    pub iterations: usize,
}

impl ResolvedConfig {
    /// Normalizes an optional caller config. Never rejects any input.
    pub fn resolve(config: Option<Config>) -> Self {
        let config = config.unwrap_or(Config {
            length: 0,
            iterations: DEFAULT_ITERATIONS,
        });

        let mode = match config.length {
            0 => LengthMode::Variable {
                max: VARIABLE_MAX_LEN,
            },
            n => LengthMode::Fixed(n),
        };
        let iterations = match config.iterations {
            0 => DEFAULT_ITERATIONS,
            n => n,
        };

        Self { mode, iterations }
    }

    /// Capacity the canonical and working buffers need for this run.
    pub fn buffer_len(&self) -> usize {
        match self.mode {
            LengthMode::Fixed(n) => n,
            LengthMode::Variable { max } => max,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.mode, LengthMode::Variable { .. })
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// Holds everything a fuzzing run needs: the resolved config, the entropy
/// source, the minimizer used in variable-length mode, and a logger.
///
/// The fuzz loop itself lives in [`crate::orchestrator`].
pub struct Fuzzer<R = StdRng, M = Ddmin> {
    pub(crate) config: ResolvedConfig,
    pub(crate) rng: R,
    pub(crate) minimizer: M,
    pub(crate) logger: Logger,
}

impl<R, M> Fuzzer<R, M>
where
    R: RngCore,
    M: Minimizer,
{
    /// The resolved config this fuzzer runs with.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Mutable access to the entropy source, e.g. to reseed between runs.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

/// Builder for [`Fuzzer`].
///
/// ```
/// use tinyfuzz::fuzzer::FuzzerBuilder;
///
/// let mut fuzzer = FuzzerBuilder::new()
///     .length(16)
///     .iterations(200)
///     .with_seed(7)
///     .build();
///
/// assert!(fuzzer.run(&mut |input: &mut [u8]| input.len() == 16).is_ok());
/// ```
pub struct FuzzerBuilder<R = StdRng, M = Ddmin> {
    config: Option<Config>,
    rng: R,
    minimizer: M,
    logger: Option<Logger>,
}

impl FuzzerBuilder {
    /// Starts a builder with no config, an OS-seeded [`StdRng`] and the [`Ddmin`] minimizer.
    pub fn new() -> Self {
        Self {
            config: None,
            rng: StdRng::from_os_rng(),
            minimizer: Ddmin,
            logger: None,
        }
    }
}

impl Default for FuzzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, M> FuzzerBuilder<R, M>
where
    R: RngCore,
    M: Minimizer,
{
    /// Replaces the whole config. Passing `None` restores the default run.
    pub fn with_config(mut self, config: Option<Config>) -> Self {
        self.config = config;
        self
    }

    /// Sets the input length, keeping any iterations set so far.
    pub fn length(mut self, length: usize) -> Self {
        self.config.get_or_insert_with(Config::default).length = length;
        self
    }

    /// Sets the iteration budget, keeping any length set so far.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.get_or_insert_with(Config::default).iterations = iterations;
        self
    }

    /// Uses a caller-supplied entropy source.
    pub fn with_rng<R2: RngCore>(self, rng: R2) -> FuzzerBuilder<R2, M> {
        FuzzerBuilder {
            config: self.config,
            rng,
            minimizer: self.minimizer,
            logger: self.logger,
        }
    }

    /// Shorthand for `with_rng(StdRng::seed_from_u64(seed))`.
    pub fn with_seed(self, seed: u64) -> FuzzerBuilder<StdRng, M> {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Uses a different minimizer for variable-length failures.
    pub fn with_minimizer<M2: Minimizer>(self, minimizer: M2) -> FuzzerBuilder<R, M2> {
        FuzzerBuilder {
            config: self.config,
            rng: self.rng,
            minimizer,
            logger: self.logger,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> Fuzzer<R, M> {
        Fuzzer {
            config: ResolvedConfig::resolve(self.config),
            rng: self.rng,
            minimizer: self.minimizer,
            logger: self
                .logger
                .unwrap_or_else(|| Logger::root(Discard, o!())),
        }
    }
}
