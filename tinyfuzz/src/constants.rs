//! Constants shared by the config resolver and the fuzz loop.

/// Upper bound (exclusive) on the length of inputs generated in
/// variable-length mode. Every iteration draws a length in `[0, VARIABLE_MAX_LEN)`.
pub const VARIABLE_MAX_LEN: usize = 2048;

/// Number of iterations run when the caller passes no config, or a config
/// whose `iterations` is zero.
pub const DEFAULT_ITERATIONS: usize = 1000;
