//! Pluggable pieces of the fuzz loop.
pub mod ddmin;
