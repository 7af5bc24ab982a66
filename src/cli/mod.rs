//! Command implementations behind the `vanet` binary.

pub mod commands;
