//! Library half of the `crafty` binary, so command implementations can be
//! exercised against a mock gateway.

pub mod commands;
