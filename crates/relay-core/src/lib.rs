//! Core library for relay: the harness contract, the built-in harnesses,
//! and the single-task orchestrator that drives them.

pub mod harness;
pub mod orchestrator;
