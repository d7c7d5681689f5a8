//! Content-safety guardrail evaluation.
//!
//! The evaluator is a pure function of its inputs: no network, no file
//! access, no shared state. Mode is selected per call, so one process can
//! serve strict and lenient callers concurrently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod evaluator;
mod policy;

pub use evaluator::{LENGTH_RULE, enforce, evaluate};
pub use policy::{LengthMode, LengthPolicy};
