//! Parlay construction: correlation rules and the assembler

pub mod assembler;
pub mod correlation;

pub use assembler::{assemble, ParlayRequest, ParlayResult, ParlayVerdict};
pub use correlation::{analyze, CorrelationKind, CorrelationSeverity, CorrelationWarning};
