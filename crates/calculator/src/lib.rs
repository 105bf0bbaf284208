//! # Dilution Calculator
//!
//! This crate turns a founder's starting ownership and an ordered list of funding
//! rounds into a round-by-round dilution report.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of input forms, terminals or files. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** `DilutionCalculator` holds no state between calls.
//!   It takes fully-formed input and returns a `DilutionReport` value, so it can be
//!   shared freely between callers.
//!
//! ## Public API
//!
//! - `DilutionCalculator`: the calculation entry point.
//! - `DilutionReport` / `DilutionRecord`: the ordered per-round output.
//! - `CalculatorError`: the arithmetic failures that abort a calculation.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::DilutionCalculator;
pub use error::CalculatorError;
pub use report::{DilutionRecord, DilutionReport};
