//! Shared test helpers: fixture trees and a minimal evaluator.

pub mod evaluator;
pub mod fixtures;
