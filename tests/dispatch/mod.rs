//! Dispatcher tests
//!
//! End-to-end resolution through the dispatcher:
//! - Routing to the glob and plain-file resolvers
//! - Inline `config://` directives
//! - Cycle rejection and graph dumps
//! - Continuous (nested) imports through an evaluator
//! - Missing-file fallback and aliases

pub mod tests_config;
pub mod tests_continuous;
pub mod tests_cycles;
pub mod tests_fallback;
