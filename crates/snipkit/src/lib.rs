//! snipkit - Small stateless utilities
//!
//! This crate provides functionality to:
//! - Transform, query and partition slices (flatten, set operations, windows)
//! - Transform and inspect strings (casing, anagrams, tokenization, markup stripping)
//! - Aggregate, round, sample and format numbers
//! - Compare and measure wall-clock dates
//! - Drive a DOM-like UI host through the [`DomHost`] capability

pub mod constants;
pub mod domain;
pub mod infra;

// Re-export commonly used types
pub use constants::*;
pub use domain::array::Nested;
pub use domain::value::{Kind, Truthiness, Value};
pub use infra::clock::{Clock, FixedClock, SystemClock};
pub use infra::dom::DomHost;
pub use infra::locale::{BasicCurrencyFormatter, CurrencyFormatter};
pub use infra::memory_dom::MemoryDom;
