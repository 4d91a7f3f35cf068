//! Domain layer - Pure computational logic
//!
//! This module contains pure functions without host dependencies.
//! Randomized functions take the random source as an argument.

pub mod array;
pub mod date;
pub mod number;
pub mod predicate;
pub mod random;
pub mod text;
pub mod value;
