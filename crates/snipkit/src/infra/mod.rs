//! Infrastructure layer - Host collaborators
//!
//! This module defines the capabilities the utilities need from their host
//! (UI tree, clock, locale formatting, timer) along with in-process implementations.

pub mod clock;
pub mod dom;
pub mod locale;
pub mod memory_dom;
pub mod timer;
