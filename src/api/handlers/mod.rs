//! HTTP handlers.

mod itineraries;
mod system;

#[cfg(test)]
mod system_test;

pub use itineraries::*;
pub use system::*;
