pub mod itinerary;
pub mod mcp;
pub mod serve;

#[cfg(test)]
#[path = "itinerary_test.rs"]
mod itinerary_test;

#[cfg(test)]
#[path = "serve_test.rs"]
mod serve_test;
