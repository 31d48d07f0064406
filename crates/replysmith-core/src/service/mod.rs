//! Application services built on top of the ports.

mod generation;

pub use generation::GenerationService;
