pub mod config;
pub mod error;
pub mod geo;
pub mod result;
pub mod rules;
pub mod session;
pub mod solver;
pub mod synth;
pub mod trace;
// cmd and reports are binary modules (declared in main.rs), not part of
// the library surface.
