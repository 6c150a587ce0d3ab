//! Post-decode consistency checks
//!
//! Decoding only guarantees that a container is structurally sound. The
//! checks here are pure functions over a finished aggregate for callers that
//! want every stored index proven in range before resolving it.

pub mod references;

pub use references::check_references;
