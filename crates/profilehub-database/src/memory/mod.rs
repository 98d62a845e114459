//! Process-local store implementations.
//!
//! Used by the `memory` database backend and throughout the test suites.

pub mod profile;
pub mod share_link;

pub use profile::MemoryProfileStore;
pub use share_link::MemoryShareLinkStore;
