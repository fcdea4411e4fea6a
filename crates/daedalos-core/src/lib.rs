//! Daedalos Core - Shared functionality for Daedalos tools
//!
//! Currently just the standard directory layout every tool resolves its
//! config and data files against.

pub mod paths;

pub use paths::Paths;
