//! Probing git's line-ending behavior.
//!
//! A [`Session`] owns the workspace directory, the cache of golden
//! repositories, and the counter naming probe workspaces. Each probe clones
//! the golden repository matching its attributes, applies the local
//! settings, runs a fixed script of writes and commits, and classifies what
//! git hands back at every step.
//!
//! git itself is reached only through the [`Oracle`] trait.

mod error;
pub mod explore;
pub mod golden;
pub mod oracle;
pub mod probe;
pub mod repo;

pub use error::ProbeError;
pub use explore::run_exploration;
pub use golden::GoldenCache;
pub use oracle::{GitOracle, Oracle};
pub use probe::{run_probes, ProbeOptions, Session};
pub use repo::{Repo, WorkspaceAllocator};

pub type Result<T> = std::result::Result<T, ProbeError>;

/// The branch every golden repository is created on.
pub const INITIAL_BRANCH: &str = "main";
