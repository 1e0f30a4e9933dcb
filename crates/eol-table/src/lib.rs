//! Data model of the git line-ending matrix.
//!
//! Everything in this crate is pure: classifying byte content by its line
//! breaks, enumerating the configuration space, the shape of the published
//! lookup table, and the lookup/selection logic that consumes it. Running
//! git lives in `eol-probe`.

pub mod config;
pub mod entry;
mod error;
pub mod invariants;
pub mod json;
pub mod line_ending;
pub mod matrix;
pub mod selection;
pub mod table;

pub use config::{Axis, ConfigurationTuple, CoreAutocrlf, CoreEol, Eol, Os, Text};
pub use entry::{ExploreEntry, ExploreMapping, Mapping, ResultEntry, Step};
pub use error::TableError;
pub use line_ending::{classify, line_breaks, Break, LineEnding, Transition};
pub use matrix::{factorize, Axes};
pub use selection::{Selection, SelectionState};
pub use table::Table;

pub type Result<T> = std::result::Result<T, TableError>;
