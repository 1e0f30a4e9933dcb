//! Cross-checks every well-formed table satisfies.
//!
//! These are properties of git's behavior, not of this crate's code, so a
//! violation points at an unexpected git version or a broken fixture.

use std::fmt;

use crate::config::ConfigurationTuple;
use crate::entry::{Mapping, ResultEntry, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Raw committed bytes never change on the way out.
    ShowIsIdentity,
    /// A CRLF history and a mixed history lead to the same commit result.
    CrLfFileMatchesMixedFile,
    /// Prepending plain text never renormalizes the rest of the file.
    UnmodifiedMatchesPrepend,
    /// A file without CRLF history behaves like a new file.
    SimpleFileMatchesNew,
    /// A file with LF history behaves like a new file.
    LfFileMatchesNew,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::ShowIsIdentity,
        Rule::CrLfFileMatchesMixedFile,
        Rule::UnmodifiedMatchesPrepend,
        Rule::SimpleFileMatchesNew,
        Rule::LfFileMatchesNew,
    ];

    pub fn holds(self, mapping: &Mapping) -> bool {
        match self {
            Rule::ShowIsIdentity => mapping.show.is_identity(),
            Rule::CrLfFileMatchesMixedFile => same(mapping, Step::CommitModifyCrLfFile, Step::CommitModifyMixedFile),
            Rule::UnmodifiedMatchesPrepend => same(mapping, Step::Unmodified, Step::CommitPrependSimpleText),
            Rule::SimpleFileMatchesNew => same(mapping, Step::CommitModifySimpleFile, Step::CommitNew),
            Rule::LfFileMatchesNew => same(mapping, Step::CommitModifyLfFile, Step::CommitNew),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rule::ShowIsIdentity => "show must be the identity",
            Rule::CrLfFileMatchesMixedFile => "commitModifyCrLfFile must equal commitModifyMixedFile",
            Rule::UnmodifiedMatchesPrepend => "unmodified must equal commitPrependSimpleText",
            Rule::SimpleFileMatchesNew => "commitModifySimpleFile must equal commitNew",
            Rule::LfFileMatchesNew => "commitModifyLfFile must equal commitNew",
        }
    }
}

fn same(mapping: &Mapping, a: Step, b: Step) -> bool {
    mapping.get(a) == mapping.get(b)
}

/// A rule that does not hold for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub config: ConfigurationTuple,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rule.description(), self.config)
    }
}

/// Check every rule against every entry.
pub fn check_invariants(entries: &[ResultEntry]) -> Vec<Violation> {
    entries
        .iter()
        .flat_map(|entry| {
            Rule::ALL
                .into_iter()
                .filter(|rule| !rule.holds(&entry.mapping))
                .map(|rule| Violation {
                    rule,
                    config: entry.config,
                })
        })
        .collect()
}
