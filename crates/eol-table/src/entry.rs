//! The published record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigurationTuple;
use crate::line_ending::Transition;

/// A named observation point of the probe script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Working tree right after checkout.
    Clone,
    /// Files with no history at all, committed.
    CommitNew,
    /// Text prepended to a committed file, without new line breaks.
    CommitPrependSimpleText,
    /// A fixture that never held a line break, rewritten and committed.
    CommitModifySimpleFile,
    /// A fixture committed with CRLF, rewritten and committed.
    CommitModifyCrLfFile,
    /// A fixture committed with LF, rewritten and committed.
    CommitModifyLfFile,
    /// A fixture committed with mixed endings, rewritten and committed.
    CommitModifyMixedFile,
    /// A fixture never touched, read after the probe commit.
    Unmodified,
    /// The historical blob, read before anything was committed.
    Show,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Clone,
        Step::CommitNew,
        Step::CommitPrependSimpleText,
        Step::CommitModifySimpleFile,
        Step::CommitModifyCrLfFile,
        Step::CommitModifyLfFile,
        Step::CommitModifyMixedFile,
        Step::Unmodified,
        Step::Show,
    ];

    /// The key used for this step in the published table.
    pub fn name(self) -> &'static str {
        match self {
            Step::Clone => "clone",
            Step::CommitNew => "commitNew",
            Step::CommitPrependSimpleText => "commitPrependSimpleText",
            Step::CommitModifySimpleFile => "commitModifySimpleFile",
            Step::CommitModifyCrLfFile => "commitModifyCrLfFile",
            Step::CommitModifyLfFile => "commitModifyLfFile",
            Step::CommitModifyMixedFile => "commitModifyMixedFile",
            Step::Unmodified => "unmodified",
            Step::Show => "show",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observed transitions for every step of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Mapping {
    pub clone: Transition,
    pub commit_new: Transition,
    pub commit_prepend_simple_text: Transition,
    pub commit_modify_simple_file: Transition,
    pub commit_modify_cr_lf_file: Transition,
    pub commit_modify_lf_file: Transition,
    pub commit_modify_mixed_file: Transition,
    pub unmodified: Transition,
    pub show: Transition,
}

impl Mapping {
    pub fn get(&self, step: Step) -> &Transition {
        match step {
            Step::Clone => &self.clone,
            Step::CommitNew => &self.commit_new,
            Step::CommitPrependSimpleText => &self.commit_prepend_simple_text,
            Step::CommitModifySimpleFile => &self.commit_modify_simple_file,
            Step::CommitModifyCrLfFile => &self.commit_modify_cr_lf_file,
            Step::CommitModifyLfFile => &self.commit_modify_lf_file,
            Step::CommitModifyMixedFile => &self.commit_modify_mixed_file,
            Step::Unmodified => &self.unmodified,
            Step::Show => &self.show,
        }
    }

    /// Every step with its transition, in [`Step::ALL`] order.
    pub fn steps(&self) -> impl Iterator<Item = (Step, &Transition)> + '_ {
        Step::ALL.into_iter().map(move |step| (step, self.get(step)))
    }
}

/// One row of the published table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub config: ConfigurationTuple,
    pub mapping: Mapping,
}

/// Observed transitions of the exploration probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExploreMapping {
    pub checkout: Transition,
    pub checkin: Transition,
    pub checkin_new: Transition,
}

/// One row of the exploration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreEntry {
    pub config: ConfigurationTuple,
    pub mapping: ExploreMapping,
}
