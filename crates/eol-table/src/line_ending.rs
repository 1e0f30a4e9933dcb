//! Line-break tokenization and the three-valued line-ending classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single line break found in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Break {
    /// A bare `\n`.
    Lf,
    /// A `\r\n` pair.
    CrLf,
}

/// The line-ending class of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
    Mixed,
}

impl LineEnding {
    /// Every class, in the order used for record keys and file names.
    pub const ALL: [LineEnding; 3] = [LineEnding::Lf, LineEnding::Crlf, LineEnding::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "lf",
            LineEnding::Crlf => "crlf",
            LineEnding::Mixed => "mixed",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan `content` left to right and return one token per line break.
///
/// `\r\n` is consumed as a single [`Break::CrLf`]; a `\n` not preceded by
/// `\r` is a [`Break::Lf`]; a lone `\r` is ordinary content.
pub fn line_breaks(content: impl AsRef<[u8]>) -> Vec<Break> {
    let content = content.as_ref();
    let mut breaks = Vec::new();
    let mut i = 0;
    while i < content.len() {
        match content[i] {
            b'\n' => breaks.push(Break::Lf),
            b'\r' if content.get(i + 1) == Some(&b'\n') => {
                breaks.push(Break::CrLf);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    breaks
}

/// Reduce a token sequence to its class.
///
/// Returns `None` for an empty sequence: content without any line break has
/// no line-ending class.
pub fn classify(breaks: &[Break]) -> Option<LineEnding> {
    let first = *breaks.first()?;
    if breaks.iter().all(|&b| b == first) {
        Some(match first {
            Break::Lf => LineEnding::Lf,
            Break::CrLf => LineEnding::Crlf,
        })
    } else {
        Some(LineEnding::Mixed)
    }
}

/// Tokenize and classify in one step.
pub fn classify_content(content: impl AsRef<[u8]>) -> Option<LineEnding> {
    classify(&line_breaks(content))
}

/// Where each authored line-ending class ended up after one observation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    pub lf: LineEnding,
    pub crlf: LineEnding,
    pub mixed: LineEnding,
}

impl Transition {
    /// The transition that leaves every class unchanged.
    pub const IDENTITY: Transition = Transition {
        lf: LineEnding::Lf,
        crlf: LineEnding::Crlf,
        mixed: LineEnding::Mixed,
    };

    /// Build a transition by observing each authored class in turn.
    ///
    /// Observation stops at the first error.
    pub fn try_from_fn<E>(
        mut observe: impl FnMut(LineEnding) -> Result<LineEnding, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            lf: observe(LineEnding::Lf)?,
            crlf: observe(LineEnding::Crlf)?,
            mixed: observe(LineEnding::Mixed)?,
        })
    }

    /// The observed class for content authored as `from`.
    pub fn get(&self, from: LineEnding) -> LineEnding {
        match from {
            LineEnding::Lf => self.lf,
            LineEnding::Crlf => self.crlf,
            LineEnding::Mixed => self.mixed,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lf→{} crlf→{} mixed→{}",
            self.lf, self.crlf, self.mixed
        )
    }
}
