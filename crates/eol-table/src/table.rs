//! Lookup over one or more published tables.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{Axis, ConfigurationTuple, Os};
use crate::entry::{Mapping, ResultEntry};
use crate::selection::Selection;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<ResultEntry>,
}

impl Table {
    pub fn new(entries: Vec<ResultEntry>) -> Self {
        Self { entries }
    }

    /// Load a table written by a probe run.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(crate::json::read_json(path)?))
    }

    /// Concatenate per-platform tables, tagging each entry with its OS.
    pub fn merge(sources: impl IntoIterator<Item = (Os, Vec<ResultEntry>)>) -> Self {
        let entries = sources
            .into_iter()
            .flat_map(|(os, entries)| {
                entries.into_iter().map(move |mut entry| {
                    entry.config.os = Some(os);
                    entry
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry with exactly this configuration.
    pub fn find(&self, config: &ConfigurationTuple) -> Option<&ResultEntry> {
        self.entries.iter().find(|entry| entry.config == *config)
    }

    /// The entry the selection points at.
    pub fn selected(&self, selection: &Selection) -> Option<&ResultEntry> {
        self.entries
            .iter()
            .find(|entry| selection.agrees_with(&entry.config, None))
    }

    /// Whether changing `axis` alone can change the outcome.
    ///
    /// Looks at every entry agreeing with the selection on all other axes and
    /// reports true when they carry more than one distinct mapping.
    pub fn axis_matters(&self, axis: Axis, selection: &Selection) -> bool {
        let distinct: HashSet<&Mapping> = self
            .entries
            .iter()
            .filter(|entry| selection.agrees_with(&entry.config, Some(axis)))
            .map(|entry| &entry.mapping)
            .collect();
        distinct.len() > 1
    }
}
