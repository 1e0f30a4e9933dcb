//! Enumeration of the configuration space.

use crate::config::{Axis, ConfigurationTuple};
use crate::Result;

/// Cartesian product of named axes.
///
/// Each combination lists one `(key, value)` pair per axis, in axis order.
/// The first axis varies fastest. No axes yields a single empty combination;
/// an axis without values yields no combinations at all.
pub fn factorize<K: Clone, V: Clone>(axes: &[(K, Vec<V>)]) -> Vec<Vec<(K, V)>> {
    let mut results: Vec<Vec<(K, V)>> = vec![Vec::new()];
    for (key, values) in axes {
        let mut next = Vec::with_capacity(results.len() * values.len());
        for value in values {
            for partial in &results {
                let mut combination = Vec::with_capacity(partial.len() + 1);
                combination.extend(partial.iter().cloned());
                combination.push((key.clone(), value.clone()));
                next.push(combination);
            }
        }
        results = next;
    }
    results
}

/// The axes to probe and the values each may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axes {
    axes: Vec<(Axis, Vec<&'static str>)>,
}

impl Axes {
    pub fn new(axes: Vec<(Axis, Vec<&'static str>)>) -> Self {
        Self { axes }
    }

    /// The full probe space: five `text` values, three `eol`, two
    /// `core.autocrlf`, three `core.eol`.
    pub fn probe() -> Self {
        Self::new(vec![
            (Axis::Text, vec!["auto", "false", "true", "undefined", "binary"]),
            (Axis::Eol, vec!["crlf", "lf", "undefined"]),
            (Axis::CoreAutocrlf, vec!["false", "true"]),
            (Axis::CoreEol, vec!["crlf", "lf", "native"]),
        ])
    }

    /// The exploration space, which predates the `binary` text value.
    pub fn exploration() -> Self {
        Self::new(vec![
            (Axis::Text, vec!["auto", "false", "true", "undefined"]),
            (Axis::Eol, vec!["crlf", "lf", "undefined"]),
            (Axis::CoreAutocrlf, vec!["false", "true"]),
            (Axis::CoreEol, vec!["crlf", "lf", "native"]),
        ])
    }

    /// Number of tuples [`Axes::enumerate`] produces.
    pub fn size(&self) -> usize {
        self.axes.iter().map(|(_, values)| values.len()).product()
    }

    /// Every configuration tuple in the space, in [`factorize`] order.
    pub fn enumerate(&self) -> Result<Vec<ConfigurationTuple>> {
        factorize(&self.axes)
            .into_iter()
            .map(ConfigurationTuple::from_assignment)
            .collect()
    }
}
