//! The user's current pick of one value per axis.
//!
//! A [`Selection`] round-trips through a URL query string so a lookup can be
//! bookmarked; [`SelectionState`] adds change notification on top.

use url::form_urlencoded;

use crate::config::{Axis, ConfigurationTuple, CoreAutocrlf, CoreEol, Eol, Os, Text};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub os: Os,
    pub text: Text,
    pub eol: Eol,
    pub core_autocrlf: CoreAutocrlf,
    pub core_eol: CoreEol,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            os: Os::Unix,
            text: Text::Undefined,
            eol: Eol::Undefined,
            core_autocrlf: CoreAutocrlf::False,
            core_eol: CoreEol::Native,
        }
    }
}

impl Selection {
    /// Parse a query string such as `?os=windows&text=auto`.
    ///
    /// Axes not mentioned keep their default; unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut selection = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if let Ok(axis) = key.parse::<Axis>() {
                selection.set(axis, &value)?;
            }
        }
        Ok(selection)
    }

    /// Serialize every axis, in [`Axis::ALL`] order.
    pub fn to_query(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for axis in Axis::ALL {
            ser.append_pair(axis.name(), self.get(axis));
        }
        ser.finish()
    }

    pub fn get(&self, axis: Axis) -> &'static str {
        match axis {
            Axis::Os => self.os.as_str(),
            Axis::Text => self.text.as_str(),
            Axis::Eol => self.eol.as_str(),
            Axis::CoreAutocrlf => self.core_autocrlf.as_str(),
            Axis::CoreEol => self.core_eol.as_str(),
        }
    }

    /// Assign `value` to `axis`; the selection is untouched if it is invalid.
    pub fn set(&mut self, axis: Axis, value: &str) -> Result<()> {
        match axis {
            Axis::Os => self.os = value.parse()?,
            Axis::Text => self.text = value.parse()?,
            Axis::Eol => self.eol = value.parse()?,
            Axis::CoreAutocrlf => self.core_autocrlf = value.parse()?,
            Axis::CoreEol => self.core_eol = value.parse()?,
        }
        Ok(())
    }

    /// The configuration tuple this selection points at.
    pub fn config(&self) -> ConfigurationTuple {
        ConfigurationTuple::new(self.text, self.eol, self.core_autocrlf, self.core_eol)
            .with_os(self.os)
    }

    /// Whether `config` agrees with this selection on every axis but `skip`.
    ///
    /// A config without an OS tag agrees with any OS.
    pub fn agrees_with(&self, config: &ConfigurationTuple, skip: Option<Axis>) -> bool {
        Axis::ALL
            .into_iter()
            .filter(|&axis| Some(axis) != skip)
            .all(|axis| match config.value(axis) {
                Some(value) => value == self.get(axis),
                None => true,
            })
    }

    /// The `.gitattributes` content a user would write for this selection.
    pub fn gitattributes_content(&self) -> String {
        self.config().gitattributes()
    }

    /// The `git config` commands a user would run for this selection.
    pub fn git_config_commands(&self) -> String {
        self.config()
            .git_config_args()
            .iter()
            .map(|args| format!("git {}", args.join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

type Listener = Box<dyn FnMut(&Selection)>;

/// A selection plus the callbacks to run whenever it changes.
pub struct SelectionState {
    selection: Selection,
    listeners: Vec<Listener>,
}

impl SelectionState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            listeners: Vec::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Register `listener`; it sees every later successful [`SelectionState::set`].
    pub fn subscribe(&mut self, listener: impl FnMut(&Selection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Validate and store `value`, then notify every listener.
    ///
    /// Nobody is notified when the value is invalid.
    pub fn set(&mut self, axis: Axis, value: &str) -> Result<()> {
        self.selection.set(axis, value)?;
        for listener in &mut self.listeners {
            listener(&self.selection);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionState")
            .field("selection", &self.selection)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
