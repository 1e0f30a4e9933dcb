//! The configuration axes and a concrete point in the configuration space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TableError;

/// Declare the closed value set of one axis, with its wire spelling.
macro_rules! axis_values {
    (
        $(#[$meta:meta])*
        $name:ident ($axis:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = TableError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(TableError::InvalidValue {
                        axis: $axis,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

axis_values! {
    /// Simulated operating system. Never probed; stamped on by whoever ran the probe.
    Os("os") {
        Unix => "unix",
        Windows => "windows",
    }
}

axis_values! {
    /// The `text` attribute in `.gitattributes`.
    Text("text") {
        Auto => "auto",
        False => "false",
        True => "true",
        Undefined => "undefined",
        Binary => "binary",
    }
}

axis_values! {
    /// The `eol` attribute in `.gitattributes`.
    Eol("eol") {
        Crlf => "crlf",
        Lf => "lf",
        Undefined => "undefined",
    }
}

axis_values! {
    /// The local `core.autocrlf` setting.
    CoreAutocrlf("core_autocrlf") {
        False => "false",
        True => "true",
    }
}

axis_values! {
    /// The local `core.eol` setting.
    CoreEol("core_eol") {
        Crlf => "crlf",
        Lf => "lf",
        Native => "native",
    }
}

/// One dimension of the configuration space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Os,
    Text,
    Eol,
    CoreAutocrlf,
    CoreEol,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Os,
        Axis::Text,
        Axis::Eol,
        Axis::CoreAutocrlf,
        Axis::CoreEol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Os => "os",
            Axis::Text => "text",
            Axis::Eol => "eol",
            Axis::CoreAutocrlf => "core_autocrlf",
            Axis::CoreEol => "core_eol",
        }
    }
}

impl FromStr for Axis {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.name() == s)
            .ok_or_else(|| TableError::UnknownAxis(s.to_string()))
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One concrete configuration: repository attributes plus local settings.
///
/// `os` is absent in tables straight out of a probe run and filled in when a
/// table is tagged with the platform it was produced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationTuple {
    pub text: Text,
    pub eol: Eol,
    pub core_autocrlf: CoreAutocrlf,
    pub core_eol: CoreEol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Os>,
}

impl ConfigurationTuple {
    pub fn new(text: Text, eol: Eol, core_autocrlf: CoreAutocrlf, core_eol: CoreEol) -> Self {
        Self {
            text,
            eol,
            core_autocrlf,
            core_eol,
            os: None,
        }
    }

    pub fn with_os(mut self, os: Os) -> Self {
        self.os = Some(os);
        self
    }

    /// Build a tuple from `(axis, value)` pairs.
    ///
    /// Every axis except `os` must be assigned; later assignments win.
    pub fn from_assignment<'a>(
        pairs: impl IntoIterator<Item = (Axis, &'a str)>,
    ) -> Result<Self, TableError> {
        let mut text: Option<Text> = None;
        let mut eol: Option<Eol> = None;
        let mut autocrlf: Option<CoreAutocrlf> = None;
        let mut core_eol: Option<CoreEol> = None;
        let mut os: Option<Os> = None;
        for (axis, value) in pairs {
            match axis {
                Axis::Os => os = Some(value.parse()?),
                Axis::Text => text = Some(value.parse()?),
                Axis::Eol => eol = Some(value.parse()?),
                Axis::CoreAutocrlf => autocrlf = Some(value.parse()?),
                Axis::CoreEol => core_eol = Some(value.parse()?),
            }
        }
        Ok(Self {
            text: text.ok_or(TableError::MissingAxis("text"))?,
            eol: eol.ok_or(TableError::MissingAxis("eol"))?,
            core_autocrlf: autocrlf.ok_or(TableError::MissingAxis("core_autocrlf"))?,
            core_eol: core_eol.ok_or(TableError::MissingAxis("core_eol"))?,
            os,
        })
    }

    /// The wire spelling of this tuple's value on `axis`.
    pub fn value(&self, axis: Axis) -> Option<&'static str> {
        match axis {
            Axis::Os => self.os.map(Os::as_str),
            Axis::Text => Some(self.text.as_str()),
            Axis::Eol => Some(self.eol.as_str()),
            Axis::CoreAutocrlf => Some(self.core_autocrlf.as_str()),
            Axis::CoreEol => Some(self.core_eol.as_str()),
        }
    }

    /// The `.gitattributes` line for the `text` and `eol` axes.
    ///
    /// Empty when both are undefined.
    pub fn gitattributes(&self) -> String {
        let mut options = Vec::new();
        match self.text {
            Text::True => options.push("text".to_string()),
            Text::False => options.push("-text".to_string()),
            Text::Auto => options.push("text=auto".to_string()),
            Text::Binary => options.push("binary".to_string()),
            Text::Undefined => {}
        }
        if self.eol != Eol::Undefined {
            options.push(format!("eol={}", self.eol));
        }
        if options.is_empty() {
            String::new()
        } else {
            format!("*.txt {}", options.join(" "))
        }
    }

    /// The `git config` argument lists applying the local settings, in order.
    pub fn git_config_args(&self) -> [[&'static str; 3]; 2] {
        [
            ["config", "core.autocrlf", self.core_autocrlf.as_str()],
            ["config", "core.eol", self.core_eol.as_str()],
        ]
    }
}

impl fmt::Display for ConfigurationTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "text={} eol={} core.autocrlf={} core.eol={}",
            self.text, self.eol, self.core_autocrlf, self.core_eol
        )?;
        if let Some(os) = self.os {
            write!(f, " os={os}")?;
        }
        Ok(())
    }
}
