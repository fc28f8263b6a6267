use crate::error::{HeaderError, Result};
use fnv::FnvHashMap;
use std::str::FromStr;

/// A `-D NAME[=VALUE]` definition supplied on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroOverride {
    pub name: String,
    pub value: Option<String>,
}

impl MacroOverride {
    pub fn new(name: &str, value: Option<&str>) -> Result<Self> {
        let mut chars = name.chars();
        let valid: bool = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
            && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
        if !valid {
            return Err(HeaderError::InvalidMacroName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        })
    }
}

impl FromStr for MacroOverride {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, value)) => Self::new(name, Some(value)),
            None => Self::new(s, None),
        }
    }
}

/// Types a macro can be declared with.
pub trait MacroType: Sized {
    const EXPECTED: &'static str;

    /// Parses a user-supplied value; `None` is a bare `-D NAME`.
    fn parse(value: Option<&str>) -> Option<Self>;

    /// Text placed after `#define NAME`.
    fn render(&self) -> String;
}

macro_rules! impl_macro_type_for_uint {
    ($($t:ty),*) => {
        $(
            impl MacroType for $t {
                const EXPECTED: &'static str = concat!(stringify!($t), " value");

                fn parse(value: Option<&str>) -> Option<Self> {
                    value?.trim().parse().ok()
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_macro_type_for_uint!(u32, u64, usize);

impl MacroType for bool {
    const EXPECTED: &'static str = "boolean flag";

    fn parse(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            None | Some("1") | Some("true") => Some(true),
            Some("0") | Some("false") => Some(false),
            _ => None,
        }
    }

    fn render(&self) -> String {
        (*self as u8).to_string()
    }
}

#[derive(Clone, Debug, Default)]
struct MacroEntry {
    user: Option<MacroOverride>,
    resolved: Option<String>,
}

/// Macro values known while a header is generated.
///
/// User definitions are preset before any stage runs. A declaration takes the
/// user value when present and the stage default otherwise. Redeclaring a
/// resolved name is only allowed for overridable declarations.
#[derive(Clone, Debug, Default)]
pub struct MacroTable {
    entries: FnvHashMap<String, MacroEntry>,
}

impl MacroTable {
    pub fn new<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = MacroOverride>,
    {
        let mut table: MacroTable = Self::default();
        for user in overrides {
            table.preset(user);
        }
        table
    }

    /// Registers a user value. A later definition of the same name wins.
    pub fn preset(&mut self, user: MacroOverride) {
        let name: String = user.name.clone();
        self.entries.entry(name).or_default().user = Some(user);
    }

    /// Resolves `name` to the user value if any, else to `default()`.
    pub fn declare<T, F>(&mut self, name: &str, default: F, overridable: bool) -> Result<T>
    where
        T: MacroType,
        F: FnOnce() -> Result<T>,
    {
        let entry: &mut MacroEntry = self.entries.entry(name.to_string()).or_default();

        if entry.resolved.is_some() && !overridable {
            return Err(HeaderError::DuplicateMacro(name.to_string()));
        }

        let value: T = match &entry.user {
            Some(user) => T::parse(user.value.as_deref()).ok_or_else(|| {
                HeaderError::InvalidOverrideType {
                    name: name.to_string(),
                    value: user.value.clone(),
                    expected: T::EXPECTED,
                }
            })?,
            None => default()?,
        };

        entry.resolved = Some(value.render());
        Ok(value)
    }

    pub fn resolved(&self, name: &str) -> Option<&str> {
        self.entries.get(name)?.resolved.as_deref()
    }

    /// User definitions no stage declared, sorted by name.
    pub fn unused(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.user.is_some() && entry.resolved.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
