//! The immutable component checklist.
//!
//! A [`Checklist`] maps component names to probe commands. It is built once
//! from configuration and never changes afterwards: the caller's collection is
//! consumed into a private boxed slice and only read accessors are exposed.

use crate::checklist::command::ProbeCommand;
use crate::error::{PreflightError, Result};

/// One checklist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    name: String,
    command: ProbeCommand,
}

impl ChecklistEntry {
    /// Component name (e.g., "cuda").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probe command for this component.
    pub fn command(&self) -> &ProbeCommand {
        &self.command
    }
}

/// Immutable, ordered registry of component name to probe command.
///
/// Iteration order is construction order, so failure reports are stable
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    entries: Box<[ChecklistEntry]>,
}

impl Checklist {
    /// Build a checklist from `(name, tokens)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProbeCommand` if a token vector is malformed and
    /// `DuplicateComponent` if a name appears twice.
    pub fn new<I, K, C, S>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = components
            .into_iter()
            .map(|(name, tokens)| {
                let name = name.into();
                match ProbeCommand::parse(tokens) {
                    Ok(command) => Ok((name, command)),
                    Err(source) => Err(PreflightError::InvalidProbeCommand {
                        component: name,
                        source,
                    }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_commands(parsed)
    }

    /// Build a checklist from already-validated probe commands.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` if a name appears twice.
    pub fn from_commands<I, K>(components: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, ProbeCommand)>,
        K: Into<String>,
    {
        let mut entries: Vec<ChecklistEntry> = Vec::new();
        for (name, command) in components {
            let name = name.into();
            if entries.iter().any(|e| e.name == name) {
                return Err(PreflightError::DuplicateComponent { name });
            }
            entries.push(ChecklistEntry { name, command });
        }

        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    /// Look up the probe command for a component.
    pub fn get(&self, name: &str) -> Option<&ProbeCommand> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.command)
    }

    /// Whether the checklist has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Component names in checklist order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entries in checklist order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChecklistEntry> {
        self.entries.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the checklist has no components.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Checklist {
    type Item = &'a ChecklistEntry;
    type IntoIter = std::slice::Iter<'a, ChecklistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
