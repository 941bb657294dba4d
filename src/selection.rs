//! Selection state and mode semantics

use std::collections::BTreeSet;

use crate::catalog::ItemCatalog;
use crate::config::BrowserKind;

/// Policy governing how many items may be selected and how the preview line
/// is phrased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Single,
    Multiple,
    /// Toggles like `Multiple`; downstream the set is a sampling pool rather
    /// than an exact selection
    Random,
}

impl SelectionMode {
    /// Parse the host's mode-field value ("single" / "multiple" / "random")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    /// Whether toggling removes an already-present index
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multiple | Self::Random)
    }
}

/// The selected-index set, valid only against the current catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    indices: BTreeSet<usize>,
}

impl SelectionModel {
    /// Toggle an index under the given mode.
    ///
    /// Single mode replaces the set with `{index}` unconditionally, so
    /// re-clicking the selected item keeps it selected. Multiple/Random
    /// insert or remove. The index must already be validated against the
    /// catalog by the caller.
    pub fn toggle(&mut self, mode: SelectionMode, index: usize) {
        if mode.is_multi() {
            if !self.indices.remove(&index) {
                self.indices.insert(index);
            }
        } else {
            self.indices.clear();
            self.indices.insert(index);
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// The sole selected index, if exactly one item is selected
    pub fn sole(&self) -> Option<usize> {
        if self.indices.len() == 1 {
            self.indices.iter().next().copied()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Serialize for the host's hidden output field.
    ///
    /// Row browsers emit indices joined with `,`; file and tag browsers emit
    /// the raw item values joined with `, `.
    pub fn serialize(&self, kind: BrowserKind, catalog: &ItemCatalog) -> String {
        match kind {
            BrowserKind::Rows => self
                .indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(","),
            BrowserKind::Files | BrowserKind::Tags => self
                .indices
                .iter()
                .filter_map(|&i| catalog.get(i))
                .map(|item| item.raw().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
