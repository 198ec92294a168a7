//! Per-run archetype registry.
//!
//! Interns archetype labels into stable [`ArchetypeId`] handles. Labels are
//! kept exactly as supplied; labels that differ only by case or whitespace
//! are flagged as suspect duplicates, never merged.

use std::collections::HashMap;

use tracing::warn;

/// Handle for an archetype label within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchetypeId(u32);

impl ArchetypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interning table from archetype label to handle.
#[derive(Debug, Default)]
pub struct ArchetypeRegistry {
    ids: HashMap<String, ArchetypeId>,
    names: Vec<String>,
    folded: HashMap<String, ArchetypeId>,
    suspects: Vec<(String, String)>,
}

fn fold_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl ArchetypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `label`, assigning a new one on first sight.
    pub fn intern(&mut self, label: &str) -> ArchetypeId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }

        let id = ArchetypeId(self.names.len() as u32);
        let folded = fold_label(label);
        match self.folded.get(&folded).copied() {
            Some(existing) => {
                let existing_name = &self.names[existing.index()];
                warn!(
                    "Archetype label {:?} differs from {:?} only by case/whitespace; counting separately",
                    label, existing_name
                );
                self.suspects
                    .push((existing_name.clone(), label.to_string()));
            }
            None => {
                self.folded.insert(folded, id);
            }
        }

        self.ids.insert(label.to_string(), id);
        self.names.push(label.to_string());
        id
    }

    /// Label for a handle.
    pub fn name(&self, id: ArchetypeId) -> &str {
        &self.names[id.index()]
    }

    /// Handles and labels in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (ArchetypeId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ArchetypeId(i as u32), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pairs of (first seen label, conflicting label).
    pub fn suspect_duplicates(&self) -> &[(String, String)] {
        &self.suspects
    }
}
