use serde::Serialize;
use std::collections::HashMap;

use crate::javadoc::JavaDocData;
use crate::location::{Location, LocationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    pub path: String,
    pub location: Location,
    pub javadoc: JavaDocData,
}

/// Read-only index from canonical path to location and parsed JavaDoc.
///
/// Entries keep discovery order: files sorted by path, declarations in
/// source order within a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchableDocumentation {
    entries: Vec<DocEntry>,
    #[serde(skip)]
    by_path: HashMap<String, usize>,
}

/// What an insertion did to the index.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Insertion {
    Added,
    Replaced,
    Ignored,
}

impl SearchableDocumentation {
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    pub fn get(&self, path: &str) -> Option<&DocEntry> {
        self.by_path.get(path).map(|&i| &self.entries[i])
    }

    pub fn location(&self, path: &str) -> Option<&Location> {
        self.get(path).map(|e| &e.location)
    }

    pub fn javadoc(&self, path: &str) -> Option<&JavaDocData> {
        self.get(path).map(|e| &e.javadoc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Package re-declarations only replace the stored entry when they carry
    /// documentation. Any other duplicate path replaces the earlier entry in
    /// place, so the first position is kept.
    pub(crate) fn insert(
        &mut self,
        location: Location,
        javadoc: JavaDocData,
        documented: bool,
    ) -> Insertion {
        let path = location.path();
        let Some(&index) = self.by_path.get(&path) else {
            self.by_path.insert(path.clone(), self.entries.len());
            self.entries.push(DocEntry {
                path,
                location,
                javadoc,
            });
            return Insertion::Added;
        };

        if location.kind() == LocationKind::Package && !documented {
            return Insertion::Ignored;
        }
        let entry = &mut self.entries[index];
        entry.location = location;
        entry.javadoc = javadoc;
        Insertion::Replaced
    }
}

impl<'a> IntoIterator for &'a SearchableDocumentation {
    type Item = &'a DocEntry;
    type IntoIter = std::slice::Iter<'a, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
