// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Append-only back-reference tables.
//!
//! Entries are indexed in emission order within one codec session. A
//! composite is registered before its children are decoded, so the slot is
//! filled with a placeholder first and overwritten once the value is
//! complete.

use crate::core::{AmfError, Result, TableKind};

/// A session-scoped reference table.
#[derive(Debug, Clone)]
pub struct ReferenceTable<T> {
    kind: TableKind,
    entries: Vec<T>,
}

impl<T> ReferenceTable<T> {
    /// Create an empty table.
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Append an entry, returning its index.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Resolve an index read from the stream.
    ///
    /// Any index at or beyond the current length is a reference error.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.entries
            .get(index)
            .ok_or_else(|| AmfError::reference(self.kind, index, self.entries.len()))
    }

    /// Overwrite a previously registered slot.
    pub fn replace(&mut self, index: usize, entry: T) -> Result<()> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or_else(|| AmfError::reference(self.kind, index, len))?;
        *slot = entry;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }
}
