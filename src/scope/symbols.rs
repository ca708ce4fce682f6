use crate::errors::errors::ErrorImpl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Declaration,
    Function,
    Reference,
    Module,
}

impl EntryKind {
    /// Binding kinds introduce a name; at most one may exist per name in a scope.
    pub fn is_binding(&self) -> bool {
        matches!(self, EntryKind::Declaration | EntryKind::Function)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

/// Names declared directly in one scope, in insertion order.
///
/// Tables stay small, so lookups are a linear scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymTable {
    entries: Vec<Entry>,
}

impl SymTable {
    pub fn new() -> Self {
        SymTable { entries: vec![] }
    }

    /// Adds `name` with `kind`.
    ///
    /// A binding kind fails with `Redeclaration` when the name is already bound
    /// here. A non-binding kind that is already present is returned as is.
    pub fn insert(&mut self, name: &str, kind: EntryKind) -> Result<&Entry, ErrorImpl> {
        let existing = self.entries.iter().position(|entry| {
            entry.name == name
                && (entry.kind == kind || (kind.is_binding() && entry.kind.is_binding()))
        });

        match existing {
            Some(_) if kind.is_binding() => Err(ErrorImpl::Redeclaration {
                name: name.to_string(),
            }),
            Some(index) => Ok(&self.entries[index]),
            None => {
                self.entries.push(Entry {
                    name: name.to_string(),
                    kind,
                });
                Ok(&self.entries[self.entries.len() - 1])
            }
        }
    }

    /// First entry named `name`, binding entries before anything else.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name && entry.kind.is_binding())
            .or_else(|| self.entries.iter().find(|entry| entry.name == name))
    }

    pub fn lookup_kind(&self, name: &str, kind: EntryKind) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name && entry.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
