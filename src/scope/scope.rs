use crate::{
    ast::{arena::Arena, ids::NodeId, ids::ScopeId},
    errors::errors::ErrorImpl,
    Position,
};

use super::symbols::{Entry, EntryKind, SymTable};

/// A lexical block: its own names, its statements in source order and the
/// block that encloses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub position: Position,
    pub table: SymTable,
    pub statements: Vec<NodeId>,
    pub parent: Option<ScopeId>,
}

/// Every scope of one translation unit, linked through parent handles.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Arena<ScopeId, Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            scopes: Arena::new(),
        }
    }

    /// Allocates an empty scope nested in `parent`.
    pub fn push(&mut self, parent: Option<ScopeId>, position: Position) -> ScopeId {
        self.scopes.alloc(Scope {
            position,
            table: SymTable::new(),
            statements: vec![],
            parent,
        })
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    pub fn insert(&mut self, scope: ScopeId, name: &str, kind: EntryKind) -> Result<&Entry, ErrorImpl> {
        self.scopes[scope].table.insert(name, kind)
    }

    /// Resolves `name` in `scope`, then in each enclosing scope up to the root.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Entry> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = &self.scopes[id];
            if let Some(entry) = scope.table.lookup(name) {
                return Some(entry);
            }
            current = scope.parent;
        }

        None
    }

    /// Resolves `name` in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Entry> {
        self.scopes[scope].table.lookup(name)
    }

    /// Number of enclosing scopes above `scope`.
    pub fn depth(&self, scope: ScopeId) -> usize {
        let mut depth = 0;
        let mut current = self.scopes[scope].parent;

        while let Some(id) = current {
            depth += 1;
            current = self.scopes[id].parent;
        }

        depth
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
