//! Unit tests for scopes and symbol tables.

use std::rc::Rc;

use crate::{errors::errors::ErrorImpl, Position};

use super::{
    scope::ScopeTree,
    symbols::{EntryKind, SymTable},
};

fn pos() -> Position {
    Position::new(1, 1, Rc::new("test.sc".to_string()))
}

#[test]
fn test_insert_and_lookup() {
    let mut table = SymTable::new();
    table.insert("x", EntryKind::Declaration).unwrap();

    let entry = table.lookup("x").unwrap();
    assert_eq!(entry.name, "x");
    assert_eq!(entry.kind, EntryKind::Declaration);
    assert!(table.lookup("y").is_none());
}

#[test]
fn test_binding_redeclaration() {
    let mut table = SymTable::new();
    table.insert("x", EntryKind::Declaration).unwrap();

    assert_eq!(
        table.insert("x", EntryKind::Declaration),
        Err(ErrorImpl::Redeclaration {
            name: "x".to_string()
        })
    );
    assert_eq!(
        table.insert("x", EntryKind::Function),
        Err(ErrorImpl::Redeclaration {
            name: "x".to_string()
        })
    );
    assert_eq!(table.len(), 1);
}

#[test]
fn test_non_binding_insert_is_idempotent() {
    let mut table = SymTable::new();
    table.insert("libc", EntryKind::Module).unwrap();
    table.insert("libc", EntryKind::Module).unwrap();
    table.insert("y", EntryKind::Reference).unwrap();
    table.insert("y", EntryKind::Reference).unwrap();

    assert_eq!(table.len(), 2);
}

#[test]
fn test_binding_after_reference() {
    let mut table = SymTable::new();
    table.insert("y", EntryKind::Reference).unwrap();
    table.insert("y", EntryKind::Declaration).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("y").unwrap().kind, EntryKind::Declaration);
    assert!(table.lookup_kind("y", EntryKind::Reference).is_some());
}

#[test]
fn test_iter_keeps_insertion_order() {
    let mut table = SymTable::new();
    for name in ["c", "a", "b"] {
        table.insert(name, EntryKind::Declaration).unwrap();
    }

    let names: Vec<&str> = table.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_lookup_walks_parents() {
    let mut tree = ScopeTree::new();
    let root = tree.push(None, pos());
    let function = tree.push(Some(root), pos());
    let block = tree.push(Some(function), pos());

    tree.insert(root, "global", EntryKind::Declaration).unwrap();
    tree.insert(function, "param", EntryKind::Declaration).unwrap();

    assert!(tree.lookup(block, "global").is_some());
    assert!(tree.lookup(block, "param").is_some());
    assert!(tree.lookup(root, "param").is_none());
    assert_eq!(tree.depth(block), 2);
}

#[test]
fn test_lookup_local_ignores_parents() {
    let mut tree = ScopeTree::new();
    let root = tree.push(None, pos());
    let child = tree.push(Some(root), pos());
    tree.insert(root, "f", EntryKind::Function).unwrap();

    assert!(tree.lookup_local(child, "f").is_none());
    assert_eq!(tree.lookup_local(root, "f").unwrap().kind, EntryKind::Function);
}

#[test]
fn test_shadowing_in_child_scope() {
    let mut tree = ScopeTree::new();
    let root = tree.push(None, pos());
    let child = tree.push(Some(root), pos());

    tree.insert(root, "x", EntryKind::Function).unwrap();
    assert!(tree.insert(child, "x", EntryKind::Declaration).is_ok());
    assert_eq!(tree.lookup(child, "x").unwrap().kind, EntryKind::Declaration);
    assert_eq!(tree.lookup(root, "x").unwrap().kind, EntryKind::Function);
}

#[test]
fn test_binding_kinds() {
    assert!(EntryKind::Declaration.is_binding());
    assert!(EntryKind::Function.is_binding());
    assert!(!EntryKind::Reference.is_binding());
    assert!(!EntryKind::Module.is_binding());
}
