//! Lexical scopes and their symbol tables.
//!
//! Each block the parser enters gets a `Scope` in the `ScopeTree`. Names are
//! inserted into the current scope and looked up outwards through parents.

pub mod scope;
pub mod symbols;

#[cfg(test)]
mod tests;
