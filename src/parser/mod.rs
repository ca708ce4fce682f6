//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree while resolving names against lexical scopes.
//! It handles:
//!
//! - Top-level declarations (variables, functions, foreign imports, directive calls)
//! - Statement parsing (assignments, control flow, loop control, returns)
//! - Expression parsing (binary ops, prefix/postfix ops, calls, literals)
//! - Type parsing for type annotations
//! - Error recovery and reporting
//!
//! Binary operators are parsed by precedence climbing over binding powers;
//! prefix and primary expressions are dispatched through NUD handlers.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
