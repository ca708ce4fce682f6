//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source bytes
//! into a stream of tokens for parsing. It handles:
//!
//! - Run-based scanning of identifiers, numbers and symbols
//! - Recognition of keywords and multi-character operators through a `LexerConfig`
//! - Character and string literals
//! - Single-line (`//`) and nested multi-line (`{- -}`) comments
//! - Token position tracking for error reporting

pub mod config;
pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
