//! Code generation module for the compiler.
//!
//! This module turns a finished, error-free tree into C source and hands it
//! to an external C compiler. It handles:
//!
//! - Emission of declarations, functions, statements and expressions
//! - Mapping of the language's atomic types to C types
//! - Scheduling of top-level initializers and directive calls at startup
//! - Invocation of the C toolchain

pub mod codegen;
pub mod expr;
pub mod stmt;
pub mod toolchain;
