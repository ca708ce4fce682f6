//! C emission for a finished tree.
//!
//! The emitted file has a fixed layout:
//!
//! 1. includes and a comment naming the foreign modules
//! 2. a prototype for every function
//! 3. file-scope variables, declared without initializers
//! 4. local function definitions
//! 5. `__scopec_startup`, running top-level initializers and assignments in
//!    source order, then the directive calls
//! 6. `main`, which only calls the startup function
//!
//! Every name the program defines is written with `LOCAL_PREFIX`, so user code
//! can neither collide with `main` and the startup function nor with C keywords
//! and header symbols. Foreign imports keep their names, since they must link
//! against the real symbol.

use std::{collections::HashSet, fmt::Write};

use thiserror::Error;

use crate::ast::{
    ast::{Ast, FunctionDefinition, FunctionOrigin, NodeKind, TypeAtom, TypeInfo},
    ids::NodeId,
};

use super::{
    expr::gen_expression,
    stmt::{gen_assignment, gen_block},
};

pub const STARTUP_FUNCTION: &str = "__scopec_startup";
pub const LOCAL_PREFIX: &str = "sc_";

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Format(#[from] std::fmt::Error),
    #[error("cannot emit {kind} at {line}:{column}")]
    UnexpectedNode {
        kind: &'static str,
        line: u32,
        column: u32,
    },
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed: {reason}")]
    Toolchain { command: String, reason: String },
}

/// Holds the tree being emitted and the text produced so far.
pub struct CodeGen<'a> {
    pub ast: &'a Ast,
    pub out: String,
    indent: usize,
    /// Names of foreign imports, emitted unprefixed
    foreign: HashSet<&'a str>,
}

impl<'a> CodeGen<'a> {
    pub fn new(ast: &'a Ast) -> Self {
        let foreign = root_functions(ast)
            .filter(|function| matches!(function.origin, FunctionOrigin::Foreign(_)))
            .filter_map(|function| ast.ident_name(function.id))
            .collect();

        CodeGen {
            ast,
            out: String::new(),
            indent: 0,
            foreign,
        }
    }

    /// Starts a new line at the current indentation.
    pub fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Name of an `Ident` node.
    pub fn name(&self, id: NodeId) -> Result<&'a str, CodegenError> {
        self.ast.ident_name(id).ok_or_else(|| self.unexpected(id, "identifier"))
    }

    /// C name of a variable or parameter.
    pub fn variable(&self, id: NodeId) -> Result<String, CodegenError> {
        Ok(format!("{}{}", LOCAL_PREFIX, self.name(id)?))
    }

    /// C name of a function. Calls only ever resolve to root functions, so a
    /// foreign name here always means the import.
    pub fn function(&self, id: NodeId) -> Result<String, CodegenError> {
        let name = self.name(id)?;
        if self.foreign.contains(name) {
            Ok(name.to_string())
        } else {
            Ok(format!("{}{}", LOCAL_PREFIX, name))
        }
    }

    pub fn type_info(&self, id: NodeId) -> Result<&'a TypeInfo, CodegenError> {
        self.ast.type_info(id).ok_or_else(|| self.unexpected(id, "type"))
    }

    pub fn unexpected(&self, id: NodeId, kind: &'static str) -> CodegenError {
        let position = &self.ast.node(id).position;
        CodegenError::UnexpectedNode {
            kind,
            line: position.line,
            column: position.column,
        }
    }
}

pub fn c_type(atom: TypeAtom) -> &'static str {
    match atom {
        TypeAtom::Int => "int32_t",
        TypeAtom::Byte => "uint8_t",
        TypeAtom::Float => "float",
        TypeAtom::Double => "double",
        TypeAtom::Boolean => "bool",
    }
}

fn return_type(emitter: &CodeGen, function: &FunctionDefinition) -> Result<&'static str, CodegenError> {
    match function.return_type {
        Some(id) => Ok(c_type(emitter.type_info(id)?.atom)),
        None => Ok("void"),
    }
}

/// Writes `ret name(params)` without a trailing `;` or body.
fn gen_signature(emitter: &mut CodeGen, function: &FunctionDefinition) -> Result<(), CodegenError> {
    let ret = return_type(emitter, function)?;
    let name = emitter.function(function.id)?;
    write!(emitter.out, "{} {}(", ret, name)?;

    if function.parameters.is_empty() {
        emitter.out.push_str("void");
    }
    for (index, parameter) in function.parameters.iter().enumerate() {
        if index > 0 {
            emitter.out.push_str(", ");
        }
        let type_info = emitter.type_info(parameter.type_info)?;
        let name = emitter.variable(parameter.name)?;
        write!(emitter.out, "{} {}", c_type(type_info.atom), name)?;
    }

    emitter.out.push(')');
    Ok(())
}

fn root_functions(ast: &Ast) -> impl Iterator<Item = &FunctionDefinition> {
    ast.root_statements()
        .iter()
        .filter_map(move |&id| match &ast.node(id).kind {
            NodeKind::FunctionDefinition(function) => Some(function),
            _ => None,
        })
}

fn gen_preamble(emitter: &mut CodeGen) -> Result<(), CodegenError> {
    let file = &emitter.ast.translation_unit().position.file;
    writeln!(emitter.out, "/* generated by scopec from {} */", file)?;
    emitter.out.push_str("#include <stdio.h>\n#include <stdint.h>\n#include <stdbool.h>\n");

    let modules: Vec<&str> = emitter
        .ast
        .translation_unit()
        .foreign_modules
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    if !modules.is_empty() {
        writeln!(emitter.out, "\n/* foreign modules: {} */", modules.join(", "))?;
    }

    Ok(())
}

fn gen_prototypes(emitter: &mut CodeGen) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    let mut any = false;

    for function in root_functions(ast) {
        if !any {
            emitter.out.push('\n');
            any = true;
        }
        gen_signature(emitter, function)?;
        emitter.out.push_str(";\n");
    }

    Ok(())
}

fn gen_globals(emitter: &mut CodeGen) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    let mut any = false;

    for &id in ast.root_statements() {
        let NodeKind::Declaration(declaration) = &ast.node(id).kind else {
            continue;
        };
        let Some(type_id) = declaration.type_info else {
            continue;
        };

        if !any {
            emitter.out.push('\n');
            any = true;
        }
        // Initialized later by the startup function, so never `const` here
        let type_info = emitter.type_info(type_id)?;
        let name = emitter.variable(declaration.id)?;
        writeln!(emitter.out, "{} {};", c_type(type_info.atom), name)?;
    }

    Ok(())
}

fn gen_functions(emitter: &mut CodeGen) -> Result<(), CodegenError> {
    let ast = emitter.ast;

    for function in root_functions(ast) {
        if function.origin != FunctionOrigin::Local {
            continue;
        }

        emitter.out.push('\n');
        gen_signature(emitter, function)?;
        emitter.out.push_str(" {\n");
        gen_block(emitter, function.body)?;
        emitter.out.push_str("}\n");
    }

    Ok(())
}

fn gen_startup(emitter: &mut CodeGen) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    writeln!(emitter.out, "\nstatic void {}(void) {{", STARTUP_FUNCTION)?;
    emitter.indent();

    for &id in ast.root_statements() {
        if let NodeKind::Declaration(declaration) = &ast.node(id).kind {
            if declaration.is_assignment() || !declaration.initializers.is_empty() {
                emitter.line_start();
                gen_assignment(emitter, declaration)?;
                emitter.out.push_str(";\n");
            }
        }
    }

    for &id in ast.root_statements() {
        if let NodeKind::FunctionCall(call) = &ast.node(id).kind {
            if call.is_directive_call {
                emitter.line_start();
                gen_expression(emitter, id)?;
                emitter.out.push_str(";\n");
            }
        }
    }

    emitter.dedent();
    emitter.out.push_str("}\n");
    Ok(())
}

/// Emits a complete C translation unit for `ast`.
pub fn emit_c(ast: &Ast) -> Result<String, CodegenError> {
    let mut emitter = CodeGen::new(ast);

    gen_preamble(&mut emitter)?;
    gen_prototypes(&mut emitter)?;
    gen_globals(&mut emitter)?;
    gen_functions(&mut emitter)?;
    gen_startup(&mut emitter)?;

    writeln!(
        emitter.out,
        "\nint main(void) {{\n    {}();\n    return 0;\n}}",
        STARTUP_FUNCTION
    )?;

    tracing::debug!("codegen: emitted {} bytes of C", emitter.out.len());
    Ok(emitter.out)
}
