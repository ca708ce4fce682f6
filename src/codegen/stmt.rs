use std::fmt::Write;

use crate::ast::{
    ast::{ControlFlowKind, Declaration, NodeKind, StatementKind},
    ids::{NodeId, ScopeId},
};

use super::{
    codegen::{c_type, CodeGen, CodegenError},
    expr::gen_expression,
};

/// Writes `name = init = init...` with no terminator.
pub fn gen_assignment(emitter: &mut CodeGen, declaration: &Declaration) -> Result<(), CodegenError> {
    let name = emitter.variable(declaration.id)?;
    emitter.out.push_str(&name);

    for &initializer in &declaration.initializers {
        emitter.out.push_str(" = ");
        gen_expression(emitter, initializer)?;
    }

    Ok(())
}

/// Writes every statement of `scope`, one level deeper than the caller.
pub fn gen_block(emitter: &mut CodeGen, scope: ScopeId) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    emitter.indent();

    for &statement in &ast.scope(scope).statements {
        gen_statement(emitter, statement)?;
    }

    emitter.dedent();
    Ok(())
}

/// Writes the clauses of an `if` chain starting at `id`.
fn gen_control_flow(emitter: &mut CodeGen, id: NodeId) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    let NodeKind::ControlFlow(control_flow) = &ast.node(id).kind else {
        return Err(emitter.unexpected(id, "control flow"));
    };

    let keyword = match control_flow.kind {
        ControlFlowKind::If => "if",
        ControlFlowKind::Elif => " else if",
        ControlFlowKind::Else => " else",
        ControlFlowKind::While => "while",
    };
    emitter.out.push_str(keyword);

    if let Some(condition) = control_flow.condition {
        emitter.out.push_str(" (");
        gen_expression(emitter, condition)?;
        emitter.out.push(')');
    }

    emitter.out.push_str(" {\n");
    gen_block(emitter, control_flow.body)?;
    emitter.line_start();
    emitter.out.push('}');

    if let Some(next) = control_flow.next {
        gen_control_flow(emitter, next)?;
    }

    Ok(())
}

pub fn gen_statement(emitter: &mut CodeGen, id: NodeId) -> Result<(), CodegenError> {
    let ast = emitter.ast;
    emitter.line_start();

    match &ast.node(id).kind {
        NodeKind::Declaration(declaration) => {
            if let Some(type_id) = declaration.type_info {
                let type_info = emitter.type_info(type_id)?;
                if type_info.is_const && !declaration.initializers.is_empty() {
                    emitter.out.push_str("const ");
                }
                write!(emitter.out, "{} ", c_type(type_info.atom))?;
            }
            gen_assignment(emitter, declaration)?;
            emitter.out.push(';');
        }
        NodeKind::FunctionCall(_) => {
            gen_expression(emitter, id)?;
            emitter.out.push(';');
        }
        NodeKind::Statement(statement) => match statement.kind {
            StatementKind::Return => {
                emitter.out.push_str("return");
                if let Some(expr) = statement.expr {
                    emitter.out.push(' ');
                    gen_expression(emitter, expr)?;
                }
                emitter.out.push(';');
            }
            StatementKind::Break => emitter.out.push_str("break;"),
            StatementKind::Continue => emitter.out.push_str("continue;"),
        },
        NodeKind::ControlFlow(_) => gen_control_flow(emitter, id)?,
        _ => return Err(emitter.unexpected(id, "statement")),
    }

    emitter.out.push('\n');
    Ok(())
}
