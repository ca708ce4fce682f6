use std::fmt::Write;

use crate::ast::{
    ast::{NodeKind, PostfixOperator, PrimaryValue, UnaryOperator},
    ids::NodeId,
};

use super::codegen::{CodeGen, CodegenError};

/// Escapes one byte for use inside a C character or string literal.
pub fn escape_c(byte: u8, quote: u8) -> String {
    match byte {
        b'\n' => String::from("\\n"),
        b'\t' => String::from("\\t"),
        b'\r' => String::from("\\r"),
        b'\\' => String::from("\\\\"),
        _ if byte == quote => format!("\\{}", byte as char),
        0x20..=0x7e => (byte as char).to_string(),
        // Octal escapes never swallow a following digit past three places
        _ => format!("\\{:03o}", byte),
    }
}

pub fn gen_expression(emitter: &mut CodeGen, id: NodeId) -> Result<(), CodegenError> {
    let ast = emitter.ast;

    match &ast.node(id).kind {
        NodeKind::BinaryExpression(binary) => {
            emitter.out.push('(');
            gen_expression(emitter, binary.left)?;
            write!(emitter.out, " {} ", binary.operator.symbol())?;
            gen_expression(emitter, binary.right)?;
            emitter.out.push(')');
        }
        NodeKind::UnaryExpression(unary) => {
            let prefix = match unary.operator {
                UnaryOperator::Increment => "++",
                UnaryOperator::Decrement => "--",
                UnaryOperator::Deref => "*",
                UnaryOperator::AddressOf => "&",
                UnaryOperator::Negate => "-",
                UnaryOperator::Nested => "",
            };
            write!(emitter.out, "{}(", prefix)?;
            gen_expression(emitter, unary.operand)?;
            emitter.out.push(')');
        }
        NodeKind::PrimaryExpression(primary) => {
            match &primary.value {
                PrimaryValue::Int(value) => write!(emitter.out, "{}", value)?,
                PrimaryValue::Float(value) => write!(emitter.out, "{:?}", value)?,
                PrimaryValue::Char(value) => write!(emitter.out, "'{}'", escape_c(*value, b'\''))?,
                PrimaryValue::String(value) => {
                    emitter.out.push('"');
                    for &byte in value {
                        emitter.out.push_str(&escape_c(byte, b'"'));
                    }
                    emitter.out.push('"');
                }
                PrimaryValue::Identifier(ident) => {
                    let name = emitter.variable(*ident)?;
                    emitter.out.push_str(&name);
                }
                PrimaryValue::Call(call) => gen_expression(emitter, *call)?,
            }

            match primary.postfix {
                Some(PostfixOperator::Increment) => emitter.out.push_str("++"),
                Some(PostfixOperator::Decrement) => emitter.out.push_str("--"),
                None => {}
            }
        }
        NodeKind::FunctionCall(call) => {
            let name = emitter.function(call.callee)?;
            write!(emitter.out, "{}(", name)?;

            for (index, &argument) in call.arguments.iter().enumerate() {
                if index > 0 {
                    emitter.out.push_str(", ");
                }
                gen_expression(emitter, argument)?;
            }

            emitter.out.push(')');
        }
        NodeKind::Ident(_) => {
            let name = emitter.variable(id)?;
            emitter.out.push_str(&name);
        }
        _ => return Err(emitter.unexpected(id, "expression")),
    }

    Ok(())
}
