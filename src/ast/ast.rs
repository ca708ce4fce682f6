use crate::{
    lexer::tokens::TokenKind,
    scope::{scope::Scope, scope::ScopeTree, symbols::SymTable},
    Position,
};

use super::{arena::Arena, ids::NodeId, ids::ScopeId};

/// A syntax tree node: its source position plus the variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Position,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Ident(Ident),
    Type(TypeInfo),
    Declaration(Declaration),
    BinaryExpression(BinaryExpression),
    UnaryExpression(UnaryExpression),
    PrimaryExpression(PrimaryExpression),
    FunctionCall(FunctionCall),
    FunctionDefinition(FunctionDefinition),
    Statement(Statement),
    ControlFlow(ControlFlow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAtom {
    Int,
    Byte,
    Float,
    Double,
    Boolean,
}

impl TypeAtom {
    pub fn from_token(kind: TokenKind) -> Option<TypeAtom> {
        match kind {
            TokenKind::Int => Some(TypeAtom::Int),
            TokenKind::Byte => Some(TypeAtom::Byte),
            TokenKind::Float => Some(TypeAtom::Float),
            TokenKind::Double => Some(TypeAtom::Double),
            TokenKind::Boolean => Some(TypeAtom::Boolean),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub atom: TypeAtom,
    pub is_const: bool,
}

/// `x: int = 1;` or, without a type, the assignment `x = y = 1;`.
///
/// `initializers` keeps a chained assignment's right-hand sides in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub type_info: Option<NodeId>,
    pub id: NodeId,
    pub initializers: Vec<NodeId>,
}

impl Declaration {
    pub fn is_assignment(&self) -> bool {
        self.type_info.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::Percent => Some(BinaryOperator::Modulo),
            TokenKind::Equals => Some(BinaryOperator::Equals),
            TokenKind::NotEquals => Some(BinaryOperator::NotEquals),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::LessEquals => Some(BinaryOperator::LessEquals),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEquals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Increment,
    Decrement,
    /// Parenthesized sub-expression
    Nested,
    Deref,
    AddressOf,
    Negate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryValue {
    Int(i64),
    Float(f64),
    String(Vec<u8>),
    Char(u8),
    Identifier(NodeId),
    Call(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryExpression {
    pub value: PrimaryValue,
    pub postfix: Option<PostfixOperator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Always an `Ident` node
    pub callee: NodeId,
    pub arguments: Vec<NodeId>,
    /// A call statement placed directly in the translation unit, run at startup.
    pub is_directive_call: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: NodeId,
    pub type_info: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOrigin {
    Local,
    /// Imported with `#foreign from(module, ...)`, no body is emitted
    Foreign(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub id: NodeId,
    pub return_type: Option<NodeId>,
    pub parameters: Vec<Parameter>,
    pub body: ScopeId,
    pub origin: FunctionOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Return,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub expr: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlowKind {
    If,
    Elif,
    Else,
    While,
}

/// One clause of an `if` chain, or a `while` loop.
///
/// `next` links an `if`/`elif` clause to the `elif`/`else` that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlFlow {
    pub kind: ControlFlowKind,
    pub condition: Option<NodeId>,
    pub body: ScopeId,
    pub next: Option<NodeId>,
}

/// The parse root.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub position: Position,
    pub scope: ScopeId,
    /// Module names referenced by foreign imports
    pub foreign_modules: SymTable,
}

/// A finished syntax tree together with the arenas that own its nodes and scopes.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Arena<NodeId, Node>,
    scopes: ScopeTree,
    root: TranslationUnit,
}

impl Ast {
    pub fn new(nodes: Arena<NodeId, Node>, scopes: ScopeTree, root: TranslationUnit) -> Self {
        Ast { nodes, scopes, root }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        self.scopes.get(id)
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn translation_unit(&self) -> &TranslationUnit {
        &self.root
    }

    /// Top-level statements in source order.
    pub fn root_statements(&self) -> &[NodeId] {
        &self.scope(self.root.scope).statements
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Name carried by an `Ident` node.
    pub fn ident_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Ident(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// Type payload of a `Type` node.
    pub fn type_info(&self, id: NodeId) -> Option<&TypeInfo> {
        match &self.node(id).kind {
            NodeKind::Type(type_info) => Some(type_info),
            _ => None,
        }
    }
}
