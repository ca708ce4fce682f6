/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node variants, the translation unit and the finished `Ast`
/// - arena: Append-only storage that owns nodes and scopes
/// - ids: Typed handles into the arenas
pub mod arena;
pub mod ast;
pub mod ids;
