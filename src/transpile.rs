//! Public entry points: print a parsed tree back to source, or parse and
//! print in one step.

use serde::Serialize;
use thiserror::Error;

use crate::arena::{Arena, StatId};
use crate::ast::NodeRef;
use crate::cst::CstNodeMap;
use crate::emitter::Printer;
use crate::parser::{parse, ParseOptions};
use crate::position::Location;
use crate::source_writer::StringWriter;

/// Failure from the source-level transpile: either the parser's first
/// error, or an internal inconsistency. No partial output is produced.
#[derive(Clone, Debug, Error, Serialize)]
#[error("({}, {}): {}", .location.begin.line, .location.begin.column, .message)]
pub struct TranspileError {
    pub location: Location,
    pub message: String,
}

/// Render a single node of any family, with type annotations, starting the
/// output cursor at the node's own position.
pub fn to_string(arena: &Arena, node: NodeRef) -> String {
    let begin = match node {
        NodeRef::Expr(id) => arena.expr(id).location.begin,
        NodeRef::Stat(id) => arena.stat(id).location.begin,
        NodeRef::Type(id) => arena.ty(id).location.begin,
    };

    let cst = CstNodeMap::new();
    let mut writer = StringWriter::with_position(begin);
    let mut printer = Printer::new(&mut writer, arena, &cst);
    printer.write_types = true;

    match node {
        NodeRef::Expr(id) => printer.emit_expr(id),
        NodeRef::Stat(id) => printer.emit_stat(id),
        NodeRef::Type(id) => printer.emit_type(id),
    }

    writer.into_string()
}

/// Print a block back to source with type annotations suppressed.
pub fn transpile_block(arena: &Arena, root: StatId, cst: &CstNodeMap) -> String {
    let mut writer = StringWriter::new();
    Printer::new(&mut writer, arena, cst).emit_block_body(root);
    writer.into_string()
}

/// Print a block back to source including type annotations.
pub fn transpile_block_with_types(arena: &Arena, root: StatId, cst: &CstNodeMap) -> String {
    let mut writer = StringWriter::new();
    let mut printer = Printer::new(&mut writer, arena, cst);
    printer.write_types = true;
    printer.emit_block_body(root);
    writer.into_string()
}

/// Parse `source` and print it back. On a parse failure the first error is
/// returned and the printer is never invoked.
pub fn transpile(
    source: &str,
    options: ParseOptions,
    with_types: bool,
) -> Result<String, TranspileError> {
    tracing::trace!(bytes = source.len(), with_types, "transpile");
    let result = parse(source, options);

    if let Some(error) = result.errors.first() {
        return Err(TranspileError {
            location: error.location,
            message: error.message.clone(),
        });
    }

    let Some(root) = result.root else {
        return Err(TranspileError {
            location: Location::default(),
            message: "internal error: parser yielded empty parse tree".to_string(),
        });
    };

    if with_types {
        Ok(transpile_block_with_types(&result.arena, root, &result.cst))
    } else {
        Ok(transpile_block(&result.arena, root, &result.cst))
    }
}
