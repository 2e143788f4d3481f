//! Printer - position-threaded AST traversal.
//!
//! The printer walks the three node families top-down, emitting every token
//! through a `Writer` while honoring the lexical positions recorded in the
//! concrete-syntax side-table. When a record is absent it falls back to
//! `maybe_space` and default spacing, so the same traversal serves both the
//! byte-faithful round-trip mode and the synthesized mode.
//!
//! The traversal is a single pass: no intermediate token stream, no second
//! walk. One printer owns one writer for the duration of a print.

mod expressions;
mod literals;
mod statements;
mod types;

use crate::arena::{Arena, StatId};
use crate::ast::{GenericName, Local, StatKind};
use crate::cst::CstNodeMap;
use crate::position::{Location, Position};
use crate::source_writer::Writer;

/// Stateful comma emitter: the first call is a no-op, later calls emit a
/// `,`, advancing to the next recorded position when one is supplied.
pub(crate) struct CommaSep<'p> {
    first: bool,
    positions: Option<&'p [Position]>,
    index: usize,
}

impl<'p> CommaSep<'p> {
    pub(crate) fn new(positions: Option<&'p [Position]>) -> CommaSep<'p> {
        CommaSep {
            first: true,
            positions,
            index: 0,
        }
    }

    pub(crate) fn step<W: Writer>(&mut self, writer: &mut W) {
        if self.first {
            self.first = false;
            return;
        }
        if let Some(positions) = self.positions {
            if let Some(&pos) = positions.get(self.index) {
                writer.advance(pos);
            }
            self.index += 1;
        }
        writer.symbol(",");
    }
}

/// Argument-name emitter for function-type parameter lists: each step emits
/// `name:` at its recorded location when the parameter is named.
pub(crate) struct ArgNameSep<'p> {
    names: Option<&'p [Option<crate::ast::ArgName>]>,
    index: usize,
}

impl<'p> ArgNameSep<'p> {
    pub(crate) fn new(names: Option<&'p [Option<crate::ast::ArgName>]>) -> ArgNameSep<'p> {
        ArgNameSep { names, index: 0 }
    }

    pub(crate) fn step<W: Writer>(&mut self, writer: &mut W) {
        if let Some(names) = self.names {
            if let Some(Some(arg)) = names.get(self.index) {
                writer.advance(arg.location.begin);
                writer.identifier(&arg.name);
                writer.symbol(":");
            }
        }
        self.index += 1;
    }
}

/// The traversal. Holds non-owning references to the writer, the arena, and
/// the side-table; construct one per print.
pub struct Printer<'a, W: Writer> {
    pub(crate) writer: &'a mut W,
    pub(crate) arena: &'a Arena,
    pub(crate) cst: &'a CstNodeMap,
    pub write_types: bool,
}

impl<'a, W: Writer> Printer<'a, W> {
    pub fn new(writer: &'a mut W, arena: &'a Arena, cst: &'a CstNodeMap) -> Printer<'a, W> {
        Printer {
            writer,
            arena,
            cst,
            write_types: false,
        }
    }

    pub(crate) fn advance(&mut self, pos: Position) {
        self.writer.advance(pos);
    }

    /// Emit the statements of a block node without the `do`/`end` wrapper.
    pub fn emit_block_body(&mut self, id: StatId) {
        let arena = self.arena;
        let StatKind::Block { body } = &arena.stat(id).kind else {
            unreachable!("expected a block statement as a body");
        };
        for &stat in body {
            self.emit_stat(stat);
        }
    }

    /// Place `end` three columns before the node's end, where the keyword
    /// sat in the source.
    pub(crate) fn write_end(&mut self, location: Location) {
        let mut pos = location.end;
        if pos.column >= 3 {
            pos.column -= 3;
        }
        self.advance(pos);
        self.writer.keyword("end");
    }

    pub(crate) fn emit_binding(&mut self, local: &Local) {
        self.advance(local.location.begin);
        self.writer.identifier(&local.name);
        if self.write_types {
            if let Some(annotation) = local.annotation {
                self.writer.symbol(":");
                self.emit_type(annotation);
            }
        }
    }

    pub(crate) fn emit_generic_names(&mut self, generics: &[GenericName], packs: &[GenericName]) {
        if generics.is_empty() && packs.is_empty() {
            return;
        }

        let mut comma = CommaSep::new(None);
        self.writer.symbol("<");
        for generic in generics {
            comma.step(self.writer);
            self.advance(generic.location.begin);
            self.writer.identifier(&generic.name);
        }
        for pack in packs {
            comma.step(self.writer);
            self.advance(pack.location.begin);
            self.writer.identifier(&pack.name);
            self.writer.symbol("...");
        }
        self.writer.symbol(">");
    }

    /// Emit everything after the `function` keyword: generics, parameter
    /// list, optional return annotation, body, and the closing `end`.
    pub(crate) fn emit_function_body(&mut self, func: crate::arena::ExprId) {
        let arena = self.arena;
        let cst = self.cst;
        let expr = arena.expr(func);
        let crate::ast::ExprKind::Function(body) = &expr.kind else {
            unreachable!("expected a function expression");
        };
        let func_cst = cst.function(func);

        self.emit_generic_names(&body.generics, &body.generic_packs);

        self.writer.symbol("(");
        let mut comma = CommaSep::new(func_cst.map(|c| c.args_comma_positions.as_slice()));
        for arg in &body.args {
            comma.step(self.writer);
            self.emit_binding(arg);
        }
        if body.vararg {
            comma.step(self.writer);
            self.advance(body.vararg_location.begin);
            self.writer.symbol("...");
            if self.write_types {
                if let Some(pack) = body.vararg_annotation {
                    self.writer.symbol(":");
                    self.emit_type_pack(pack, true);
                }
            }
        }
        self.writer.symbol(")");

        if self.write_types {
            if let Some(returns) = &body.return_annotation {
                match func_cst.and_then(|c| c.return_specifier) {
                    Some(pos) => {
                        self.advance(pos);
                        self.writer.symbol(":");
                    }
                    None => {
                        self.writer.symbol(":");
                        self.writer.space();
                    }
                }
                self.emit_type_list(returns, false, None);
            }
        }

        self.emit_block_body(body.body);
        self.write_end(expr.location);
    }
}
