//! Concrete-syntax side-table.
//!
//! Each AST node may carry a parallel record of lexical detail the tree
//! itself does not need: punctuator positions, quote styles, raw numeric
//! lexemes, separator kinds. The records are produced by the parser, keyed
//! by arena node id, and consumed read-only by the printer. The printer
//! tolerates missing records by synthesizing minimal correct output, so an
//! abstract tree with no side-table still prints well-formed source.

use rustc_hash::FxHashMap;

use crate::arena::{ExprId, StatId, TypeId};
use crate::position::Position;

/// How a string constant was quoted in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
    /// Long-bracket form `[=*[ ... ]=*]`; the record carries the depth.
    Raw,
    /// Backtick string without interpolation holes.
    Interp,
}

#[derive(Clone, Debug)]
pub struct CstConstantNumber {
    /// The numeric lexeme exactly as written.
    pub lexeme: String,
}

#[derive(Clone, Debug)]
pub struct CstConstantString {
    /// The payload exactly as written between the delimiters.
    pub source: String,
    pub style: QuoteStyle,
    /// Number of `=` signs in the long-bracket form; zero otherwise.
    pub block_depth: u32,
}

#[derive(Clone, Debug)]
pub struct CstCall {
    /// `None` for the paren-free sugared forms `f "s"`, `f {t}`, `` f`s` ``.
    pub open_parens: Option<Position>,
    pub close_parens: Option<Position>,
    pub comma_positions: Vec<Position>,
}

#[derive(Clone, Debug)]
pub struct CstIndexExpr {
    pub open_bracket: Position,
    pub close_bracket: Position,
}

#[derive(Clone, Debug)]
pub struct CstFunction {
    pub args_comma_positions: Vec<Position>,
    /// Position of the `:` introducing the return annotation.
    pub return_specifier: Option<Position>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSeparator {
    Comma,
    Semicolon,
}

impl TableSeparator {
    pub fn token(self) -> &'static str {
        match self {
            TableSeparator::Comma => ",",
            TableSeparator::Semicolon => ";",
        }
    }
}

/// Lexical detail for one table-constructor item.
#[derive(Clone, Debug, Default)]
pub struct CstTableItem {
    /// `[`, only for general items.
    pub indexer_open: Option<Position>,
    /// `]`, only for general items.
    pub indexer_close: Option<Position>,
    /// `=`, absent for list items.
    pub equals: Option<Position>,
    /// Missing for a last item without a trailing separator.
    pub separator: Option<TableSeparator>,
    pub separator_position: Option<Position>,
}

#[derive(Clone, Debug)]
pub struct CstTable {
    pub items: Vec<CstTableItem>,
}

#[derive(Clone, Debug)]
pub enum CstExpr {
    ConstantNumber(CstConstantNumber),
    ConstantString(CstConstantString),
    Call(CstCall),
    IndexExpr(CstIndexExpr),
    Function(CstFunction),
    Table(CstTable),
    /// Operator position for unary, binary, and type-assertion expressions.
    Op { position: Position },
}

#[derive(Clone, Debug)]
pub enum CstStat {
    Return {
        comma_positions: Vec<Position>,
    },
    Local {
        vars_comma_positions: Vec<Position>,
        values_comma_positions: Vec<Position>,
    },
    For {
        equals_position: Position,
        end_comma_position: Position,
        step_comma_position: Option<Position>,
    },
    ForIn {
        vars_comma_positions: Vec<Position>,
        values_comma_positions: Vec<Position>,
    },
    Assign {
        vars_comma_positions: Vec<Position>,
        equals_position: Position,
        values_comma_positions: Vec<Position>,
    },
    CompoundAssign {
        op_position: Position,
    },
    LocalFunction {
        function_keyword_position: Position,
    },
    Repeat {
        until_position: Position,
    },
    TypeAlias {
        type_keyword_position: Position,
        generics_comma_positions: Vec<Position>,
        equals_position: Position,
    },
    TypeFunction {
        type_keyword_position: Position,
        function_keyword_position: Position,
    },
}

/// Lexical detail for one table-type entry, in emission order (properties
/// first, then the indexer).
#[derive(Clone, Debug, Default)]
pub struct CstTypeTableItem {
    /// `[`/`]`, only for the indexer entry.
    pub indexer_open: Option<Position>,
    pub indexer_close: Option<Position>,
    /// The `:` between name (or `]`) and type.
    pub colon: Option<Position>,
    pub separator: Option<TableSeparator>,
    pub separator_position: Option<Position>,
}

#[derive(Clone, Debug)]
pub enum CstType {
    SingletonString {
        source: String,
        style: QuoteStyle,
    },
    Table {
        items: Vec<CstTypeTableItem>,
    },
}

/// The side-table proper: one optional record per node, per family.
#[derive(Debug, Default)]
pub struct CstNodeMap {
    exprs: FxHashMap<ExprId, CstExpr>,
    stats: FxHashMap<StatId, CstStat>,
    types: FxHashMap<TypeId, CstType>,
}

impl CstNodeMap {
    pub fn new() -> CstNodeMap {
        CstNodeMap::default()
    }

    pub fn insert_expr(&mut self, id: ExprId, record: CstExpr) {
        self.exprs.insert(id, record);
    }

    pub fn insert_stat(&mut self, id: StatId, record: CstStat) {
        self.stats.insert(id, record);
    }

    pub fn insert_type(&mut self, id: TypeId, record: CstType) {
        self.types.insert(id, record);
    }

    pub fn expr(&self, id: ExprId) -> Option<&CstExpr> {
        self.exprs.get(&id)
    }

    pub fn stat(&self, id: StatId) -> Option<&CstStat> {
        self.stats.get(&id)
    }

    pub fn ty(&self, id: TypeId) -> Option<&CstType> {
        self.types.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty() && self.stats.is_empty() && self.types.is_empty()
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn number(&self, id: ExprId) -> Option<&CstConstantNumber> {
        match self.exprs.get(&id) {
            Some(CstExpr::ConstantNumber(c)) => Some(c),
            _ => None,
        }
    }

    pub fn string(&self, id: ExprId) -> Option<&CstConstantString> {
        match self.exprs.get(&id) {
            Some(CstExpr::ConstantString(c)) => Some(c),
            _ => None,
        }
    }

    pub fn call(&self, id: ExprId) -> Option<&CstCall> {
        match self.exprs.get(&id) {
            Some(CstExpr::Call(c)) => Some(c),
            _ => None,
        }
    }

    pub fn index_expr(&self, id: ExprId) -> Option<&CstIndexExpr> {
        match self.exprs.get(&id) {
            Some(CstExpr::IndexExpr(c)) => Some(c),
            _ => None,
        }
    }

    pub fn function(&self, id: ExprId) -> Option<&CstFunction> {
        match self.exprs.get(&id) {
            Some(CstExpr::Function(c)) => Some(c),
            _ => None,
        }
    }

    pub fn table(&self, id: ExprId) -> Option<&CstTable> {
        match self.exprs.get(&id) {
            Some(CstExpr::Table(c)) => Some(c),
            _ => None,
        }
    }

    pub fn op(&self, id: ExprId) -> Option<Position> {
        match self.exprs.get(&id) {
            Some(CstExpr::Op { position }) => Some(*position),
            _ => None,
        }
    }
}
