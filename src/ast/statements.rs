//! Statement nodes.

use crate::arena::{ExprId, StatId, TypeId};
use crate::ast::{BinaryOp, GenericPackDef, GenericTypeDef, Local};
use crate::position::Location;

#[derive(Clone, Debug)]
pub struct Stat {
    pub location: Location,
    pub kind: StatKind,
    /// Whether a `;` followed the statement. The location does not cover
    /// the semicolon; it is re-emitted directly after the statement body.
    pub has_semicolon: bool,
}

#[derive(Clone, Debug)]
pub enum StatKind {
    /// A statement list. As a standalone statement this is a `do ... end`
    /// block (the location spans both keywords); as a loop/function/branch
    /// body it is printed bare and the location covers the contents only.
    Block { body: Vec<StatId> },
    If {
        condition: ExprId,
        /// Always a `StatKind::Block`.
        then_body: StatId,
        /// A `Block` for `else`, or a nested `If` for `elseif`.
        else_body: Option<StatId>,
        then_location: Option<Location>,
        /// Location of the `else`/`elseif` keyword.
        else_location: Option<Location>,
    },
    While {
        condition: ExprId,
        body: StatId,
        has_do: bool,
        do_location: Location,
    },
    Repeat {
        body: StatId,
        condition: ExprId,
    },
    Break,
    Continue,
    Return { list: Vec<ExprId> },
    Expr { expr: ExprId },
    Local {
        vars: Vec<Local>,
        values: Vec<ExprId>,
        equals_sign_location: Option<Location>,
    },
    /// Numeric `for var = from, to [, step] do ... end`.
    For {
        var: Local,
        from: ExprId,
        to: ExprId,
        step: Option<ExprId>,
        body: StatId,
        has_do: bool,
        do_location: Location,
    },
    /// Generic `for vars in values do ... end`.
    ForIn {
        vars: Vec<Local>,
        values: Vec<ExprId>,
        body: StatId,
        has_in: bool,
        in_location: Location,
        has_do: bool,
        do_location: Location,
    },
    Assign {
        vars: Vec<ExprId>,
        values: Vec<ExprId>,
    },
    CompoundAssign {
        op: BinaryOp,
        var: ExprId,
        value: ExprId,
    },
    /// `function name.path:method() ... end`; the name is an expression
    /// chain of index-by-name nodes.
    Function { name: ExprId, func: ExprId },
    LocalFunction { name: Local, func: ExprId },
    TypeAlias {
        name: String,
        name_location: Location,
        generics: Vec<GenericTypeDef>,
        generic_packs: Vec<GenericPackDef>,
        ty: TypeId,
        exported: bool,
    },
    TypeFunction {
        name: String,
        name_location: Location,
        /// Always an `ExprKind::Function`.
        body: ExprId,
        exported: bool,
    },
    /// Parse-recovery placeholder.
    Error {
        expressions: Vec<ExprId>,
        statements: Vec<StatId>,
    },
}
