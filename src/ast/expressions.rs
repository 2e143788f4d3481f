//! Expression nodes.

use crate::arena::{ExprId, PackId, StatId, TypeId};
use crate::ast::{GenericName, Local};
use crate::position::{Location, Position};

use super::TypeList;

#[derive(Clone, Debug)]
pub struct Expr {
    pub location: Location,
    pub kind: ExprKind,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    /// A parenthesized expression: `(e)`.
    Group { expr: ExprId },
    Nil,
    Bool { value: bool },
    Number { value: f64 },
    /// A string constant; the value is the decoded byte payload.
    String { value: Vec<u8> },
    /// A reference to a local binding in scope.
    LocalRef { name: String },
    /// A reference to a global name.
    GlobalRef { name: String },
    /// `...`
    Varargs,
    Call {
        func: ExprId,
        args: Vec<ExprId>,
    },
    /// `obj.name` or `obj:name`.
    IndexName {
        expr: ExprId,
        index: String,
        index_location: Location,
        op: char,
        op_position: Position,
    },
    /// `obj[key]`.
    IndexExpr { expr: ExprId, index: ExprId },
    /// A function literal; the statement forms share this node.
    Function(Box<FunctionBody>),
    Table { items: Vec<TableItem> },
    Unary { op: UnaryOp, expr: ExprId },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `e :: T`.
    TypeAssertion { expr: ExprId, annotation: TypeId },
    /// `if c then a else b` in expression position.
    IfElse {
        condition: ExprId,
        true_expr: ExprId,
        false_expr: ExprId,
    },
    /// A backtick string with `{expr}` holes. There are always exactly
    /// `expressions.len() + 1` string fragments.
    InterpString {
        strings: Vec<Vec<u8>>,
        expressions: Vec<ExprId>,
    },
    /// Parse-recovery placeholder.
    Error { expressions: Vec<ExprId> },
}

/// The body shared by function literals and function statements.
#[derive(Clone, Debug)]
pub struct FunctionBody {
    pub generics: Vec<GenericName>,
    pub generic_packs: Vec<GenericName>,
    pub args: Vec<Local>,
    pub vararg: bool,
    pub vararg_location: Location,
    pub vararg_annotation: Option<PackId>,
    pub return_annotation: Option<TypeList>,
    /// Always a `StatKind::Block`.
    pub body: StatId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableItemKind {
    /// `value` (array-style entry).
    List,
    /// `name = value`; the key is a string constant holding the name.
    Record,
    /// `[key] = value`.
    General,
}

#[derive(Clone, Debug)]
pub struct TableItem {
    pub kind: TableItemKind,
    pub key: Option<ExprId>,
    pub value: ExprId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Minus,
    Len,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Concat,
    CompareNe,
    CompareEq,
    CompareLt,
    CompareLe,
    CompareGt,
    CompareGe,
    And,
    Or,
}

impl BinaryOp {
    /// The surface spelling of the operator.
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Concat => "..",
            BinaryOp::CompareNe => "~=",
            BinaryOp::CompareEq => "==",
            BinaryOp::CompareLt => "<",
            BinaryOp::CompareLe => "<=",
            BinaryOp::CompareGt => ">",
            BinaryOp::CompareGe => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// The spelling of the compound-assignment form, for operators that
    /// have one.
    pub fn compound_token(self) -> Option<&'static str> {
        Some(match self {
            BinaryOp::Add => "+=",
            BinaryOp::Sub => "-=",
            BinaryOp::Mul => "*=",
            BinaryOp::Div => "/=",
            BinaryOp::FloorDiv => "//=",
            BinaryOp::Mod => "%=",
            BinaryOp::Pow => "^=",
            BinaryOp::Concat => "..=",
            _ => return None,
        })
    }
}
