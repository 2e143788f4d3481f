//! Expression parsing: precedence climbing over the binary operator table,
//! with `::` assertions binding between unary and simple expressions.

use super::{Parser, RECURSION_LIMIT};
use crate::arena::ExprId;
use crate::ast::{
    BinaryOp, Expr, ExprKind, FunctionBody, Local, TableItem, TableItemKind, UnaryOp,
};
use crate::cst::{
    CstCall, CstConstantNumber, CstConstantString, CstExpr, CstFunction, CstIndexExpr, CstTable,
    CstTableItem, QuoteStyle, TableSeparator,
};
use crate::lexer::{Token, TokenKind};
use crate::position::{Location, Position};

/// Binding power of the unary operators.
const UNARY_PRIORITY: u32 = 8;

/// `(left, right)` binding powers; `right < left` makes an operator
/// right-associative.
fn binary_priority(op: BinaryOp) -> (u32, u32) {
    match op {
        BinaryOp::Or => (1, 1),
        BinaryOp::And => (2, 2),
        BinaryOp::CompareLt
        | BinaryOp::CompareGt
        | BinaryOp::CompareLe
        | BinaryOp::CompareGe
        | BinaryOp::CompareNe
        | BinaryOp::CompareEq => (3, 3),
        BinaryOp::Concat => (5, 4),
        BinaryOp::Add | BinaryOp::Sub => (6, 6),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod => (7, 7),
        BinaryOp::Pow => (10, 9),
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Less => BinaryOp::CompareLt,
        TokenKind::Greater => BinaryOp::CompareGt,
        TokenKind::LessEq => BinaryOp::CompareLe,
        TokenKind::GreaterEq => BinaryOp::CompareGe,
        TokenKind::NotEq => BinaryOp::CompareNe,
        TokenKind::EqEq => BinaryOp::CompareEq,
        TokenKind::DotDot => BinaryOp::Concat,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::DoubleSlash => BinaryOp::FloorDiv,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Caret => BinaryOp::Pow,
        _ => return None,
    })
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    Some(match kind {
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Minus => UnaryOp::Minus,
        TokenKind::Hash => UnaryOp::Len,
        _ => return None,
    })
}

impl Parser {
    pub(crate) fn alloc_expr(&mut self, location: Location, kind: ExprKind) -> ExprId {
        self.arena.alloc_expr(Expr { location, kind })
    }

    pub(crate) fn alloc_name_ref(&mut self, name: String, location: Location) -> ExprId {
        let kind = if self.is_local(&name) {
            ExprKind::LocalRef { name }
        } else {
            ExprKind::GlobalRef { name }
        };
        self.alloc_expr(location, kind)
    }

    pub(crate) fn alloc_index_name(
        &mut self,
        expr: ExprId,
        index: String,
        index_location: Location,
        op: char,
        op_position: Position,
    ) -> ExprId {
        let begin = self.arena.expr(expr).location.begin;
        self.alloc_expr(
            Location::new(begin, index_location.end),
            ExprKind::IndexName {
                expr,
                index,
                index_location,
                op,
                op_position,
            },
        )
    }

    fn error_expr_here(&mut self) -> ExprId {
        let location = self.location();
        self.alloc_expr(
            location,
            ExprKind::Error {
                expressions: Vec::new(),
            },
        )
    }

    pub(crate) fn parse_expr_full(&mut self) -> ExprId {
        self.parse_expr(0)
    }

    pub(crate) fn parse_expr_list(&mut self, commas: &mut Vec<Position>) -> Vec<ExprId> {
        let mut list = vec![self.parse_expr_full()];
        while self.at(&TokenKind::Comma) {
            commas.push(self.begin());
            self.bump();
            list.push(self.parse_expr_full());
        }
        list
    }

    fn parse_expr(&mut self, limit: u32) -> ExprId {
        if self.depth >= RECURSION_LIMIT {
            let location = self.location();
            self.report(location, "Exceeded allowed recursion depth");
            if !self.at(&TokenKind::Eof) {
                self.bump();
            }
            return self.error_expr_here();
        }
        self.depth += 1;

        let mut expr = if let Some(op) = unary_op(self.kind()) {
            let op_token = self.bump();
            let operand = self.parse_expr(UNARY_PRIORITY);
            let end = self.arena.expr(operand).location.end;
            let id = self.alloc_expr(
                Location::new(op_token.location.begin, end),
                ExprKind::Unary { op, expr: operand },
            );
            self.cst_expr(
                id,
                CstExpr::Op {
                    position: op_token.location.begin,
                },
            );
            id
        } else {
            self.parse_assertion_expr()
        };

        while let Some(op) = binary_op(self.kind()) {
            let (left_priority, right_priority) = binary_priority(op);
            if left_priority <= limit {
                break;
            }

            let op_token = self.bump();
            let right = self.parse_expr(right_priority);

            let begin = self.arena.expr(expr).location.begin;
            let end = self.arena.expr(right).location.end;
            let id = self.alloc_expr(
                Location::new(begin, end),
                ExprKind::Binary {
                    op,
                    left: expr,
                    right,
                },
            );
            self.cst_expr(
                id,
                CstExpr::Op {
                    position: op_token.location.begin,
                },
            );
            expr = id;
        }

        self.depth -= 1;
        expr
    }

    /// `simpleexp { '::' Type }`.
    fn parse_assertion_expr(&mut self) -> ExprId {
        let mut expr = self.parse_simple_expr();

        while self.at(&TokenKind::DoubleColon) {
            let op_position = self.begin();
            self.bump();
            let annotation = self.parse_type();

            let begin = self.arena.expr(expr).location.begin;
            let end = self.arena.ty(annotation).location.end;
            let id = self.alloc_expr(
                Location::new(begin, end),
                ExprKind::TypeAssertion { expr, annotation },
            );
            self.cst_expr(
                id,
                CstExpr::Op {
                    position: op_position,
                },
            );
            expr = id;
        }

        expr
    }

    fn parse_simple_expr(&mut self) -> ExprId {
        match self.kind() {
            TokenKind::Nil => {
                let token = self.bump();
                self.alloc_expr(token.location, ExprKind::Nil)
            }
            TokenKind::True => {
                let token = self.bump();
                self.alloc_expr(token.location, ExprKind::Bool { value: true })
            }
            TokenKind::False => {
                let token = self.bump();
                self.alloc_expr(token.location, ExprKind::Bool { value: false })
            }
            TokenKind::Number { .. } => {
                let token = self.bump();
                let TokenKind::Number { lexeme, value } = token.kind else {
                    unreachable!();
                };
                let id = self.alloc_expr(token.location, ExprKind::Number { value });
                self.cst_expr(id, CstExpr::ConstantNumber(CstConstantNumber { lexeme }));
                id
            }
            TokenKind::QuotedString { .. }
            | TokenKind::RawString { .. }
            | TokenKind::InterpSimple { .. } => {
                let token = self.bump();
                self.make_string_expr(token)
            }
            TokenKind::InterpBegin { .. } => self.parse_interp_string(),
            TokenKind::Function => {
                let keyword = self.bump();
                self.parse_function_body_expr(keyword.location.begin, false)
            }
            TokenKind::If => self.parse_if_else_expr(),
            TokenKind::LBrace => self.parse_table_constructor(),
            TokenKind::Ellipsis => {
                let token = self.bump();
                self.alloc_expr(token.location, ExprKind::Varargs)
            }
            _ => self.parse_primary_expr(),
        }
    }

    pub(crate) fn make_string_expr(&mut self, token: Token) -> ExprId {
        let (value, source, style, block_depth) = match token.kind {
            TokenKind::QuotedString {
                value,
                source,
                style,
            } => (value, source, style, 0),
            TokenKind::RawString {
                value,
                source,
                block_depth,
            } => (value, source, QuoteStyle::Raw, block_depth),
            TokenKind::InterpSimple { value, source } => {
                (value, source, QuoteStyle::Interp, 0)
            }
            _ => unreachable!("expected a string token"),
        };

        let id = self.alloc_expr(token.location, ExprKind::String { value });
        self.cst_expr(
            id,
            CstExpr::ConstantString(CstConstantString {
                source,
                style,
                block_depth,
            }),
        );
        id
    }

    fn parse_interp_string(&mut self) -> ExprId {
        let first = self.bump();
        let begin = first.location.begin;
        let TokenKind::InterpBegin { value } = first.kind else {
            unreachable!();
        };

        let mut strings = vec![value];
        let mut expressions = Vec::new();
        let end;

        loop {
            expressions.push(self.parse_expr_full());
            match self.kind() {
                TokenKind::InterpMid { .. } => {
                    let token = self.bump();
                    let TokenKind::InterpMid { value } = token.kind else {
                        unreachable!();
                    };
                    strings.push(value);
                }
                TokenKind::InterpEnd { .. } => {
                    let token = self.bump();
                    let TokenKind::InterpEnd { value } = token.kind else {
                        unreachable!();
                    };
                    strings.push(value);
                    end = token.location.end;
                    break;
                }
                _ => {
                    let location = self.location();
                    self.report(location, "Malformed interpolated string");
                    strings.push(Vec::new());
                    end = self.prev_end();
                    break;
                }
            }
        }

        self.alloc_expr(
            Location::new(begin, end),
            ExprKind::InterpString {
                strings,
                expressions,
            },
        )
    }

    fn parse_if_else_expr(&mut self) -> ExprId {
        let keyword = self.bump();
        self.parse_if_else_expr_continuation(keyword.location.begin)
    }

    fn parse_if_else_expr_continuation(&mut self, begin: Position) -> ExprId {
        let condition = self.parse_expr_full();
        self.expect(&TokenKind::Then, "when parsing if-else expression");
        let true_expr = self.parse_expr_full();

        let false_expr = match self.kind() {
            TokenKind::Elseif => {
                let keyword = self.bump();
                self.parse_if_else_expr_continuation(keyword.location.begin)
            }
            TokenKind::Else => {
                self.bump();
                self.parse_expr_full()
            }
            _ => {
                let location = self.location();
                self.report(location, "Expected 'else' when parsing if-else expression");
                self.error_expr_here()
            }
        };

        let end = self.arena.expr(false_expr).location.end;
        self.alloc_expr(
            Location::new(begin, end),
            ExprKind::IfElse {
                condition,
                true_expr,
                false_expr,
            },
        )
    }

    /// `prefixexp { '.' Name | '[' exp ']' | ':' Name args | args }`.
    pub(crate) fn parse_primary_expr(&mut self) -> ExprId {
        let mut expr = self.parse_prefix_expr();

        loop {
            match self.kind() {
                TokenKind::Dot => {
                    let op_position = self.begin();
                    self.bump();
                    let Some((index, index_location)) =
                        self.expect_name("when parsing index expression")
                    else {
                        break;
                    };
                    expr = self.alloc_index_name(expr, index, index_location, '.', op_position);
                }
                TokenKind::LBracket => {
                    let open_bracket = self.begin();
                    self.bump();
                    let index = self.parse_expr_full();
                    let (close_bracket, end) =
                        match self.expect(&TokenKind::RBracket, "to close index expression") {
                            Some(t) => (t.location.begin, t.location.end),
                            None => (self.prev_end(), self.prev_end()),
                        };

                    let begin = self.arena.expr(expr).location.begin;
                    let id = self.alloc_expr(
                        Location::new(begin, end),
                        ExprKind::IndexExpr { expr, index },
                    );
                    self.cst_expr(
                        id,
                        CstExpr::IndexExpr(CstIndexExpr {
                            open_bracket,
                            close_bracket,
                        }),
                    );
                    expr = id;
                }
                TokenKind::Colon => {
                    let op_position = self.begin();
                    self.bump();
                    let Some((index, index_location)) =
                        self.expect_name("when parsing method call")
                    else {
                        break;
                    };
                    expr = self.alloc_index_name(expr, index, index_location, ':', op_position);

                    if matches!(
                        self.kind(),
                        TokenKind::LParen
                            | TokenKind::LBrace
                            | TokenKind::QuotedString { .. }
                            | TokenKind::RawString { .. }
                            | TokenKind::InterpSimple { .. }
                            | TokenKind::InterpBegin { .. }
                    ) {
                        expr = self.parse_call_args(expr);
                    } else {
                        let location = self.location();
                        self.report(location, "Expected function call arguments");
                        break;
                    }
                }
                TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::QuotedString { .. }
                | TokenKind::RawString { .. }
                | TokenKind::InterpSimple { .. }
                | TokenKind::InterpBegin { .. } => {
                    expr = self.parse_call_args(expr);
                }
                _ => break,
            }
        }

        expr
    }

    fn parse_prefix_expr(&mut self) -> ExprId {
        match self.kind() {
            TokenKind::LParen => {
                let open = self.bump();
                let inner = self.parse_expr_full();
                let end = match self.expect(&TokenKind::RParen, "to close parenthesized expression")
                {
                    Some(t) => t.location.end,
                    None => self.prev_end(),
                };
                self.alloc_expr(
                    Location::new(open.location.begin, end),
                    ExprKind::Group { expr: inner },
                )
            }
            TokenKind::Name(_) => {
                let token = self.bump();
                let TokenKind::Name(name) = token.kind else {
                    unreachable!();
                };
                self.alloc_name_ref(name, token.location)
            }
            TokenKind::Error { message } => {
                let message = message.clone();
                let token = self.bump();
                self.report(token.location, message);
                self.alloc_expr(
                    token.location,
                    ExprKind::Error {
                        expressions: Vec::new(),
                    },
                )
            }
            _ => {
                let location = self.location();
                let message = format!("Expected expression, got {}", super::describe(self.kind()));
                self.report(location, message);
                if !self.at(&TokenKind::Eof) {
                    self.bump();
                }
                self.alloc_expr(
                    location,
                    ExprKind::Error {
                        expressions: Vec::new(),
                    },
                )
            }
        }
    }

    fn parse_call_args(&mut self, func: ExprId) -> ExprId {
        let begin = self.arena.expr(func).location.begin;

        match self.kind() {
            TokenKind::LParen => {
                let open = self.bump();
                let mut commas = Vec::new();
                let args = if self.at(&TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_expr_list(&mut commas)
                };
                let (close_parens, end) =
                    match self.expect(&TokenKind::RParen, "to close function call arguments") {
                        Some(t) => (Some(t.location.begin), t.location.end),
                        None => (None, self.prev_end()),
                    };

                let id = self.alloc_expr(
                    Location::new(begin, end),
                    ExprKind::Call { func, args },
                );
                self.cst_expr(
                    id,
                    CstExpr::Call(CstCall {
                        open_parens: Some(open.location.begin),
                        close_parens,
                        comma_positions: commas,
                    }),
                );
                id
            }
            TokenKind::QuotedString { .. }
            | TokenKind::RawString { .. }
            | TokenKind::InterpSimple { .. } => {
                let token = self.bump();
                let arg = self.make_string_expr(token);
                self.finish_sugared_call(func, begin, arg)
            }
            TokenKind::InterpBegin { .. } => {
                let arg = self.parse_interp_string();
                self.finish_sugared_call(func, begin, arg)
            }
            TokenKind::LBrace => {
                let arg = self.parse_table_constructor();
                self.finish_sugared_call(func, begin, arg)
            }
            _ => unreachable!("caller checked for call argument tokens"),
        }
    }

    /// The paren-free call forms `f "s"`, `` f`s` ``, and `f {t}`.
    fn finish_sugared_call(&mut self, func: ExprId, begin: Position, arg: ExprId) -> ExprId {
        let end = self.arena.expr(arg).location.end;
        let id = self.alloc_expr(
            Location::new(begin, end),
            ExprKind::Call {
                func,
                args: vec![arg],
            },
        );
        self.cst_expr(
            id,
            CstExpr::Call(CstCall {
                open_parens: None,
                close_parens: None,
                comma_positions: Vec::new(),
            }),
        );
        id
    }

    fn parse_table_constructor(&mut self) -> ExprId {
        let open = self.bump();
        let mut items = Vec::new();
        let mut cst_items = Vec::new();

        loop {
            if self.at(&TokenKind::RBrace) || self.at(&TokenKind::Eof) {
                break;
            }

            let mut cst_item = CstTableItem::default();

            let item = match self.kind() {
                TokenKind::LBracket => {
                    cst_item.indexer_open = Some(self.begin());
                    self.bump();
                    let key = self.parse_expr_full();
                    cst_item.indexer_close = self
                        .expect(&TokenKind::RBracket, "to close table key")
                        .map(|t| t.location.begin);
                    cst_item.equals = self
                        .expect(&TokenKind::Equals, "when parsing table entry")
                        .map(|t| t.location.begin);
                    let value = self.parse_expr_full();
                    TableItem {
                        kind: TableItemKind::General,
                        key: Some(key),
                        value,
                    }
                }
                TokenKind::Name(_) if self.peek(1) == &TokenKind::Equals => {
                    let name_token = self.bump();
                    let TokenKind::Name(name) = name_token.kind else {
                        unreachable!();
                    };
                    let key = self.alloc_expr(
                        name_token.location,
                        ExprKind::String {
                            value: name.into_bytes(),
                        },
                    );
                    cst_item.equals = Some(self.begin());
                    self.bump();
                    let value = self.parse_expr_full();
                    TableItem {
                        kind: TableItemKind::Record,
                        key: Some(key),
                        value,
                    }
                }
                _ => {
                    let value = self.parse_expr_full();
                    TableItem {
                        kind: TableItemKind::List,
                        key: None,
                        value,
                    }
                }
            };

            match self.kind() {
                TokenKind::Comma => {
                    cst_item.separator = Some(TableSeparator::Comma);
                    cst_item.separator_position = Some(self.begin());
                    self.bump();
                }
                TokenKind::Semicolon => {
                    cst_item.separator = Some(TableSeparator::Semicolon);
                    cst_item.separator_position = Some(self.begin());
                    self.bump();
                }
                TokenKind::RBrace => {}
                _ => {
                    let location = self.location();
                    self.report(location, "Expected ',' after table constructor element");
                    items.push(item);
                    cst_items.push(cst_item);
                    break;
                }
            }

            items.push(item);
            cst_items.push(cst_item);
        }

        let end = match self.eat(&TokenKind::RBrace) {
            Some(t) => t.location.end,
            None => {
                let location = self.location();
                self.report(location, "Expected '}' to close table constructor");
                self.prev_end()
            }
        };

        let id = self.alloc_expr(
            Location::new(open.location.begin, end),
            ExprKind::Table { items },
        );
        self.cst_expr(id, CstExpr::Table(CstTable { items: cst_items }));
        id
    }

    /// Everything after the `function` keyword: generics, parameters,
    /// return annotation, body, `end`. Returns the function expression.
    pub(crate) fn parse_function_body_expr(
        &mut self,
        function_begin: Position,
        is_method: bool,
    ) -> ExprId {
        let (generics, generic_packs) = if self.at(&TokenKind::Less) {
            self.parse_generic_name_list()
        } else {
            (Vec::new(), Vec::new())
        };

        self.expect(&TokenKind::LParen, "when parsing function parameters");

        let mut args: Vec<Local> = Vec::new();
        let mut args_commas = Vec::new();
        let mut vararg = false;
        let mut vararg_location = Location::default();
        let mut vararg_annotation = None;

        if !self.at(&TokenKind::RParen) {
            loop {
                if self.at(&TokenKind::Ellipsis) {
                    let token = self.bump();
                    vararg = true;
                    vararg_location = token.location;
                    if self.eat(&TokenKind::Colon).is_some() {
                        vararg_annotation = Some(self.parse_vararg_annotation());
                    }
                    break;
                }

                match self.parse_binding() {
                    Some(binding) => args.push(binding),
                    None => break,
                }

                if self.at(&TokenKind::Comma) {
                    args_commas.push(self.begin());
                    self.bump();
                } else {
                    break;
                }
            }
        }

        self.expect(&TokenKind::RParen, "to close function parameters");

        let mut return_specifier = None;
        let mut return_annotation = None;
        if self.at(&TokenKind::Colon) {
            return_specifier = Some(self.begin());
            self.bump();
            return_annotation = Some(self.parse_return_type_list());
        }

        self.push_scope();
        if is_method {
            self.declare("self");
        }
        let names: Vec<String> = args.iter().map(|a| a.name.clone()).collect();
        for name in &names {
            self.declare(name);
        }
        let body = self.parse_block();
        self.pop_scope();

        let end = match self.expect(&TokenKind::End, "to close function body") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        let id = self.alloc_expr(
            Location::new(function_begin, end),
            ExprKind::Function(Box::new(FunctionBody {
                generics,
                generic_packs,
                args,
                vararg,
                vararg_location,
                vararg_annotation,
                return_annotation,
                body,
            })),
        );
        self.cst_expr(
            id,
            CstExpr::Function(CstFunction {
                args_comma_positions: args_commas,
                return_specifier,
            }),
        );
        id
    }

    /// `Name [':' Type]`.
    pub(crate) fn parse_binding(&mut self) -> Option<Local> {
        let (name, location) = self.expect_name("when parsing variable name")?;
        let annotation = if self.eat(&TokenKind::Colon).is_some() {
            Some(self.parse_type())
        } else {
            None
        };
        Some(Local {
            name,
            location,
            annotation,
        })
    }
}
