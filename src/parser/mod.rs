//! Recursive-descent parser.
//!
//! Produces the three AST node families in a typed arena together with the
//! concrete-syntax side-table the printer consumes. Statement dispatch goes
//! by leading token; anything else parses a primary expression first and
//! then disambiguates between calls, assignments, compound assignments, and
//! the context-sensitive keywords (`continue`, `type`, `export`).
//!
//! Errors are collected rather than thrown; recovery produces `Error`
//! nodes so a broken tree still prints as a diagnostic placeholder.

mod exprs;
mod types;

use serde::Serialize;
use thiserror::Error;

use crate::arena::{Arena, StatId};
use crate::ast::{Local, Stat, StatKind};
use crate::cst::{CstExpr, CstStat, CstType, CstNodeMap};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::position::{Location, Position};

/// Maximum parse recursion before bailing with an error node.
const RECURSION_LIMIT: u32 = 500;

/// Parser configuration.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Record the concrete-syntax side-table. Disable to exercise the
    /// printer's synthesized-output mode.
    pub capture_cst: bool,
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions { capture_cst: true }
    }
}

/// A parse diagnostic with the covering source span.
#[derive(Clone, Debug, Error, Serialize)]
#[error("({}, {}): {}", .location.begin.line, .location.begin.column, .message)]
pub struct ParseError {
    pub location: Location,
    pub message: String,
}

/// Everything a parse produces. The arena owns the nodes; the root is the
/// top-level block statement.
#[derive(Debug)]
pub struct ParseResult {
    pub arena: Arena,
    pub root: Option<StatId>,
    pub cst: CstNodeMap,
    pub errors: Vec<ParseError>,
}

/// Parse a whole source chunk.
pub fn parse(source: &str, options: ParseOptions) -> ParseResult {
    let tokens = tokenize(source);
    let mut parser = Parser {
        tokens,
        pos: 0,
        arena: Arena::new(),
        cst: CstNodeMap::new(),
        errors: Vec::new(),
        capture_cst: options.capture_cst,
        scopes: Vec::new(),
        depth: 0,
    };

    let root = parser.parse_chunk();
    if !parser.errors.is_empty() {
        tracing::debug!(errors = parser.errors.len(), "parse finished with errors");
    }

    ParseResult {
        arena: parser.arena,
        root: Some(root),
        cst: parser.cst,
        errors: parser.errors,
    }
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) arena: Arena,
    pub(crate) cst: CstNodeMap,
    pub(crate) errors: Vec<ParseError>,
    capture_cst: bool,
    /// Names of locals per open scope, for local/global classification.
    scopes: Vec<Vec<String>>,
    pub(crate) depth: u32,
}

impl Parser {
    // =========================================================================
    // Cursor
    // =========================================================================

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    pub(crate) fn peek(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    pub(crate) fn location(&self) -> Location {
        self.current().location
    }

    pub(crate) fn begin(&self) -> Position {
        self.current().location.begin
    }

    /// End of the last consumed token; the cursor start when nothing has
    /// been consumed yet.
    pub(crate) fn prev_end(&self) -> Position {
        if self.pos > 0 {
            self.tokens[self.pos - 1].location.end
        } else {
            self.tokens[0].location.begin
        }
    }

    /// Consume the current token. At end of input this returns the `Eof`
    /// token without moving, so callers must make progress some other way.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, context: &str) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            let message = format!(
                "Expected {} {}, got {}",
                describe(kind),
                context,
                describe(self.kind())
            );
            self.report(self.location(), message);
            None
        }
    }

    pub(crate) fn expect_name(&mut self, context: &str) -> Option<(String, Location)> {
        match self.kind() {
            TokenKind::Name(_) => {
                let token = self.bump();
                let TokenKind::Name(name) = token.kind else {
                    unreachable!();
                };
                Some((name, token.location))
            }
            _ => {
                let message = format!(
                    "Expected identifier {}, got {}",
                    context,
                    describe(self.kind())
                );
                self.report(self.location(), message);
                None
            }
        }
    }

    pub(crate) fn report(&mut self, location: Location, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(
            line = location.begin.line,
            column = location.begin.column,
            %message,
            "parse error"
        );
        self.errors.push(ParseError { location, message });
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(name.to_string());
        }
    }

    pub(crate) fn is_local(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .rev()
            .any(|scope| scope.iter().any(|n| n == name))
    }

    // =========================================================================
    // CST recording
    // =========================================================================

    pub(crate) fn cst_expr(&mut self, id: crate::arena::ExprId, record: CstExpr) {
        if self.capture_cst {
            self.cst.insert_expr(id, record);
        }
    }

    pub(crate) fn cst_stat(&mut self, id: StatId, record: CstStat) {
        if self.capture_cst {
            self.cst.insert_stat(id, record);
        }
    }

    pub(crate) fn cst_type(&mut self, id: crate::arena::TypeId, record: CstType) {
        if self.capture_cst {
            self.cst.insert_type(id, record);
        }
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn parse_chunk(&mut self) -> StatId {
        self.push_scope();
        let body = self.parse_block_body();
        self.pop_scope();

        let end = self.prev_end();
        self.arena.alloc_stat(Stat {
            location: Location::new(Position::new(0, 0), end),
            kind: StatKind::Block { body },
            has_semicolon: false,
        })
    }

    fn block_follows(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Eof
                | TokenKind::End
                | TokenKind::Else
                | TokenKind::Elseif
                | TokenKind::Until
        )
    }

    fn parse_block_body(&mut self) -> Vec<StatId> {
        let mut body = Vec::new();

        while !self.block_follows() {
            let checkpoint = self.pos;
            let stat = self.parse_statement();

            if self.at(&TokenKind::Semicolon) {
                self.bump();
                self.arena.stat_mut(stat).has_semicolon = true;
            }

            body.push(stat);

            // Every statement consumes input; bail out if one did not.
            if self.pos == checkpoint {
                self.bump();
                break;
            }
        }

        body
    }

    /// A statement-list body printed without delimiters. Pushed as its own
    /// scope; the location covers the contained statements only.
    pub(crate) fn parse_block(&mut self) -> StatId {
        self.push_scope();
        let block = self.parse_block_no_scope();
        self.pop_scope();
        block
    }

    fn parse_block_no_scope(&mut self) -> StatId {
        let begin = self.begin();
        let body = self.parse_block_body();
        let end = match body.last() {
            Some(&last) => self.arena.stat(last).location.end,
            None => begin,
        };

        self.arena.alloc_stat(Stat {
            location: Location::new(begin, end),
            kind: StatKind::Block { body },
            has_semicolon: false,
        })
    }

    fn alloc_stat(&mut self, location: Location, kind: StatKind) -> StatId {
        self.arena.alloc_stat(Stat {
            location,
            kind,
            has_semicolon: false,
        })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> StatId {
        match self.kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do(),
            TokenKind::For => self.parse_for(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Function => self.parse_function_stat(),
            TokenKind::Local => self.parse_local(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let token = self.bump();
                self.alloc_stat(token.location, StatKind::Break)
            }
            TokenKind::Error { message } => {
                let message = message.clone();
                let token = self.bump();
                self.report(token.location, message);
                self.alloc_stat(
                    token.location,
                    StatKind::Error {
                        expressions: Vec::new(),
                        statements: Vec::new(),
                    },
                )
            }
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_expr_statement(&mut self) -> StatId {
        let expr = self.parse_primary_expr();
        let expr_location = self.arena.expr(expr).location;

        if self.at(&TokenKind::Comma) || self.at(&TokenKind::Equals) {
            return self.parse_assignment(expr);
        }

        if let Some(op) = compound_op(self.kind()) {
            return self.parse_compound_assign(expr, op);
        }

        if matches!(self.arena.expr(expr).kind, crate::ast::ExprKind::Call { .. }) {
            return self.alloc_stat(expr_location, StatKind::Expr { expr });
        }

        // Not a call or assignment: this can only be one of the
        // context-sensitive keywords parsed as a plain name.
        if let Some(name) = self.bare_name(expr) {
            match name.as_str() {
                "continue" => {
                    return self.alloc_stat(expr_location, StatKind::Continue);
                }
                "type" => {
                    return self.parse_type_alias_or_function(
                        expr_location,
                        expr_location.begin,
                        false,
                    );
                }
                "export" if matches!(self.kind(), TokenKind::Name(n) if n == "type") => {
                    let type_kw = self.bump();
                    return self.parse_type_alias_or_function(
                        type_kw.location,
                        expr_location.begin,
                        true,
                    );
                }
                _ => {}
            }
        }

        self.report(
            expr_location,
            "Incomplete statement: expected assignment or a function call",
        );
        self.alloc_stat(
            expr_location,
            StatKind::Error {
                expressions: vec![expr],
                statements: Vec::new(),
            },
        )
    }

    fn bare_name(&self, expr: crate::arena::ExprId) -> Option<String> {
        match &self.arena.expr(expr).kind {
            crate::ast::ExprKind::LocalRef { name }
            | crate::ast::ExprKind::GlobalRef { name } => Some(name.clone()),
            _ => None,
        }
    }

    fn parse_if(&mut self) -> StatId {
        let keyword = self.bump();
        self.parse_if_continuation(keyword.location.begin)
    }

    /// Parses from the condition onward; used for both `if` and each
    /// `elseif`, whose statement node spans from its own keyword to the
    /// shared `end`.
    fn parse_if_continuation(&mut self, begin: Position) -> StatId {
        let condition = self.parse_expr_full();
        let then_location = self
            .expect(&TokenKind::Then, "when parsing if statement")
            .map(|t| t.location);
        let then_body = self.parse_block();

        let (else_body, else_location, end) = match self.kind() {
            TokenKind::Elseif => {
                let keyword = self.bump();
                let nested = self.parse_if_continuation(keyword.location.begin);
                let end = self.arena.stat(nested).location.end;
                (Some(nested), Some(keyword.location), end)
            }
            TokenKind::Else => {
                let keyword = self.bump();
                let else_block = self.parse_block();
                let end = match self.expect(&TokenKind::End, "to close if statement") {
                    Some(t) => t.location.end,
                    None => self.prev_end(),
                };
                (Some(else_block), Some(keyword.location), end)
            }
            _ => {
                let end = match self.expect(&TokenKind::End, "to close if statement") {
                    Some(t) => t.location.end,
                    None => self.prev_end(),
                };
                (None, None, end)
            }
        };

        self.alloc_stat(
            Location::new(begin, end),
            StatKind::If {
                condition,
                then_body,
                else_body,
                then_location,
                else_location,
            },
        )
    }

    fn parse_while(&mut self) -> StatId {
        let keyword = self.bump();
        let condition = self.parse_expr_full();

        let (has_do, do_location) = match self.expect(&TokenKind::Do, "when parsing while loop") {
            Some(t) => (true, t.location),
            None => (false, Location::new(self.begin(), self.begin())),
        };

        let body = self.parse_block();
        let end = match self.expect(&TokenKind::End, "to close while loop") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::While {
                condition,
                body,
                has_do,
                do_location,
            },
        )
    }

    fn parse_do(&mut self) -> StatId {
        let keyword = self.bump();
        self.push_scope();
        let body = self.parse_block_body();
        self.pop_scope();

        let end = match self.expect(&TokenKind::End, "to close do block") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::Block { body },
        )
    }

    fn parse_repeat(&mut self) -> StatId {
        let keyword = self.bump();

        // Locals of the body stay visible in the condition.
        self.push_scope();
        let body = self.parse_block_no_scope();

        let until_position = self
            .expect(&TokenKind::Until, "to close repeat loop")
            .map(|t| t.location.begin);
        let condition = self.parse_expr_full();
        self.pop_scope();

        let end = self.arena.expr(condition).location.end;
        let stat = self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::Repeat { body, condition },
        );
        if let Some(until_position) = until_position {
            self.cst_stat(stat, CstStat::Repeat { until_position });
        }
        stat
    }

    fn parse_return(&mut self) -> StatId {
        let keyword = self.bump();
        let mut commas = Vec::new();
        let mut list = Vec::new();

        if !self.block_follows() && !self.at(&TokenKind::Semicolon) {
            list = self.parse_expr_list(&mut commas);
        }

        let end = match list.last() {
            Some(&last) => self.arena.expr(last).location.end,
            None => keyword.location.end,
        };

        let stat = self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::Return { list },
        );
        self.cst_stat(
            stat,
            CstStat::Return {
                comma_positions: commas,
            },
        );
        stat
    }

    fn parse_local(&mut self) -> StatId {
        let keyword = self.bump();

        if self.at(&TokenKind::Function) {
            let function_kw = self.bump();
            let (name, name_location) = match self.expect_name("when parsing local function name") {
                Some(n) => n,
                None => ("_".to_string(), self.location()),
            };

            // Declared before the body so the function can recurse.
            self.declare(&name);
            let func = self.parse_function_body_expr(function_kw.location.begin, false);
            let end = self.arena.expr(func).location.end;

            let stat = self.alloc_stat(
                Location::new(keyword.location.begin, end),
                StatKind::LocalFunction {
                    name: Local {
                        name,
                        location: name_location,
                        annotation: None,
                    },
                    func,
                },
            );
            self.cst_stat(
                stat,
                CstStat::LocalFunction {
                    function_keyword_position: function_kw.location.begin,
                },
            );
            return stat;
        }

        let mut vars_commas = Vec::new();
        let mut vars = Vec::new();
        loop {
            match self.parse_binding() {
                Some(binding) => vars.push(binding),
                None => break,
            }
            if self.at(&TokenKind::Comma) {
                vars_commas.push(self.begin());
                self.bump();
            } else {
                break;
            }
        }

        let equals_sign_location = self.eat(&TokenKind::Equals).map(|t| t.location);

        let mut values_commas = Vec::new();
        let values = if equals_sign_location.is_some() {
            self.parse_expr_list(&mut values_commas)
        } else {
            Vec::new()
        };

        // Names come into scope only after their initializers.
        for var in &vars {
            let name = var.name.clone();
            self.declare(&name);
        }

        let end = match values.last() {
            Some(&last) => self.arena.expr(last).location.end,
            None => match vars.last() {
                Some(var) => match var.annotation {
                    Some(ann) => self.arena.ty(ann).location.end,
                    None => var.location.end,
                },
                None => keyword.location.end,
            },
        };

        let stat = self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::Local {
                vars,
                values,
                equals_sign_location,
            },
        );
        self.cst_stat(
            stat,
            CstStat::Local {
                vars_comma_positions: vars_commas,
                values_comma_positions: values_commas,
            },
        );
        stat
    }

    fn parse_for(&mut self) -> StatId {
        let keyword = self.bump();
        let first = match self.parse_binding() {
            Some(binding) => binding,
            None => Local {
                name: "_".to_string(),
                location: self.location(),
                annotation: None,
            },
        };

        if self.at(&TokenKind::Equals) {
            let equals_position = self.begin();
            self.bump();
            let from = self.parse_expr_full();
            let end_comma_position = self
                .expect(&TokenKind::Comma, "when parsing numeric for loop")
                .map(|t| t.location.begin)
                .unwrap_or_else(|| self.prev_end());
            let to = self.parse_expr_full();

            let (step_comma_position, step) = if self.at(&TokenKind::Comma) {
                let comma = self.bump();
                (Some(comma.location.begin), Some(self.parse_expr_full()))
            } else {
                (None, None)
            };

            let (has_do, do_location) = match self.expect(&TokenKind::Do, "when parsing for loop") {
                Some(t) => (true, t.location),
                None => (false, Location::new(self.begin(), self.begin())),
            };

            self.push_scope();
            let name = first.name.clone();
            self.declare(&name);
            let body = self.parse_block();
            self.pop_scope();

            let end = match self.expect(&TokenKind::End, "to close for loop") {
                Some(t) => t.location.end,
                None => self.prev_end(),
            };

            let stat = self.alloc_stat(
                Location::new(keyword.location.begin, end),
                StatKind::For {
                    var: first,
                    from,
                    to,
                    step,
                    body,
                    has_do,
                    do_location,
                },
            );
            self.cst_stat(
                stat,
                CstStat::For {
                    equals_position,
                    end_comma_position,
                    step_comma_position,
                },
            );
            return stat;
        }

        let mut vars = vec![first];
        let mut vars_commas = Vec::new();
        while self.at(&TokenKind::Comma) {
            vars_commas.push(self.begin());
            self.bump();
            match self.parse_binding() {
                Some(binding) => vars.push(binding),
                None => break,
            }
        }

        let (has_in, in_location) = match self.expect(&TokenKind::In, "when parsing for loop") {
            Some(t) => (true, t.location),
            None => (false, Location::new(self.begin(), self.begin())),
        };

        let mut values_commas = Vec::new();
        let values = self.parse_expr_list(&mut values_commas);

        let (has_do, do_location) = match self.expect(&TokenKind::Do, "when parsing for loop") {
            Some(t) => (true, t.location),
            None => (false, Location::new(self.begin(), self.begin())),
        };

        self.push_scope();
        let names: Vec<String> = vars.iter().map(|v| v.name.clone()).collect();
        for name in &names {
            self.declare(name);
        }
        let body = self.parse_block();
        self.pop_scope();

        let end = match self.expect(&TokenKind::End, "to close for loop") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        let stat = self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::ForIn {
                vars,
                values,
                body,
                has_in,
                in_location,
                has_do,
                do_location,
            },
        );
        self.cst_stat(
            stat,
            CstStat::ForIn {
                vars_comma_positions: vars_commas,
                values_comma_positions: values_commas,
            },
        );
        stat
    }

    fn parse_function_stat(&mut self) -> StatId {
        let keyword = self.bump();
        let (name, is_method) = self.parse_function_name();
        let func = self.parse_function_body_expr(keyword.location.begin, is_method);
        let end = self.arena.expr(func).location.end;

        self.alloc_stat(
            Location::new(keyword.location.begin, end),
            StatKind::Function { name, func },
        )
    }

    fn parse_assignment(&mut self, first: crate::arena::ExprId) -> StatId {
        self.check_lvalue(first);
        let begin = self.arena.expr(first).location.begin;

        let mut vars = vec![first];
        let mut vars_commas = Vec::new();
        while self.at(&TokenKind::Comma) {
            vars_commas.push(self.begin());
            self.bump();
            let var = self.parse_primary_expr();
            self.check_lvalue(var);
            vars.push(var);
        }

        let equals_position = self
            .expect(&TokenKind::Equals, "when parsing assignment")
            .map(|t| t.location.begin)
            .unwrap_or_else(|| self.prev_end());

        let mut values_commas = Vec::new();
        let values = self.parse_expr_list(&mut values_commas);

        let end = match values.last() {
            Some(&last) => self.arena.expr(last).location.end,
            None => self.prev_end(),
        };

        let stat = self.alloc_stat(
            Location::new(begin, end),
            StatKind::Assign { vars, values },
        );
        self.cst_stat(
            stat,
            CstStat::Assign {
                vars_comma_positions: vars_commas,
                equals_position,
                values_comma_positions: values_commas,
            },
        );
        stat
    }

    fn parse_compound_assign(
        &mut self,
        var: crate::arena::ExprId,
        op: crate::ast::BinaryOp,
    ) -> StatId {
        self.check_lvalue(var);
        let begin = self.arena.expr(var).location.begin;

        let op_position = self.begin();
        self.bump();
        let value = self.parse_expr_full();
        let end = self.arena.expr(value).location.end;

        let stat = self.alloc_stat(
            Location::new(begin, end),
            StatKind::CompoundAssign { op, var, value },
        );
        self.cst_stat(stat, CstStat::CompoundAssign { op_position });
        stat
    }

    fn check_lvalue(&mut self, expr: crate::arena::ExprId) {
        let node = self.arena.expr(expr);
        if !matches!(
            node.kind,
            crate::ast::ExprKind::LocalRef { .. }
                | crate::ast::ExprKind::GlobalRef { .. }
                | crate::ast::ExprKind::IndexName { .. }
                | crate::ast::ExprKind::IndexExpr { .. }
                | crate::ast::ExprKind::Error { .. }
        ) {
            let location = node.location;
            self.report(
                location,
                "Assigned expression must be a variable or a field",
            );
        }
    }

    /// `name{.name}[:name]` after the `function` keyword; returns the name
    /// chain and whether it ends in a method (`:`).
    fn parse_function_name(&mut self) -> (crate::arena::ExprId, bool) {
        let (name, location) = match self.expect_name("when parsing function name") {
            Some(n) => n,
            None => ("_".to_string(), self.location()),
        };
        let mut expr = self.alloc_name_ref(name, location);

        loop {
            match self.kind() {
                TokenKind::Dot => {
                    let op_position = self.begin();
                    self.bump();
                    let Some((index, index_location)) =
                        self.expect_name("when parsing function name")
                    else {
                        break;
                    };
                    expr = self.alloc_index_name(expr, index, index_location, '.', op_position);
                }
                TokenKind::Colon => {
                    let op_position = self.begin();
                    self.bump();
                    let Some((index, index_location)) =
                        self.expect_name("when parsing method name")
                    else {
                        break;
                    };
                    expr = self.alloc_index_name(expr, index, index_location, ':', op_position);
                    return (expr, true);
                }
                _ => break,
            }
        }

        (expr, false)
    }
}

fn compound_op(kind: &TokenKind) -> Option<crate::ast::BinaryOp> {
    use crate::ast::BinaryOp;
    Some(match kind {
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::DoubleSlashEq => BinaryOp::FloorDiv,
        TokenKind::PercentEq => BinaryOp::Mod,
        TokenKind::CaretEq => BinaryOp::Pow,
        TokenKind::ConcatEq => BinaryOp::Concat,
        _ => return None,
    })
}

/// Human-readable token name for diagnostics.
pub(crate) fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Eof => "<eof>".to_string(),
        TokenKind::Name(name) => format!("'{name}'"),
        TokenKind::Number { lexeme, .. } => format!("'{lexeme}'"),
        TokenKind::QuotedString { .. }
        | TokenKind::RawString { .. }
        | TokenKind::InterpSimple { .. } => "string".to_string(),
        TokenKind::InterpBegin { .. }
        | TokenKind::InterpMid { .. }
        | TokenKind::InterpEnd { .. } => "interpolated string".to_string(),
        TokenKind::Error { message } => message.clone(),
        other => format!("'{}'", token_text(other)),
    }
}

fn token_text(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::And => "and",
        TokenKind::Break => "break",
        TokenKind::Do => "do",
        TokenKind::Else => "else",
        TokenKind::Elseif => "elseif",
        TokenKind::End => "end",
        TokenKind::False => "false",
        TokenKind::For => "for",
        TokenKind::Function => "function",
        TokenKind::If => "if",
        TokenKind::In => "in",
        TokenKind::Local => "local",
        TokenKind::Nil => "nil",
        TokenKind::Not => "not",
        TokenKind::Or => "or",
        TokenKind::Repeat => "repeat",
        TokenKind::Return => "return",
        TokenKind::Then => "then",
        TokenKind::True => "true",
        TokenKind::Until => "until",
        TokenKind::While => "while",
        TokenKind::Plus => "+",
        TokenKind::Minus => "-",
        TokenKind::Star => "*",
        TokenKind::Slash => "/",
        TokenKind::DoubleSlash => "//",
        TokenKind::Percent => "%",
        TokenKind::Caret => "^",
        TokenKind::Hash => "#",
        TokenKind::EqEq => "==",
        TokenKind::NotEq => "~=",
        TokenKind::LessEq => "<=",
        TokenKind::GreaterEq => ">=",
        TokenKind::Less => "<",
        TokenKind::Greater => ">",
        TokenKind::Equals => "=",
        TokenKind::LParen => "(",
        TokenKind::RParen => ")",
        TokenKind::LBrace => "{",
        TokenKind::RBrace => "}",
        TokenKind::LBracket => "[",
        TokenKind::RBracket => "]",
        TokenKind::Semicolon => ";",
        TokenKind::Colon => ":",
        TokenKind::DoubleColon => "::",
        TokenKind::Comma => ",",
        TokenKind::Dot => ".",
        TokenKind::DotDot => "..",
        TokenKind::Ellipsis => "...",
        TokenKind::Arrow => "->",
        TokenKind::Question => "?",
        TokenKind::Pipe => "|",
        TokenKind::Ampersand => "&",
        TokenKind::PlusEq => "+=",
        TokenKind::MinusEq => "-=",
        TokenKind::StarEq => "*=",
        TokenKind::SlashEq => "/=",
        TokenKind::DoubleSlashEq => "//=",
        TokenKind::PercentEq => "%=",
        TokenKind::CaretEq => "^=",
        TokenKind::ConcatEq => "..=",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;

    fn parse_ok(source: &str) -> ParseResult {
        let result = parse(source, ParseOptions::default());
        assert!(
            result.errors.is_empty(),
            "unexpected errors for {source:?}: {:?}",
            result.errors
        );
        result
    }

    fn block_body(result: &ParseResult) -> Vec<StatId> {
        let root = result.root.expect("parse yields a root");
        match &result.arena.stat(root).kind {
            StatKind::Block { body } => body.clone(),
            other => panic!("root must be a block, got {other:?}"),
        }
    }

    #[test]
    fn test_local_and_global_classification() {
        let result = parse_ok("local x = 1\nprint(x, y)");
        let body = block_body(&result);

        let StatKind::Expr { expr } = &result.arena.stat(body[1]).kind else {
            panic!("expected an expression statement");
        };
        let ExprKind::Call { args, .. } = &result.arena.expr(*expr).kind else {
            panic!("expected a call");
        };
        assert!(matches!(
            result.arena.expr(args[0]).kind,
            ExprKind::LocalRef { .. }
        ));
        assert!(matches!(
            result.arena.expr(args[1]).kind,
            ExprKind::GlobalRef { .. }
        ));
    }

    #[test]
    fn test_local_initializer_sees_outer_scope() {
        let result = parse_ok("local x = x");
        let body = block_body(&result);

        let StatKind::Local { values, .. } = &result.arena.stat(body[0]).kind else {
            panic!("expected a local declaration");
        };
        assert!(matches!(
            result.arena.expr(values[0]).kind,
            ExprKind::GlobalRef { .. }
        ));
    }

    #[test]
    fn test_repeat_scope_extends_to_condition() {
        let result = parse_ok("repeat\n    local done = true\nuntil done");
        let body = block_body(&result);

        let StatKind::Repeat { condition, .. } = &result.arena.stat(body[0]).kind else {
            panic!("expected a repeat loop");
        };
        assert!(matches!(
            result.arena.expr(*condition).kind,
            ExprKind::LocalRef { .. }
        ));
    }

    #[test]
    fn test_contextual_keywords_stay_names() {
        parse_ok("local type = 1\nlocal export = type");
        parse_ok("continue(1)");
    }

    #[test]
    fn test_cst_capture_toggle() {
        let with_cst = parse_ok("local x = 1");
        assert!(!with_cst.cst.is_empty());

        let without_cst = parse("local x = 1", ParseOptions { capture_cst: false });
        assert!(without_cst.errors.is_empty());
        assert!(without_cst.cst.is_empty());
    }

    #[test]
    fn test_recovery_keeps_a_tree() {
        let result = parse("local x = ", ParseOptions::default());
        assert!(!result.errors.is_empty());
        assert!(result.root.is_some());
        assert_eq!(block_body(&result).len(), 1);
    }

    #[test]
    fn test_statement_semicolon_flag() {
        let result = parse_ok("local x = 1;");
        let body = block_body(&result);
        assert!(result.arena.stat(body[0]).has_semicolon);
    }
}
