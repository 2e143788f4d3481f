use super::{CommaSep, Printer};
use crate::arena::ExprId;
use crate::ast::{BinaryOp, ExprKind, TableItem, TableItemKind, UnaryOp};
use crate::escape::escape;
use crate::position::Location;
use crate::source_writer::Writer;

impl<W: Writer> Printer<'_, W> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn emit_expr(&mut self, id: ExprId) {
        let arena = self.arena;
        let cst = self.cst;
        let expr = arena.expr(id);
        self.advance(expr.location.begin);

        match &expr.kind {
            ExprKind::Group { expr: inner } => {
                self.writer.symbol("(");
                self.emit_expr(*inner);
                let mut close = expr.location.end;
                if close.column > 0 {
                    close.column -= 1;
                }
                self.advance(close);
                self.writer.symbol(")");
            }
            ExprKind::Nil => self.writer.keyword("nil"),
            ExprKind::Bool { value } => {
                self.writer.keyword(if *value { "true" } else { "false" });
            }
            ExprKind::Number { value } => {
                if let Some(c) = cst.number(id) {
                    self.writer.literal(&c.lexeme);
                } else {
                    self.emit_number_value(*value);
                }
            }
            ExprKind::String { value } => {
                if let Some(c) = cst.string(id) {
                    self.writer.source_string(&c.source, c.style, c.block_depth);
                } else {
                    self.writer.string(value);
                }
            }
            ExprKind::LocalRef { name } | ExprKind::GlobalRef { name } => {
                self.writer.identifier(name);
            }
            ExprKind::Varargs => self.writer.symbol("..."),
            ExprKind::Call { func, args } => {
                self.emit_expr(*func);

                let call_cst = cst.call(id);
                match call_cst {
                    Some(c) => {
                        if let Some(open) = c.open_parens {
                            self.advance(open);
                            self.writer.symbol("(");
                        }
                    }
                    None => self.writer.symbol("("),
                }

                let mut comma = CommaSep::new(call_cst.map(|c| c.comma_positions.as_slice()));
                for &arg in args {
                    comma.step(self.writer);
                    self.emit_expr(arg);
                }

                match call_cst {
                    Some(c) => {
                        if let Some(close) = c.close_parens {
                            self.advance(close);
                            self.writer.symbol(")");
                        }
                    }
                    None => self.writer.symbol(")"),
                }
            }
            ExprKind::IndexName {
                expr: base,
                index,
                index_location,
                op,
                op_position,
            } => {
                self.emit_expr(*base);
                self.advance(*op_position);
                self.writer.symbol(&op.to_string());
                self.advance(index_location.begin);
                self.writer.write(index);
            }
            ExprKind::IndexExpr { expr: base, index } => {
                self.emit_expr(*base);
                let index_cst = cst.index_expr(id);
                if let Some(c) = index_cst {
                    self.advance(c.open_bracket);
                }
                self.writer.symbol("[");
                self.emit_expr(*index);
                if let Some(c) = index_cst {
                    self.advance(c.close_bracket);
                }
                self.writer.symbol("]");
            }
            ExprKind::Function(_) => {
                self.writer.keyword("function");
                self.emit_function_body(id);
            }
            ExprKind::Table { items } => self.emit_table(id, items, expr.location),
            ExprKind::Unary { op, expr: operand } => {
                if let Some(pos) = cst.op(id) {
                    self.advance(pos);
                }
                match op {
                    UnaryOp::Not => self.writer.keyword("not"),
                    UnaryOp::Minus => self.writer.symbol("-"),
                    UnaryOp::Len => self.writer.symbol("#"),
                }
                self.emit_expr(*operand);
            }
            ExprKind::Binary { op, left, right } => {
                self.emit_expr(*left);

                let right_begin = arena.expr(*right).location.begin;
                let (as_keyword, reserve) = match op {
                    BinaryOp::Add
                    | BinaryOp::Sub
                    | BinaryOp::Mul
                    | BinaryOp::Div
                    | BinaryOp::FloorDiv
                    | BinaryOp::Mod
                    | BinaryOp::Pow
                    | BinaryOp::CompareLt
                    | BinaryOp::CompareGt => (false, 2),
                    BinaryOp::Concat
                    | BinaryOp::CompareNe
                    | BinaryOp::CompareEq
                    | BinaryOp::CompareLe
                    | BinaryOp::CompareGe
                    | BinaryOp::Or => (true, 3),
                    BinaryOp::And => (true, 4),
                };

                match cst.op(id) {
                    Some(pos) => self.advance(pos),
                    None => self.writer.maybe_space(right_begin, reserve),
                }
                if as_keyword {
                    self.writer.keyword(op.token());
                } else {
                    self.writer.symbol(op.token());
                }

                self.emit_expr(*right);
            }
            ExprKind::TypeAssertion { expr: base, annotation } => {
                self.emit_expr(*base);

                if self.write_types {
                    let annotation_begin = arena.ty(*annotation).location.begin;
                    match cst.op(id) {
                        Some(pos) => self.advance(pos),
                        None => self.writer.maybe_space(annotation_begin, 2),
                    }
                    self.writer.symbol("::");
                    self.emit_type(*annotation);
                }
            }
            ExprKind::IfElse {
                condition,
                true_expr,
                false_expr,
            } => {
                self.writer.keyword("if");
                self.emit_expr(*condition);
                self.writer.keyword("then");
                self.emit_expr(*true_expr);
                self.writer.keyword("else");
                self.emit_expr(*false_expr);
            }
            ExprKind::InterpString {
                strings,
                expressions,
            } => {
                self.writer.symbol("`");
                for (index, fragment) in strings.iter().enumerate() {
                    self.writer.write(&escape(fragment, true));
                    if let Some(&hole) = expressions.get(index) {
                        self.writer.symbol("{");
                        self.emit_expr(hole);
                        self.writer.symbol("}");
                    }
                }
                self.writer.symbol("`");
            }
            ExprKind::Error { expressions } => {
                self.writer.symbol("(error-expr");
                for (index, &child) in expressions.iter().enumerate() {
                    self.writer.symbol(if index == 0 { ": " } else { ", " });
                    self.emit_expr(child);
                }
                self.writer.symbol(")");
            }
        }
    }

    fn emit_table(&mut self, id: ExprId, items: &[TableItem], location: Location) {
        let arena = self.arena;
        let cst = self.cst;
        self.writer.symbol("{");

        let cst_items = cst.table(id).map(|t| t.items.as_slice());
        let mut first = true;

        for (index, item) in items.iter().enumerate() {
            let item_cst = cst_items.and_then(|c| c.get(index));

            if cst_items.is_none() {
                if first {
                    first = false;
                } else {
                    self.writer.symbol(",");
                }
            }

            let value_begin = arena.expr(item.value).location.begin;
            match item.kind {
                TableItemKind::List => {}
                TableItemKind::Record => {
                    if let Some(key) = item.key {
                        let key_expr = arena.expr(key);
                        if let ExprKind::String { value } = &key_expr.kind {
                            self.advance(key_expr.location.begin);
                            self.writer.identifier(&String::from_utf8_lossy(value));
                        }
                    }
                    match item_cst.and_then(|c| c.equals) {
                        Some(pos) => self.advance(pos),
                        None => self.writer.maybe_space(value_begin, 1),
                    }
                    self.writer.symbol("=");
                }
                TableItemKind::General => {
                    if let Some(pos) = item_cst.and_then(|c| c.indexer_open) {
                        self.advance(pos);
                    }
                    self.writer.symbol("[");
                    if let Some(key) = item.key {
                        self.emit_expr(key);
                    }
                    if let Some(pos) = item_cst.and_then(|c| c.indexer_close) {
                        self.advance(pos);
                    }
                    self.writer.symbol("]");
                    match item_cst.and_then(|c| c.equals) {
                        Some(pos) => self.advance(pos),
                        None => self.writer.maybe_space(value_begin, 1),
                    }
                    self.writer.symbol("=");
                }
            }

            self.advance(value_begin);
            self.emit_expr(item.value);

            if let Some(c) = item_cst {
                if let (Some(separator), Some(pos)) = (c.separator, c.separator_position) {
                    self.advance(pos);
                    self.writer.symbol(separator.token());
                }
            }
        }

        let mut end_pos = location.end;
        if end_pos.column > 0 {
            end_pos.column -= 1;
        }
        self.advance(end_pos);
        self.writer.symbol("}");
        self.advance(location.end);
    }
}
