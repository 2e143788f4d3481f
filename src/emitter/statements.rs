use super::{CommaSep, Printer};
use crate::arena::StatId;
use crate::ast::StatKind;
use crate::cst::CstStat;
use crate::position::Position;
use crate::source_writer::Writer;

impl<W: Writer> Printer<'_, W> {
    // =========================================================================
    // Statements
    // =========================================================================

    pub fn emit_stat(&mut self, id: StatId) {
        let arena = self.arena;
        let cst = self.cst;
        let stat = arena.stat(id);
        self.advance(stat.location.begin);

        let mut suppressed = false;

        match &stat.kind {
            StatKind::Block { body } => {
                self.writer.keyword("do");
                for &child in body {
                    self.emit_stat(child);
                }
                self.write_end(stat.location);
            }
            StatKind::If { .. } => {
                self.writer.keyword("if");
                self.emit_elseif_chain(id);
            }
            StatKind::While {
                condition,
                body,
                do_location,
                ..
            } => {
                self.writer.keyword("while");
                self.emit_expr(*condition);
                self.advance(do_location.begin);
                self.writer.keyword("do");
                self.emit_block_body(*body);
                self.write_end(stat.location);
            }
            StatKind::Repeat { body, condition } => {
                self.writer.keyword("repeat");
                self.emit_block_body(*body);

                let until_position = match cst.stat(id) {
                    Some(CstStat::Repeat { until_position }) => Some(*until_position),
                    _ => None,
                };
                let condition_begin = arena.expr(*condition).location.begin;
                match until_position {
                    Some(pos) => self.advance(pos),
                    None => {
                        if condition_begin.column > 5 {
                            self.advance(Position::new(
                                condition_begin.line,
                                condition_begin.column - 6,
                            ));
                        }
                    }
                }
                self.writer.keyword("until");
                self.emit_expr(*condition);
            }
            StatKind::Break => self.writer.keyword("break"),
            StatKind::Continue => self.writer.keyword("continue"),
            StatKind::Return { list } => {
                let commas = match cst.stat(id) {
                    Some(CstStat::Return { comma_positions }) => Some(comma_positions.as_slice()),
                    _ => None,
                };
                self.writer.keyword("return");
                let mut comma = CommaSep::new(commas);
                for &value in list {
                    comma.step(self.writer);
                    self.emit_expr(value);
                }
            }
            StatKind::Expr { expr } => self.emit_expr(*expr),
            StatKind::Local {
                vars,
                values,
                equals_sign_location,
            } => {
                let (vars_commas, values_commas) = match cst.stat(id) {
                    Some(CstStat::Local {
                        vars_comma_positions,
                        values_comma_positions,
                    }) => (
                        Some(vars_comma_positions.as_slice()),
                        Some(values_comma_positions.as_slice()),
                    ),
                    _ => (None, None),
                };

                self.writer.keyword("local");

                let mut var_comma = CommaSep::new(vars_commas);
                for var in vars {
                    var_comma.step(self.writer);
                    self.emit_binding(var);
                }

                if let Some(equals) = equals_sign_location {
                    self.advance(equals.begin);
                    self.writer.symbol("=");
                }

                let mut value_comma = CommaSep::new(values_commas);
                for &value in values {
                    value_comma.step(self.writer);
                    self.emit_expr(value);
                }
            }
            StatKind::For {
                var,
                from,
                to,
                step,
                body,
                do_location,
                ..
            } => {
                let for_cst = match cst.stat(id) {
                    Some(CstStat::For {
                        equals_position,
                        end_comma_position,
                        step_comma_position,
                    }) => Some((*equals_position, *end_comma_position, *step_comma_position)),
                    _ => None,
                };

                self.writer.keyword("for");
                self.emit_binding(var);
                if let Some((equals, _, _)) = for_cst {
                    self.advance(equals);
                }
                self.writer.symbol("=");
                self.emit_expr(*from);
                if let Some((_, end_comma, _)) = for_cst {
                    self.advance(end_comma);
                }
                self.writer.symbol(",");
                self.emit_expr(*to);
                if let Some(step) = step {
                    if let Some((_, _, Some(step_comma))) = for_cst {
                        self.advance(step_comma);
                    }
                    self.writer.symbol(",");
                    self.emit_expr(*step);
                }
                self.advance(do_location.begin);
                self.writer.keyword("do");
                self.emit_block_body(*body);
                self.write_end(stat.location);
            }
            StatKind::ForIn {
                vars,
                values,
                body,
                in_location,
                do_location,
                ..
            } => {
                let (vars_commas, values_commas) = match cst.stat(id) {
                    Some(CstStat::ForIn {
                        vars_comma_positions,
                        values_comma_positions,
                    }) => (
                        Some(vars_comma_positions.as_slice()),
                        Some(values_comma_positions.as_slice()),
                    ),
                    _ => (None, None),
                };

                self.writer.keyword("for");

                let mut var_comma = CommaSep::new(vars_commas);
                for var in vars {
                    var_comma.step(self.writer);
                    self.emit_binding(var);
                }

                self.advance(in_location.begin);
                self.writer.keyword("in");

                let mut value_comma = CommaSep::new(values_commas);
                for &value in values {
                    value_comma.step(self.writer);
                    self.emit_expr(value);
                }

                self.advance(do_location.begin);
                self.writer.keyword("do");
                self.emit_block_body(*body);
                self.write_end(stat.location);
            }
            StatKind::Assign { vars, values } => {
                let assign_cst = match cst.stat(id) {
                    Some(CstStat::Assign {
                        vars_comma_positions,
                        equals_position,
                        values_comma_positions,
                    }) => Some((
                        vars_comma_positions.as_slice(),
                        *equals_position,
                        values_comma_positions.as_slice(),
                    )),
                    _ => None,
                };

                let mut var_comma = CommaSep::new(assign_cst.map(|c| c.0));
                for &var in vars {
                    var_comma.step(self.writer);
                    self.emit_expr(var);
                }

                if let Some((_, equals, _)) = assign_cst {
                    self.advance(equals);
                }
                self.writer.symbol("=");

                let mut value_comma = CommaSep::new(assign_cst.map(|c| c.2));
                for &value in values {
                    value_comma.step(self.writer);
                    self.emit_expr(value);
                }
            }
            StatKind::CompoundAssign { op, var, value } => {
                self.emit_expr(*var);

                if let Some(CstStat::CompoundAssign { op_position }) = cst.stat(id) {
                    self.advance(*op_position);
                }
                let token = op
                    .compound_token()
                    .unwrap_or_else(|| unreachable!("operator has no compound form"));
                self.writer.symbol(token);

                self.emit_expr(*value);
            }
            StatKind::Function { name, func } => {
                self.writer.keyword("function");
                self.emit_expr(*name);
                self.emit_function_body(*func);
            }
            StatKind::LocalFunction { name, func } => {
                self.writer.keyword("local");

                match cst.stat(id) {
                    Some(CstStat::LocalFunction {
                        function_keyword_position,
                    }) => self.advance(*function_keyword_position),
                    _ => self.writer.space(),
                }

                self.writer.keyword("function");
                self.advance(name.location.begin);
                self.writer.identifier(&name.name);
                self.emit_function_body(*func);
            }
            StatKind::TypeAlias {
                name,
                name_location,
                generics,
                generic_packs,
                ty,
                exported,
            } => {
                if !self.write_types {
                    suppressed = true;
                } else {
                    let alias_cst = match cst.stat(id) {
                        Some(CstStat::TypeAlias {
                            type_keyword_position,
                            generics_comma_positions,
                            equals_position,
                        }) => Some((
                            *type_keyword_position,
                            generics_comma_positions.as_slice(),
                            *equals_position,
                        )),
                        _ => None,
                    };

                    if *exported {
                        self.writer.keyword("export");
                    }
                    if let Some((type_kw, _, _)) = alias_cst {
                        self.advance(type_kw);
                    }
                    self.writer.keyword("type");
                    self.advance(name_location.begin);
                    self.writer.identifier(name);

                    if !generics.is_empty() || !generic_packs.is_empty() {
                        self.writer.symbol("<");
                        let mut comma = CommaSep::new(alias_cst.map(|c| c.1));

                        for generic in generics {
                            comma.step(self.writer);
                            self.advance(generic.location.begin);
                            self.writer.identifier(&generic.name);
                            if let Some(default) = generic.default {
                                let default_begin = arena.ty(default).location.begin;
                                self.writer.maybe_space(default_begin, 2);
                                self.writer.symbol("=");
                                self.emit_type(default);
                            }
                        }

                        for pack in generic_packs {
                            comma.step(self.writer);
                            self.advance(pack.location.begin);
                            self.writer.identifier(&pack.name);
                            self.writer.symbol("...");
                            if let Some(default) = pack.default {
                                let default_begin = arena.pack(default).location.begin;
                                self.writer.maybe_space(default_begin, 2);
                                self.writer.symbol("=");
                                self.emit_type_pack(default, false);
                            }
                        }

                        self.writer.symbol(">");
                    }

                    let ty_begin = arena.ty(*ty).location.begin;
                    match alias_cst {
                        Some((_, _, equals)) => self.advance(equals),
                        None => self.writer.maybe_space(ty_begin, 2),
                    }
                    self.writer.symbol("=");
                    self.emit_type(*ty);
                }
            }
            StatKind::TypeFunction {
                name,
                name_location,
                body,
                exported,
            } => {
                if !self.write_types {
                    suppressed = true;
                } else {
                    let function_cst = match cst.stat(id) {
                        Some(CstStat::TypeFunction {
                            type_keyword_position,
                            function_keyword_position,
                        }) => Some((*type_keyword_position, *function_keyword_position)),
                        _ => None,
                    };

                    if *exported {
                        self.writer.keyword("export");
                    }
                    if let Some((type_kw, _)) = function_cst {
                        self.advance(type_kw);
                    }
                    self.writer.keyword("type");
                    if let Some((_, function_kw)) = function_cst {
                        self.advance(function_kw);
                    }
                    self.writer.keyword("function");
                    self.advance(name_location.begin);
                    self.writer.identifier(name);
                    self.emit_function_body(*body);
                }
            }
            StatKind::Error {
                expressions,
                statements,
            } => {
                self.writer.symbol("(error-stat");
                for (index, &child) in expressions.iter().enumerate() {
                    self.writer.symbol(if index == 0 { ": " } else { ", " });
                    self.emit_expr(child);
                }
                for (index, &child) in statements.iter().enumerate() {
                    self.writer
                        .symbol(if index == 0 && expressions.is_empty() {
                            ": "
                        } else {
                            ", "
                        });
                    self.emit_stat(child);
                }
                self.writer.symbol(")");
            }
        }

        if stat.has_semicolon && !suppressed {
            let mut pos = stat.location.end;
            if pos.column > 0 {
                pos.column -= 1;
            }
            self.advance(pos);
            self.writer.symbol(";");
        }
    }

    /// The `if`/`elseif` chain: the caller has emitted the leading keyword.
    fn emit_elseif_chain(&mut self, id: StatId) {
        let arena = self.arena;
        let stat = arena.stat(id);
        let StatKind::If {
            condition,
            then_body,
            else_body,
            then_location,
            else_location,
        } = &stat.kind
        else {
            unreachable!("expected an if statement");
        };

        self.emit_expr(*condition);
        if let Some(then_loc) = then_location {
            self.advance(then_loc.begin);
        }
        self.writer.keyword("then");
        self.emit_block_body(*then_body);

        match else_body {
            None => self.write_end(stat.location),
            Some(else_id) => {
                let is_elseif = matches!(arena.stat(*else_id).kind, StatKind::If { .. });
                if is_elseif {
                    if let Some(else_loc) = else_location {
                        self.advance(else_loc.begin);
                    }
                    self.writer.keyword("elseif");
                    self.emit_elseif_chain(*else_id);
                } else {
                    if let Some(else_loc) = else_location {
                        self.advance(else_loc.begin);
                    }
                    self.writer.keyword("else");
                    self.emit_block_body(*else_id);
                    self.write_end(stat.location);
                }
            }
        }
    }
}
