use super::{ArgNameSep, CommaSep, Printer};
use crate::arena::{PackId, TypeId};
use crate::ast::{ArgName, TypeKind, TypeList, TypePackKind, TypeParam};
use crate::cst::{CstType, CstTypeTableItem};
use crate::source_writer::Writer;

impl<W: Writer> Printer<'_, W> {
    // =========================================================================
    // Type annotations
    // =========================================================================

    pub fn emit_type(&mut self, id: TypeId) {
        let arena = self.arena;
        let cst = self.cst;
        let ty = arena.ty(id);
        self.advance(ty.location.begin);

        match &ty.kind {
            TypeKind::Reference {
                prefix,
                name,
                has_parameter_list,
                parameters,
                ..
            } => {
                if let Some(prefix) = prefix {
                    self.writer.write(prefix);
                    self.writer.symbol(".");
                }
                self.writer.write(name);

                if *has_parameter_list || !parameters.is_empty() {
                    let mut comma = CommaSep::new(None);
                    self.writer.symbol("<");
                    for &param in parameters {
                        comma.step(self.writer);
                        match param {
                            TypeParam::Type(t) => self.emit_type(t),
                            TypeParam::Pack(p) => self.emit_type_pack(p, false),
                        }
                    }
                    self.writer.symbol(">");
                }
            }
            TypeKind::Function(func) => {
                self.emit_generic_names(&func.generics, &func.generic_packs);
                self.emit_type_list(&func.arg_types, true, Some(&func.arg_names));
                self.writer.symbol("->");
                self.emit_type_list(&func.return_types, true, None);
            }
            TypeKind::Table { props, indexer } => {
                // Single number-keyed indexer with no properties is the
                // array shorthand.
                let array_element = match indexer {
                    Some(ix) if props.is_empty() => match &arena.ty(ix.index_type).kind {
                        TypeKind::Reference { name, prefix, .. }
                            if name == "number" && prefix.is_none() =>
                        {
                            Some(ix.result_type)
                        }
                        _ => None,
                    },
                    _ => None,
                };

                if let Some(element) = array_element {
                    self.writer.symbol("{");
                    self.emit_type(element);
                    let mut close = ty.location.end;
                    if close.column > 0 {
                        close.column -= 1;
                    }
                    self.advance(close);
                    self.writer.symbol("}");
                    return;
                }

                let items = match cst.ty(id) {
                    Some(CstType::Table { items }) => Some(items.as_slice()),
                    _ => None,
                };

                self.writer.symbol("{");
                let mut comma = CommaSep::new(None);
                let mut item_index = 0;

                for prop in props {
                    let item = items.and_then(|items| items.get(item_index));
                    if items.is_none() {
                        comma.step(self.writer);
                    }
                    self.advance(prop.location.begin);
                    if let Some(keyword) = prop.access.keyword() {
                        self.writer.keyword(keyword);
                    }
                    self.advance(prop.name_location.begin);
                    self.writer.identifier(&prop.name);
                    if let Some(pos) = item.and_then(|i| i.colon) {
                        self.advance(pos);
                    }
                    self.writer.symbol(":");
                    self.emit_type(prop.ty);
                    self.emit_table_type_separator(items, item_index);
                    item_index += 1;
                }

                if let Some(ix) = indexer {
                    let item = items.and_then(|items| items.get(item_index));
                    if items.is_none() {
                        comma.step(self.writer);
                    }
                    if let Some(access_location) = ix.access_location {
                        self.advance(access_location.begin);
                    }
                    if let Some(keyword) = ix.access.keyword() {
                        self.writer.keyword(keyword);
                    }
                    if let Some(pos) = item.and_then(|i| i.indexer_open) {
                        self.advance(pos);
                    }
                    self.writer.symbol("[");
                    self.emit_type(ix.index_type);
                    if let Some(pos) = item.and_then(|i| i.indexer_close) {
                        self.advance(pos);
                    }
                    self.writer.symbol("]");
                    if let Some(pos) = item.and_then(|i| i.colon) {
                        self.advance(pos);
                    }
                    self.writer.symbol(":");
                    self.emit_type(ix.result_type);
                    self.emit_table_type_separator(items, item_index);
                }

                let mut close = ty.location.end;
                if close.column > 0 {
                    close.column -= 1;
                }
                self.advance(close);
                self.writer.symbol("}");
            }
            TypeKind::Typeof { expr } => {
                self.writer.keyword("typeof");
                self.writer.symbol("(");
                self.emit_expr(*expr);
                self.writer.symbol(")");
            }
            TypeKind::Union { types } => {
                // A two-member union with `nil` contracts to `T?`.
                if types.len() == 2 {
                    let mut left = types[0];
                    let mut right = types[1];
                    if is_nil_reference(arena, left) {
                        std::mem::swap(&mut left, &mut right);
                    }
                    if is_nil_reference(arena, right) {
                        let wrap = matches!(
                            arena.ty(left).kind,
                            TypeKind::Intersection { .. } | TypeKind::Function(_)
                        );
                        if wrap {
                            self.writer.symbol("(");
                        }
                        self.emit_type(left);
                        if wrap {
                            self.writer.symbol(")");
                        }
                        self.writer.symbol("?");
                        return;
                    }
                }

                for (index, &member) in types.iter().enumerate() {
                    if index > 0 {
                        let begin = arena.ty(member).location.begin;
                        self.writer.maybe_space(begin, 2);
                        self.writer.symbol("|");
                    }
                    let wrap = matches!(
                        arena.ty(member).kind,
                        TypeKind::Intersection { .. } | TypeKind::Function(_)
                    );
                    if wrap {
                        self.writer.symbol("(");
                    }
                    self.emit_type(member);
                    if wrap {
                        self.writer.symbol(")");
                    }
                }
            }
            TypeKind::Intersection { types } => {
                for (index, &member) in types.iter().enumerate() {
                    if index > 0 {
                        let begin = arena.ty(member).location.begin;
                        self.writer.maybe_space(begin, 2);
                        self.writer.symbol("&");
                    }
                    let wrap = matches!(
                        arena.ty(member).kind,
                        TypeKind::Union { .. } | TypeKind::Function(_)
                    );
                    if wrap {
                        self.writer.symbol("(");
                    }
                    self.emit_type(member);
                    if wrap {
                        self.writer.symbol(")");
                    }
                }
            }
            TypeKind::SingletonBool { value } => {
                self.writer.keyword(if *value { "true" } else { "false" });
            }
            TypeKind::SingletonString { value } => match cst.ty(id) {
                Some(CstType::SingletonString { source, style }) => {
                    self.writer.source_string(source, *style, 0);
                }
                _ => self.writer.string(value),
            },
            TypeKind::Error => self.writer.symbol("%error-type%"),
        }
    }

    fn emit_table_type_separator(&mut self, items: Option<&[CstTypeTableItem]>, index: usize) {
        if let Some(item) = items.and_then(|items| items.get(index)) {
            if let (Some(separator), Some(pos)) = (item.separator, item.separator_position) {
                self.advance(pos);
                self.writer.symbol(separator.token());
            }
        }
    }

    pub fn emit_type_pack(&mut self, id: PackId, for_vararg: bool) {
        let arena = self.arena;
        let pack = arena.pack(id);
        self.advance(pack.location.begin);

        match &pack.kind {
            TypePackKind::Variadic { ty } => {
                if !for_vararg {
                    self.writer.symbol("...");
                }
                self.emit_type(*ty);
            }
            TypePackKind::Generic { name } => {
                self.writer.symbol(name);
                self.writer.symbol("...");
            }
            TypePackKind::Explicit { types } => {
                debug_assert!(!for_vararg);
                self.emit_type_list(types, true, None);
            }
        }
    }

    pub(crate) fn emit_type_list(
        &mut self,
        list: &TypeList,
        unconditionally_parenthesize: bool,
        arg_names: Option<&[Option<ArgName>]>,
    ) {
        let count = list.types.len() + usize::from(list.tail.is_some());
        let mut names = ArgNameSep::new(arg_names);

        if count == 0 {
            self.writer.symbol("(");
            self.writer.symbol(")");
        } else if count == 1 {
            if unconditionally_parenthesize {
                self.writer.symbol("(");
            }
            if list.types.is_empty() {
                if let Some(tail) = list.tail {
                    self.emit_type_pack(tail, false);
                }
            } else {
                names.step(self.writer);
                self.emit_type(list.types[0]);
            }
            if unconditionally_parenthesize {
                self.writer.symbol(")");
            }
        } else {
            self.writer.symbol("(");

            let mut first = true;
            for &ty in &list.types {
                if first {
                    first = false;
                } else {
                    self.writer.symbol(",");
                }
                names.step(self.writer);
                self.emit_type(ty);
            }

            if let Some(tail) = list.tail {
                self.writer.symbol(",");
                self.emit_type_pack(tail, false);
            }

            self.writer.symbol(")");
        }
    }
}

fn is_nil_reference(arena: &crate::arena::Arena, id: TypeId) -> bool {
    matches!(
        &arena.ty(id).kind,
        TypeKind::Reference { name, prefix, .. } if name == "nil" && prefix.is_none()
    )
}
