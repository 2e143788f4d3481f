//! Type annotation parsing.
//!
//! The `(` ambiguity (parenthesized type, function-type argument list, or
//! explicit type pack) is resolved after the closing paren: a following
//! `->` makes a function type, a multi-element or tailed list in pack
//! position makes an explicit pack, and a single bare type is unwrapped.

use super::{Parser, RECURSION_LIMIT};
use crate::arena::{PackId, TypeId};
use crate::ast::{
    ArgName, FunctionType, GenericName, GenericPackDef, GenericTypeDef, TableAccess, TableIndexer,
    TableProp, Ty, TypeKind, TypeList, TypePack, TypePackKind, TypeParam,
};
use crate::cst::{CstType, CstTypeTableItem, TableSeparator};
use crate::lexer::TokenKind;
use crate::position::{Location, Position};

impl Parser {
    fn alloc_type(&mut self, location: Location, kind: TypeKind) -> TypeId {
        self.arena.alloc_type(Ty { location, kind })
    }

    fn alloc_pack(&mut self, location: Location, kind: TypePackKind) -> PackId {
        self.arena.alloc_pack(TypePack { location, kind })
    }

    fn nil_reference(&mut self, location: Location) -> TypeId {
        self.alloc_type(
            location,
            TypeKind::Reference {
                prefix: None,
                prefix_location: None,
                name: "nil".to_string(),
                name_location: location,
                has_parameter_list: false,
                parameters: Vec::new(),
            },
        )
    }

    fn error_type_here(&mut self) -> TypeId {
        let location = self.location();
        self.alloc_type(location, TypeKind::Error)
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> TypeId {
        if self.depth >= RECURSION_LIMIT {
            let location = self.location();
            self.report(location, "Exceeded allowed recursion depth");
            if !self.at(&TokenKind::Eof) {
                self.bump();
            }
            return self.error_type_here();
        }
        self.depth += 1;

        let begin = self.begin();
        let first = self.parse_simple_type();
        let ty = self.parse_type_suffix(begin, first);

        self.depth -= 1;
        ty
    }

    /// `?`, `|`, and `&` chains after a simple type. A `?` adds `nil` to a
    /// union; mixing `|` and `&` without parentheses is rejected.
    pub(crate) fn parse_type_suffix(&mut self, begin: Position, first: TypeId) -> TypeId {
        let mut parts = vec![first];
        let mut is_union = false;
        let mut is_intersection = false;

        loop {
            match self.kind() {
                TokenKind::Question => {
                    let token = self.bump();
                    let nil = self.nil_reference(token.location);
                    parts.push(nil);
                    is_union = true;
                }
                TokenKind::Pipe => {
                    self.bump();
                    parts.push(self.parse_simple_type());
                    is_union = true;
                }
                TokenKind::Ampersand => {
                    self.bump();
                    parts.push(self.parse_simple_type());
                    is_intersection = true;
                }
                _ => break,
            }
        }

        if parts.len() == 1 {
            return first;
        }

        let end = match parts.last() {
            Some(&last) => self.arena.ty(last).location.end,
            None => begin,
        };
        let location = Location::new(begin, end);

        if is_union && is_intersection {
            self.report(
                location,
                "Mixing union and intersection types is not allowed; wrap either type in parentheses",
            );
        }

        let kind = if is_intersection && !is_union {
            TypeKind::Intersection { types: parts }
        } else {
            TypeKind::Union { types: parts }
        };
        self.alloc_type(location, kind)
    }

    fn parse_simple_type(&mut self) -> TypeId {
        match self.kind() {
            TokenKind::Nil => {
                let token = self.bump();
                self.nil_reference(token.location)
            }
            TokenKind::True => {
                let token = self.bump();
                self.alloc_type(token.location, TypeKind::SingletonBool { value: true })
            }
            TokenKind::False => {
                let token = self.bump();
                self.alloc_type(token.location, TypeKind::SingletonBool { value: false })
            }
            TokenKind::QuotedString { .. } => {
                let token = self.bump();
                let TokenKind::QuotedString {
                    value,
                    source,
                    style,
                } = token.kind
                else {
                    unreachable!();
                };
                let id = self.alloc_type(token.location, TypeKind::SingletonString { value });
                self.cst_type(id, CstType::SingletonString { source, style });
                id
            }
            TokenKind::RawString { .. } | TokenKind::InterpSimple { .. } => {
                let token = self.bump();
                self.report(
                    token.location,
                    "String literal types must use single or double quotes",
                );
                self.alloc_type(token.location, TypeKind::Error)
            }
            TokenKind::Name(name) if name == "typeof" && self.peek(1) == &TokenKind::LParen => {
                let keyword = self.bump();
                self.bump();
                let expr = self.parse_expr_full();
                let end = match self.expect(&TokenKind::RParen, "to close typeof type") {
                    Some(t) => t.location.end,
                    None => self.prev_end(),
                };
                self.alloc_type(
                    Location::new(keyword.location.begin, end),
                    TypeKind::Typeof { expr },
                )
            }
            TokenKind::Name(_) => self.parse_type_reference(),
            TokenKind::LBrace => self.parse_table_type(),
            TokenKind::LParen | TokenKind::Less => {
                match self.parse_function_or_paren_type(false) {
                    Ok(ty) => ty,
                    Err(_) => self.error_type_here(),
                }
            }
            _ => {
                let location = self.location();
                let message = format!("Expected type, got {}", super::describe(self.kind()));
                self.report(location, message);
                if !self.at(&TokenKind::Eof) {
                    self.bump();
                }
                self.alloc_type(location, TypeKind::Error)
            }
        }
    }

    fn parse_type_reference(&mut self) -> TypeId {
        let first = self.bump();
        let begin = first.location.begin;
        let TokenKind::Name(first_name) = first.kind else {
            unreachable!();
        };

        let (prefix, prefix_location, name, name_location) =
            if self.at(&TokenKind::Dot) && matches!(self.peek(1), TokenKind::Name(_)) {
                self.bump();
                let second = self.bump();
                let TokenKind::Name(second_name) = second.kind else {
                    unreachable!();
                };
                (
                    Some(first_name),
                    Some(first.location),
                    second_name,
                    second.location,
                )
            } else {
                (None, None, first_name, first.location)
            };

        let mut has_parameter_list = false;
        let mut parameters = Vec::new();
        let mut end = name_location.end;

        if self.at(&TokenKind::Less) {
            has_parameter_list = true;
            self.bump();
            if !self.at(&TokenKind::Greater) {
                loop {
                    parameters.push(self.parse_type_param());
                    if self.eat(&TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            end = match self.expect(&TokenKind::Greater, "to close type parameter list") {
                Some(t) => t.location.end,
                None => self.prev_end(),
            };
        }

        self.alloc_type(
            Location::new(begin, end),
            TypeKind::Reference {
                prefix,
                prefix_location,
                name,
                name_location,
                has_parameter_list,
                parameters,
            },
        )
    }

    fn parse_type_param(&mut self) -> TypeParam {
        match self.kind() {
            TokenKind::Ellipsis => {
                let token = self.bump();
                let ty = self.parse_type();
                let end = self.arena.ty(ty).location.end;
                TypeParam::Pack(self.alloc_pack(
                    Location::new(token.location.begin, end),
                    TypePackKind::Variadic { ty },
                ))
            }
            TokenKind::Name(_) if self.peek(1) == &TokenKind::Ellipsis => {
                let name_token = self.bump();
                let ellipsis = self.bump();
                let TokenKind::Name(name) = name_token.kind else {
                    unreachable!();
                };
                TypeParam::Pack(self.alloc_pack(
                    Location::new(name_token.location.begin, ellipsis.location.end),
                    TypePackKind::Generic { name },
                ))
            }
            TokenKind::LParen | TokenKind::Less => {
                let begin = self.begin();
                match self.parse_function_or_paren_type(true) {
                    Ok(ty) => TypeParam::Type(self.parse_type_suffix(begin, ty)),
                    Err(pack) => TypeParam::Pack(pack),
                }
            }
            _ => TypeParam::Type(self.parse_type()),
        }
    }

    /// Shared machinery for `(...)` in type position. With `allow_pack`,
    /// a parenthesized list that is not followed by `->` becomes an
    /// explicit type pack instead of an error.
    fn parse_function_or_paren_type(&mut self, allow_pack: bool) -> Result<TypeId, PackId> {
        let begin = self.begin();

        let (generics, generic_packs) = if self.at(&TokenKind::Less) {
            self.parse_generic_name_list()
        } else {
            (Vec::new(), Vec::new())
        };

        self.expect(&TokenKind::LParen, "when parsing function type");

        let mut types = Vec::new();
        let mut names: Vec<Option<ArgName>> = Vec::new();
        let mut tail = None;

        if !self.at(&TokenKind::RParen) {
            loop {
                match self.kind() {
                    TokenKind::Ellipsis => {
                        let token = self.bump();
                        let ty = self.parse_type();
                        let end = self.arena.ty(ty).location.end;
                        tail = Some(self.alloc_pack(
                            Location::new(token.location.begin, end),
                            TypePackKind::Variadic { ty },
                        ));
                        break;
                    }
                    TokenKind::Name(_) if self.peek(1) == &TokenKind::Ellipsis => {
                        let name_token = self.bump();
                        let ellipsis = self.bump();
                        let TokenKind::Name(name) = name_token.kind else {
                            unreachable!();
                        };
                        tail = Some(self.alloc_pack(
                            Location::new(name_token.location.begin, ellipsis.location.end),
                            TypePackKind::Generic { name },
                        ));
                        break;
                    }
                    TokenKind::Name(_) if self.peek(1) == &TokenKind::Colon => {
                        let name_token = self.bump();
                        let TokenKind::Name(name) = name_token.kind else {
                            unreachable!();
                        };
                        names.push(Some(ArgName {
                            name,
                            location: name_token.location,
                        }));
                        self.bump();
                        types.push(self.parse_type());
                    }
                    _ => {
                        names.push(None);
                        types.push(self.parse_type());
                    }
                }

                if self.eat(&TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let close_end = match self.expect(&TokenKind::RParen, "to close type list") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        if self.at(&TokenKind::Arrow) {
            self.bump();
            let return_types = self.parse_return_type_list();
            let end = self.prev_end();
            return Ok(self.alloc_type(
                Location::new(begin, end),
                TypeKind::Function(Box::new(FunctionType {
                    generics,
                    generic_packs,
                    arg_types: TypeList { types, tail },
                    arg_names: names,
                    return_types,
                })),
            ));
        }

        if !generics.is_empty() || !generic_packs.is_empty() {
            let location = Location::new(begin, close_end);
            self.report(location, "Expected '->' after function type argument list");
            return Ok(self.alloc_type(location, TypeKind::Error));
        }

        let is_plain_single =
            types.len() == 1 && tail.is_none() && names.first().map_or(true, |n| n.is_none());
        if is_plain_single {
            return Ok(types[0]);
        }

        if allow_pack {
            return Err(self.alloc_pack(
                Location::new(begin, close_end),
                TypePackKind::Explicit {
                    types: TypeList { types, tail },
                },
            ));
        }

        let location = Location::new(begin, close_end);
        self.report(location, "Expected '->' when parsing function type");
        Ok(self.alloc_type(location, TypeKind::Error))
    }

    /// The annotation after `):` — a single type, a pack, or a
    /// parenthesized list that may itself turn out to be a function type.
    pub(crate) fn parse_return_type_list(&mut self) -> TypeList {
        match self.kind() {
            TokenKind::LParen | TokenKind::Less => {
                let begin = self.begin();
                match self.parse_function_or_paren_type(true) {
                    Ok(ty) => {
                        let ty = self.parse_type_suffix(begin, ty);
                        TypeList {
                            types: vec![ty],
                            tail: None,
                        }
                    }
                    Err(pack) => match &self.arena.pack(pack).kind {
                        TypePackKind::Explicit { types } => types.clone(),
                        _ => TypeList {
                            types: Vec::new(),
                            tail: Some(pack),
                        },
                    },
                }
            }
            TokenKind::Ellipsis => {
                let token = self.bump();
                let ty = self.parse_type();
                let end = self.arena.ty(ty).location.end;
                let pack = self.alloc_pack(
                    Location::new(token.location.begin, end),
                    TypePackKind::Variadic { ty },
                );
                TypeList {
                    types: Vec::new(),
                    tail: Some(pack),
                }
            }
            TokenKind::Name(_) if self.peek(1) == &TokenKind::Ellipsis => {
                let name_token = self.bump();
                let ellipsis = self.bump();
                let TokenKind::Name(name) = name_token.kind else {
                    unreachable!();
                };
                let pack = self.alloc_pack(
                    Location::new(name_token.location.begin, ellipsis.location.end),
                    TypePackKind::Generic { name },
                );
                TypeList {
                    types: Vec::new(),
                    tail: Some(pack),
                }
            }
            _ => {
                let ty = self.parse_type();
                TypeList {
                    types: vec![ty],
                    tail: None,
                }
            }
        }
    }

    fn parse_table_type(&mut self) -> TypeId {
        let open = self.bump();

        // `{ T }` with no property syntax ahead is the array shorthand.
        let is_prop_start = match self.kind() {
            TokenKind::LBracket => true,
            TokenKind::Name(_) if self.peek(1) == &TokenKind::Colon => true,
            TokenKind::Name(name) if name == "read" || name == "write" => matches!(
                self.peek(1),
                TokenKind::Name(_) | TokenKind::LBracket
            ),
            _ => false,
        };

        if !self.at(&TokenKind::RBrace) && !is_prop_start {
            let element = self.parse_type();
            let element_begin = self.arena.ty(element).location.begin;
            let end = match self.expect(&TokenKind::RBrace, "to close table type") {
                Some(t) => t.location.end,
                None => self.prev_end(),
            };

            let index_type = self.alloc_type(
                Location::new(element_begin, element_begin),
                TypeKind::Reference {
                    prefix: None,
                    prefix_location: None,
                    name: "number".to_string(),
                    name_location: Location::new(element_begin, element_begin),
                    has_parameter_list: false,
                    parameters: Vec::new(),
                },
            );

            return self.alloc_type(
                Location::new(open.location.begin, end),
                TypeKind::Table {
                    props: Vec::new(),
                    indexer: Some(TableIndexer {
                        index_type,
                        result_type: element,
                        access: TableAccess::ReadWrite,
                        access_location: None,
                    }),
                },
            );
        }

        let mut props = Vec::new();
        let mut indexer: Option<TableIndexer> = None;
        let mut prop_items: Vec<CstTypeTableItem> = Vec::new();
        let mut indexer_item: Option<CstTypeTableItem> = None;

        while !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
            let mut access = TableAccess::ReadWrite;
            let mut access_location = None;

            if let TokenKind::Name(name) = self.kind() {
                let is_access = (name == "read" || name == "write")
                    && matches!(self.peek(1), TokenKind::Name(_) | TokenKind::LBracket);
                if is_access {
                    access = if name == "read" {
                        TableAccess::Read
                    } else {
                        TableAccess::Write
                    };
                    let token = self.bump();
                    access_location = Some(token.location);
                }
            }

            let mut item = CstTypeTableItem::default();
            let mut is_indexer = false;

            match self.kind() {
                TokenKind::LBracket => {
                    is_indexer = true;
                    let open_bracket = self.bump();
                    item.indexer_open = Some(open_bracket.location.begin);
                    let index_type = self.parse_type();
                    item.indexer_close = self
                        .expect(&TokenKind::RBracket, "to close table type indexer")
                        .map(|t| t.location.begin);
                    item.colon = self
                        .expect(&TokenKind::Colon, "when parsing table type indexer")
                        .map(|t| t.location.begin);
                    let result_type = self.parse_type();

                    if indexer.is_some() {
                        self.report(
                            open_bracket.location,
                            "Cannot have more than one table indexer",
                        );
                    } else {
                        indexer = Some(TableIndexer {
                            index_type,
                            result_type,
                            access,
                            access_location,
                        });
                    }
                }
                TokenKind::Name(_) => {
                    let name_token = self.bump();
                    let TokenKind::Name(name) = name_token.kind else {
                        unreachable!();
                    };
                    item.colon = self
                        .expect(&TokenKind::Colon, "after table type property name")
                        .map(|t| t.location.begin);
                    let ty = self.parse_type();

                    let begin = access_location
                        .map(|l| l.begin)
                        .unwrap_or(name_token.location.begin);
                    props.push(TableProp {
                        name,
                        name_location: name_token.location,
                        location: Location::new(begin, name_token.location.end),
                        access,
                        ty,
                    });
                }
                _ => {
                    let location = self.location();
                    let message =
                        format!("Expected table type property, got {}", super::describe(self.kind()));
                    self.report(location, message);
                    if !self.at(&TokenKind::Eof) {
                        self.bump();
                    }
                    break;
                }
            }

            match self.kind() {
                TokenKind::Comma => {
                    item.separator = Some(TableSeparator::Comma);
                    item.separator_position = Some(self.begin());
                    self.bump();
                }
                TokenKind::Semicolon => {
                    item.separator = Some(TableSeparator::Semicolon);
                    item.separator_position = Some(self.begin());
                    self.bump();
                }
                _ => {}
            }

            if is_indexer {
                indexer_item = Some(item);
            } else {
                prop_items.push(item);
            }
        }

        let end = match self.expect(&TokenKind::RBrace, "to close table type") {
            Some(t) => t.location.end,
            None => self.prev_end(),
        };

        let id = self.alloc_type(
            Location::new(open.location.begin, end),
            TypeKind::Table { props, indexer },
        );

        let mut items = prop_items;
        if let Some(item) = indexer_item {
            items.push(item);
        }
        self.cst_type(id, CstType::Table { items });
        id
    }

    /// `<T, U...>` generic parameter names (no defaults).
    pub(crate) fn parse_generic_name_list(&mut self) -> (Vec<GenericName>, Vec<GenericName>) {
        self.expect(&TokenKind::Less, "when parsing generic parameters");

        let mut generics = Vec::new();
        let mut packs = Vec::new();

        if !self.at(&TokenKind::Greater) {
            loop {
                let Some((name, location)) = self.expect_name("when parsing generic parameter")
                else {
                    break;
                };
                if self.eat(&TokenKind::Ellipsis).is_some() {
                    packs.push(GenericName { name, location });
                } else {
                    generics.push(GenericName { name, location });
                }

                if self.eat(&TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(&TokenKind::Greater, "to close generic parameters");
        (generics, packs)
    }

    /// `<T = D, U... = P>` generic parameters of a type alias, with
    /// defaults and recorded comma positions.
    fn parse_generic_defs(
        &mut self,
    ) -> (Vec<GenericTypeDef>, Vec<GenericPackDef>, Vec<Position>) {
        self.expect(&TokenKind::Less, "when parsing generic parameters");

        let mut generics = Vec::new();
        let mut packs = Vec::new();
        let mut commas = Vec::new();

        if !self.at(&TokenKind::Greater) {
            loop {
                let Some((name, location)) = self.expect_name("when parsing generic parameter")
                else {
                    break;
                };

                if self.eat(&TokenKind::Ellipsis).is_some() {
                    let default = if self.eat(&TokenKind::Equals).is_some() {
                        Some(self.parse_type_pack_default())
                    } else {
                        None
                    };
                    packs.push(GenericPackDef {
                        name,
                        location,
                        default,
                    });
                } else {
                    let default = if self.eat(&TokenKind::Equals).is_some() {
                        Some(self.parse_type())
                    } else {
                        None
                    };
                    generics.push(GenericTypeDef {
                        name,
                        location,
                        default,
                    });
                }

                if self.at(&TokenKind::Comma) {
                    commas.push(self.begin());
                    self.bump();
                } else {
                    break;
                }
            }
        }

        self.expect(&TokenKind::Greater, "to close generic parameters");
        (generics, packs, commas)
    }

    fn parse_type_pack_default(&mut self) -> PackId {
        match self.kind() {
            TokenKind::Ellipsis => {
                let token = self.bump();
                let ty = self.parse_type();
                let end = self.arena.ty(ty).location.end;
                self.alloc_pack(
                    Location::new(token.location.begin, end),
                    TypePackKind::Variadic { ty },
                )
            }
            TokenKind::Name(_) if self.peek(1) == &TokenKind::Ellipsis => {
                let name_token = self.bump();
                let ellipsis = self.bump();
                let TokenKind::Name(name) = name_token.kind else {
                    unreachable!();
                };
                self.alloc_pack(
                    Location::new(name_token.location.begin, ellipsis.location.end),
                    TypePackKind::Generic { name },
                )
            }
            TokenKind::LParen => {
                let begin = self.begin();
                match self.parse_function_or_paren_type(true) {
                    Ok(ty) => {
                        let location = self.arena.ty(ty).location;
                        self.alloc_pack(
                            Location::new(begin, location.end),
                            TypePackKind::Explicit {
                                types: TypeList {
                                    types: vec![ty],
                                    tail: None,
                                },
                            },
                        )
                    }
                    Err(pack) => pack,
                }
            }
            _ => {
                let location = self.location();
                self.report(
                    location,
                    "Expected type pack as default for generic pack parameter",
                );
                let ty = self.parse_type();
                let ty_location = self.arena.ty(ty).location;
                self.alloc_pack(ty_location, TypePackKind::Variadic { ty })
            }
        }
    }

    /// The annotation after `...:` — a variadic element type or a generic
    /// pack name.
    pub(crate) fn parse_vararg_annotation(&mut self) -> PackId {
        match self.kind() {
            TokenKind::Name(_) if self.peek(1) == &TokenKind::Ellipsis => {
                let name_token = self.bump();
                let ellipsis = self.bump();
                let TokenKind::Name(name) = name_token.kind else {
                    unreachable!();
                };
                self.alloc_pack(
                    Location::new(name_token.location.begin, ellipsis.location.end),
                    TypePackKind::Generic { name },
                )
            }
            _ => {
                let ty = self.parse_type();
                let location = self.arena.ty(ty).location;
                self.alloc_pack(location, TypePackKind::Variadic { ty })
            }
        }
    }

    /// `type Name<...> = T` and `type function Name ... end`, reached
    /// through the context-sensitive `type` name. `type_kw` is the
    /// location of that name; `begin` is the statement start (`export`
    /// when present).
    pub(crate) fn parse_type_alias_or_function(
        &mut self,
        type_kw: Location,
        begin: Position,
        exported: bool,
    ) -> crate::arena::StatId {
        use crate::ast::StatKind;
        use crate::cst::CstStat;

        if self.at(&TokenKind::Function) {
            let function_kw = self.bump();
            let (name, name_location) = match self.expect_name("when parsing type function name") {
                Some(n) => n,
                None => ("_".to_string(), self.location()),
            };
            let body = self.parse_function_body_expr(function_kw.location.begin, false);
            let end = self.arena.expr(body).location.end;

            let stat = self.arena.alloc_stat(crate::ast::Stat {
                location: Location::new(begin, end),
                kind: StatKind::TypeFunction {
                    name,
                    name_location,
                    body,
                    exported,
                },
                has_semicolon: false,
            });
            self.cst_stat(
                stat,
                CstStat::TypeFunction {
                    type_keyword_position: type_kw.begin,
                    function_keyword_position: function_kw.location.begin,
                },
            );
            return stat;
        }

        let (name, name_location) = match self.expect_name("when parsing type alias name") {
            Some(n) => n,
            None => ("_".to_string(), self.location()),
        };

        let (generics, generic_packs, generics_commas) = if self.at(&TokenKind::Less) {
            self.parse_generic_defs()
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        let equals_position = self
            .expect(&TokenKind::Equals, "when parsing type alias")
            .map(|t| t.location.begin)
            .unwrap_or_else(|| self.prev_end());

        let ty = self.parse_type();
        let end = self.arena.ty(ty).location.end;

        let stat = self.arena.alloc_stat(crate::ast::Stat {
            location: Location::new(begin, end),
            kind: StatKind::TypeAlias {
                name,
                name_location,
                generics,
                generic_packs,
                ty,
                exported,
            },
            has_semicolon: false,
        });
        self.cst_stat(
            stat,
            CstStat::TypeAlias {
                type_keyword_position: type_kw.begin,
                generics_comma_positions: generics_commas,
                equals_position,
            },
        );
        stat
    }
}
