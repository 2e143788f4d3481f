//! Typed arena for the three AST node families.
//!
//! Nodes are stored in plain vectors and addressed by `u32` index newtypes.
//! Indices are stable for the lifetime of the arena, which makes them usable
//! as keys into the concrete-syntax side-table without embedding any
//! back-pointers in the nodes themselves.

use serde::Serialize;

use crate::ast::{Expr, Stat, Ty, TypePack};

/// Index of an expression node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ExprId(pub u32);

/// Index of a statement node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct StatId(pub u32);

/// Index of a type annotation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub u32);

/// Index of a type pack node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PackId(pub u32);

/// Owns every node produced by a single parse session.
///
/// The printer borrows the arena read-only; nothing here is mutated after
/// parsing completes.
#[derive(Debug, Default)]
pub struct Arena {
    exprs: Vec<Expr>,
    stats: Vec<Stat>,
    types: Vec<Ty>,
    packs: Vec<TypePack>,
}

impl Arena {
    pub fn new() -> Arena {
        Arena::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn alloc_stat(&mut self, stat: Stat) -> StatId {
        let id = StatId(self.stats.len() as u32);
        self.stats.push(stat);
        id
    }

    pub fn alloc_type(&mut self, ty: Ty) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    pub fn alloc_pack(&mut self, pack: TypePack) -> PackId {
        let id = PackId(self.packs.len() as u32);
        self.packs.push(pack);
        id
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.0 as usize]
    }

    pub fn stat(&self, id: StatId) -> &Stat {
        &self.stats[id.0 as usize]
    }

    pub fn ty(&self, id: TypeId) -> &Ty {
        &self.types[id.0 as usize]
    }

    pub fn pack(&self, id: PackId) -> &TypePack {
        &self.packs[id.0 as usize]
    }

    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.0 as usize]
    }

    pub fn stat_mut(&mut self, id: StatId) -> &mut Stat {
        &mut self.stats[id.0 as usize]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stat_count(&self) -> usize {
        self.stats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExprKind, StatKind};
    use crate::position::Location;

    #[test]
    fn test_ids_are_stable() {
        let mut arena = Arena::new();
        let a = arena.alloc_expr(Expr {
            location: Location::default(),
            kind: ExprKind::Nil,
        });
        let b = arena.alloc_expr(Expr {
            location: Location::default(),
            kind: ExprKind::Varargs,
        });
        assert_ne!(a, b);
        assert!(matches!(arena.expr(a).kind, ExprKind::Nil));
        assert!(matches!(arena.expr(b).kind, ExprKind::Varargs));
    }

    #[test]
    fn test_families_are_independent() {
        let mut arena = Arena::new();
        let e = arena.alloc_expr(Expr {
            location: Location::default(),
            kind: ExprKind::Nil,
        });
        let s = arena.alloc_stat(Stat {
            location: Location::default(),
            kind: StatKind::Break,
            has_semicolon: false,
        });
        assert_eq!(e.0, 0);
        assert_eq!(s.0, 0);
    }
}
