//! Printer behavior beyond byte-identity: untyped mode, synthesized output
//! when the side-table is absent, recovery placeholders, numeric fallback
//! boundaries, and the single-error transpile contract.

use luz::ast::{Expr, ExprKind, StatKind, Ty, TypeKind};
use luz::{
    parse, to_string, transpile, Arena, Location, NodeRef, ParseOptions, Position,
};

fn no_cst() -> ParseOptions {
    ParseOptions { capture_cst: false }
}

// =============================================================================
// Untyped mode
// =============================================================================

#[test]
fn test_untyped_mode_drops_type_alias() {
    let out = transpile("type Maybe<T> = T | nil", ParseOptions::default(), false)
        .expect("source parses");
    assert_eq!(out, "");
}

#[test]
fn test_untyped_mode_drops_type_function() {
    let out = transpile(
        "type function double(x)\n    return x\nend",
        ParseOptions::default(),
        false,
    )
    .expect("source parses");
    assert_eq!(out, "");
}

#[test]
fn test_untyped_mode_strips_annotations() {
    let out = transpile("local x: number = 1", ParseOptions::default(), false)
        .expect("source parses");
    // Stripping the annotation leaves the recorded positions intact, so the
    // gap is padded with spaces.
    assert_eq!(out, format!("local x{}= 1", " ".repeat(9)));
}

#[test]
fn test_untyped_mode_strips_assertions() {
    let out = transpile("local n = x :: number", ParseOptions::default(), false)
        .expect("source parses");
    assert_eq!(out, "local n = x");
}

#[test]
fn test_untyped_output_stays_parseable() {
    let sources = [
        "local x: number, y: string = 1, 'a'",
        "local function f(a: number): number\n    return a\nend",
        "type X = number\nlocal x = 1",
    ];
    for source in sources {
        let out = transpile(source, ParseOptions::default(), false).expect("source parses");
        let reparsed = parse(&out, ParseOptions::default());
        assert!(
            reparsed.errors.is_empty(),
            "untyped output failed to reparse: {out:?} ({:?})",
            reparsed.errors
        );
    }
}

// =============================================================================
// Synthesized output (no side-table)
// =============================================================================

#[test]
fn test_no_cst_default_string_quoting() {
    let out = transpile("local s = \"hi\"", no_cst(), true).expect("source parses");
    assert_eq!(out, "local s = 'hi'");
}

#[test]
fn test_no_cst_string_with_single_quote_switches_to_double() {
    let out = transpile("local s = \"it's\"", no_cst(), true).expect("source parses");
    assert_eq!(out, "local s = \"it\\'s\"");
}

#[test]
fn test_no_cst_numbers_reconstructed_from_value() {
    let out = transpile("local n = 0x10", no_cst(), true).expect("source parses");
    assert_eq!(out, "local n = 16");

    let out = transpile("local n = 1_000", no_cst(), true).expect("source parses");
    assert_eq!(out, "local n = 1000");
}

#[test]
fn test_no_cst_sugared_call_gets_parens() {
    let out = transpile("print \"hi\"", no_cst(), true).expect("source parses");
    assert_eq!(out, "print('hi')");
}

#[test]
fn test_no_cst_concat_keeps_tokens_apart() {
    let out = transpile("local x = 1 .. 2", no_cst(), true).expect("source parses");
    assert_eq!(out, "local x = 1 .. 2");
}

#[test]
fn test_no_cst_output_reparses_structurally() {
    let sources = [
        "local t = { x = 1, [2] = \"two\"; 3 }",
        "for i=1,10,2 do end",
        "local s = `a{x}b`",
        "if a then f() elseif b then g() else h() end",
    ];
    for source in sources {
        let out = transpile(source, no_cst(), true).expect("source parses");
        let reparsed = parse(&out, ParseOptions::default());
        assert!(
            reparsed.errors.is_empty(),
            "synthesized output failed to reparse: {out:?} ({:?})",
            reparsed.errors
        );
    }
}

// =============================================================================
// Parse failure contract
// =============================================================================

#[test]
fn test_malformed_number_error_location() {
    let err = transpile("local 1x = 2", ParseOptions::default(), true)
        .expect_err("source must not parse");
    assert_eq!(err.location.begin, Position::new(0, 6));
    assert_eq!(err.location.end, Position::new(0, 8));
    assert!(
        err.message.contains("Malformed number"),
        "unexpected message: {}",
        err.message
    );
}

#[test]
fn test_first_error_wins() {
    let result = parse("local = 5\nlocal 2y = 3", ParseOptions::default());
    assert!(result.errors.len() >= 2);

    let err = transpile("local = 5\nlocal 2y = 3", ParseOptions::default(), true)
        .expect_err("source must not parse");
    assert_eq!(err.location.begin.line, 0);
}

#[test]
fn test_unfinished_string_is_an_error() {
    let err = transpile("local s = 'abc", ParseOptions::default(), true)
        .expect_err("source must not parse");
    assert!(
        err.message.contains("Unfinished string"),
        "unexpected message: {}",
        err.message
    );
}

#[test]
fn test_empty_source_is_empty_output() {
    let out = transpile("", ParseOptions::default(), true).expect("empty source parses");
    assert_eq!(out, "");
}

// =============================================================================
// to_string
// =============================================================================

#[test]
fn test_to_string_statement() {
    let result = parse("return 1 + 2", ParseOptions::default());
    let root = result.root.expect("parse yields a root");
    let StatKind::Block { body } = &result.arena.stat(root).kind else {
        panic!("root must be a block");
    };

    let text = to_string(&result.arena, NodeRef::Stat(body[0]));
    assert_eq!(text, "return 1 + 2");
}

#[test]
fn test_to_string_seeds_cursor_at_node_begin() {
    // A node that starts mid-line must not emit leading padding.
    let result = parse("local value = 40 + 2", ParseOptions::default());
    let root = result.root.expect("parse yields a root");
    let StatKind::Block { body } = &result.arena.stat(root).kind else {
        panic!("root must be a block");
    };
    let StatKind::Local { values, .. } = &result.arena.stat(body[0]).kind else {
        panic!("expected local declaration");
    };

    let text = to_string(&result.arena, NodeRef::Expr(values[0]));
    assert_eq!(text, "40 + 2");
}

// =============================================================================
// Numeric fallback boundaries
// =============================================================================

fn number_to_string(value: f64) -> String {
    let mut arena = Arena::new();
    let id = arena.alloc_expr(Expr {
        location: Location::default(),
        kind: ExprKind::Number { value },
    });
    to_string(&arena, NodeRef::Expr(id))
}

#[test]
fn test_number_fallback_integers() {
    assert_eq!(number_to_string(0.0), "0");
    assert_eq!(number_to_string(42.0), "42");
    assert_eq!(number_to_string(-1.0), "-1");
    assert_eq!(number_to_string(2147483647.0), "2147483647");
}

#[test]
fn test_number_fallback_negative_zero() {
    assert_eq!(number_to_string(-0.0), "-0");
}

#[test]
fn test_number_fallback_two_pow_31_uses_g17() {
    assert_eq!(number_to_string(2147483648.0), "2147483648");
}

#[test]
fn test_number_fallback_specials() {
    assert_eq!(number_to_string(f64::INFINITY), "1e500");
    assert_eq!(number_to_string(f64::NEG_INFINITY), "-1e500");
    assert_eq!(number_to_string(f64::NAN), "0/0");
}

// =============================================================================
// Recovery placeholders
// =============================================================================

#[test]
fn test_error_expr_placeholder() {
    let mut arena = Arena::new();
    let nil = arena.alloc_expr(Expr {
        location: Location::default(),
        kind: ExprKind::Nil,
    });
    let error = arena.alloc_expr(Expr {
        location: Location::default(),
        kind: ExprKind::Error {
            expressions: vec![nil],
        },
    });
    assert_eq!(to_string(&arena, NodeRef::Expr(error)), "(error-expr: nil)");

    let empty = arena.alloc_expr(Expr {
        location: Location::default(),
        kind: ExprKind::Error {
            expressions: Vec::new(),
        },
    });
    assert_eq!(to_string(&arena, NodeRef::Expr(empty)), "(error-expr)");
}

#[test]
fn test_error_type_placeholder() {
    let mut arena = Arena::new();
    let error = arena.alloc_type(Ty {
        location: Location::default(),
        kind: TypeKind::Error,
    });
    assert_eq!(to_string(&arena, NodeRef::Type(error)), "%error-type%");
}

#[test]
fn test_clean_parse_never_prints_placeholders() {
    let out = transpile(
        "local x = 1\nif x then print(x) end",
        ParseOptions::default(),
        true,
    )
    .expect("source parses");
    assert!(!out.contains("error-expr"));
    assert!(!out.contains("error-stat"));
    assert!(!out.contains("%error-type%"));
}

// =============================================================================
// Nullable contraction boundaries
// =============================================================================

#[test]
fn test_union_with_nil_contracts_either_order() {
    let out = transpile("type M = T | nil", ParseOptions::default(), true)
        .expect("source parses");
    assert!(out.ends_with("T?"), "got {out:?}");

    let out = transpile("type M = nil | T", ParseOptions::default(), true)
        .expect("source parses");
    assert!(out.ends_with("T?"), "got {out:?}");
}

#[test]
fn test_three_way_union_with_nil_does_not_contract() {
    let out = transpile("type U2 = nil | T | U", ParseOptions::default(), true)
        .expect("source parses");
    assert_eq!(out, "type U2 = nil | T | U");
}
