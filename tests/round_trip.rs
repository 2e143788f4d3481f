//! Byte-for-byte round-trip tests: parse with the concrete-syntax
//! side-table, print with types, compare against the original source.

use luz::{transpile, ParseOptions};

fn round_trip(source: &str) {
    let output = transpile(source, ParseOptions::default(), true)
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    assert_eq!(output, source);
}

fn idempotent(source: &str) {
    let once = transpile(source, ParseOptions::default(), true)
        .unwrap_or_else(|e| panic!("parse failed for {source:?}: {e}"));
    let twice = transpile(&once, ParseOptions::default(), true)
        .unwrap_or_else(|e| panic!("reparse failed for {once:?}: {e}"));
    assert_eq!(twice, once);
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn test_local_declarations() {
    round_trip("local x = 1");
    round_trip("local x, y = 1, 2");
    round_trip("local x");
    round_trip("local s = 'hello'");
    round_trip("local ok, err = pcall(f)");
}

#[test]
fn test_local_with_annotations() {
    round_trip("local x: number = 1");
    round_trip("local s: string, n: number = 'a', 1");
    round_trip("local maybe: number? = nil");
}

#[test]
fn test_assignments() {
    round_trip("x = 1");
    round_trip("x, y = y, x");
    round_trip("t.field = 2");
    round_trip("t[1] = 'first'");
    round_trip("a.b.c = d");
}

#[test]
fn test_compound_assignments() {
    round_trip("x += 1");
    round_trip("x -= 1");
    round_trip("x *= 2");
    round_trip("x /= 2");
    round_trip("x //= 2");
    round_trip("x %= 2");
    round_trip("x ^= 2");
    round_trip("s ..= 'more'");
}

#[test]
fn test_do_block() {
    round_trip("do end");
    round_trip("do\n    local inner = 1\nend");
}

#[test]
fn test_while_loop() {
    round_trip("while true do break end");
    round_trip("while n > 0 do\n    n -= 1\nend");
}

#[test]
fn test_repeat_loop() {
    round_trip("repeat until x");
    round_trip("repeat\n    x += 1\nuntil x > 10");
}

#[test]
fn test_numeric_for() {
    round_trip("for i=1,10,2 do end");
    round_trip("for i = 1, 10 do\n    print(i)\nend");
}

#[test]
fn test_generic_for() {
    round_trip("for k, v in pairs(t) do\n    print(k, v)\nend");
    round_trip("for _, item in ipairs(list) do end");
}

#[test]
fn test_if_chains() {
    round_trip("if x then end");
    round_trip("if x then\n    f(x)\nend");
    round_trip("if a then\n    f(a)\nelseif b then\n    g(b)\nelse\n    h()\nend");
    round_trip("if a then\n    f()\nelseif b then\n    g()\nelseif c then\n    h()\nend");
}

#[test]
fn test_return_statements() {
    round_trip("return");
    round_trip("return 1");
    round_trip("return a, b, c");
    round_trip("local function f()\n    return\nend");
}

#[test]
fn test_break_and_continue() {
    round_trip("while true do break end");
    round_trip("for i = 1, 10 do\n    continue\nend");
}

#[test]
fn test_semicolons() {
    round_trip("local x = 1;");
    round_trip("f();\ng()");
}

#[test]
fn test_function_declarations() {
    round_trip("function f() end");
    round_trip("function Account.new(balance)\n    return balance\nend");
    round_trip("function Account:deposit(amount)\n    self.balance += amount\nend");
    round_trip("local function add(a: number, b: number): number\n    return a + b\nend");
}

#[test]
fn test_function_with_generics() {
    round_trip("local function id<T>(x: T): T\n    return x\nend");
    round_trip("local function pack<T...>(...: T...)\n    return ...\nend");
}

#[test]
fn test_varargs() {
    round_trip("local function f(...)\n    return ...\nend");
    round_trip("local function f(...: number)\n    return ...\nend");
    round_trip("local function f(first, ...)\n    return first\nend");
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_binary_operators() {
    round_trip("local x = a + b");
    round_trip("local x = a - b * c / d");
    round_trip("local x = a // b % c");
    round_trip("local x = a ^ b");
    round_trip("local x = a .. b");
    round_trip("local x = a == b and c ~= d");
    round_trip("local x = a < b or a > c");
    round_trip("local x = a <= b and a >= c");
}

#[test]
fn test_unary_operators() {
    round_trip("local x = -a");
    round_trip("local x = not a");
    round_trip("local x = #list");
    round_trip("local x = -(a + b)");
}

#[test]
fn test_grouped_expressions() {
    round_trip("local y = (a + b) * c");
    round_trip("local v = ('x'):rep(3)");
}

#[test]
fn test_calls() {
    round_trip("print(x)");
    round_trip("print(x, y, z)");
    round_trip("f()");
    round_trip("print \"hi\"");
    round_trip("f {1, 2}");
    round_trip("require(script.Parent.module)");
}

#[test]
fn test_method_calls_and_indexing() {
    round_trip("a.b:c(1)");
    round_trip("local v = t.x.y.z");
    round_trip("local v = t[1][2]");
    round_trip("obj:method()");
}

#[test]
fn test_table_constructors() {
    round_trip("local t = {}");
    round_trip("local t = {1, 2, 3}");
    round_trip("local t = { x = 1, [2] = \"two\"; 3 }");
    round_trip("local config = {\n    name = \"luz\",\n    debug = false,\n}");
}

#[test]
fn test_if_else_expression() {
    round_trip("local m = if x then 1 else 2");
}

#[test]
fn test_interpolated_strings() {
    round_trip("local s = `hello {name}!`");
    round_trip("local s = `plain`");
    round_trip("local s = `a{x}b{y}c`");
    round_trip("local s = `v={ {n = 1}}`");
}

#[test]
fn test_string_styles() {
    round_trip("local a = 'single'");
    round_trip("local b = \"double\"");
    round_trip("local c = 'it\\'s'");
    round_trip("local d = 'tab\\tnewline\\n'");
}

#[test]
fn test_long_strings() {
    round_trip("local doc = [[plain long]]");
    round_trip("local doc = [==[\ncontains ]] at depth one\n]==]");
}

#[test]
fn test_number_lexemes_preserved() {
    round_trip("local n = 0x10 + 0b101 + 1_000");
    round_trip("local f = 1.5e-3 + .5");
    round_trip("local big = 9007199254740993");
}

#[test]
fn test_varargs_expression() {
    round_trip("local function f(...)\n    local args = {...}\nend");
}

#[test]
fn test_type_assertion() {
    round_trip("local n = x :: number");
    round_trip("local n = (x :: any).field");
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn test_type_aliases() {
    round_trip("type Id = number");
    round_trip("export type Id = number");
    round_trip("type Point = { x: number, y: number }");
    round_trip("type Maybe<T> = T?");
    round_trip("type Pair<A, B = A> = { first: A, second: B }");
}

#[test]
fn test_type_references() {
    round_trip("local x: m.Point = p");
    round_trip("local m: Map<string, number> = {}");
}

#[test]
fn test_table_types() {
    round_trip("type T = { read x: number, [string]: boolean }");
    round_trip("type A = { number }");
    round_trip("type W = { write log: string }");
}

#[test]
fn test_union_and_intersection_types() {
    round_trip("type U = number | string | nil");
    round_trip("type I = { x: number } & { y: number }");
    round_trip("type Cb = (()->())?");
}

#[test]
fn test_function_types() {
    round_trip("local f: (number, string)->(boolean) = g");
    round_trip("local h: (x: number)->(number) = f");
}

#[test]
fn test_typeof_and_singletons() {
    round_trip("type T = typeof(x)");
    round_trip("type Flag = true");
    round_trip("type Tag = 'ok'");
}

#[test]
fn test_type_function() {
    round_trip("type function double(x)\n    return x\nend");
}

#[test]
fn test_function_return_annotations() {
    round_trip("local function f(): number\n    return 1\nend");
    round_trip("local function f():(number, string)\n    return 1, 'a'\nend");
}

// =============================================================================
// Whole programs
// =============================================================================

#[test]
fn test_small_program() {
    round_trip(
        "local Queue = {}\nQueue.__index = Queue\n\nfunction Queue.new()\n    return setmetatable({ items = {}, first = 1, last = 0 }, Queue)\nend\n\nfunction Queue:push(value)\n    self.last += 1\n    self.items[self.last] = value\nend",
    );
}

#[test]
fn test_typed_program() {
    round_trip(
        "type State = { count: number, label: string? }\n\nlocal function step(state: State): State\n    return { count = state.count + 1, label = state.label }\nend",
    );
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_idempotence_on_normalizing_inputs() {
    // These inputs are not byte-stable (the printer normalizes them), but a
    // second pass must reproduce the first exactly.
    idempotent("type Maybe<T> = T | nil");
    idempotent("local f: (number) -> string = g");
    idempotent("local m = if a then 1 elseif b then 2 else 3");
    idempotent("local x=1");
    idempotent("if x then f() end");
}
